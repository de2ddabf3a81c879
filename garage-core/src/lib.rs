//! Board-agnostic node logic for the SmartGarage door controller
//!
//! This crate contains everything both nodes do that does not depend on a
//! particular chip:
//!
//! - Design-time constants (timing, thresholds, storage layout)
//! - Actuator traits for the door motor and alarm buzzer
//! - The tick-driven actuation sequencer
//! - Password persistence and the enrollment/verification manager
//! - The wrong-password lockout policy
//! - Both node state machines (actuation and interface)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This must go first so the logging macros are visible to later modules
mod fmt;

pub mod config;
pub mod lockout;
pub mod node;
pub mod password;
pub mod sequencer;
pub mod traits;

#[cfg(test)]
mod testing;
