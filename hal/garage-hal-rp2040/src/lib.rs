//! RP2040-specific HAL for the SmartGarage firmware
//!
//! This crate provides RP2040 implementations of the shared `garage-hal`
//! traits:
//!
//! - GPIO wrappers for embassy-rp pins
//! - Sequencer tick timer driven by a high-priority interrupt executor
//! - UART pin mapping and configuration

#![no_std]

pub mod gpio;
pub mod timer;
pub mod uart;

pub use gpio::{RpInput, RpOutput};
pub use timer::{tick_task, TickTimer};
