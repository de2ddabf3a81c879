//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in garage-hal and garage-core:
//!
//! - Door motor (H-bridge with PWM enable)
//! - Alarm buzzer (GPIO)
//! - Password EEPROM (24Cxx over I2C)
//! - 4x4 matrix keypad
//! - HD44780 character LCD (4-bit bus)
//! - Serial link over any `embedded-io` reader/writer pair

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod eeprom;
pub mod keypad;
pub mod lcd;
pub mod link;
pub mod motor;
