//! SmartGarage inter-node protocol
//!
//! This crate defines the byte-level protocol spoken between the interface
//! node (keypad + LCD) and the actuation node (motor, buzzer, EEPROM). Both
//! firmwares depend on it, so the command vocabulary exists exactly once.
//!
//! # Protocol Overview
//!
//! The link carries no frames. Every exchange starts with a READY
//! rendezvous so the sender never transmits into a peer that is not
//! listening:
//!
//! ```text
//!  sender                     receiver
//!  ──────                     ────────
//!  READY (0xFF)  ───────────▶  (discard until READY)
//!                ◀───────────  READY (0xFF)
//!  COMMAND       ───────────▶
//!                ◀───────────  DONE (0xFE)   actuation node only
//! ```
//!
//! Password payloads use the same rendezvous followed by exactly five raw
//! digit bytes. There is no length prefix, checksum or escaping.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod channel;
pub mod command;
pub mod password;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use channel::{ChannelError, CommandChannel};
pub use command::{Command, DONE, READY};
pub use password::{Password, PASSWORD_LEN};
