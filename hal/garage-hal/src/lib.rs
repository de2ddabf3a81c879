//! SmartGarage Hardware Abstraction Layer
//!
//! This crate defines the collaborator traits that both garage nodes are
//! written against. Chip-specific crates (and the host-side test doubles)
//! implement them, so the protocol and node logic never touch registers.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  garage-firmware / garage-panel-fw       │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  garage-core, garage-protocol            │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  garage-hal (this crate - traits)        │
//! └──────────────────────────────────────────┘
//!          │                        │
//!          ▼                        ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ garage-drivers  │     │ garage-hal-rp2040│
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::Link`] - Byte-oriented serial link between the nodes
//! - [`timer::PeriodicTimer`] - Periodic tick source for the sequencer
//! - [`eeprom::ByteStore`] - Byte-addressed persistent storage
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`keypad::Keypad`] - Key entry on the interface node
//! - [`display::TextDisplay`] - Character display on the interface node

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod eeprom;
pub mod gpio;
pub mod keypad;
pub mod timer;
pub mod uart;
pub mod wait;

// Re-export key traits at crate root for convenience
pub use display::{DisplayError, TextDisplay};
pub use eeprom::{ByteStore, StoreError};
pub use gpio::{InputPin, OutputPin};
pub use keypad::{Key, Keypad};
pub use timer::{PeriodicTimer, TimerConfig, TimerMode};
pub use uart::{Link, UartConfig};
pub use wait::{Budget, Deadline, Expired};
