//! Actuator traits
//!
//! These traits define the interface between the node logic and the
//! physical outputs on the actuation node.

pub mod buzzer;
pub mod motor;

pub use buzzer::Buzzer;
pub use motor::{DoorMotor, MotorDirection, MotorError};
