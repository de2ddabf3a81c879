//! Node state machines
//!
//! [`ActuationNode`] serves requests on the motor/buzzer/EEPROM board.
//! [`InterfaceNode`] drives the keypad/LCD board and issues those requests.
//! Both own their command channel end, their half of the timing and their
//! outputs; there is no global state.

mod actuation;
mod error;
mod interface;
mod screen;

pub use actuation::{ActuationNode, Actuators};
pub use error::NodeError;
pub use interface::{AttemptResult, InterfaceNode, MenuChoice};
pub use screen::Screen;
