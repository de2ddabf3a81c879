//! Door motor drivers

pub mod dc;

pub use dc::HBridgeMotor;
