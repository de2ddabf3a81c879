//! Alarm buzzer trait

/// On/off alarm buzzer
pub trait Buzzer {
    /// Start sounding
    fn on(&mut self);

    /// Stop sounding
    fn off(&mut self);

    /// Check if the buzzer is currently sounding
    fn is_on(&self) -> bool;
}
