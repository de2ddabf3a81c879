//! Door motor trait

/// Rotation command for the door motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorDirection {
    /// Both bridge inputs low, motor coasts
    #[default]
    Stop,
    /// Opening direction
    Clockwise,
    /// Closing direction
    CounterClockwise,
}

/// Errors that can occur with motor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Duty cycle above 100 %
    InvalidDuty,
    /// The PWM peripheral rejected the duty cycle
    Pwm,
}

/// DC door motor behind an H-bridge
pub trait DoorMotor {
    /// Drive the motor in `direction` at `duty_percent` (0-100)
    ///
    /// [`MotorDirection::Stop`] ignores the duty cycle.
    fn rotate(&mut self, direction: MotorDirection, duty_percent: u8) -> Result<(), MotorError>;

    /// Stop the motor
    fn stop(&mut self) -> Result<(), MotorError> {
        self.rotate(MotorDirection::Stop, 0)
    }

    /// Get the direction last commanded
    fn direction(&self) -> MotorDirection;
}
