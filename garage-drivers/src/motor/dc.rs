//! DC door motor behind an H-bridge
//!
//! Two direction inputs select the rotation, a PWM channel on the bridge
//! enable pin sets the speed:
//!
//! | IN1 | IN2 | Motion            |
//! |-----|-----|-------------------|
//! | 0   | 0   | stop              |
//! | 1   | 0   | clockwise         |
//! | 0   | 1   | counter-clockwise |

use embedded_hal::pwm::SetDutyCycle;
use garage_core::traits::{DoorMotor, MotorDirection, MotorError};
use garage_hal::OutputPin;

/// H-bridge DC motor driver (L293D, L298N, ...)
pub struct HBridgeMotor<A, B, E> {
    in1: A,
    in2: B,
    enable: E,
    direction: MotorDirection,
    duty: u8,
}

impl<A: OutputPin, B: OutputPin, E: SetDutyCycle> HBridgeMotor<A, B, E> {
    /// Create a driver with the motor stopped
    pub fn new(in1: A, in2: B, enable: E) -> Result<Self, MotorError> {
        let mut motor = Self {
            in1,
            in2,
            enable,
            direction: MotorDirection::Stop,
            duty: 0,
        };
        motor.rotate(MotorDirection::Stop, 0)?;
        Ok(motor)
    }

    /// Get the duty cycle last applied (percent)
    pub fn duty(&self) -> u8 {
        self.duty
    }
}

impl<A: OutputPin, B: OutputPin, E: SetDutyCycle> DoorMotor for HBridgeMotor<A, B, E> {
    fn rotate(&mut self, direction: MotorDirection, duty_percent: u8) -> Result<(), MotorError> {
        if duty_percent > 100 {
            return Err(MotorError::InvalidDuty);
        }

        let duty = match direction {
            MotorDirection::Stop => {
                self.in1.set_low();
                self.in2.set_low();
                0
            }
            MotorDirection::Clockwise => {
                self.in1.set_high();
                self.in2.set_low();
                duty_percent
            }
            MotorDirection::CounterClockwise => {
                self.in1.set_low();
                self.in2.set_high();
                duty_percent
            }
        };

        self.enable
            .set_duty_cycle_percent(duty)
            .map_err(|_| MotorError::Pwm)?;
        self.direction = direction;
        self.duty = duty;
        Ok(())
    }

    fn direction(&self) -> MotorDirection {
        self.direction
    }
}
