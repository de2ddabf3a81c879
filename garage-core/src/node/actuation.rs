//! Actuation node
//!
//! Waits for a request from the interface node, acknowledges it and
//! serves it: password enrollment and checks against the persisted record,
//! or one of the two timed sequences on the motor and buzzer.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use garage_hal::{ByteStore, Deadline, Link, PeriodicTimer};
use garage_protocol::{Command, CommandChannel};

use super::error::NodeError;
use crate::config::MOTOR_DUTY_PERCENT;
use crate::password::PasswordManager;
use crate::sequencer::{Phase, PhaseSink, Sequence, Sequencer};
use crate::traits::{Buzzer, DoorMotor, MotorDirection, MotorError};

/// Door motor and alarm buzzer, driven by sequencer phases
pub struct Actuators<M, B> {
    motor: M,
    buzzer: B,
}

impl<M: DoorMotor, B: Buzzer> Actuators<M, B> {
    /// Bundle the actuation node's outputs
    pub fn new(motor: M, buzzer: B) -> Self {
        Self { motor, buzzer }
    }

    /// Get the door motor
    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// Get the buzzer
    pub fn buzzer(&self) -> &B {
        &self.buzzer
    }
}

impl<M: DoorMotor, B: Buzzer> PhaseSink for Actuators<M, B> {
    type Error = MotorError;

    fn on_phase(&mut self, _sequence: Sequence, phase: Phase) -> Result<(), MotorError> {
        match phase {
            Phase::Opening => self
                .motor
                .rotate(MotorDirection::Clockwise, MOTOR_DUTY_PERCENT),
            Phase::Holding => self.motor.stop(),
            Phase::Closing => self
                .motor
                .rotate(MotorDirection::CounterClockwise, MOTOR_DUTY_PERCENT),
            Phase::Alarming => {
                self.buzzer.on();
                Ok(())
            }
        }
    }

    fn on_complete(&mut self, sequence: Sequence) -> Result<(), MotorError> {
        match sequence {
            Sequence::Door => self.motor.stop(),
            Sequence::Alarm => {
                self.buzzer.off();
                Ok(())
            }
        }
    }
}

/// Request server on the motor/buzzer/EEPROM board
pub struct ActuationNode<'a, L, S, D, T, M, B> {
    channel: CommandChannel<L>,
    passwords: PasswordManager<S, D>,
    sequencer: &'a Sequencer,
    timer: T,
    actuators: Actuators<M, B>,
    sequence_deadline: Deadline,
}

impl<'a, L, S, D, T, M, B> ActuationNode<'a, L, S, D, T, M, B>
where
    L: Link,
    S: ByteStore,
    D: DelayNs,
    T: PeriodicTimer,
    M: DoorMotor,
    B: Buzzer,
{
    /// Create an actuation node
    ///
    /// `sequencer` must be the instance the tick interrupt behind `timer`
    /// advances.
    pub fn new(
        channel: CommandChannel<L>,
        passwords: PasswordManager<S, D>,
        sequencer: &'a Sequencer,
        timer: T,
        actuators: Actuators<M, B>,
    ) -> Self {
        Self {
            channel,
            passwords,
            sequencer,
            timer,
            actuators,
            sequence_deadline: Deadline::Never,
        }
    }

    /// Bound the wait for a sequence's terminal tick
    pub fn with_sequence_deadline(mut self, deadline: Deadline) -> Self {
        self.sequence_deadline = deadline;
        self
    }

    /// Serve requests until a fatal error
    pub fn run(&mut self) -> Result<Infallible, NodeError<L::Error>> {
        info!("actuation node ready");
        loop {
            self.step()?;
        }
    }

    /// Serve one request
    ///
    /// Returns the command served, or `None` for a byte outside the
    /// vocabulary (acknowledged, then ignored).
    pub fn step(&mut self) -> Result<Option<Command>, NodeError<L::Error>> {
        let byte = self.channel.receive_command()?;
        let Some(command) = Command::from_byte(byte) else {
            warn!("ignoring unknown command byte {=u8:#x}", byte);
            return Ok(None);
        };
        debug!("received {}", command);

        match command {
            Command::PasswordSend => {
                let first = self.channel.receive_payload()?;
                self.passwords.submit(first);
            }
            Command::PasswordConfirmationSend => {
                let second = self.channel.receive_payload()?;
                let reply = self.passwords.confirm(second)?;
                self.channel.send_command(reply)?;
            }
            Command::CheckPassword => {
                let candidate = self.channel.receive_payload()?;
                let reply = self.passwords.verify(candidate)?;
                self.channel.send_command(reply)?;
            }
            Command::CheckIfSaved => {
                let reply = self.passwords.query_saved()?;
                self.channel.send_command(reply)?;
            }
            Command::OpenDoor => self.run_sequence(Sequence::Door)?,
            Command::WrongPassword => self.run_sequence(Sequence::Alarm)?,
            Command::ChangePassword
            | Command::PasswordMatch
            | Command::PasswordNotMatched
            | Command::YesSaved
            | Command::NoSavedPassword => {
                debug!("no action for {}", command);
            }
        }

        Ok(Some(command))
    }

    /// Meet the interface node so both timers start together, then run
    fn run_sequence(&mut self, sequence: Sequence) -> Result<(), NodeError<L::Error>> {
        self.channel.answer_rendezvous()?;
        self.sequencer.run(
            sequence,
            &mut self.timer,
            &mut self.actuators,
            self.sequence_deadline,
        )?;
        Ok(())
    }

    /// Get the command channel
    pub fn channel(&self) -> &CommandChannel<L> {
        &self.channel
    }

    /// Get the password manager
    pub fn passwords(&self) -> &PasswordManager<S, D> {
        &self.passwords
    }

    /// Get the outputs
    pub fn actuators(&self) -> &Actuators<M, B> {
        &self.actuators
    }

    /// Get the sequence timer
    pub fn timer(&self) -> &T {
        &self.timer
    }
}
