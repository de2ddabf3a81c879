//! Phase tables and the phase sink trait

use crate::config::{
    ALARM_START_TICK, ALARM_TERMINAL_TICK, DOOR_CLOSING_TICK, DOOR_HOLDING_TICK,
    DOOR_OPENING_TICK, DOOR_TERMINAL_TICK,
};

/// A timed sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sequence {
    /// Open, hold and close the door
    Door,
    /// Sound the alarm after a lockout
    Alarm,
}

/// A point in a sequence where outputs change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Motor clockwise
    Opening,
    /// Motor stopped with the door open
    Holding,
    /// Motor counter-clockwise
    Closing,
    /// Buzzer on
    Alarming,
}

impl Phase {
    /// Bit in the pending-phase mask
    pub(crate) fn bit(self) -> u8 {
        match self {
            Phase::Opening => 1 << 0,
            Phase::Holding => 1 << 1,
            Phase::Closing => 1 << 2,
            Phase::Alarming => 1 << 3,
        }
    }
}

/// Tick thresholds for one sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTable {
    /// `(tick, phase)` pairs in ascending tick order
    pub steps: &'static [(u8, Phase)],
    /// Tick at which the sequence is complete
    pub terminal: u8,
}

impl PhaseTable {
    /// Phase that starts exactly at `tick`, if any
    pub fn phase_at(&self, tick: u8) -> Option<Phase> {
        self.steps
            .iter()
            .find(|(threshold, _)| *threshold == tick)
            .map(|(_, phase)| *phase)
    }
}

/// Door sequence: open for 15 ticks, hold for 3, close for 14
pub const DOOR_TABLE: PhaseTable = PhaseTable {
    steps: &[
        (DOOR_OPENING_TICK, Phase::Opening),
        (DOOR_HOLDING_TICK, Phase::Holding),
        (DOOR_CLOSING_TICK, Phase::Closing),
    ],
    terminal: DOOR_TERMINAL_TICK,
};

/// Alarm sequence: buzzer on from the first tick until the terminal tick
pub const ALARM_TABLE: PhaseTable = PhaseTable {
    steps: &[(ALARM_START_TICK, Phase::Alarming)],
    terminal: ALARM_TERMINAL_TICK,
};

impl Sequence {
    /// Phase table for this sequence
    pub fn table(self) -> &'static PhaseTable {
        match self {
            Sequence::Door => &DOOR_TABLE,
            Sequence::Alarm => &ALARM_TABLE,
        }
    }
}

/// Consumer of sequencer phases
///
/// The actuation node drives its motor and buzzer; the interface node
/// updates its display.
pub trait PhaseSink {
    /// Error type for output operations
    type Error;

    /// A phase threshold was reached
    fn on_phase(&mut self, sequence: Sequence, phase: Phase) -> Result<(), Self::Error>;

    /// The sequence finished (or was torn down); return outputs to rest
    fn on_complete(&mut self, sequence: Sequence) -> Result<(), Self::Error>;
}

impl<T: PhaseSink + ?Sized> PhaseSink for &mut T {
    type Error = T::Error;

    fn on_phase(&mut self, sequence: Sequence, phase: Phase) -> Result<(), Self::Error> {
        (**self).on_phase(sequence, phase)
    }

    fn on_complete(&mut self, sequence: Sequence) -> Result<(), Self::Error> {
        (**self).on_complete(sequence)
    }
}
