//! Sequencer state shared between the tick interrupt and the main flow

use garage_hal::{Deadline, PeriodicTimer};
use portable_atomic::{AtomicU8, Ordering};

use super::phase::{PhaseSink, Sequence};
use crate::config::TICK_TIMER;

// Active-sequence tags
const IDLE: u8 = 0;
const DOOR: u8 = 1;
const ALARM: u8 = 2;

/// Errors from running a sequence to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError<E> {
    /// The join ran out of polls before the terminal tick
    Timeout,
    /// The phase sink failed
    Output(E),
}

/// Tick counter, active-sequence tag and pending-phase mask
///
/// Lives in a `static` on hardware: the tick interrupt calls
/// [`Sequencer::on_tick`], the main flow calls [`Sequencer::run`].
#[derive(Debug)]
pub struct Sequencer {
    active: AtomicU8,
    ticks: AtomicU8,
    pending: AtomicU8,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    /// Create an idle sequencer
    pub const fn new() -> Self {
        Self {
            active: AtomicU8::new(IDLE),
            ticks: AtomicU8::new(0),
            pending: AtomicU8::new(0),
        }
    }

    /// Select `sequence` and zero the counter
    ///
    /// Must be called with the timer stopped.
    pub fn arm(&self, sequence: Sequence) {
        self.ticks.store(0, Ordering::Relaxed);
        self.pending.store(0, Ordering::Relaxed);
        let tag = match sequence {
            Sequence::Door => DOOR,
            Sequence::Alarm => ALARM,
        };
        self.active.store(tag, Ordering::Release);
    }

    /// Return to idle; further ticks are ignored
    pub fn disarm(&self) {
        self.active.store(IDLE, Ordering::Release);
        self.ticks.store(0, Ordering::Relaxed);
        self.pending.store(0, Ordering::Relaxed);
    }

    /// Get the armed sequence
    pub fn active(&self) -> Option<Sequence> {
        match self.active.load(Ordering::Acquire) {
            DOOR => Some(Sequence::Door),
            ALARM => Some(Sequence::Alarm),
            _ => None,
        }
    }

    /// Get the number of ticks since the sequence was armed
    pub fn ticks(&self) -> u8 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Check if the armed sequence has reached its terminal tick
    pub fn is_complete(&self) -> bool {
        self.active()
            .is_some_and(|sequence| self.ticks() >= sequence.table().terminal)
    }

    /// Advance by one tick (interrupt context)
    ///
    /// Returns the phase that became pending, if this tick hit a threshold.
    /// Does nothing when idle or once the terminal tick is reached.
    pub fn on_tick(&self) -> Option<super::Phase> {
        let table = self.active()?.table();
        let tick = self.ticks.load(Ordering::Relaxed);
        if tick >= table.terminal {
            return None;
        }

        let tick = tick + 1;
        let phase = table.phase_at(tick);
        if let Some(phase) = phase {
            self.pending.fetch_or(phase.bit(), Ordering::AcqRel);
        }
        self.ticks.store(tick, Ordering::Release);
        phase
    }

    /// Apply pending phases to `sink` in table order
    pub fn drain<S: PhaseSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        let Some(sequence) = self.active() else {
            return Ok(());
        };

        let pending = self.pending.swap(0, Ordering::AcqRel);
        if pending == 0 {
            return Ok(());
        }

        for &(_, phase) in sequence.table().steps {
            if pending & phase.bit() != 0 {
                debug!("{} phase {}", sequence, phase);
                sink.on_phase(sequence, phase)?;
            }
        }
        Ok(())
    }

    /// Run `sequence` to its terminal tick
    ///
    /// Arms the sequencer, starts `timer`, applies phases as they become
    /// pending and waits for the terminal tick. The timer is stopped, the
    /// sequencer disarmed and `sink.on_complete` called on every exit path.
    pub fn run<T, S>(
        &self,
        sequence: Sequence,
        timer: &mut T,
        sink: &mut S,
        deadline: Deadline,
    ) -> Result<(), SequenceError<S::Error>>
    where
        T: PeriodicTimer,
        S: PhaseSink,
    {
        info!("{} sequence started", sequence);
        self.arm(sequence);
        timer.start(&TICK_TIMER);

        let joined = self.join(sequence, timer, sink, deadline);

        timer.stop();
        let drained = self.drain(sink).map_err(SequenceError::Output);
        self.disarm();
        let teardown = sink.on_complete(sequence).map_err(SequenceError::Output);

        if joined.is_err() {
            warn!("{} sequence aborted", sequence);
        } else {
            info!("{} sequence complete", sequence);
        }
        joined.and(drained).and(teardown)
    }

    /// Busy-wait for the terminal tick, draining phases between polls
    fn join<T, S>(
        &self,
        sequence: Sequence,
        timer: &mut T,
        sink: &mut S,
        deadline: Deadline,
    ) -> Result<(), SequenceError<S::Error>>
    where
        T: PeriodicTimer,
        S: PhaseSink,
    {
        let terminal = sequence.table().terminal;
        let mut budget = deadline.budget();
        loop {
            self.drain(sink).map_err(SequenceError::Output)?;
            if self.ticks() >= terminal {
                return Ok(());
            }
            budget.spend().map_err(|_| SequenceError::Timeout)?;
            timer.idle();
        }
    }
}
