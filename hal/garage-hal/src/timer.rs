//! Periodic timer abstractions
//!
//! The actuation sequencer is driven by one periodic interrupt per node.
//! Which sequence the interrupt advances is decided by the sequencer's
//! active-sequence tag, so the timer itself only needs start and stop.

/// Timer counting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerMode {
    /// Fire on counter overflow
    Overflow,
    /// Fire on compare match and restart the counter
    Compare,
}

/// Periodic timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Interval between interrupts in milliseconds
    pub period_ms: u32,
    /// Counting mode
    pub mode: TimerMode,
}

/// Periodic interrupt source
pub trait PeriodicTimer {
    /// Arm the timer; the first interrupt fires one period from now
    fn start(&mut self, config: &TimerConfig);

    /// Disarm the timer; no interrupt fires after this returns
    fn stop(&mut self);

    /// Called by busy-wait loops between polls of shared tick state
    ///
    /// Hardware timers spin here. Simulated timers use it to deliver
    /// their next tick.
    fn idle(&mut self) {
        core::hint::spin_loop();
    }
}

impl<T: PeriodicTimer + ?Sized> PeriodicTimer for &mut T {
    fn start(&mut self, config: &TimerConfig) {
        (**self).start(config)
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn idle(&mut self) {
        (**self).idle()
    }
}
