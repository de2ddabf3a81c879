//! Sequencer tick timer
//!
//! The tick "interrupt" is [`tick_task`], spawned on an
//! `InterruptExecutor` so it preempts the blocking node loop running in
//! thread mode. [`TickTimer`] starts and stops it through a signal.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use garage_core::sequencer::Sequencer;
use garage_hal::{PeriodicTimer, TimerConfig};

/// Commands from the node loop to the tick task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum TimerCommand {
    Start { period_ms: u32 },
    Stop,
}

/// Control signal for the tick task
static TIMER_CONTROL: Signal<CriticalSectionRawMutex, TimerCommand> = Signal::new();

/// Handle used by the node loop to start and stop ticks
pub struct TickTimer {
    _private: (),
}

impl TickTimer {
    /// Create the handle
    ///
    /// [`tick_task`] must be running for ticks to be delivered.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodicTimer for TickTimer {
    fn start(&mut self, config: &TimerConfig) {
        // Compare and overflow behave the same on a Ticker
        TIMER_CONTROL.signal(TimerCommand::Start {
            period_ms: config.period_ms,
        });
    }

    fn stop(&mut self) {
        TIMER_CONTROL.signal(TimerCommand::Stop);
    }
}

/// Tick task - advances `sequencer` once per period while started
#[embassy_executor::task]
pub async fn tick_task(sequencer: &'static Sequencer) {
    #[cfg(feature = "defmt")]
    defmt::info!("Tick task started");

    let mut period_ms = None;
    loop {
        period_ms = match period_ms {
            None => match TIMER_CONTROL.wait().await {
                TimerCommand::Start { period_ms } => Some(period_ms),
                TimerCommand::Stop => None,
            },
            Some(ms) => run_ticks(sequencer, ms).await,
        };
    }
}

/// Deliver ticks until the next command; returns the new period, if any
async fn run_ticks(sequencer: &Sequencer, period_ms: u32) -> Option<u32> {
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(period_ms)));
    loop {
        match select(ticker.next(), TIMER_CONTROL.wait()).await {
            Either::First(()) => {
                sequencer.on_tick();
            }
            Either::Second(TimerCommand::Start { period_ms }) => return Some(period_ms),
            Either::Second(TimerCommand::Stop) => return None,
        }
    }
}
