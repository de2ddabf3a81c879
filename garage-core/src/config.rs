//! Design-time constants
//!
//! Timing is fixed at build time. Both nodes link the same values, which is
//! what keeps the interface node's messages in step with the actuation
//! node's motor.

use garage_hal::{TimerConfig, TimerMode};

pub use garage_protocol::PASSWORD_LEN;

/// Byte value of every record position before a password is stored
pub const UNSET_SENTINEL: u8 = 0x01;

/// Address of the first password byte in persistent storage
pub const RECORD_BASE: u16 = 0x0311;

/// Settle time after each persistent byte read or write
pub const SETTLE_MS: u32 = 10;

/// Sequencer tick period
pub const TICK_PERIOD_MS: u32 = 1000;

/// Timer setup used for every timed sequence
pub const TICK_TIMER: TimerConfig = TimerConfig {
    period_ms: TICK_PERIOD_MS,
    mode: TimerMode::Compare,
};

/// Door: motor starts opening
pub const DOOR_OPENING_TICK: u8 = 1;
/// Door: motor stops, door held open
pub const DOOR_HOLDING_TICK: u8 = 16;
/// Door: motor starts closing
pub const DOOR_CLOSING_TICK: u8 = 19;
/// Door: sequence complete
pub const DOOR_TERMINAL_TICK: u8 = 33;

/// Alarm: buzzer switched on
pub const ALARM_START_TICK: u8 = 1;
/// Alarm: sequence complete
pub const ALARM_TERMINAL_TICK: u8 = 60;

/// Consecutive mismatches that trigger the alarm
pub const MAX_WRONG_ATTEMPTS: u8 = 3;

/// Motor duty cycle while opening or closing (percent)
pub const MOTOR_DUTY_PERCENT: u8 = 100;

/// Pause after each accepted key press on the interface node
pub const KEY_REPEAT_MS: u32 = 250;
