//! Wrong-password lockout policy
//!
//! Counts consecutive verification mismatches on the interface node. The
//! third one locks the keypad out for the length of the alarm sequence.

use crate::config::MAX_WRONG_ATTEMPTS;

/// Result of recording a mismatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttemptOutcome {
    /// Below the limit; the user may try again
    Retry {
        /// Mismatches left before lockout
        remaining: u8,
    },
    /// Limit reached; raise the alarm
    Lockout,
}

/// Consecutive wrong-attempt counter
#[derive(Debug, Clone, Default)]
pub struct WrongAttempts {
    count: u8,
}

impl WrongAttempts {
    /// Create a counter at zero
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Get the current count
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Count a mismatch
    ///
    /// The count stays at the limit until [`WrongAttempts::reset`].
    pub fn record_mismatch(&mut self) -> AttemptOutcome {
        self.count = self.count.saturating_add(1).min(MAX_WRONG_ATTEMPTS);
        if self.count >= MAX_WRONG_ATTEMPTS {
            AttemptOutcome::Lockout
        } else {
            AttemptOutcome::Retry {
                remaining: MAX_WRONG_ATTEMPTS - self.count,
            }
        }
    }

    /// Clear after a match or a completed lockout
    pub fn reset(&mut self) {
        self.count = 0;
    }
}
