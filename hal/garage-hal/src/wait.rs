//! Bounded waiting for busy-poll loops
//!
//! Every wait in the garage protocol is a busy-poll. On hardware these
//! polls are unbounded; a [`Deadline`] lets a caller cap the number of
//! empty polls so a silent peer turns into an error instead of a hang.

/// How long a busy-poll loop may keep polling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Deadline {
    /// Poll forever
    #[default]
    Never,
    /// Give up after this many empty polls
    Polls(u32),
}

/// Marker returned when a [`Budget`] runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Expired;

impl Deadline {
    /// Start a fresh budget for one wait
    pub fn budget(self) -> Budget {
        Budget {
            remaining: match self {
                Deadline::Never => None,
                Deadline::Polls(n) => Some(n),
            },
        }
    }

    /// Check if this deadline never expires
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Deadline::Never)
    }
}

/// Remaining polls for a single wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    remaining: Option<u32>,
}

impl Budget {
    /// Account for one empty poll
    pub fn spend(&mut self) -> Result<(), Expired> {
        match self.remaining.as_mut() {
            None => Ok(()),
            Some(0) => Err(Expired),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_does_not_expire() {
        let mut budget = Deadline::Never.budget();
        for _ in 0..10_000 {
            assert_eq!(budget.spend(), Ok(()));
        }
    }

    #[test]
    fn test_polls_expire_after_limit() {
        let mut budget = Deadline::Polls(3).budget();
        assert_eq!(budget.spend(), Ok(()));
        assert_eq!(budget.spend(), Ok(()));
        assert_eq!(budget.spend(), Ok(()));
        assert_eq!(budget.spend(), Err(Expired));
    }

    #[test]
    fn test_each_budget_is_fresh() {
        let deadline = Deadline::Polls(1);
        let mut first = deadline.budget();
        assert_eq!(first.spend(), Ok(()));
        assert_eq!(first.spend(), Err(Expired));

        let mut second = deadline.budget();
        assert_eq!(second.spend(), Ok(()));
    }
}
