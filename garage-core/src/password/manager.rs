//! Enrollment and verification
//!
//! Enrollment takes two entries: the first is held in memory, the second
//! must match it element-wise before anything is written. Verification
//! compares a candidate against the stored record and never writes.

use embedded_hal::delay::DelayNs;
use garage_hal::{ByteStore, StoreError};
use garage_protocol::{Command, Password};

use super::store::PasswordStore;

/// Password lifecycle on the actuation node
pub struct PasswordManager<S, D> {
    store: PasswordStore<S, D>,
    /// First enrollment entry waiting for its confirmation
    pending: Option<Password>,
}

impl<S: ByteStore, D: DelayNs> PasswordManager<S, D> {
    /// Create a manager over `store`
    pub fn new(store: PasswordStore<S, D>) -> Self {
        Self {
            store,
            pending: None,
        }
    }

    /// Hold the first enrollment entry
    ///
    /// Replaces any earlier unconfirmed entry.
    pub fn submit(&mut self, first: Password) {
        self.pending = Some(first);
    }

    /// Compare the confirmation against the held entry
    ///
    /// On a full match the entry is persisted and [`Command::PasswordMatch`]
    /// returned. Otherwise the held entry is discarded, storage is left
    /// untouched and [`Command::PasswordNotMatched`] returned. A
    /// confirmation with nothing held is a mismatch.
    pub fn confirm(&mut self, second: Password) -> Result<Command, StoreError> {
        match self.pending.take() {
            Some(first) if first.matches(second.as_bytes()) => {
                self.store.save(&first)?;
                info!("password enrolled");
                Ok(Command::PasswordMatch)
            }
            Some(_) => {
                debug!("confirmation differs from first entry");
                Ok(Command::PasswordNotMatched)
            }
            None => {
                warn!("confirmation without a first entry");
                Ok(Command::PasswordNotMatched)
            }
        }
    }

    /// Compare a candidate against the stored record
    pub fn verify(&mut self, candidate: Password) -> Result<Command, StoreError> {
        let stored = self.store.load()?;
        if stored.matches(candidate.as_bytes()) {
            Ok(Command::PasswordMatch)
        } else {
            Ok(Command::PasswordNotMatched)
        }
    }

    /// Report whether a password has been stored
    pub fn query_saved(&mut self) -> Result<Command, StoreError> {
        if self.store.is_unset()? {
            Ok(Command::NoSavedPassword)
        } else {
            Ok(Command::YesSaved)
        }
    }

    /// Check if a first entry is waiting for confirmation
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Get the underlying record store
    pub fn store(&self) -> &PasswordStore<S, D> {
        &self.store
    }

    /// Release the underlying record store
    pub fn into_store(self) -> PasswordStore<S, D> {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RamStore, TallyDelay};
    use proptest::prelude::*;

    fn manager() -> PasswordManager<RamStore, TallyDelay> {
        PasswordManager::new(PasswordStore::new(RamStore::blank(), TallyDelay::default()))
    }

    fn pw(bytes: [u8; 5]) -> Password {
        Password::from_bytes(bytes)
    }

    #[test]
    fn test_enroll_matching_entries() {
        let mut m = manager();
        m.submit(pw([1, 2, 3, 4, 5]));
        assert!(m.is_pending());
        assert_eq!(m.confirm(pw([1, 2, 3, 4, 5])), Ok(Command::PasswordMatch));
        assert!(!m.is_pending());
        assert_eq!(m.store().store().record(0x0311), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_enroll_mismatch_writes_nothing() {
        let mut m = manager();
        m.submit(pw([1, 2, 3, 4, 5]));
        assert_eq!(
            m.confirm(pw([1, 2, 3, 4, 6])),
            Ok(Command::PasswordNotMatched)
        );
        assert_eq!(m.store().store().writes, 0);
        assert!(!m.is_pending());
    }

    #[test]
    fn test_confirm_without_submit_is_mismatch() {
        let mut m = manager();
        assert_eq!(
            m.confirm(pw([1, 2, 3, 4, 5])),
            Ok(Command::PasswordNotMatched)
        );
        assert_eq!(m.store().store().writes, 0);
    }

    #[test]
    fn test_mismatch_discards_first_entry() {
        let mut m = manager();
        m.submit(pw([1, 2, 3, 4, 5]));
        m.confirm(pw([5, 4, 3, 2, 1])).unwrap();
        // The old first entry must not be reused
        assert_eq!(
            m.confirm(pw([1, 2, 3, 4, 5])),
            Ok(Command::PasswordNotMatched)
        );
    }

    #[test]
    fn test_verify() {
        let mut m = manager();
        m.submit(pw([1, 2, 3, 4, 5]));
        m.confirm(pw([1, 2, 3, 4, 5])).unwrap();
        let writes = m.store().store().writes;

        assert_eq!(m.verify(pw([1, 2, 3, 4, 5])), Ok(Command::PasswordMatch));
        assert_eq!(
            m.verify(pw([1, 2, 3, 4, 6])),
            Ok(Command::PasswordNotMatched)
        );
        assert_eq!(m.store().store().writes, writes);
        assert_eq!(m.store().store().record(0x0311), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_change_overwrites_record() {
        let mut m = manager();
        m.submit(pw([1, 2, 3, 4, 5]));
        m.confirm(pw([1, 2, 3, 4, 5])).unwrap();
        m.submit(pw([0, 0, 7, 0, 0]));
        m.confirm(pw([0, 0, 7, 0, 0])).unwrap();

        assert_eq!(m.verify(pw([0, 0, 7, 0, 0])), Ok(Command::PasswordMatch));
        assert_eq!(
            m.verify(pw([1, 2, 3, 4, 5])),
            Ok(Command::PasswordNotMatched)
        );
    }

    #[test]
    fn test_query_saved() {
        let mut m = manager();
        assert_eq!(m.query_saved(), Ok(Command::NoSavedPassword));
        m.submit(pw([1, 2, 3, 4, 5]));
        m.confirm(pw([1, 2, 3, 4, 5])).unwrap();
        assert_eq!(m.query_saved(), Ok(Command::YesSaved));
    }

    #[test]
    fn test_store_failure_surfaces() {
        let mut ram = RamStore::blank();
        ram.fail = true;
        let mut m = PasswordManager::new(PasswordStore::new(ram, TallyDelay::default()));
        m.submit(pw([1, 2, 3, 4, 5]));
        assert_eq!(m.confirm(pw([1, 2, 3, 4, 5])), Err(StoreError::Bus));
        assert_eq!(m.verify(pw([1, 2, 3, 4, 5])), Err(StoreError::Bus));
        assert_eq!(m.query_saved(), Err(StoreError::Bus));
    }

    proptest! {
        #[test]
        fn prop_mismatched_confirmation_never_writes(
            a in proptest::array::uniform5(0u8..10),
            b in proptest::array::uniform5(0u8..10),
        ) {
            prop_assume!(a != b);
            let mut m = manager();
            m.submit(pw(a));
            prop_assert_eq!(m.confirm(pw(b)), Ok(Command::PasswordNotMatched));
            prop_assert_eq!(m.store().store().writes, 0);
        }

        #[test]
        fn prop_query_saved_iff_not_all_sentinel(
            record in proptest::array::uniform5(0u8..4),
        ) {
            let mut m = manager();
            m.submit(pw(record));
            m.confirm(pw(record)).unwrap();
            let expected = if record == [1; 5] {
                Command::NoSavedPassword
            } else {
                Command::YesSaved
            };
            prop_assert_eq!(m.query_saved(), Ok(expected));
        }
    }
}
