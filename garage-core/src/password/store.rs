//! Password record in persistent storage

use embedded_hal::delay::DelayNs;
use garage_hal::{ByteStore, StoreError};
use garage_protocol::{Password, PASSWORD_LEN};

use crate::config::{RECORD_BASE, SETTLE_MS, UNSET_SENTINEL};

/// Five-byte password record at a fixed address
///
/// Every byte access is followed by a settle delay so the next access
/// never hits the device mid write-cycle.
pub struct PasswordStore<S, D> {
    store: S,
    delay: D,
    base: u16,
}

impl<S: ByteStore, D: DelayNs> PasswordStore<S, D> {
    /// Create a store for the record at [`RECORD_BASE`]
    pub fn new(store: S, delay: D) -> Self {
        Self::at(store, delay, RECORD_BASE)
    }

    /// Create a store for a record at `base`
    pub fn at(store: S, delay: D, base: u16) -> Self {
        Self { store, delay, base }
    }

    /// Overwrite the record
    pub fn save(&mut self, password: &Password) -> Result<(), StoreError> {
        for (offset, &byte) in password.as_bytes().iter().enumerate() {
            self.store.write_byte(self.address(offset)?, byte)?;
            self.delay.delay_ms(SETTLE_MS);
        }
        Ok(())
    }

    /// Read the record back
    pub fn load(&mut self) -> Result<Password, StoreError> {
        let mut bytes = [0u8; PASSWORD_LEN];
        for (offset, slot) in bytes.iter_mut().enumerate() {
            *slot = self.store.read_byte(self.address(offset)?)?;
            self.delay.delay_ms(SETTLE_MS);
        }
        Ok(Password::from_bytes(bytes))
    }

    /// Check if the record still holds the unset sentinel in every byte
    ///
    /// A stored password of all `1`s is indistinguishable from no password.
    pub fn is_unset(&mut self) -> Result<bool, StoreError> {
        Ok(self.load()?.is_all(UNSET_SENTINEL))
    }

    /// Get the backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Release the backing store and delay
    pub fn into_parts(self) -> (S, D) {
        (self.store, self.delay)
    }

    fn address(&self, offset: usize) -> Result<u16, StoreError> {
        u16::try_from(offset)
            .ok()
            .and_then(|offset| self.base.checked_add(offset))
            .ok_or(StoreError::AddressOutOfRange)
    }
}
