//! Persistent byte storage abstractions
//!
//! The actuation node keeps its password record in a byte-addressed
//! non-volatile memory (typically an external I2C EEPROM).

/// Errors from persistent storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Bus transaction failed (NACK, arbitration loss, ...)
    Bus,
    /// Address is outside the device
    AddressOutOfRange,
}

/// Byte-addressed persistent storage
///
/// Implementations perform exactly one device access per call. Write-cycle
/// settling is the caller's responsibility.
pub trait ByteStore {
    /// Write one byte at `address`
    fn write_byte(&mut self, address: u16, value: u8) -> Result<(), StoreError>;

    /// Read one byte from `address`
    fn read_byte(&mut self, address: u16) -> Result<u8, StoreError>;
}
