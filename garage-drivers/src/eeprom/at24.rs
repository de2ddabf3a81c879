//! 24Cxx I2C EEPROM (24C01 to 24C16)
//!
//! Small parts in this family take one word-address byte. The upper three
//! address bits select a 256-byte block and travel in the device address,
//! so a 24C16 answers on 0x50..=0x57.

use embedded_hal::i2c::I2c;
use garage_hal::{ByteStore, StoreError};

/// Base 7-bit device address with A2..A0 tied low
pub const BASE_ADDRESS: u8 = 0x50;

/// 24C16 capacity in bytes
pub const CAPACITY_24C16: u16 = 2048;

/// 24Cxx EEPROM on an I2C bus
///
/// Performs exactly one bus transaction per call. The part is busy for up
/// to 5 ms after a write; waiting is the caller's job.
pub struct At24<I> {
    i2c: I,
    capacity: u16,
}

impl<I: I2c> At24<I> {
    /// Create a driver for a 24C16
    pub fn new(i2c: I) -> Self {
        Self::with_capacity(i2c, CAPACITY_24C16)
    }

    /// Create a driver for a smaller part
    ///
    /// Capacities above 2048 bytes need two word-address bytes and are
    /// clamped.
    pub fn with_capacity(i2c: I, capacity: u16) -> Self {
        Self {
            i2c,
            capacity: capacity.min(CAPACITY_24C16),
        }
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }

    /// Split a byte address into device address and word address
    fn locate(&self, address: u16) -> Result<(u8, u8), StoreError> {
        if address >= self.capacity {
            return Err(StoreError::AddressOutOfRange);
        }
        let block = ((address >> 8) & 0x07) as u8;
        Ok((BASE_ADDRESS | block, (address & 0xFF) as u8))
    }
}

impl<I: I2c> ByteStore for At24<I> {
    fn write_byte(&mut self, address: u16, value: u8) -> Result<(), StoreError> {
        let (device, word) = self.locate(address)?;
        self.i2c
            .write(device, &[word, value])
            .map_err(|_| StoreError::Bus)
    }

    fn read_byte(&mut self, address: u16) -> Result<u8, StoreError> {
        let (device, word) = self.locate(address)?;
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(device, &[word], &mut buf)
            .map_err(|_| StoreError::Bus)?;
        Ok(buf[0])
    }
}
