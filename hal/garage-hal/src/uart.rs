//! Serial link abstractions
//!
//! The two nodes share one half-duplex UART with no framing of its own.
//! [`Link`] is the byte primitive the command channel is built on.

/// Byte-oriented serial link to the peer node
///
/// Implementations move single bytes; all framing and turn-taking lives
/// in the command channel on top of this trait.
pub trait Link {
    /// Error type for link operations (overrun, framing, ...)
    type Error;

    /// Send one byte to the peer
    ///
    /// Blocks until the byte has been accepted by the transmitter.
    fn send_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Take one received byte if one is available
    ///
    /// Returns `Ok(None)` immediately when nothing has arrived.
    fn try_receive_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Receive one byte, blocking until it arrives
    ///
    /// There is no timeout: a silent peer blocks the caller forever.
    fn receive_byte(&mut self) -> Result<u8, Self::Error> {
        loop {
            if let Some(byte) = self.try_receive_byte()? {
                return Ok(byte);
            }
            core::hint::spin_loop();
        }
    }
}

impl<T: Link + ?Sized> Link for &mut T {
    type Error = T::Error;

    fn send_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).send_byte(byte)
    }

    fn try_receive_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        (**self).try_receive_byte()
    }

    fn receive_byte(&mut self) -> Result<u8, Self::Error> {
        (**self).receive_byte()
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    /// 9600 baud, 8N1: the link settings both nodes are built with
    fn default() -> Self {
        Self {
            baudrate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
