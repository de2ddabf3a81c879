//! Serial link over `embedded-io`
//!
//! Adapts any blocking reader/writer pair (a split buffered UART on
//! hardware) to the byte-level [`Link`] the command channel runs on.

use embedded_io::{Read, ReadReady, Write};
use garage_hal::Link;

/// Link errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The receiver reported an error (overrun, framing, parity, ...)
    Read,
    /// The transmitter reported an error
    Write,
    /// The reader returned end-of-stream
    Closed,
}

/// Byte link over a split serial port
pub struct IoLink<R, W> {
    rx: R,
    tx: W,
}

impl<R: Read + ReadReady, W: Write> IoLink<R, W> {
    /// Create a link from the two halves of a serial port
    pub fn new(rx: R, tx: W) -> Self {
        Self { rx, tx }
    }

    /// Release the serial halves
    pub fn release(self) -> (R, W) {
        (self.rx, self.tx)
    }

    fn read_one(&mut self) -> Result<u8, LinkError> {
        let mut buf = [0u8; 1];
        match self.rx.read(&mut buf) {
            Ok(0) => Err(LinkError::Closed),
            Ok(_) => Ok(buf[0]),
            Err(_) => Err(LinkError::Read),
        }
    }
}

impl<R: Read + ReadReady, W: Write> Link for IoLink<R, W> {
    type Error = LinkError;

    fn send_byte(&mut self, byte: u8) -> Result<(), LinkError> {
        self.tx.write_all(&[byte]).map_err(|_| LinkError::Write)?;
        self.tx.flush().map_err(|_| LinkError::Write)
    }

    fn try_receive_byte(&mut self) -> Result<Option<u8>, LinkError> {
        if !self.rx.read_ready().map_err(|_| LinkError::Read)? {
            return Ok(None);
        }
        self.read_one().map(Some)
    }

    fn receive_byte(&mut self) -> Result<u8, LinkError> {
        // A blocking read already waits for the next byte
        self.read_one()
    }
}
