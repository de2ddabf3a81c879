//! Scripted link for host tests
//!
//! Plays back a fixed inbound byte script and records everything sent.
//! When the script runs dry `try_receive_byte` keeps returning `None`, so
//! a channel with a bounded [`Deadline`](garage_hal::Deadline) times out
//! instead of hanging the test.

use garage_hal::Link;
use heapless::{Deque, Vec};

/// Inbound script capacity
pub const SCRIPT_CAPACITY: usize = 128;

/// Outbound record capacity
pub const RECORD_CAPACITY: usize = 128;

/// Errors injected by [`ScriptedLink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MockLinkError {
    /// Sends were configured to fail
    SendRejected,
    /// The outbound record is full
    RecordFull,
}

/// Link backed by an inbound script and an outbound record
#[derive(Debug, Default)]
pub struct ScriptedLink {
    inbound: Deque<u8, SCRIPT_CAPACITY>,
    outbound: Vec<u8, RECORD_CAPACITY>,
    reject_sends: bool,
}

impl ScriptedLink {
    /// Create a link that will deliver `script` in order
    ///
    /// Bytes beyond [`SCRIPT_CAPACITY`] are dropped.
    pub fn new(script: &[u8]) -> Self {
        let mut link = Self::default();
        link.push_inbound(script);
        link
    }

    /// Append more bytes to the inbound script
    pub fn push_inbound(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if self.inbound.push_back(byte).is_err() {
                break;
            }
        }
    }

    /// Make every following send fail
    pub fn fail_sends(&mut self) {
        self.reject_sends = true;
    }

    /// Bytes sent so far
    pub fn sent(&self) -> &[u8] {
        &self.outbound
    }

    /// Forget recorded bytes
    pub fn clear_sent(&mut self) {
        self.outbound.clear();
    }

    /// Check if the whole script has been consumed
    pub fn is_drained(&self) -> bool {
        self.inbound.is_empty()
    }

    /// Number of script bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.inbound.len()
    }
}

impl Link for ScriptedLink {
    type Error = MockLinkError;

    fn send_byte(&mut self, byte: u8) -> Result<(), MockLinkError> {
        if self.reject_sends {
            return Err(MockLinkError::SendRejected);
        }
        self.outbound
            .push(byte)
            .map_err(|_| MockLinkError::RecordFull)
    }

    fn try_receive_byte(&mut self) -> Result<Option<u8>, MockLinkError> {
        Ok(self.inbound.pop_front())
    }
}
