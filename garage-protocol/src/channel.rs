//! Command channel
//!
//! Turn-taking request/acknowledge exchange on top of a raw [`Link`].
//! Every operation starts with a READY rendezvous; while waiting for READY
//! any other byte is discarded, which is also how the initiator swallows
//! the DONE acknowledgment its previous command produced.
//!
//! By default every wait blocks forever, so a desynchronized peer stalls
//! the node until reset. [`CommandChannel::with_deadline`] bounds each wait
//! instead.

use garage_hal::{Deadline, Link};

use crate::command::{Command, DONE, READY};
use crate::password::{Password, PASSWORD_LEN};

/// Errors from command channel operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError<E> {
    /// The underlying link reported an error
    Link(E),
    /// A bounded wait ran out of polls
    Timeout,
}

/// Request/acknowledge channel to the peer node
pub struct CommandChannel<L> {
    link: L,
    deadline: Deadline,
}

impl<L: Link> CommandChannel<L> {
    /// Create a channel whose waits block forever
    pub fn new(link: L) -> Self {
        Self::with_deadline(link, Deadline::Never)
    }

    /// Create a channel whose waits give up after `deadline`
    pub fn with_deadline(link: L, deadline: Deadline) -> Self {
        Self { link, deadline }
    }

    /// Get the wait policy
    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    /// Get the underlying link
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Get the underlying link mutably
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Release the underlying link
    pub fn into_inner(self) -> L {
        self.link
    }

    /// Send a command to a listening peer
    ///
    /// READY, wait for the READY echo, then the command byte.
    pub fn send_command(&mut self, command: Command) -> Result<(), ChannelError<L::Error>> {
        self.initiate_rendezvous()?;
        self.send(command.to_byte())
    }

    /// Receive a request and acknowledge it with DONE
    ///
    /// Used by the actuation node. Returns the raw byte; the caller decides
    /// what to do with bytes outside the vocabulary.
    pub fn receive_command(&mut self) -> Result<u8, ChannelError<L::Error>> {
        let byte = self.receive_reply()?;
        self.send(DONE)?;
        Ok(byte)
    }

    /// Receive a reply without acknowledging it
    ///
    /// Used by the interface node, which never sends DONE.
    pub fn receive_reply(&mut self) -> Result<u8, ChannelError<L::Error>> {
        self.answer_rendezvous()?;
        self.receive()
    }

    /// Send a password payload
    ///
    /// READY, wait for the READY echo, then exactly five bytes with no
    /// further handshake.
    pub fn send_payload(&mut self, password: &Password) -> Result<(), ChannelError<L::Error>> {
        self.initiate_rendezvous()?;
        for &byte in password.as_bytes() {
            self.send(byte)?;
        }
        Ok(())
    }

    /// Receive a password payload
    pub fn receive_payload(&mut self) -> Result<Password, ChannelError<L::Error>> {
        self.answer_rendezvous()?;
        let mut bytes = [0u8; PASSWORD_LEN];
        for slot in bytes.iter_mut() {
            *slot = self.receive()?;
        }
        Ok(Password::from_bytes(bytes))
    }

    /// Send READY and wait for the peer's READY
    pub fn initiate_rendezvous(&mut self) -> Result<(), ChannelError<L::Error>> {
        self.send(READY)?;
        self.wait_for_ready()
    }

    /// Wait for the peer's READY and echo it
    pub fn answer_rendezvous(&mut self) -> Result<(), ChannelError<L::Error>> {
        self.wait_for_ready()?;
        self.send(READY)
    }

    /// Discard bytes until READY arrives
    fn wait_for_ready(&mut self) -> Result<(), ChannelError<L::Error>> {
        while self.receive()? != READY {}
        Ok(())
    }

    fn send(&mut self, byte: u8) -> Result<(), ChannelError<L::Error>> {
        self.link.send_byte(byte).map_err(ChannelError::Link)
    }

    /// Receive one byte under the channel's wait policy
    fn receive(&mut self) -> Result<u8, ChannelError<L::Error>> {
        if self.deadline.is_unbounded() {
            return self.link.receive_byte().map_err(ChannelError::Link);
        }

        let mut budget = self.deadline.budget();
        loop {
            if let Some(byte) = self.link.try_receive_byte().map_err(ChannelError::Link)? {
                return Ok(byte);
            }
            budget.spend().map_err(|_| ChannelError::Timeout)?;
            core::hint::spin_loop();
        }
    }
}
