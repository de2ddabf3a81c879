//! Node error aggregate

use garage_hal::{DisplayError, StoreError};
use garage_protocol::ChannelError;

use crate::sequencer::SequenceError;
use crate::traits::MotorError;

/// Errors that stop a node loop
///
/// None of these are recoverable in place; firmware logs them and halts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeError<E> {
    /// Serial link failure or bounded wait expired
    Channel(ChannelError<E>),
    /// Persistent store failure
    Store(StoreError),
    /// Door motor failure
    Motor(MotorError),
    /// Display failure
    Display(DisplayError),
    /// A timed sequence did not reach its terminal tick in time
    SequenceTimeout,
}

impl<E> From<ChannelError<E>> for NodeError<E> {
    fn from(e: ChannelError<E>) -> Self {
        NodeError::Channel(e)
    }
}

impl<E> From<StoreError> for NodeError<E> {
    fn from(e: StoreError) -> Self {
        NodeError::Store(e)
    }
}

impl<E> From<MotorError> for NodeError<E> {
    fn from(e: MotorError) -> Self {
        NodeError::Motor(e)
    }
}

impl<E> From<DisplayError> for NodeError<E> {
    fn from(e: DisplayError) -> Self {
        NodeError::Display(e)
    }
}

impl<E, O> From<SequenceError<O>> for NodeError<E>
where
    NodeError<E>: From<O>,
{
    fn from(e: SequenceError<O>) -> Self {
        match e {
            SequenceError::Timeout => NodeError::SequenceTimeout,
            SequenceError::Output(output) => output.into(),
        }
    }
}
