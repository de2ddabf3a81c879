//! Tick-driven actuation sequencer
//!
//! A periodic timer interrupt advances a tick counter; reaching a table
//! threshold marks a phase pending. The main flow busy-waits for the
//! sequence's terminal tick and applies pending phases through a
//! [`PhaseSink`] as it goes. The interrupt never touches an output.
//!
//! Both nodes run the same tables, so the interface node's messages track
//! the actuation node's motor.

mod engine;
mod phase;

pub use engine::{SequenceError, Sequencer};
pub use phase::{Phase, PhaseSink, PhaseTable, Sequence, ALARM_TABLE, DOOR_TABLE};
