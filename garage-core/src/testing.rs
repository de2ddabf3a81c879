//! Host-side test doubles shared by the unit tests

use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use garage_hal::{
    ByteStore, DisplayError, Key, Keypad, PeriodicTimer, StoreError, TextDisplay, TimerConfig,
};

use crate::config::UNSET_SENTINEL;
use crate::sequencer::{Phase, PhaseSink, Sequence, Sequencer};
use crate::traits::{Buzzer, DoorMotor, MotorDirection, MotorError};

/// Timer that delivers one tick to its sequencer per `idle` call
pub struct SteppedTimer<'a> {
    sequencer: &'a Sequencer,
    running: bool,
    starts: u32,
    delivered: u32,
    config: Option<TimerConfig>,
}

impl<'a> SteppedTimer<'a> {
    pub fn new(sequencer: &'a Sequencer) -> Self {
        Self {
            sequencer,
            running: false,
            starts: 0,
            delivered: 0,
            config: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn starts(&self) -> u32 {
        self.starts
    }

    pub fn ticks_delivered(&self) -> u32 {
        self.delivered
    }

    pub fn last_config(&self) -> Option<TimerConfig> {
        self.config
    }
}

impl PeriodicTimer for SteppedTimer<'_> {
    fn start(&mut self, config: &TimerConfig) {
        self.running = true;
        self.starts += 1;
        self.config = Some(*config);
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn idle(&mut self) {
        if self.running {
            self.sequencer.on_tick();
            self.delivered += 1;
        }
    }
}

/// Phase sink that records what it was given
#[derive(Default)]
pub struct PhaseLog {
    pub phases: Vec<Phase>,
    pub completed: Vec<Sequence>,
    pub fail_on: Option<Phase>,
}

impl PhaseSink for PhaseLog {
    type Error = Phase;

    fn on_phase(&mut self, _sequence: Sequence, phase: Phase) -> Result<(), Phase> {
        if self.fail_on == Some(phase) {
            return Err(phase);
        }
        self.phases.push(phase);
        Ok(())
    }

    fn on_complete(&mut self, sequence: Sequence) -> Result<(), Phase> {
        self.completed.push(sequence);
        Ok(())
    }
}

/// RAM-backed byte store, blank cells hold the unset sentinel
pub struct RamStore {
    pub cells: [u8; 1024],
    pub writes: usize,
    pub reads: usize,
    pub fail: bool,
}

impl RamStore {
    pub fn blank() -> Self {
        Self {
            cells: [UNSET_SENTINEL; 1024],
            writes: 0,
            reads: 0,
            fail: false,
        }
    }

    pub fn record(&self, base: u16) -> [u8; 5] {
        let base = base as usize;
        let mut out = [0u8; 5];
        out.copy_from_slice(&self.cells[base..base + 5]);
        out
    }
}

impl ByteStore for RamStore {
    fn write_byte(&mut self, address: u16, value: u8) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Bus);
        }
        let cell = self
            .cells
            .get_mut(address as usize)
            .ok_or(StoreError::AddressOutOfRange)?;
        *cell = value;
        self.writes += 1;
        Ok(())
    }

    fn read_byte(&mut self, address: u16) -> Result<u8, StoreError> {
        if self.fail {
            return Err(StoreError::Bus);
        }
        self.reads += 1;
        self.cells
            .get(address as usize)
            .copied()
            .ok_or(StoreError::AddressOutOfRange)
    }
}

/// Delay that only adds up the requested time
#[derive(Default)]
pub struct TallyDelay {
    pub total_ns: u64,
}

impl DelayNs for TallyDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

impl TallyDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

#[derive(Default)]
pub struct RecordingMotor {
    pub commands: Vec<(MotorDirection, u8)>,
    pub direction: MotorDirection,
}

impl DoorMotor for RecordingMotor {
    fn rotate(&mut self, direction: MotorDirection, duty_percent: u8) -> Result<(), MotorError> {
        if duty_percent > 100 {
            return Err(MotorError::InvalidDuty);
        }
        self.commands.push((direction, duty_percent));
        self.direction = direction;
        Ok(())
    }

    fn direction(&self) -> MotorDirection {
        self.direction
    }
}

#[derive(Default)]
pub struct RecordingBuzzer {
    pub on: bool,
    pub switches: Vec<bool>,
}

impl Buzzer for RecordingBuzzer {
    fn on(&mut self) {
        self.on = true;
        self.switches.push(true);
    }

    fn off(&mut self) {
        self.on = false;
        self.switches.push(false);
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

/// Keypad that replays a legend string such as `"12345="`
pub struct ScriptedKeypad {
    keys: VecDeque<Key>,
}

impl ScriptedKeypad {
    pub fn new(legends: &str) -> Self {
        Self {
            keys: legends.chars().filter_map(Key::from_char).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl Keypad for ScriptedKeypad {
    fn read_key(&mut self) -> Key {
        self.keys.pop_front().expect("keypad script exhausted")
    }
}

/// 16x2 display that records every draw
#[derive(Default)]
pub struct RecordingDisplay {
    pub clears: usize,
    pub draws: Vec<(u8, u8, String)>,
}

impl RecordingDisplay {
    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.draws.iter().map(|(_, _, t)| t.as_str()).collect()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.draws.iter().any(|(_, _, t)| t == text)
    }
}

impl TextDisplay for RecordingDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.clears += 1;
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row >= 2 || col as usize + text.len() > 16 {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.draws.push((row, col, String::from(text)));
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (16, 2)
    }
}
