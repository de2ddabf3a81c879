//! 4x4 matrix keypad
//!
//! Rows are driven low one at a time; columns are inputs with pull-ups, so
//! a pressed key reads low on its column while its row is driven.

use embedded_hal::delay::DelayNs;
use garage_hal::{InputPin, Key, Keypad, OutputPin};

/// Printed legends, row-major
pub const LEGENDS: [[char; 4]; 4] = [
    ['7', '8', '9', '/'],
    ['4', '5', '6', '*'],
    ['1', '2', '3', '-'],
    ['C', '0', '=', '+'],
];

/// Settle time after driving a row before the columns are read
const ROW_SETTLE_US: u32 = 10;

/// Interval between scans while waiting
const SCAN_INTERVAL_MS: u32 = 1;

/// Consecutive scans a key must hold before it counts
const DEBOUNCE_SCANS: u8 = 20;

/// Scanned 4x4 keypad
pub struct MatrixKeypad<O, I, D> {
    rows: [O; 4],
    cols: [I; 4],
    delay: D,
}

impl<O: OutputPin, I: InputPin, D: DelayNs> MatrixKeypad<O, I, D> {
    /// Create a keypad scanner with every row released
    pub fn new(rows: [O; 4], cols: [I; 4], delay: D) -> Self {
        let mut keypad = Self { rows, cols, delay };
        keypad.release_rows();
        keypad
    }

    /// Scan the matrix once
    ///
    /// Returns the first pressed key in row-major order.
    pub fn scan(&mut self) -> Option<Key> {
        for row in 0..self.rows.len() {
            self.rows[row].set_low();
            self.delay.delay_us(ROW_SETTLE_US);
            let hit = self.cols.iter().position(|col| col.is_low());
            self.rows[row].set_high();

            if let Some(col) = hit {
                return Key::from_char(LEGENDS[row][col]);
            }
        }
        None
    }

    fn release_rows(&mut self) {
        for row in self.rows.iter_mut() {
            row.set_high();
        }
    }

    /// Wait until `key` has been seen on enough consecutive scans
    fn debounced(&mut self, key: Key) -> bool {
        for _ in 0..DEBOUNCE_SCANS {
            self.delay.delay_ms(SCAN_INTERVAL_MS);
            if self.scan() != Some(key) {
                return false;
            }
        }
        true
    }
}

impl<O: OutputPin, I: InputPin, D: DelayNs> Keypad for MatrixKeypad<O, I, D> {
    fn read_key(&mut self) -> Key {
        loop {
            if let Some(key) = self.scan() {
                if self.debounced(key) {
                    // Wait for release so one press yields one key
                    while self.scan().is_some() {
                        self.delay.delay_ms(SCAN_INTERVAL_MS);
                    }
                    return key;
                }
            }
            self.delay.delay_ms(SCAN_INTERVAL_MS);
        }
    }
}
