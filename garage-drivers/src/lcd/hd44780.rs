//! HD44780 character LCD on a 4-bit bus
//!
//! Write-only wiring: RW is tied low, so the busy flag is never read and
//! every command is followed by its worst-case execution time instead.

use embedded_hal::delay::DelayNs;
use garage_hal::{DisplayError, OutputPin, TextDisplay};

// Commands
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INCREMENT: u8 = 0x06;
const CMD_DISPLAY_ON_CURSOR_OFF: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// HD44780 in 4-bit mode
pub struct Hd44780<P, D> {
    rs: P,
    en: P,
    /// D4..D7
    data: [P; 4],
    delay: D,
    cols: u8,
    rows: u8,
}

impl<P: OutputPin, D: DelayNs> Hd44780<P, D> {
    /// Initialize a 16x2 display
    pub fn new_16x2(rs: P, en: P, data: [P; 4], delay: D) -> Self {
        Self::new(rs, en, data, delay, 16, 2)
    }

    /// Initialize a display of the given size (up to 4 rows)
    pub fn new(rs: P, en: P, data: [P; 4], delay: D, cols: u8, rows: u8) -> Self {
        let mut lcd = Self {
            rs,
            en,
            data,
            delay,
            cols,
            rows: rows.min(ROW_OFFSETS.len() as u8),
        };
        lcd.init();
        lcd
    }

    /// Power-on reset by instruction, then switch to 4-bit mode
    fn init(&mut self) {
        self.rs.set_low();
        self.en.set_low();
        self.delay.delay_ms(50);

        self.write_nibble(0x03);
        self.delay.delay_us(4500);
        self.write_nibble(0x03);
        self.delay.delay_us(150);
        self.write_nibble(0x03);
        self.delay.delay_us(150);
        self.write_nibble(0x02);
        self.delay.delay_us(150);

        self.command(CMD_FUNCTION_4BIT_2LINE);
        self.command(CMD_DISPLAY_ON_CURSOR_OFF);
        self.command(CMD_ENTRY_MODE_INCREMENT);
        self.command(CMD_CLEAR);
        self.delay.delay_ms(2);
    }

    fn command(&mut self, byte: u8) {
        self.rs.set_low();
        self.write_byte(byte);
    }

    fn write_char(&mut self, byte: u8) {
        self.rs.set_high();
        self.write_byte(byte);
    }

    fn write_byte(&mut self, byte: u8) {
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
        self.delay.delay_us(50);
    }

    fn write_nibble(&mut self, nibble: u8) {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(nibble & (1 << bit) != 0);
        }
        self.en.set_high();
        self.delay.delay_us(1);
        self.en.set_low();
        self.delay.delay_us(1);
    }
}

impl<P: OutputPin, D: DelayNs> TextDisplay for Hd44780<P, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR);
        self.delay.delay_ms(2);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        let end = usize::from(col) + text.len();
        if row >= self.rows || end > usize::from(self.cols) {
            return Err(DisplayError::InvalidCoordinates);
        }

        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[usize::from(row)] + col));
        for byte in text.bytes() {
            // The character ROM only covers ASCII reliably
            self.write_char(if byte.is_ascii() { byte } else { b'?' });
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Bus that latches (rs, nibble) on every EN falling edge
    #[derive(Default)]
    struct Bus {
        levels: [bool; 6],
        latched: Vec<(bool, u8)>,
    }

    const RS: usize = 4;
    const EN: usize = 5;

    struct Pin(usize, Rc<RefCell<Bus>>);

    impl OutputPin for Pin {
        fn set_high(&mut self) {
            self.1.borrow_mut().levels[self.0] = true;
        }

        fn set_low(&mut self) {
            let mut bus = self.1.borrow_mut();
            if self.0 == EN && bus.levels[EN] {
                let nibble = (0..4).fold(0u8, |n, bit| n | (u8::from(bus.levels[bit]) << bit));
                let rs = bus.levels[RS];
                bus.latched.push((rs, nibble));
            }
            bus.levels[self.0] = false;
        }

        fn is_set_high(&self) -> bool {
            self.1.borrow().levels[self.0]
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn lcd() -> (Hd44780<Pin, NoDelay>, Rc<RefCell<Bus>>) {
        let bus = Rc::new(RefCell::new(Bus::default()));
        let data = [0, 1, 2, 3].map(|i| Pin(i, bus.clone()));
        let lcd = Hd44780::new_16x2(Pin(RS, bus.clone()), Pin(EN, bus.clone()), data, NoDelay);
        (lcd, bus)
    }

    /// Reassemble latched nibble pairs into (rs, byte)
    fn bytes(latched: &[(bool, u8)]) -> Vec<(bool, u8)> {
        latched
            .chunks(2)
            .map(|pair| (pair[0].0, (pair[0].1 << 4) | pair[1].1))
            .collect()
    }

    #[test]
    fn test_init_sequence() {
        let (_, bus) = lcd();
        let latched = bus.borrow().latched.clone();
        // Four single nibbles, then four commands
        assert_eq!(&latched[..4], &[(false, 3), (false, 3), (false, 3), (false, 2)]);
        assert_eq!(
            bytes(&latched[4..]),
            vec![(false, 0x28), (false, 0x0C), (false, 0x06), (false, 0x01)]
        );
    }

    #[test]
    fn test_draw_text_second_row() {
        let (mut lcd, bus) = lcd();
        bus.borrow_mut().latched.clear();

        lcd.draw_text(1, 10, "**").unwrap();

        assert_eq!(
            bytes(&bus.borrow().latched),
            vec![(false, 0x80 | 0x4A), (true, b'*'), (true, b'*')]
        );
    }

    #[test]
    fn test_clear() {
        let (mut lcd, bus) = lcd();
        bus.borrow_mut().latched.clear();
        lcd.clear().unwrap();
        assert_eq!(bytes(&bus.borrow().latched), vec![(false, 0x01)]);
    }

    #[test]
    fn test_rejects_overflow() {
        let (mut lcd, _) = lcd();
        assert_eq!(
            lcd.draw_text(0, 10, "1234567"),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(lcd.draw_text(2, 0, "x"), Err(DisplayError::InvalidCoordinates));
        assert_eq!(lcd.draw_text(0, 0, "PLZ Re-Enter the"), Ok(()));
        assert_eq!(lcd.dimensions(), (16, 2));
    }
}
