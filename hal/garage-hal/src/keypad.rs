//! Keypad abstractions for the interface node
//!
//! The interface node uses a 4x4 calculator-style keypad: ten digits,
//! four operators, `=` to confirm and `C` to clear.

/// A key on the interface node keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Decimal digit 0-9
    Digit(u8),
    /// `+` (menu: open door)
    Plus,
    /// `-` (menu: change password)
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `=` (confirm entry)
    Equals,
    /// `C`
    Clear,
}

impl Key {
    /// Map a printed keypad legend to a key
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Key::Digit(c as u8 - b'0')),
            '+' => Some(Key::Plus),
            '-' => Some(Key::Minus),
            '*' => Some(Key::Multiply),
            '/' => Some(Key::Divide),
            '=' => Some(Key::Equals),
            'C' | 'c' => Some(Key::Clear),
            _ => None,
        }
    }

    /// Get the digit value if this is a digit key
    pub fn digit(self) -> Option<u8> {
        match self {
            Key::Digit(d) => Some(d),
            _ => None,
        }
    }
}

/// Blocking key source
pub trait Keypad {
    /// Wait for the next complete key press and return it
    fn read_key(&mut self) -> Key;
}
