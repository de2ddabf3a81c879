//! Password payload
//!
//! A password is exactly [`PASSWORD_LEN`] bytes, one decimal digit per
//! byte, sent raw over the link. Bytes received from the peer are kept as
//! they arrive: a corrupted byte is not rejected, it simply fails to match.

/// Number of digits in a password (and bytes in a payload)
pub const PASSWORD_LEN: usize = 5;

/// Five-digit password as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Password([u8; PASSWORD_LEN]);

impl Password {
    /// Wrap raw payload bytes without validation
    pub const fn from_bytes(bytes: [u8; PASSWORD_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a password from digits, rejecting values above 9
    pub fn from_digits(digits: [u8; PASSWORD_LEN]) -> Option<Self> {
        if digits.iter().all(|&d| d <= 9) {
            Some(Self(digits))
        } else {
            None
        }
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; PASSWORD_LEN] {
        &self.0
    }

    /// Check if every byte is a decimal digit
    pub fn is_digits(&self) -> bool {
        self.0.iter().all(|&d| d <= 9)
    }

    /// Compare against another 5-byte sequence
    ///
    /// Every position is examined; the result is a match only when all
    /// positions agree.
    pub fn matches(&self, other: &[u8; PASSWORD_LEN]) -> bool {
        let agreeing = self
            .0
            .iter()
            .zip(other.iter())
            .filter(|(a, b)| a == b)
            .count();
        agreeing == PASSWORD_LEN
    }

    /// Check if every position holds `value`
    pub fn is_all(&self, value: u8) -> bool {
        self.0.iter().all(|&b| b == value)
    }
}

impl From<[u8; PASSWORD_LEN]> for Password {
    fn from(bytes: [u8; PASSWORD_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}
