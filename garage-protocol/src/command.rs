//! Command vocabulary
//!
//! One byte per command, identical on both nodes. The two handshake
//! sentinels are kept apart from [`Command`] because they never select an
//! operation.

/// Handshake sentinel: "I am ready for the next byte"
pub const READY: u8 = 0xFF;

/// Command-receipt acknowledgment sent by the actuation node
pub const DONE: u8 = 0xFE;

// Wire format values
const PASSWORD_SEND: u8 = 0xFD;
const PASSWORD_MATCH: u8 = 0xFC;
const PASSWORD_NOT_MATCHED: u8 = 0xFB;
const PASSWORD_CONFIRMATION_SEND: u8 = 0xFA;
const CHANGE_PASSWORD: u8 = 0xF9;
const OPEN_DOOR: u8 = 0xF8;
const CHECK_PASSWORD: u8 = 0xF7;
const WRONG_PASSWORD: u8 = 0xF6;
const CHECK_IF_SAVED: u8 = 0xF5;
const YES_SAVED: u8 = 0xF4;
const NO_SAVED_PASSWORD: u8 = 0xF3;

/// Protocol commands and replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// First enrollment entry follows
    PasswordSend,
    /// Reply: passwords match
    PasswordMatch,
    /// Reply: passwords differ
    PasswordNotMatched,
    /// Second enrollment entry follows
    PasswordConfirmationSend,
    /// Reserved: password change announcement
    ChangePassword,
    /// Run the door sequence
    OpenDoor,
    /// Candidate for verification follows
    CheckPassword,
    /// Wrong-password lockout: run the alarm sequence
    WrongPassword,
    /// Ask whether a password has been stored
    CheckIfSaved,
    /// Reply: a password is stored
    YesSaved,
    /// Reply: the store still holds the unset sentinel
    NoSavedPassword,
}

impl Command {
    /// Parse a command from its wire format byte
    ///
    /// The sentinels and any byte outside the vocabulary map to `None`.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            PASSWORD_SEND => Some(Command::PasswordSend),
            PASSWORD_MATCH => Some(Command::PasswordMatch),
            PASSWORD_NOT_MATCHED => Some(Command::PasswordNotMatched),
            PASSWORD_CONFIRMATION_SEND => Some(Command::PasswordConfirmationSend),
            CHANGE_PASSWORD => Some(Command::ChangePassword),
            OPEN_DOOR => Some(Command::OpenDoor),
            CHECK_PASSWORD => Some(Command::CheckPassword),
            WRONG_PASSWORD => Some(Command::WrongPassword),
            CHECK_IF_SAVED => Some(Command::CheckIfSaved),
            YES_SAVED => Some(Command::YesSaved),
            NO_SAVED_PASSWORD => Some(Command::NoSavedPassword),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            Command::PasswordSend => PASSWORD_SEND,
            Command::PasswordMatch => PASSWORD_MATCH,
            Command::PasswordNotMatched => PASSWORD_NOT_MATCHED,
            Command::PasswordConfirmationSend => PASSWORD_CONFIRMATION_SEND,
            Command::ChangePassword => CHANGE_PASSWORD,
            Command::OpenDoor => OPEN_DOOR,
            Command::CheckPassword => CHECK_PASSWORD,
            Command::WrongPassword => WRONG_PASSWORD,
            Command::CheckIfSaved => CHECK_IF_SAVED,
            Command::YesSaved => YES_SAVED,
            Command::NoSavedPassword => NO_SAVED_PASSWORD,
        }
    }

    /// Returns true if a password payload follows this command
    pub fn carries_payload(&self) -> bool {
        matches!(
            self,
            Command::PasswordSend | Command::PasswordConfirmationSend | Command::CheckPassword
        )
    }

    /// Returns true if this is a reply sent by the actuation node
    pub fn is_reply(&self) -> bool {
        matches!(
            self,
            Command::PasswordMatch
                | Command::PasswordNotMatched
                | Command::YesSaved
                | Command::NoSavedPassword
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(Command::PasswordSend.to_byte(), 0xFD);
        assert_eq!(Command::PasswordMatch.to_byte(), 0xFC);
        assert_eq!(Command::PasswordNotMatched.to_byte(), 0xFB);
        assert_eq!(Command::PasswordConfirmationSend.to_byte(), 0xFA);
        assert_eq!(Command::ChangePassword.to_byte(), 0xF9);
        assert_eq!(Command::OpenDoor.to_byte(), 0xF8);
        assert_eq!(Command::CheckPassword.to_byte(), 0xF7);
        assert_eq!(Command::WrongPassword.to_byte(), 0xF6);
        assert_eq!(Command::CheckIfSaved.to_byte(), 0xF5);
        assert_eq!(Command::YesSaved.to_byte(), 0xF4);
        assert_eq!(Command::NoSavedPassword.to_byte(), 0xF3);
    }

    #[test]
    fn test_every_vocabulary_byte_parses_back() {
        for byte in 0xF3..=0xFD {
            let cmd = Command::from_byte(byte).unwrap();
            assert_eq!(cmd.to_byte(), byte);
        }
    }

    #[test]
    fn test_sentinels_are_not_commands() {
        assert!(Command::from_byte(READY).is_none());
        assert!(Command::from_byte(DONE).is_none());
    }

    #[test]
    fn test_unknown_bytes() {
        assert!(Command::from_byte(0x00).is_none());
        assert!(Command::from_byte(0x05).is_none());
        assert!(Command::from_byte(0xF2).is_none());
    }

    #[test]
    fn test_payload_commands() {
        assert!(Command::PasswordSend.carries_payload());
        assert!(Command::PasswordConfirmationSend.carries_payload());
        assert!(Command::CheckPassword.carries_payload());
        assert!(!Command::OpenDoor.carries_payload());
        assert!(!Command::CheckIfSaved.carries_payload());
    }

    #[test]
    fn test_replies() {
        assert!(Command::PasswordMatch.is_reply());
        assert!(Command::NoSavedPassword.is_reply());
        assert!(!Command::WrongPassword.is_reply());
    }
}
