//! Interface node display output

use garage_hal::{DisplayError, TextDisplay};

use crate::sequencer::{Phase, PhaseSink, Sequence};

pub(crate) const PROMPT_ENTER: &str = "PLZ Enter PASS:";
pub(crate) const PROMPT_REENTER: &str = "PLZ Re-Enter the";
pub(crate) const PROMPT_SAME: &str = "Same PASS:";
pub(crate) const MENU_OPEN: &str = "+ : Open Door";
pub(crate) const MENU_CHANGE: &str = "- : Change Pass";
pub(crate) const MSG_UNLOCKING: &str = "Door Unlocking..";
pub(crate) const MSG_LOCKING: &str = "Door Locking..";
pub(crate) const MSG_ALERT: &str = "ALERT!!!!";

/// Two-line text screen on the interface node
///
/// Also the interface node's phase sink: door and alarm phases become
/// status messages.
pub struct Screen<P> {
    display: P,
}

impl<P: TextDisplay> Screen<P> {
    /// Wrap a character display
    pub fn new(display: P) -> Self {
        Self { display }
    }

    /// Clear and draw two lines
    ///
    /// An empty line is skipped.
    pub fn show(&mut self, top: &str, bottom: &str) -> Result<(), DisplayError> {
        self.display.clear()?;
        self.display.draw_text(0, 0, top)?;
        if !bottom.is_empty() {
            self.display.draw_text(1, 0, bottom)?;
        }
        Ok(())
    }

    /// Mask one entered digit on the second line
    pub fn echo(&mut self, col: u8) -> Result<(), DisplayError> {
        self.display.draw_text(1, col, "*")
    }

    /// Get the underlying display
    pub fn display(&self) -> &P {
        &self.display
    }

    /// Release the underlying display
    pub fn into_inner(self) -> P {
        self.display
    }
}

impl<P: TextDisplay> PhaseSink for Screen<P> {
    type Error = DisplayError;

    fn on_phase(&mut self, _sequence: Sequence, phase: Phase) -> Result<(), DisplayError> {
        match phase {
            Phase::Opening => self.show(MSG_UNLOCKING, ""),
            // The unlocking message stays up while the door is held open
            Phase::Holding => Ok(()),
            Phase::Closing => self.show(MSG_LOCKING, ""),
            Phase::Alarming => self.show(MSG_ALERT, ""),
        }
    }

    fn on_complete(&mut self, _sequence: Sequence) -> Result<(), DisplayError> {
        self.display.clear()
    }
}
