//! Character display abstractions for the interface node

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates
    InvalidCoordinates,
}

/// Character display (16x2 LCD or similar)
pub trait TextDisplay {
    /// Clear the entire display and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: ASCII text to display
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Get the display dimensions as (columns, rows)
    fn dimensions(&self) -> (u8, u8);
}
