//! GPIO wrappers
//!
//! embassy-rp pins behind the `garage-hal` pin traits, so drivers stay
//! chip-agnostic.

use embassy_rp::gpio::{Input, Output};

/// Push-pull output pin
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl garage_hal::OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Input pin (pull configured by the caller)
pub struct RpInput<'d>(Input<'d>);

impl<'d> RpInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }
}

impl garage_hal::InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
