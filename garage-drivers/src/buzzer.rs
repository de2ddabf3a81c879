//! GPIO alarm buzzer
//!
//! Drives an active buzzer (or its transistor) from one GPIO pin.

use garage_core::traits::Buzzer;
use garage_hal::OutputPin;

/// GPIO buzzer output
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioBuzzer<P> {
    pin: P,
    /// If true, buzzer ON = pin LOW
    inverted: bool,
    /// Current logical state (true = sounding)
    on: bool,
}

impl<P: OutputPin> GpioBuzzer<P> {
    /// Create a new GPIO buzzer, initially silent
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the buzzer sounds when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut buzzer = Self {
            pin,
            inverted,
            on: false,
        };
        buzzer.set(false);
        buzzer
    }

    /// Create a new GPIO buzzer with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new GPIO buzzer with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    fn set(&mut self, on: bool) {
        self.on = on;
        self.pin.set_state(on != self.inverted);
    }
}

impl<P: OutputPin> Buzzer for GpioBuzzer<P> {
    fn on(&mut self) {
        self.set(true);
    }

    fn off(&mut self) {
        self.set(false);
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_high_buzzer() {
        let mut buzzer = GpioBuzzer::new_active_high(MockPin { high: true });

        // Initially silent
        assert!(!buzzer.is_on());
        assert!(!buzzer.pin.is_set_high());

        buzzer.on();
        assert!(buzzer.is_on());
        assert!(buzzer.pin.is_set_high());

        buzzer.off();
        assert!(!buzzer.is_on());
        assert!(!buzzer.pin.is_set_high());
    }

    #[test]
    fn test_active_low_buzzer() {
        let mut buzzer = GpioBuzzer::new_active_low(MockPin { high: false });

        // Silent means pin high
        assert!(!buzzer.is_on());
        assert!(buzzer.pin.is_set_high());

        buzzer.on();
        assert!(!buzzer.pin.is_set_high());

        buzzer.off();
        assert!(buzzer.pin.is_set_high());
    }
}
