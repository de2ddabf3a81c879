//! UART pin mapping and configuration
//!
//! RP2040 has two UART peripherals (UART0 and UART1), each reachable on a
//! fixed set of GPIOs.

use embassy_rp::uart::{Config, DataBits, Parity, StopBits};
use garage_hal::uart::{self, UartConfig};

/// UART peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartId {
    Uart0,
    Uart1,
}

/// Determine which UART can use a given GPIO pin
pub fn gpio_to_uart(gpio: u8) -> Option<UartId> {
    // UART0: GPIO 0/1, 12/13, 16/17, 28/29
    // UART1: GPIO 4/5, 8/9, 20/21, 24/25
    match gpio {
        0 | 1 | 12 | 13 | 16 | 17 | 28 | 29 => Some(UartId::Uart0),
        4 | 5 | 8 | 9 | 20 | 21 | 24 | 25 => Some(UartId::Uart1),
        _ => None,
    }
}

/// Translate link settings into an embassy-rp UART config
pub fn to_rp_config(config: &UartConfig) -> Config {
    let mut rp = Config::default();
    rp.baudrate = config.baudrate;
    rp.data_bits = match config.data_bits {
        uart::DataBits::Five => DataBits::DataBits5,
        uart::DataBits::Six => DataBits::DataBits6,
        uart::DataBits::Seven => DataBits::DataBits7,
        uart::DataBits::Eight => DataBits::DataBits8,
    };
    rp.parity = match config.parity {
        uart::Parity::None => Parity::ParityNone,
        uart::Parity::Even => Parity::ParityEven,
        uart::Parity::Odd => Parity::ParityOdd,
    };
    rp.stop_bits = match config.stop_bits {
        uart::StopBits::One => StopBits::STOP1,
        uart::StopBits::Two => StopBits::STOP2,
    };
    rp
}
