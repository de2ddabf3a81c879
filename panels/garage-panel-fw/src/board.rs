//! Interface node board wiring (Raspberry Pi Pico)
//!
//! | Function        | GPIO    | Notes                    |
//! |-----------------|---------|--------------------------|
//! | Link TX         | 0       | UART0                    |
//! | Link RX         | 1       | UART0                    |
//! | Keypad rows     | 10..=13 | driven low while scanned |
//! | Keypad columns  | 14, 15, 22, 26 | pull-ups          |
//! | LCD RS          | 16      |                          |
//! | LCD EN          | 17      |                          |
//! | LCD D4..D7      | 18..=21 | RW tied to ground        |

/// Link UART TX pin
pub const LINK_TX_GPIO: u8 = 0;

/// Link UART RX pin
pub const LINK_RX_GPIO: u8 = 1;

/// UART ring buffer sizes
pub const LINK_BUF_SIZE: usize = 64;
