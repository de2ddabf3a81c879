//! Actuation node board wiring (Raspberry Pi Pico)
//!
//! | Function            | GPIO | Peripheral      |
//! |---------------------|------|-----------------|
//! | Link TX             | 0    | UART0           |
//! | Link RX             | 1    | UART0           |
//! | Motor enable (PWM)  | 2    | PWM slice 1 A   |
//! | Motor IN1           | 3    |                 |
//! | Motor IN2           | 4    |                 |
//! | Buzzer              | 5    |                 |
//! | EEPROM SDA          | 8    | I2C0            |
//! | EEPROM SCL          | 9    | I2C0            |

/// Link UART TX pin
pub const LINK_TX_GPIO: u8 = 0;

/// Link UART RX pin
pub const LINK_RX_GPIO: u8 = 1;

/// UART ring buffer sizes
pub const LINK_BUF_SIZE: usize = 64;

/// EEPROM bus speed
pub const EEPROM_I2C_HZ: u32 = 100_000;
