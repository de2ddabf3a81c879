//! SmartGarage - Actuation Node Firmware
//!
//! Serves requests from the interface node over UART: password enrollment
//! and checks against the EEPROM record, door open/close on the H-bridge
//! motor, and the lockout alarm on the buzzer.
//!
//! The node loop is blocking and runs in thread mode for the life of the
//! program. Sequencer ticks come from a task on a higher-priority
//! interrupt executor so they preempt the loop's busy-waits.

#![no_std]
#![no_main]

mod board;

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use garage_core::node::{ActuationNode, Actuators};
use garage_core::password::{PasswordManager, PasswordStore};
use garage_core::sequencer::Sequencer;
use garage_drivers::buzzer::GpioBuzzer;
use garage_drivers::eeprom::At24;
use garage_drivers::link::IoLink;
use garage_drivers::motor::HBridgeMotor;
use garage_hal::UartConfig;
use garage_hal_rp2040::uart::{gpio_to_uart, to_rp_config, UartId};
use garage_hal_rp2040::{tick_task, RpOutput, TickTimer};
use garage_protocol::CommandChannel;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Shared between the tick task and the node loop
static SEQUENCER: Sequencer = Sequencer::new();

/// Runs the tick task above thread mode
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; board::LINK_BUF_SIZE]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; board::LINK_BUF_SIZE]> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("SmartGarage actuation node starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Tick task on the high-priority executor
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high.spawn(tick_task(&SEQUENCER)).unwrap();

    // Link to the interface node (9600 8N1)
    assert_eq!(gpio_to_uart(board::LINK_TX_GPIO), Some(UartId::Uart0));
    assert_eq!(gpio_to_uart(board::LINK_RX_GPIO), Some(UartId::Uart0));
    let link_config = UartConfig::default();
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, to_rp_config(&link_config));
    let tx_buf = TX_BUF.init([0u8; board::LINK_BUF_SIZE]);
    let rx_buf = RX_BUF.init([0u8; board::LINK_BUF_SIZE]);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    info!("Link UART initialized at {} baud", link_config.baudrate);

    // Password EEPROM
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = board::EEPROM_I2C_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_9, p.PIN_8, i2c_config);
    let passwords = PasswordManager::new(PasswordStore::new(At24::new(i2c), Delay));

    // Door motor: H-bridge inputs plus PWM on the enable pin
    let pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, pwm::Config::default());
    let (enable, _) = pwm.split();
    let enable = unwrap!(enable);
    let in1 = RpOutput::new(Output::new(p.PIN_3, Level::Low));
    let in2 = RpOutput::new(Output::new(p.PIN_4, Level::Low));
    let motor = unwrap!(HBridgeMotor::new(in1, in2, enable));

    let buzzer = GpioBuzzer::new_active_high(RpOutput::new(Output::new(p.PIN_5, Level::Low)));
    info!("Actuators initialized");

    let mut node = ActuationNode::new(
        CommandChannel::new(IoLink::new(rx, tx)),
        passwords,
        &SEQUENCER,
        TickTimer::new(),
        Actuators::new(motor, buzzer),
    );

    match node.run() {
        Ok(never) => match never {},
        Err(e) => error!("Actuation node stopped: {}", e),
    }

    // Only a reset recovers from here
    loop {
        cortex_m::asm::wfi();
    }
}
