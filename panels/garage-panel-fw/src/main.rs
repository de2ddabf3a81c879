//! SmartGarage - Interface Node Firmware
//!
//! Owns the keypad and the 16x2 LCD. Enrolls a password on first boot,
//! then serves the open/change menu, asking the actuation node to check
//! every entry and mirroring the door and alarm sequences on screen.

#![no_std]
#![no_main]

mod board;

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use garage_core::node::InterfaceNode;
use garage_core::sequencer::Sequencer;
use garage_drivers::keypad::MatrixKeypad;
use garage_drivers::lcd::Hd44780;
use garage_drivers::link::IoLink;
use garage_hal::UartConfig;
use garage_hal_rp2040::uart::{gpio_to_uart, to_rp_config, UartId};
use garage_hal_rp2040::{tick_task, RpInput, RpOutput, TickTimer};
use garage_protocol::CommandChannel;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

static SEQUENCER: Sequencer = Sequencer::new();

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

static TX_BUF: StaticCell<[u8; board::LINK_BUF_SIZE]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; board::LINK_BUF_SIZE]> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("SmartGarage interface node starting...");

    let p = embassy_rp::init(Default::default());

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high.spawn(tick_task(&SEQUENCER)).unwrap();

    // Link to the actuation node
    assert_eq!(gpio_to_uart(board::LINK_TX_GPIO), Some(UartId::Uart0));
    assert_eq!(gpio_to_uart(board::LINK_RX_GPIO), Some(UartId::Uart0));
    let link_config = UartConfig::default();
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, to_rp_config(&link_config));
    let tx_buf = TX_BUF.init([0u8; board::LINK_BUF_SIZE]);
    let rx_buf = RX_BUF.init([0u8; board::LINK_BUF_SIZE]);
    let (tx, rx) = uart.into_buffered(Irqs, tx_buf, rx_buf).split();
    info!("Link UART initialized at {} baud", link_config.baudrate);

    // Keypad
    let rows = [
        RpOutput::new(Output::new(p.PIN_10, Level::High)),
        RpOutput::new(Output::new(p.PIN_11, Level::High)),
        RpOutput::new(Output::new(p.PIN_12, Level::High)),
        RpOutput::new(Output::new(p.PIN_13, Level::High)),
    ];
    let cols = [
        RpInput::new(Input::new(p.PIN_14, Pull::Up)),
        RpInput::new(Input::new(p.PIN_15, Pull::Up)),
        RpInput::new(Input::new(p.PIN_22, Pull::Up)),
        RpInput::new(Input::new(p.PIN_26, Pull::Up)),
    ];
    let keypad = MatrixKeypad::new(rows, cols, Delay);

    // LCD
    let lcd = Hd44780::new_16x2(
        RpOutput::new(Output::new(p.PIN_16, Level::Low)),
        RpOutput::new(Output::new(p.PIN_17, Level::Low)),
        [
            RpOutput::new(Output::new(p.PIN_18, Level::Low)),
            RpOutput::new(Output::new(p.PIN_19, Level::Low)),
            RpOutput::new(Output::new(p.PIN_20, Level::Low)),
            RpOutput::new(Output::new(p.PIN_21, Level::Low)),
        ],
        Delay,
    );
    info!("Keypad and LCD initialized");

    let mut node = InterfaceNode::new(
        CommandChannel::new(IoLink::new(rx, tx)),
        keypad,
        lcd,
        Delay,
        &SEQUENCER,
        TickTimer::new(),
    );

    match node.run() {
        Ok(never) => match never {},
        Err(e) => error!("Interface node stopped: {}", e),
    }

    loop {
        cortex_m::asm::wfi();
    }
}
