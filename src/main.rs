#![no_std]
#![no_main]

mod console;
mod flash;

use alphanumeric_core::{Config, Controller, ShiftRegister, Step};
use defmt::{info, warn};
use defmt_rtt as _;
use embedded_hal::digital::{OutputPin, StatefulOutputPin};
use fugit::RateExtU32;
use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal; // Hardware Abstraction Layer (higher-level drivers)
use rp_pico::hal::pac; // Peripheral Access Crate (low-level register access)
use rp_pico::hal::uart::{DataBits, StopBits, UartConfig, UartPeripheral};
use rp_pico::hal::Clock;

use crate::console::Console;
use crate::flash::FlashSector;

const BAUD_RATE: u32 = 9600;

#[entry]
fn main() -> ! {
    let mut pac = pac::Peripherals::take().unwrap();

    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    // Configure the clocks (125 MHz system clock)
    let clocks = hal::clocks::init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .unwrap();

    let sio = hal::Sio::new(pac.SIO); // single-cycle IO
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );
    let mut led_pin = pins.led.into_push_pull_output();
    led_pin.set_high().unwrap();

    // Shift-register chain: GP2 data, GP3 clock, GP4 latch
    let register = ShiftRegister::new(
        pins.gpio2.into_push_pull_output(),
        pins.gpio3.into_push_pull_output(),
        pins.gpio4.into_push_pull_output(),
    );

    // Console on UART0: GP0 TX, GP1 RX
    let uart_pins = (
        pins.gpio0.into_function::<hal::gpio::FunctionUart>(),
        pins.gpio1.into_function::<hal::gpio::FunctionUart>(),
    );
    let uart = UartPeripheral::new(pac.UART0, uart_pins, &mut pac.RESETS)
        .enable(
            UartConfig::new(BAUD_RATE.Hz(), DataBits::Eight, None, StopBits::One),
            clocks.peripheral_clock.freq(),
        )
        .unwrap();
    let mut console = Console::new(uart);

    let mut timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    let config = Config::DEFAULT;
    let mut controller = Controller::new(register, FlashSector::new(), &config).unwrap();
    info!(
        "showing {} byte message, one step every {} ms",
        controller.display().message().len(),
        config.step_duration().to_millis()
    );

    loop {
        match controller.step(&mut console, &mut timer) {
            Ok(Step::Replaced) => {
                // toggle LED to show a message was accepted
                led_pin.toggle().unwrap();
            }
            Ok(Step::Refreshed | Step::Scrolled) => {}
            Err(err) => warn!("control loop: {}", err),
        }
    }
}
