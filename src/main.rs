//! Arduino Nano firmware: drives a 28BYJ-48 through a ULN2003 board on
//! D8..D11, mode button on D7, log on the USB serial port.
//!
//! Build with a nightly AVR toolchain, e.g.
//! `RUSTFLAGS="-C target-cpu=atmega328p" cargo +nightly build --release --target avr-none -Z build-std=core`.
//! On any other target this binary is an empty shell; the stepping logic
//! lives in the library and is tested on the host.
#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
mod app;
#[cfg(all(target_arch = "avr", not(feature = "halt-on-panic")))]
mod panic;
#[cfg(target_arch = "avr")]
mod sys_timer;

#[cfg(all(target_arch = "avr", feature = "halt-on-panic"))]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[arduino_hal::entry]
fn main() -> ! {
    let mut app = app::Application::new();

    loop {
        app.update();
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {}
