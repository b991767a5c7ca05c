use arduino_hal::delay_ms;
use core::panic::PanicInfo;
use halfstep::{config::SERIAL_BAUD_RATE, tools::str_writer::StrWriter};

/// Lights the on-board LED, then repeats the panic message over serial once
/// per second. The coil pins are left as they were.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    avr_device::interrupt::disable();

    let dp = unsafe { arduino_hal::Peripherals::steal() };
    let pins = arduino_hal::pins!(dp);

    // Digital pin 13 is also connected to an onboard LED marked "L"
    let mut led_pin = pins.d13.into_output();
    led_pin.set_high();

    let mut serial = arduino_hal::default_serial!(dp, pins, SERIAL_BAUD_RATE);

    let mut str_w = StrWriter::<100>::new();
    let msg = str_w.format(format_args!("{}", info.message()));

    loop {
        match info.location() {
            Some(loc) => ufmt::uwriteln!(
                &mut serial,
                "PANIC: {} at {}:{}",
                msg,
                loc.file(),
                loc.line()
            )
            .ok(),
            None => ufmt::uwriteln!(&mut serial, "PANIC: {}", msg).ok(),
        };

        delay_ms(1_000);
    }
}
