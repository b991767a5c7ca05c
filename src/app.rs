use crate::sys_timer::{CtcTimer, SysTimer};
use arduino_hal::{
    hal::port::{PB0, PB1, PB2, PB3, PD0, PD1, PD7},
    pac::USART0,
    port::{
        mode::{Input, Output, PullUp},
        Pin,
    },
    Usart,
};
use halfstep::{
    config::{NUM_PINS, SERIAL_BAUD_RATE, STATUS_PERIOD_MS, STEP_DELAY_MS, STEP_STRIDE},
    status::{nominal_rpm_tenths, TenthsDisplay},
    time::timer::PeriodicTimer,
    MotorControl, Stepper, StepperError,
};

type Serial = Usart<USART0, Pin<Input, PD0>, Pin<Output, PD1>>;

type Coils =
    MotorControl<Pin<Output, PB0>, Pin<Output, PB1>, Pin<Output, PB2>, Pin<Output, PB3>>;

/// `[1234 ms] LEVEL message`
macro_rules! log {
    ($app:expr, $level:literal, $($arg:tt)*) => {{
        let now = $app.sys_timer.millis();
        ufmt::uwrite!(&mut $app.serial, "[{} ms] {} ", now, $level).ok();
        ufmt::uwriteln!(&mut $app.serial, $($arg)*).ok();
    }};
}

pub struct Application {
    sys_timer: SysTimer<CtcTimer<16, 64, 250>>,
    serial: Serial,
    coils: Coils,
    // D7, pressed = low
    mode_pin: Pin<Input<PullUp>, PD7>,
    status_timer: PeriodicTimer,
}

impl Application {
    pub fn new() -> Self {
        let dp = arduino_hal::Peripherals::take().unwrap();
        let pins = arduino_hal::pins!(dp);

        let serial = arduino_hal::default_serial!(dp, pins, SERIAL_BAUD_RATE);

        let mut sys_timer: SysTimer<CtcTimer<16, 64, 250>> = SysTimer::new(dp.TC0);

        sys_timer.init();

        // Enable interrupts globally
        unsafe { avr_device::interrupt::enable() };

        let stepper = Stepper::new(
            pins.d8.into_output_high(),
            pins.d9.into_output_high(),
            pins.d10.into_output_high(),
            pins.d11.into_output_high(),
        );

        let Ok(coils) = MotorControl::new(stepper) else {
            unreachable!("arduino-hal pins are infallible")
        };

        let mut app = Self {
            sys_timer,
            serial,
            coils,
            mode_pin: pins.d7.into_pull_up_input(),
            status_timer: PeriodicTimer::new(STATUS_PERIOD_MS),
        };

        log!(
            app,
            "INFO ",
            "halfstep: {} coils, stride {}, {} ms/step, ~{} rpm",
            NUM_PINS,
            STEP_STRIDE,
            STEP_DELAY_MS,
            TenthsDisplay(nominal_rpm_tenths() as i32)
        );
        let status = app.coils.status();
        log!(app, "INFO ", "{}", status);

        let now = app.sys_timer.millis();
        app.status_timer.start(now);

        app
    }

    /// One pass of the stepping loop.
    pub fn update(&mut self) {
        let pressed = self.mode_pin.is_low();

        match self.coils.tick(pressed, &mut self.sys_timer) {
            Ok(Some(mode)) => {
                log!(self, "INFO ", "mode -> {}", mode);
                let status = self.coils.status();
                log!(self, "INFO ", "{}", status);
            }
            Ok(None) => {}
            Err(StepperError::IoError) => {
                log!(self, "ERROR", "coil write failed");
            }
        }

        let now = self.sys_timer.millis();
        if let Ok(true) = self.status_timer.has_expired(now) {
            let status = self.coils.status();
            log!(self, "INFO ", "{}", status);
        }
    }
}
