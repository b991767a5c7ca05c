mod ctc;

use arduino_hal::pac::TC0;
use avr_device::interrupt::Mutex;
use core::cell::Cell;
use embedded_hal::delay::DelayNs;
pub use ctc::CtcTimer;

static OVER_FLOW_COUNTER: Mutex<Cell<u64>> = Mutex::new(Cell::new(0));

fn reset_time() {
    avr_device::interrupt::free(|cs| {
        OVER_FLOW_COUNTER.borrow(cs).set(0);
    });
}

pub trait ImplTimer {
    fn new(timer_counter: TC0) -> Self;

    fn init(&mut self);

    fn micros(&self) -> u64;
}

/// Uptime clock and blocking delay on top of a hardware timer.
///
/// Interrupts must be enabled for time to advance.
pub struct SysTimer<WhichTimer: ImplTimer> {
    sys_timer: WhichTimer,
}

impl<WhichTimer: ImplTimer> SysTimer<WhichTimer> {
    pub fn new(timer_counter: TC0) -> Self {
        Self {
            sys_timer: WhichTimer::new(timer_counter),
        }
    }

    pub fn init(&mut self) {
        self.sys_timer.init()
    }

    pub fn micros(&self) -> u64 {
        self.sys_timer.micros()
    }

    pub fn millis(&self) -> u64 {
        self.micros() / 1_000
    }

    pub fn delay_micros(&self, delay_us: u64) {
        let t_start = self.micros();

        while self.micros().wrapping_sub(t_start) < delay_us {
            avr_device::asm::nop();
        }
    }
}

impl<WhichTimer: ImplTimer> DelayNs for SysTimer<WhichTimer> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_micros(u64::from(ns.div_ceil(1_000)))
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_micros(u64::from(us))
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay_micros(u64::from(ms) * 1_000)
    }
}
