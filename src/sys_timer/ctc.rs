use super::{reset_time, ImplTimer, OVER_FLOW_COUNTER};
use arduino_hal::pac::TC0;

/// TC0 in Clear Timer on Compare mode, one interrupt per period.
///
/// ╔═══════════╦══════════════╦═══════════════════╗
/// ║ PRESCALER ║ TIMER_COUNTS ║ Overflow Interval ║
/// ╠═══════════╬══════════════╬═══════════════════╣
/// ║        64 ║          250 ║              1 ms ║
/// ║       256 ║          125 ║              2 ms ║
/// ║       256 ║          250 ║              4 ms ║
/// ║      1024 ║          125 ║              8 ms ║
/// ║      1024 ║          250 ║             16 ms ║
/// ╚═══════════╩══════════════╩═══════════════════╝
///
/// `OF_COUNT` is the number of timer counts per period; the compare
/// register is loaded with `OF_COUNT - 1`.
pub struct CtcTimer<const SYS_CLK_MHZ: u32, const PRESCALER: u32, const OF_COUNT: u16> {
    timer_counter: TC0,
    over_flow_period_us: u32,
}

impl<const SYS_CLK_MHZ: u32, const PRESCALER: u32, const OF_COUNT: u16>
    CtcTimer<SYS_CLK_MHZ, PRESCALER, OF_COUNT>
{
    const PRESCALER_TEST: () = assert!(
        (PRESCALER == 1)
            || (PRESCALER == 8)
            || (PRESCALER == 64)
            || (PRESCALER == 256)
            || (PRESCALER == 1024)
    );

    const COUNT_TEST: () = assert!(
        OF_COUNT >= 1 && OF_COUNT <= 256,
        "OF_COUNT must fit the 8-bit compare register"
    );

    const ROUND_TEST: () = assert!(
        (PRESCALER * (OF_COUNT as u32) / SYS_CLK_MHZ) * SYS_CLK_MHZ
            == PRESCALER * (OF_COUNT as u32),
        "OF_PERIOD_US: u32 = PRESCALER * OF_COUNT / SYS_CLK_MHZ"
    );

    /// Microseconds represented by `counts` timer ticks.
    fn counts_to_us(counts: u8) -> u64 {
        (counts as u64 * PRESCALER as u64) / SYS_CLK_MHZ as u64
    }
}

impl<const SYS_CLK_MHZ: u32, const PRESCALER: u32, const OF_COUNT: u16> ImplTimer
    for CtcTimer<SYS_CLK_MHZ, PRESCALER, OF_COUNT>
{
    fn new(timer_counter: TC0) -> Self {
        let _ = Self::PRESCALER_TEST;
        let _ = Self::COUNT_TEST;
        let _ = Self::ROUND_TEST;

        let over_flow_period_us = (PRESCALER * (OF_COUNT as u32)) / SYS_CLK_MHZ;
        Self {
            timer_counter,
            over_flow_period_us,
        }
    }

    fn init(&mut self) {
        // TCCR0A: waveform generation mode CTC
        self.timer_counter.tccr0a().write(|w| w.wgm0().ctc());

        // OCR0A: compare value, counter clears on match
        self.timer_counter
            .ocr0a()
            .write(|w| w.set((OF_COUNT - 1) as u8));

        // TCCR0B: clock select
        self.timer_counter.tccr0b().write(|w| match PRESCALER {
            1 => w.cs0().direct(),
            8 => w.cs0().prescale_8(),
            64 => w.cs0().prescale_64(),
            256 => w.cs0().prescale_256(),
            1024 => w.cs0().prescale_1024(),
            _ => unreachable!(),
        });

        // TIMSK0: compare match A interrupt
        self.timer_counter.timsk0().write(|w| w.ocie0a().set_bit());

        reset_time()
    }

    fn micros(&self) -> u64 {
        avr_device::interrupt::free(|cs| {
            let mut periods = OVER_FLOW_COUNTER.borrow(cs).get();
            let counts = self.timer_counter.tcnt0().read().bits();

            // compare match already happened but its interrupt is held off
            // by this critical section
            if self.timer_counter.tifr0().read().ocf0a().bit_is_set()
                && (counts as u16) < OF_COUNT - 1
            {
                periods += 1;
            }

            periods * self.over_flow_period_us as u64 + Self::counts_to_us(counts)
        })
    }
}

#[avr_device::interrupt(atmega328p)]
fn TIMER0_COMPA() {
    avr_device::interrupt::free(|cs| {
        let counter = OVER_FLOW_COUNTER.borrow(cs);
        counter.set(counter.get() + 1)
    })
}
