//! Drives the public API through a session the way the firmware loop does.
use halfstep::{config::STEP_DELAY_MS, Mode, MotorControl, Stepper, StepperError};
use std::{cell::RefCell, convert::Infallible, rc::Rc};

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, OutputPin},
};

type Trace = Rc<RefCell<Vec<(usize, bool)>>>;

struct TracePin {
    index: usize,
    trace: Trace,
}

impl ErrorType for TracePin {
    type Error = Infallible;
}

impl OutputPin for TracePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push((self.index, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push((self.index, true));
        Ok(())
    }
}

#[derive(Default)]
struct Clock {
    now_ms: u64,
}

impl DelayNs for Clock {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ms += u64::from(ns) / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now_ms += u64::from(ms);
    }
}

type Control = MotorControl<TracePin, TracePin, TracePin, TracePin>;

fn rig() -> Result<(Control, Trace), StepperError> {
    let trace = Trace::default();
    let pin = |index| TracePin {
        index,
        trace: trace.clone(),
    };
    let control = MotorControl::new(Stepper::new(pin(0), pin(1), pin(2), pin(3)))?;
    Ok((control, trace))
}

/// Pin levels after replaying the trace.
fn levels(trace: &Trace) -> [bool; 4] {
    let mut levels = [false; 4];
    for &(index, high) in trace.borrow().iter() {
        levels[index] = high;
    }
    levels
}

/// Patterns asserted per loop pass, as bit arrays.
fn patterns(trace: &Trace, skip: usize) -> Vec<[u8; 4]> {
    trace.borrow()[skip..]
        .chunks(4)
        .map(|writes| {
            let mut bits = [0u8; 4];
            for &(index, high) in writes {
                bits[index] = high as u8;
            }
            bits
        })
        .collect()
}

#[test]
fn free_running_session_walks_even_entries() {
    let (mut control, trace) = rig().unwrap();
    let mut clock = Clock::default();

    assert_eq!(levels(&trace), [true; 4]);
    let setup_writes = trace.borrow().len();
    assert_eq!(setup_writes, 4);

    for _ in 0..8 {
        control.tick(false, &mut clock).unwrap();
    }

    let expected = [[1, 0, 0, 1], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 1]];
    let seen = patterns(&trace, setup_writes);
    assert_eq!(seen.len(), 8);
    assert_eq!(seen[..4], expected);
    assert_eq!(seen[4..], expected);
    assert_eq!(clock.now_ms, 8 * u64::from(STEP_DELAY_MS));
}

#[test]
fn rewind_then_stop_then_resume() {
    let (mut control, trace) = rig().unwrap();
    let mut clock = Clock::default();

    for _ in 0..100 {
        control.tick(false, &mut clock).unwrap();
    }
    // the first pass writes the origin
    assert_eq!(control.status().half_steps, 198);

    control.set_mode(Mode::Rewinding).unwrap();
    for _ in 0..150 {
        control.tick(false, &mut clock).unwrap();
    }
    assert_eq!(control.status().half_steps, -102);
    // -89.65 deg
    assert_eq!(control.status().angle_tenths(), -90);

    control.set_mode(Mode::Stopped).unwrap();
    let frozen = control.status();
    let writes = trace.borrow().len();
    for _ in 0..20 {
        control.tick(false, &mut clock).unwrap();
    }
    assert_eq!(control.status(), frozen);
    assert_eq!(trace.borrow().len(), writes);
    assert_eq!(levels(&trace), [true; 4]);

    control.set_mode(Mode::Normal).unwrap();
    control.tick(false, &mut clock).unwrap();
    assert_eq!(control.status().half_steps, -100);
    assert_eq!(clock.now_ms, 271 * u64::from(STEP_DELAY_MS));
}

#[test]
fn direction_change_backs_up_from_the_coils() {
    let (mut control, trace) = rig().unwrap();
    let mut clock = Clock::default();
    let setup_writes = trace.borrow().len();

    control.tick(false, &mut clock).unwrap();
    control.tick(false, &mut clock).unwrap();
    control.set_mode(Mode::Rewinding).unwrap();
    control.tick(false, &mut clock).unwrap();
    control.tick(false, &mut clock).unwrap();

    // entries 0 2 0 6
    assert_eq!(
        patterns(&trace, setup_writes),
        [[1, 0, 0, 1], [1, 1, 0, 0], [1, 0, 0, 1], [0, 0, 1, 1]]
    );
    assert_eq!(control.status().half_steps, -2);
    assert_eq!(control.status().phase.get(), 6);
}
