use super::sequence::{Pattern, PhaseIndex};
use crate::config::{STEP_DELAY_MS, STEP_STRIDE};
use embedded_hal::{
    delay::DelayNs,
    digital::{OutputPin, PinState},
};

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum StepperError {
    IoError,
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum RotationDirection {
    #[default]
    Clockwise,
    AntiClockwise,
}

impl RotationDirection {
    pub fn reversed(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::AntiClockwise,
            RotationDirection::AntiClockwise => RotationDirection::Clockwise,
        }
    }
}

/// 4-wire unipolar stepper driven by direct pin toggling.
///
/// The pins idle HIGH (ULN2003 boards wired active-low); pattern writes use
/// the raw table bits.
///
/// `phase` is the entry the next step writes. After a step it already sits
/// one stride ahead in the direction of that step, so a step in the other
/// direction backs up from the entry on the coils instead.
pub struct Stepper<PinIn1, PinIn2, PinIn3, PinIn4> {
    in_1: PinIn1,
    in_2: PinIn2,
    in_3: PinIn3,
    in_4: PinIn4,
    phase: PhaseIndex,
    stride: usize,
    // direction of the last written step, `None` until the first write
    heading: Option<RotationDirection>,
    half_steps: i32,
}

impl<PinIn1, PinIn2, PinIn3, PinIn4> Stepper<PinIn1, PinIn2, PinIn3, PinIn4> {
    pub fn new(in_1: PinIn1, in_2: PinIn2, in_3: PinIn3, in_4: PinIn4) -> Self {
        Self {
            in_1,
            in_2,
            in_3,
            in_4,
            phase: PhaseIndex::ZERO,
            stride: STEP_STRIDE,
            heading: None,
            half_steps: 0,
        }
    }

    pub fn phase(&self) -> PhaseIndex {
        self.phase
    }

    /// Entry on the coils after the last step.
    pub fn last_written(&self) -> Option<PhaseIndex> {
        self.heading
            .map(|heading| shift(self.phase, heading.reversed(), self.stride))
    }

    pub fn current_pattern(&self) -> Pattern {
        self.phase.pattern()
    }

    /// Signed half-steps between the first written pattern and the last one.
    pub fn half_steps(&self) -> i32 {
        self.half_steps
    }

    /// Moves the phase index one stride in `direction`. Touches no pins.
    pub fn advance(&mut self, direction: RotationDirection) -> PhaseIndex {
        self.phase = shift(self.phase, direction, self.stride);
        self.phase
    }
}

impl<PinIn1, PinIn2, PinIn3, PinIn4> Stepper<PinIn1, PinIn2, PinIn3, PinIn4>
where
    PinIn1: OutputPin,
    PinIn2: OutputPin,
    PinIn3: OutputPin,
    PinIn4: OutputPin,
{
    /// Drives every coil pin to its inactive level.
    pub fn setup(&mut self) -> Result<(), StepperError> {
        self.release()
    }

    /// De-energizes all coils (all pins HIGH).
    pub fn release(&mut self) -> Result<(), StepperError> {
        self.apply([PinState::High; 4])
    }

    /// Asserts the pattern at the current phase on the pins.
    pub fn write_pattern(&mut self) -> Result<(), StepperError> {
        self.apply(self.current_pattern().levels())
    }

    /// One loop iteration: write the pattern one stride from the coils in
    /// `direction`, hold it for the step delay, then move the phase index on.
    ///
    /// The delay is taken even when a pin write fails, so a failing pin
    /// does not speed up the loop. The phase and travel are then left as
    /// they were.
    pub fn step<D: DelayNs>(
        &mut self,
        direction: RotationDirection,
        delay: &mut D,
    ) -> Result<PhaseIndex, StepperError> {
        let target = match self.heading {
            Some(heading) if heading != direction => {
                shift(self.phase, direction, 2 * self.stride)
            }
            _ => self.phase,
        };

        let written = self.apply(target.pattern().levels());
        delay.delay_ms(STEP_DELAY_MS);
        written?;

        if self.heading.is_some() {
            let stride = self.stride as i32;
            self.half_steps = match direction {
                RotationDirection::Clockwise => self.half_steps.wrapping_add(stride),
                RotationDirection::AntiClockwise => self.half_steps.wrapping_sub(stride),
            };
        }
        self.heading = Some(direction);
        self.phase = target;

        Ok(self.advance(direction))
    }

    fn apply(&mut self, levels: [PinState; 4]) -> Result<(), StepperError> {
        drive(&mut self.in_1, levels[0])?;
        drive(&mut self.in_2, levels[1])?;
        drive(&mut self.in_3, levels[2])?;
        drive(&mut self.in_4, levels[3])
    }
}

fn shift(phase: PhaseIndex, direction: RotationDirection, stride: usize) -> PhaseIndex {
    match direction {
        RotationDirection::Clockwise => phase.advance(stride),
        RotationDirection::AntiClockwise => phase.retreat(stride),
    }
}

#[inline(always)]
fn drive<P: OutputPin>(pin: &mut P, state: PinState) -> Result<(), StepperError> {
    pin.set_state(state).map_err(|_e| StepperError::IoError)
}
