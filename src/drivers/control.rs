use super::{
    mode::{Mode, ModeButton},
    stepper::{Stepper, StepperError},
};
use crate::{config::STEP_DELAY_MS, status::Status};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

/// The stepping loop plus its run mode.
///
/// Each [`tick`](MotorControl::tick) is one pass of the firmware loop and
/// takes exactly one step delay, whatever the mode.
pub struct MotorControl<PinIn1, PinIn2, PinIn3, PinIn4> {
    stepper: Stepper<PinIn1, PinIn2, PinIn3, PinIn4>,
    mode: Mode,
    button: ModeButton,
}

impl<PinIn1, PinIn2, PinIn3, PinIn4> MotorControl<PinIn1, PinIn2, PinIn3, PinIn4>
where
    PinIn1: OutputPin,
    PinIn2: OutputPin,
    PinIn3: OutputPin,
    PinIn4: OutputPin,
{
    /// Takes the stepper and drives its coils to the inactive level.
    pub fn new(
        mut stepper: Stepper<PinIn1, PinIn2, PinIn3, PinIn4>,
    ) -> Result<Self, StepperError> {
        stepper.setup()?;

        Ok(Self {
            stepper,
            mode: Mode::Normal,
            button: ModeButton::new(),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn stepper(&self) -> &Stepper<PinIn1, PinIn2, PinIn3, PinIn4> {
        &self.stepper
    }

    pub fn status(&self) -> Status {
        Status {
            mode: self.mode,
            phase: self
                .stepper
                .last_written()
                .unwrap_or_else(|| self.stepper.phase()),
            half_steps: self.stepper.half_steps(),
        }
    }

    /// Switches to `mode`. Entering [`Mode::Stopped`] releases the coils.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), StepperError> {
        if mode == self.mode {
            return Ok(());
        }

        self.mode = mode;
        if mode == Mode::Stopped {
            self.stepper.release()?;
        }
        Ok(())
    }

    /// Runs one loop pass.
    ///
    /// `button_is_low` is the current mode button sample. Returns the new
    /// mode when this sample completed a press.
    pub fn tick<D: DelayNs>(
        &mut self,
        button_is_low: bool,
        delay: &mut D,
    ) -> Result<Option<Mode>, StepperError> {
        let switched = if self.button.update(button_is_low) {
            self.set_mode(self.mode.next())?;
            Some(self.mode)
        } else {
            None
        };

        match self.mode.direction() {
            Some(direction) => {
                self.stepper.step(direction, delay)?;
            }
            None => delay.delay_ms(STEP_DELAY_MS),
        }

        Ok(switched)
    }
}
