use super::stepper::RotationDirection;
use crate::config::MODE_DEBOUNCE_SAMPLES;

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    #[default]
    Normal,
    Rewinding,
    Stopped,
}

impl Mode {
    /// Button order: Normal -> Rewinding -> Stopped -> Normal.
    pub fn next(self) -> Self {
        match self {
            Mode::Normal => Mode::Rewinding,
            Mode::Rewinding => Mode::Stopped,
            Mode::Stopped => Mode::Normal,
        }
    }

    /// `None` while stopped.
    pub fn direction(self) -> Option<RotationDirection> {
        match self {
            Mode::Normal => Some(RotationDirection::Clockwise),
            Mode::Rewinding => Some(RotationDirection::AntiClockwise),
            Mode::Stopped => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Rewinding => "rewinding",
            Mode::Stopped => "stopped",
        }
    }
}

impl ufmt::uDisplay for Mode {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(self.as_str())
    }
}

/// Polled, debounced push button (pressed = low).
///
/// Reports a press once the line has read low for
/// [`MODE_DEBOUNCE_SAMPLES`] consecutive samples after a release. Holding
/// the button does not repeat.
#[derive(Debug, Default)]
pub struct ModeButton {
    low_samples: u8,
    latched: bool,
}

impl ModeButton {
    pub const fn new() -> Self {
        Self {
            low_samples: 0,
            latched: false,
        }
    }

    /// Feeds one sample; returns `true` on the sample that completes a press.
    pub fn update(&mut self, is_low: bool) -> bool {
        if !is_low {
            self.low_samples = 0;
            self.latched = false;
            return false;
        }

        if self.latched {
            return false;
        }

        self.low_samples = self.low_samples.saturating_add(1);
        if self.low_samples >= MODE_DEBOUNCE_SAMPLES {
            self.latched = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(button: &mut ModeButton, samples: &[bool]) -> usize {
        samples.iter().filter(|&&s| button.update(s)).count()
    }

    #[test]
    fn modes_cycle_in_button_order() {
        let mut mode = Mode::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(mode);
            mode = mode.next();
        }

        assert_eq!(
            seen,
            [Mode::Normal, Mode::Rewinding, Mode::Stopped, Mode::Normal]
        );
    }

    #[test]
    fn stopped_has_no_direction() {
        assert_eq!(Mode::Normal.direction(), Some(RotationDirection::Clockwise));
        assert_eq!(
            Mode::Rewinding.direction(),
            Some(RotationDirection::AntiClockwise)
        );
        assert_eq!(Mode::Stopped.direction(), None);
    }

    #[test]
    fn press_fires_once_after_debounce() {
        let mut button = ModeButton::new();
        let n = MODE_DEBOUNCE_SAMPLES as usize;

        for _ in 0..n - 1 {
            assert!(!button.update(true));
        }
        assert!(button.update(true));
        // held
        assert_eq!(feed(&mut button, &[true; 20]), 0);
    }

    #[test]
    fn bounce_shorter_than_debounce_is_ignored() {
        let mut button = ModeButton::new();
        let bounce = [true, false, true, true, false, true, false, false];

        assert_eq!(feed(&mut button, &bounce), 0);
    }

    #[test]
    fn release_rearms_the_button() {
        let mut button = ModeButton::new();
        let press = [true; MODE_DEBOUNCE_SAMPLES as usize];

        assert_eq!(feed(&mut button, &press), 1);
        assert_eq!(feed(&mut button, &[false]), 0);
        assert_eq!(feed(&mut button, &press), 1);
    }

    #[test]
    fn mode_renders_lowercase() {
        let mut s = String::new();
        ufmt::uwrite!(&mut s, "{}/{}", Mode::Rewinding, Mode::Stopped).unwrap();

        assert_eq!(s, "rewinding/stopped");
    }
}
