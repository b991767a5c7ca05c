//! Open-loop travel accounting and the status line written over serial.
use crate::{
    config::{HALF_STEPS_PER_REV, STEP_DELAY_MS, STEP_STRIDE},
    drivers::{mode::Mode, sequence::PhaseIndex},
};
use ufmt::{uDisplay, uWrite, uwrite, Formatter};

/// Snapshot of the stepping loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub mode: Mode,
    /// Entry on the coils, or the start entry before the first step.
    pub phase: PhaseIndex,
    pub half_steps: i32,
}

impl Status {
    /// Output shaft angle in tenths of a degree, unwrapped.
    pub fn angle_tenths(&self) -> i32 {
        half_steps_to_deg_tenths(self.half_steps)
    }
}

impl uDisplay for Status {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(
            f,
            "mode={} phase={} half_steps={} angle=",
            self.mode,
            self.phase,
            self.half_steps
        )?;
        TenthsDisplay(self.angle_tenths()).fmt(f)?;
        f.write_str("deg")
    }
}

/// Fixed-point tenths rendered as `-12.3`; ufmt has no float support.
pub struct TenthsDisplay(pub i32);

impl uDisplay for TenthsDisplay {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let magnitude = self.0.unsigned_abs();
        if self.0 < 0 {
            f.write_str("-")?;
        }
        uwrite!(f, "{}.{}", magnitude / 10, magnitude % 10)
    }
}

/// Rounds half away from zero. Exact over the whole `i32` range.
pub fn half_steps_to_deg_tenths(half_steps: i32) -> i32 {
    let rev = i64::from(HALF_STEPS_PER_REV);
    let scaled = i64::from(half_steps) * 3600;
    let rounded = if scaled < 0 {
        (scaled - rev / 2) / rev
    } else {
        (scaled + rev / 2) / rev
    };
    rounded as i32
}

/// Output shaft speed at the configured stride and step delay, in tenths of
/// an rpm (truncated).
pub const fn nominal_rpm_tenths() -> u32 {
    (600_000 * STEP_STRIDE as u32) / (STEP_DELAY_MS * HALF_STEPS_PER_REV)
}
