use crate::config::{NUM_PINS, NUM_STEPS};
use embedded_hal::digital::PinState;

/// Coil energization pattern for one phase, one bit per pin (IN1..IN4).
///
/// Bits map to pin levels as-is: 1 = HIGH, 0 = LOW.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern([u8; NUM_PINS]);

impl Pattern {
    pub const fn new(bits: [u8; NUM_PINS]) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> [u8; NUM_PINS] {
        self.0
    }

    pub fn level(&self, pin: usize) -> PinState {
        if self.0[pin] == 1 {
            PinState::High
        } else {
            PinState::Low
        }
    }

    pub fn levels(&self) -> [PinState; NUM_PINS] {
        [self.level(0), self.level(1), self.level(2), self.level(3)]
    }
}

// from manufacturers datasheet
pub const EXCITATION_TABLE: [Pattern; NUM_STEPS] = [
    Pattern::new([1, 0, 0, 1]),
    Pattern::new([1, 0, 0, 0]),
    Pattern::new([1, 1, 0, 0]),
    Pattern::new([0, 1, 0, 0]),
    Pattern::new([0, 1, 1, 0]),
    Pattern::new([0, 0, 1, 0]),
    Pattern::new([0, 0, 1, 1]),
    Pattern::new([0, 0, 0, 1]),
];

/// Position in [`EXCITATION_TABLE`]. Always reduced modulo [`NUM_STEPS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseIndex(usize);

impl PhaseIndex {
    pub const ZERO: Self = Self(0);

    pub const fn new(index: usize) -> Self {
        Self(index % NUM_STEPS)
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// Moves forward by `stride` entries, wrapping at the end of the table.
    pub const fn advance(self, stride: usize) -> Self {
        Self((self.0 + stride % NUM_STEPS) % NUM_STEPS)
    }

    /// Moves backward by `stride` entries, wrapping at the start of the table.
    pub const fn retreat(self, stride: usize) -> Self {
        Self((self.0 + NUM_STEPS - stride % NUM_STEPS) % NUM_STEPS)
    }

    pub const fn pattern(self) -> Pattern {
        EXCITATION_TABLE[self.0]
    }
}

impl ufmt::uDisplay for PhaseIndex {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        ufmt::uwrite!(f, "{}", self.0)
    }
}
