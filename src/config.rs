//! Build-time configuration. There is no runtime configuration surface.

/// Coil terminals driven by the stepper (IN1..IN4 on the ULN2003 board).
pub const NUM_PINS: usize = 4;

/// Entries in the half-step excitation table.
pub const NUM_STEPS: usize = 8;

/// Table entries advanced per step. 2 = double-stepping: faster and shakier.
pub const STEP_STRIDE: usize = 2;

/// Hold time after each pattern write (ms). Sets the maximum step rate.
pub const STEP_DELAY_MS: u32 = 5;

/// 28BYJ-48: 64 half-steps per rotor turn, 1:64 gearbox.
pub const HALF_STEPS_PER_REV: u32 = 64 * 64;

pub const SERIAL_BAUD_RATE: u32 = 115_200;

/// Interval between periodic status lines (ms).
pub const STATUS_PERIOD_MS: u64 = 10_000;

/// Consecutive low samples needed to accept a mode button press.
pub const MODE_DEBOUNCE_SAMPLES: u8 = 4;
