//! Half-step driver for a 4-wire unipolar stepper (28BYJ-48 on a ULN2003
//! board), written against `embedded-hal` 1.0 so the stepping logic runs on
//! any HAL and can be exercised on the host.
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod drivers;
pub mod status;
pub mod time;
pub mod tools;

pub use drivers::control::MotorControl;
pub use drivers::mode::{Mode, ModeButton};
pub use drivers::sequence::{Pattern, PhaseIndex, EXCITATION_TABLE};
pub use drivers::stepper::{RotationDirection, Stepper, StepperError};
pub use status::Status;
