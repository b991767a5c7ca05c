pub mod control;
pub mod mode;
pub mod sequence;
pub mod stepper;
