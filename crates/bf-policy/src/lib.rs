//! Operating policies for the annual storage simulation.
//!
//! Each policy is a closed set of named variants selected by configuration:
//! - reservoir models (evaporation regression + default capacity)
//! - compliance-point release rules
//! - optional upstream-use trigger schedules

pub mod release;
pub mod reservoir;
pub mod trigger;

pub use release::ReleasePolicy;
pub use reservoir::ReservoirModel;
pub use trigger::TriggerPolicy;
