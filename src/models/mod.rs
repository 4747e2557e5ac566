//! Core data models for ladder statistics.

mod enums;
mod season;
mod snapshot;

pub use enums::*;
pub use season::*;
pub use snapshot::*;
