//! Domain layer: claim sets, principals, validation outcomes and time.

pub mod clock;
pub mod entities;
pub mod value_objects;

pub use clock::{Clock, ManualClock, SystemClock, MICROS_PER_SECOND};
pub use entities::{claims, ClaimSet, Principal};
pub use value_objects::{InvalidReason, ValidationResult};
