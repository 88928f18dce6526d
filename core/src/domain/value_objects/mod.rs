//! Value objects representing immutable domain concepts.

pub mod actor;
pub mod stay_dates;
pub mod version_check;

pub use actor::Actor;
pub use stay_dates::{StayDates, MAX_NIGHTS};
pub use version_check::VersionCheck;
