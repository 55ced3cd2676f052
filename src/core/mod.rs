pub mod candidate;
pub mod engine;
pub mod pacing;
pub mod pipeline;

pub use crate::domain::model::{Region, Report, RunOutcome};
pub use crate::domain::ports::{Geocoder, Pacer, RegionDirectory, StoreFinder, Storage};
pub use crate::utils::error::Result;
