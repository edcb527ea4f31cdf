pub mod advice;
pub mod forecast;
pub mod observations;

pub use advice::{advise, advise_outcome};
pub use forecast::{ForecastEngine, ForecastError, ForecastParams};
pub use observations::{ObservationCache, ObservationService};
