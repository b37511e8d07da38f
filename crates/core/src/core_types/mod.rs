//! Core types: units, aircraft reference data and loading scenarios

pub mod aircraft;
pub mod loading;
pub mod units;

pub use aircraft::{Aircraft, CgRange, EnvelopePoint, FuelTank, Station};
pub use loading::{FuelLoad, LoadingScenario, StationLoad};
pub use units::*;
