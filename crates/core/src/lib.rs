//! Weight and Balance Core Library
//!
//! The calculation engine behind the loading planner: given an aircraft's static
//! weight-and-balance data and a pilot-entered loading, it computes total weight,
//! moment and CG, checks them against the certified limits and the CG envelope,
//! and produces graded warnings for every violation or near-violation.
//!
//! ## Guarantees
//!
//! - Pure functions of their inputs: no I/O, no interior state, safe to call from
//!   any number of threads at once
//! - Plain IEEE-754 double arithmetic in a fixed accumulation order, so every
//!   client linking this crate (directly or through the C ABI) gets identical figures
//! - Loadings are never rejected or clamped; limit problems become warnings, and
//!   only references to undeclared stations or tanks are errors

// Core types and utilities
pub mod core_types;

// Envelope geometry (leaf) and the accumulator built on it
pub mod calculation;
pub mod envelope;
pub mod error;

// Built on the accumulator
pub mod batch;
pub mod catalog;
pub mod landing;

// Re-export core types
pub use core_types::{
    Aircraft, CgRange, EnvelopePoint, FuelLoad, FuelTank, Gallons, Inches, LoadingScenario,
    PoundInches, Pounds, PoundsPerGallon, Station, StationLoad,
};

// Re-export the engine
pub use calculation::{
    calculate, calculate_scenario, calculate_with_thresholds, CalculationResult, FuelDetail,
    StationDetail, Warning, WarningCode, WarningLevel, WarningThresholds,
};
pub use envelope::{is_point_in_envelope, limits_at_weight, CgLimits};
pub use error::CalculationError;

pub use batch::{calculate_batch, LoadingRequest};
pub use catalog::AircraftCatalog;
pub use landing::{calculate_landing, FuelBurn, LandingResult};
