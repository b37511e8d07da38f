//! Parallel evaluation of independent loadings
//!
//! Used when many results are needed at once: one per aircraft in a fleet list,
//! or a sweep of what-if loadings for a chart. Calculations share nothing but
//! read-only aircraft data, so they run on the rayon pool without coordination.

use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

use crate::calculation::{calculate_scenario, CalculationResult};
use crate::core_types::aircraft::Aircraft;
use crate::core_types::loading::LoadingScenario;
use crate::error::CalculationError;

/// One loading to evaluate against a shared aircraft
#[derive(Debug, Clone)]
pub struct LoadingRequest {
    pub aircraft: Arc<Aircraft>,
    pub scenario: LoadingScenario,
}

impl LoadingRequest {
    pub fn new(aircraft: Arc<Aircraft>, scenario: LoadingScenario) -> Self {
        Self { aircraft, scenario }
    }
}

/// Evaluate every request in parallel. Results come back in request order and
/// each is exactly what a sequential call would return.
pub fn calculate_batch(
    requests: &[LoadingRequest],
) -> Vec<Result<CalculationResult, CalculationError>> {
    debug!(count = requests.len(), "Calculating loading batch");
    requests
        .par_iter()
        .map(|request| calculate_scenario(&request.aircraft, &request.scenario))
        .collect()
}
