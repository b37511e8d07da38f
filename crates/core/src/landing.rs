//! Landing weight and CG projection after fuel burn
//!
//! The projection subtracts caller-specified burns from the departure fuel and
//! runs the ordinary calculation again. Which tank feeds the engine, and in what
//! proportion, is a property of the airframe's fuel system and the pilot's tank
//! management; this module applies no policy of its own. Callers pass one
//! [`FuelBurn`] per tank they expect to draw from.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::calculation::{calculate, CalculationResult};
use crate::core_types::aircraft::Aircraft;
use crate::core_types::loading::{FuelLoad, StationLoad};
use crate::core_types::units::{Gallons, Pounds};
use crate::error::CalculationError;

/// Fuel expected to be drawn from one tank before landing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelBurn {
    pub tank_id: String,
    pub gallons: Gallons,
}

impl FuelBurn {
    pub fn new(tank_id: impl Into<String>, gallons: f64) -> Self {
        Self {
            tank_id: tank_id.into(),
            gallons: Gallons::new(gallons),
        }
    }
}

/// Projected state at landing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingResult {
    /// Fuel left in each tank after the burns
    pub fuel_loads: Vec<FuelLoad>,
    /// Full calculation at the landing loading
    pub result: CalculationResult,
    /// Max landing weight, or max gross when the aircraft declares none
    pub landing_weight_limit: Pounds,
    pub is_within_landing_weight: bool,
    /// Limit minus landing weight; negative when over
    pub landing_weight_margin: Pounds,
}

/// Project weight and balance at landing.
///
/// Remaining fuel per tank is loaded minus burned. A burn against a tank with
/// no fuel load burns from zero and is appended after the loaded tanks; when a
/// tank appears more than once in `fuel_loads` the first entry is drawn down.
/// Burns are not clamped: drawing more than is loaded leaves negative gallons,
/// which the calculation reports as `NEGATIVE_FUEL`.
pub fn calculate_landing(
    aircraft: &Aircraft,
    station_loads: &[StationLoad],
    fuel_loads: &[FuelLoad],
    burns: &[FuelBurn],
) -> Result<LandingResult, CalculationError> {
    let mut remaining = fuel_loads.to_vec();

    for burn in burns {
        if aircraft.fuel_tank(&burn.tank_id).is_none() {
            error!(
                aircraft = %aircraft.id,
                tank_id = %burn.tank_id,
                "Fuel burn references a tank the aircraft does not declare"
            );
            return Err(CalculationError::UnknownFuelTank(burn.tank_id.clone()));
        }

        match remaining.iter_mut().find(|l| l.tank_id == burn.tank_id) {
            Some(load) => load.gallons -= burn.gallons,
            None => remaining.push(FuelLoad {
                tank_id: burn.tank_id.clone(),
                gallons: Gallons::ZERO - burn.gallons,
            }),
        }
    }

    let result = calculate(aircraft, station_loads, &remaining)?;

    let landing_weight_limit = aircraft
        .max_landing_weight
        .unwrap_or(aircraft.max_gross_weight);
    let is_within_landing_weight = result.total_weight <= landing_weight_limit;
    let landing_weight_margin = landing_weight_limit - result.total_weight;

    debug!(
        aircraft = %aircraft.id,
        landing_weight = *result.total_weight,
        landing_cg = *result.cg,
        within_landing_weight = is_within_landing_weight,
        "Landing projection calculated"
    );

    Ok(LandingResult {
        fuel_loads: remaining,
        result,
        landing_weight_limit,
        is_within_landing_weight,
        landing_weight_margin,
    })
}
