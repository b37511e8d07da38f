//! Weight and balance accumulator
//!
//! Folds a loading scenario onto an aircraft definition:
//!
//! ```text
//! W  = W_empty + Σ W_station + Σ (gal × lb/gal)
//! M  = W_empty × arm_empty + Σ W_i × arm_i
//! CG = M / W            (0 when W <= 0)
//! ```
//!
//! and reports every limit it violates or approaches as a graded [`Warning`].
//! Loadings are never rejected or clamped; only ids the aircraft doesn't declare
//! are an error.
//!
//! Clients on other platforms must reproduce these figures bit for bit, so the
//! accumulation order here is part of the contract: empty weight first, then
//! stations in input order, then fuel in input order.

pub mod thresholds;
pub mod warning;

pub use thresholds::WarningThresholds;
pub use warning::{Warning, WarningCode, WarningLevel, PREFLIGHT_ACTION_REF};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::core_types::aircraft::Aircraft;
use crate::core_types::loading::{FuelLoad, LoadingScenario, StationLoad};
use crate::core_types::units::{Gallons, Inches, PoundInches, Pounds};
use crate::envelope::{is_point_in_envelope, limits_at_weight, CgLimits};
use crate::error::CalculationError;

/// Per-station line of the loading breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDetail {
    pub station_id: String,
    pub name: String,
    pub weight: Pounds,
    pub arm: Inches,
    pub moment: PoundInches,
}

/// Per-tank line of the loading breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelDetail {
    pub tank_id: String,
    pub name: String,
    pub gallons: Gallons,
    pub weight: Pounds,
    pub arm: Inches,
    pub moment: PoundInches,
}

/// Outcome of one calculation. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub total_weight: Pounds,
    pub total_moment: PoundInches,
    pub cg: Inches,

    pub is_within_weight_limit: bool,
    #[serde(rename = "isWithinCGEnvelope")]
    pub is_within_cg_envelope: bool,
    pub is_within_all_station_limits: bool,

    /// Max gross minus total; negative when over
    pub weight_margin: Pounds,
    /// CG minus the static forward bound
    pub cg_forward_margin: Inches,
    /// Static aft bound minus CG
    pub cg_aft_margin: Inches,

    /// Envelope slice at the total weight, `None` outside the envelope's weight span
    pub limits_at_weight: Option<CgLimits>,

    pub station_details: Vec<StationDetail>,
    pub fuel_details: Vec<FuelDetail>,

    /// Item warnings in input order, then weight warnings, then CG warnings
    pub warnings: Vec<Warning>,
}

impl CalculationResult {
    /// Whether a warning with this code was emitted
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Most severe level present, `None` when there are no warnings
    pub fn highest_level(&self) -> Option<WarningLevel> {
        self.warnings.iter().map(|w| w.level).max()
    }

    /// Within every limit and free of danger-level warnings
    pub fn is_safe(&self) -> bool {
        self.is_within_weight_limit
            && self.is_within_cg_envelope
            && self.is_within_all_station_limits
            && self.highest_level() != Some(WarningLevel::Danger)
    }

    /// Warnings ordered most severe first, emission order kept within a level
    pub fn warnings_by_severity(&self) -> Vec<&Warning> {
        let mut sorted: Vec<&Warning> = self.warnings.iter().collect();
        sorted.sort_by(|a, b| b.level.cmp(&a.level));
        sorted
    }

    /// Total fuel weight on board
    pub fn fuel_weight(&self) -> Pounds {
        self.fuel_details.iter().map(|f| f.weight).sum()
    }
}

/// Calculate weight and balance with the default warning thresholds
///
/// # Example
/// ```
/// use weight_balance_core::calculation::calculate;
/// use weight_balance_core::core_types::{Aircraft, FuelLoad, StationLoad};
///
/// let aircraft = Aircraft::cessna_172n();
/// let result = calculate(
///     &aircraft,
///     &[StationLoad::new("front-seats", 340.0)],
///     &[FuelLoad::new("main", 40.0)],
/// )
/// .unwrap();
///
/// assert_eq!(*result.total_weight, 2046.0);
/// assert!(result.is_within_weight_limit);
/// ```
pub fn calculate(
    aircraft: &Aircraft,
    station_loads: &[StationLoad],
    fuel_loads: &[FuelLoad],
) -> Result<CalculationResult, CalculationError> {
    calculate_with_thresholds(
        aircraft,
        station_loads,
        fuel_loads,
        &WarningThresholds::default(),
    )
}

/// Calculate a [`LoadingScenario`] with the default warning thresholds
pub fn calculate_scenario(
    aircraft: &Aircraft,
    scenario: &LoadingScenario,
) -> Result<CalculationResult, CalculationError> {
    calculate(aircraft, &scenario.station_loads, &scenario.fuel_loads)
}

/// Calculate weight and balance with caller-supplied warning thresholds
pub fn calculate_with_thresholds(
    aircraft: &Aircraft,
    station_loads: &[StationLoad],
    fuel_loads: &[FuelLoad],
    thresholds: &WarningThresholds,
) -> Result<CalculationResult, CalculationError> {
    let mut total_weight = aircraft.empty_weight;
    let mut total_moment = aircraft.empty_moment();
    let mut warnings = Vec::new();
    let mut all_stations_within_limits = true;

    // 1. Stations, in input order
    let mut station_details = Vec::with_capacity(station_loads.len());
    for load in station_loads {
        let Some(station) = aircraft.station(&load.station_id) else {
            error!(
                aircraft = %aircraft.id,
                station_id = %load.station_id,
                "Loading references a station the aircraft does not declare"
            );
            return Err(CalculationError::UnknownStation(load.station_id.clone()));
        };

        let weight = load.weight;
        let moment = weight * station.arm;

        if weight < 0.0 {
            warnings.push(
                Warning::new(
                    WarningLevel::Danger,
                    WarningCode::NegativeWeight,
                    format!("Negative weight at {}", station.name),
                )
                .detail(format!("{weight} entered")),
            );
        }

        if let Some(max_weight) = station.max_weight {
            if weight > max_weight {
                all_stations_within_limits = false;
                warnings.push(
                    Warning::new(
                        WarningLevel::Danger,
                        WarningCode::StationOverweight,
                        format!("{} exceeds its {max_weight} limit", station.name),
                    )
                    .detail(format!("{weight} loaded, {} over", weight - max_weight)),
                );
            }
        }

        trace!(station = %station.id, weight = *weight, moment = *moment, "Station folded");
        total_weight += weight;
        total_moment += moment;

        station_details.push(StationDetail {
            station_id: station.id.clone(),
            name: station.name.clone(),
            weight,
            arm: station.arm,
            moment,
        });
    }

    // 2. Fuel, in input order
    let mut fuel_details = Vec::with_capacity(fuel_loads.len());
    for load in fuel_loads {
        let Some(tank) = aircraft.fuel_tank(&load.tank_id) else {
            error!(
                aircraft = %aircraft.id,
                tank_id = %load.tank_id,
                "Loading references a fuel tank the aircraft does not declare"
            );
            return Err(CalculationError::UnknownFuelTank(load.tank_id.clone()));
        };

        let gallons = load.gallons;
        let weight = gallons * tank.fuel_weight_per_gallon;
        let moment = weight * tank.arm;

        if gallons < 0.0 {
            warnings.push(
                Warning::new(
                    WarningLevel::Danger,
                    WarningCode::NegativeFuel,
                    format!("Negative fuel in {}", tank.name),
                )
                .detail(format!("{gallons} entered")),
            );
        }

        if gallons > tank.max_gallons {
            warnings.push(
                Warning::new(
                    WarningLevel::Danger,
                    WarningCode::FuelOvercapacity,
                    format!("{} holds at most {}", tank.name, tank.max_gallons),
                )
                .detail(format!(
                    "{gallons} loaded, {} over",
                    gallons - tank.max_gallons
                )),
            );
        }

        trace!(tank = %tank.id, gallons = *gallons, weight = *weight, "Fuel folded");
        total_weight += weight;
        total_moment += moment;

        fuel_details.push(FuelDetail {
            tank_id: tank.id.clone(),
            name: tank.name.clone(),
            gallons,
            weight,
            arm: tank.arm,
            moment,
        });
    }

    // 3. Totals and margins
    let cg = if total_weight > 0.0 {
        total_moment / total_weight
    } else {
        Inches::ZERO
    };

    let max_gross = aircraft.max_gross_weight;
    let is_within_weight_limit = total_weight <= max_gross;
    let weight_margin = max_gross - total_weight;
    let cg_forward_margin = cg - aircraft.cg_range.forward;
    let cg_aft_margin = aircraft.cg_range.aft - cg;
    let is_within_cg_envelope = is_point_in_envelope(total_weight, cg, &aircraft.cg_envelope);

    // 4. Weight warnings
    if !is_within_weight_limit {
        warnings.push(
            Warning::new(
                WarningLevel::Danger,
                WarningCode::OverMaxGross,
                "Over maximum gross weight",
            )
            .detail(format!(
                "{total_weight} exceeds {max_gross} by {}",
                total_weight - max_gross
            ))
            .regulatory_ref(PREFLIGHT_ACTION_REF),
        );
    } else if *weight_margin < *max_gross * thresholds.near_gross_fraction {
        let percent = *weight_margin / *max_gross * 100.0;
        warnings.push(
            Warning::new(
                WarningLevel::Caution,
                WarningCode::NearMaxGross,
                "Approaching maximum gross weight",
            )
            .detail(format!(
                "{weight_margin} remaining ({percent:.1}% of maximum gross)"
            )),
        );
    }

    if let Some(max_ramp) = aircraft.max_ramp_weight {
        if total_weight > max_ramp {
            warnings.push(
                Warning::new(
                    WarningLevel::Danger,
                    WarningCode::OverMaxRamp,
                    "Over maximum ramp weight",
                )
                .detail(format!(
                    "{total_weight} exceeds {max_ramp} by {}",
                    total_weight - max_ramp
                )),
            );
        }
    }

    if let Some(max_landing) = aircraft.max_landing_weight {
        if total_weight > max_landing {
            warnings.push(
                Warning::new(
                    WarningLevel::Warning,
                    WarningCode::OverMaxLanding,
                    "Over maximum landing weight",
                )
                .detail(format!(
                    "{total_weight} exceeds {max_landing} by {}; burn fuel before landing",
                    total_weight - max_landing
                )),
            );
        }
    }

    // 5. CG warnings
    let limits = limits_at_weight(total_weight, &aircraft.cg_envelope);

    if !is_within_cg_envelope {
        let (forward, aft) = limits.map_or(
            (aircraft.cg_range.forward, aircraft.cg_range.aft),
            |l| (l.forward, l.aft),
        );
        warnings.push(
            Warning::new(
                WarningLevel::Danger,
                WarningCode::CgOutOfEnvelope,
                "CG outside the approved envelope",
            )
            .detail(format!(
                "CG {cg} at {total_weight}; limits {forward} to {aft}"
            ))
            .regulatory_ref(PREFLIGHT_ACTION_REF),
        );
    } else if let Some(limits) = limits {
        let near = *thresholds.cg_near_limit;
        let to_forward = cg - limits.forward;
        let to_aft = limits.aft - cg;
        if *to_forward < near || *to_aft < near {
            let (side, distance) = if to_forward <= to_aft {
                ("forward", to_forward)
            } else {
                ("aft", to_aft)
            };
            warnings.push(
                Warning::new(
                    WarningLevel::Caution,
                    WarningCode::CgNearLimit,
                    format!("CG near the {side} limit"),
                )
                .detail(format!(
                    "CG {cg} is {distance} inside the {side} limit at {total_weight}"
                )),
            );
        }
    }

    debug!(
        aircraft = %aircraft.id,
        total_weight = *total_weight,
        cg = *cg,
        within_envelope = is_within_cg_envelope,
        warnings = warnings.len(),
        "Weight and balance calculated"
    );

    Ok(CalculationResult {
        total_weight,
        total_moment,
        cg,
        is_within_weight_limit,
        is_within_cg_envelope,
        is_within_all_station_limits: all_stations_within_limits,
        weight_margin,
        cg_forward_margin,
        cg_aft_margin,
        limits_at_weight: limits,
        station_details,
        fuel_details,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c172() -> Aircraft {
        Aircraft::cessna_172n()
    }

    fn codes(result: &CalculationResult) -> Vec<WarningCode> {
        result.warnings.iter().map(|w| w.code).collect()
    }

    #[test]
    fn test_empty_aircraft() {
        let result = calculate(&c172(), &[], &[]).unwrap();
        assert_eq!(*result.total_weight, 1466.0);
        assert_eq!(*result.total_moment, 1466.0 * 40.6);
        assert_eq!(*result.cg, 1466.0 * 40.6 / 1466.0);
        assert!(result.is_within_weight_limit);
        assert!(result.is_within_all_station_limits);
        assert!(!result.has_warning(WarningCode::OverMaxGross));
    }

    #[test]
    fn test_zero_weight_gives_zero_cg() {
        let mut aircraft = c172();
        aircraft.empty_weight = Pounds::ZERO;
        let result = calculate(&aircraft, &[], &[]).unwrap();
        assert_eq!(result.cg, Inches::ZERO);
    }

    #[test]
    fn test_negative_total_weight_gives_zero_cg() {
        let mut aircraft = c172();
        aircraft.empty_weight = Pounds::new(10.0);
        let result =
            calculate(&aircraft, &[StationLoad::new("front-seats", -50.0)], &[]).unwrap();
        assert_eq!(*result.total_weight, -40.0);
        assert_eq!(result.cg, Inches::ZERO);
    }

    #[test]
    fn test_details_preserve_input_order() {
        let result = calculate(
            &c172(),
            &[
                StationLoad::new("baggage-1", 20.0),
                StationLoad::new("front-seats", 300.0),
            ],
            &[FuelLoad::new("main", 10.0)],
        )
        .unwrap();

        let ids: Vec<&str> = result
            .station_details
            .iter()
            .map(|d| d.station_id.as_str())
            .collect();
        assert_eq!(ids, ["baggage-1", "front-seats"]);
        assert_eq!(*result.station_details[0].moment, 20.0 * 95.0);
        assert_eq!(*result.fuel_details[0].weight, 60.0);
        assert_eq!(*result.fuel_details[0].moment, 60.0 * 48.0);
        assert_eq!(*result.fuel_weight(), 60.0);
    }

    #[test]
    fn test_unknown_ids_are_errors() {
        let err = calculate(&c172(), &[StationLoad::new("cargo-pod", 10.0)], &[]).unwrap_err();
        assert_eq!(err, CalculationError::UnknownStation("cargo-pod".to_owned()));

        let err = calculate(&c172(), &[], &[FuelLoad::new("tip", 5.0)]).unwrap_err();
        assert_eq!(err, CalculationError::UnknownFuelTank("tip".to_owned()));
        assert_eq!(err.id(), "tip");
    }

    #[test]
    fn test_warnings_do_not_reject_input() {
        let result = calculate(
            &c172(),
            &[StationLoad::new("baggage-2", 80.0)],
            &[FuelLoad::new("main", -5.0)],
        )
        .unwrap();

        // Overweight and negative entries are still accumulated as entered
        assert_eq!(*result.total_weight, 1466.0 + 80.0 - 30.0);
        assert_eq!(
            codes(&result),
            [WarningCode::StationOverweight, WarningCode::NegativeFuel]
        );
    }

    #[test]
    fn test_near_max_gross_caution() {
        // 2200 lb leaves 100 lb, under 5% of 2300 (115 lb)
        let result = calculate(
            &c172(),
            &[
                StationLoad::new("front-seats", 340.0),
                StationLoad::new("rear-seats", 250.0),
            ],
            &[FuelLoad::new("main", 24.0)],
        )
        .unwrap();

        assert_eq!(*result.total_weight, 2200.0);
        assert!(result.is_within_weight_limit);
        let near = result
            .warnings
            .iter()
            .find(|w| w.code == WarningCode::NearMaxGross)
            .unwrap();
        assert_eq!(near.level, WarningLevel::Caution);
        assert_eq!(
            near.detail.as_deref(),
            Some("100.0 lb remaining (4.3% of maximum gross)")
        );
    }

    #[test]
    fn test_over_gross_carries_regulatory_reference() {
        let result = calculate(
            &c172(),
            &[
                StationLoad::new("front-seats", 400.0),
                StationLoad::new("rear-seats", 400.0),
            ],
            &[FuelLoad::new("main", 10.0)],
        )
        .unwrap();

        assert_eq!(*result.weight_margin, 2300.0 - 2326.0);
        let over = result
            .warnings
            .iter()
            .find(|w| w.code == WarningCode::OverMaxGross)
            .unwrap();
        assert_eq!(over.level, WarningLevel::Danger);
        assert_eq!(over.regulatory_ref.as_deref(), Some("FAR 91.103"));
        assert_eq!(
            over.detail.as_deref(),
            Some("2326.0 lb exceeds 2300.0 lb by 26.0 lb")
        );
        assert!(!result.has_warning(WarningCode::NearMaxGross));
        assert!(result.has_warning(WarningCode::OverMaxRamp));
        assert!(result.has_warning(WarningCode::OverMaxLanding));
    }

    #[test]
    fn test_over_landing_is_warning_level() {
        let mut aircraft = c172();
        aircraft.max_landing_weight = Some(Pounds::new(2000.0));
        let result = calculate(
            &aircraft,
            &[StationLoad::new("front-seats", 340.0)],
            &[FuelLoad::new("main", 40.0)],
        )
        .unwrap();

        let landing = result
            .warnings
            .iter()
            .find(|w| w.code == WarningCode::OverMaxLanding)
            .unwrap();
        assert_eq!(landing.level, WarningLevel::Warning);
        assert!(result.is_within_weight_limit);
    }

    #[test]
    fn test_cg_out_of_envelope_uses_weight_specific_limits() {
        // Heavy and nose-loaded: 2246 lb with the CG forward of the sloped limit
        let mut aircraft = c172();
        aircraft.empty_weight_arm = Inches::new(36.0);
        aircraft.stations[0].max_weight = None;
        let result = calculate(
            &aircraft,
            &[StationLoad::new("front-seats", 780.0)],
            &[],
        )
        .unwrap();

        assert!(!result.is_within_cg_envelope);
        let limits = result.limits_at_weight.unwrap();
        assert!(*limits.forward > 35.0);
        let warning = result
            .warnings
            .iter()
            .find(|w| w.code == WarningCode::CgOutOfEnvelope)
            .unwrap();
        assert_eq!(warning.level, WarningLevel::Danger);
        assert_eq!(warning.regulatory_ref.as_deref(), Some("FAR 91.103"));
        assert!(warning
            .detail
            .as_deref()
            .unwrap()
            .contains(&format!("limits {} to 47.30 in", limits.forward)));
    }

    #[test]
    fn test_cg_out_of_envelope_falls_back_to_static_range() {
        // Below the envelope's weight span there is no slice
        let mut aircraft = c172();
        aircraft.empty_weight = Pounds::new(1200.0);
        let result = calculate(&aircraft, &[], &[]).unwrap();

        assert!(!result.is_within_cg_envelope);
        assert_eq!(result.limits_at_weight, None);
        let warning = result
            .warnings
            .iter()
            .find(|w| w.code == WarningCode::CgOutOfEnvelope)
            .unwrap();
        assert!(warning
            .detail
            .as_deref()
            .unwrap()
            .ends_with("limits 35.00 in to 47.30 in"));
    }

    #[test]
    fn test_cg_near_aft_limit() {
        // Pilot plus 140 lb in the aft baggage area puts the CG about 0.55 in inside the aft limit
        let mut aircraft = c172();
        aircraft.stations[3].max_weight = None;
        let result = calculate(
            &aircraft,
            &[
                StationLoad::new("front-seats", 170.0),
                StationLoad::new("baggage-2", 140.0),
            ],
            &[],
        )
        .unwrap();

        let cg = *result.cg;
        assert!(cg < 47.3 && cg > 46.3, "cg = {cg}");
        assert!(result.is_within_cg_envelope);
        let near = result
            .warnings
            .iter()
            .find(|w| w.code == WarningCode::CgNearLimit)
            .unwrap();
        assert_eq!(near.level, WarningLevel::Caution);
        assert_eq!(near.message, "CG near the aft limit");
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let loads = [StationLoad::new("front-seats", 340.0)];
        let fuel = [FuelLoad::new("main", 40.0)];

        let relaxed = calculate(&c172(), &loads, &fuel).unwrap();
        assert!(!relaxed.has_warning(WarningCode::NearMaxGross));

        let strict = WarningThresholds {
            near_gross_fraction: 0.15,
            ..WarningThresholds::default()
        };
        let result = calculate_with_thresholds(&c172(), &loads, &fuel, &strict).unwrap();
        assert!(result.has_warning(WarningCode::NearMaxGross));
        assert_eq!(result.total_weight, relaxed.total_weight);
    }

    #[test]
    fn test_margins_use_static_range() {
        let result = calculate(
            &c172(),
            &[StationLoad::new("front-seats", 340.0)],
            &[FuelLoad::new("main", 40.0)],
        )
        .unwrap();

        assert_eq!(result.cg_forward_margin, result.cg - Inches::new(35.0));
        assert_eq!(result.cg_aft_margin, Inches::new(47.3) - result.cg);
        assert_relative_eq!(*result.cg_forward_margin, 5.8698, epsilon = 1e-3);
        assert_eq!(*result.weight_margin, 254.0);
    }

    #[test]
    fn test_warning_severity_sort_is_stable() {
        let result = calculate(
            &c172(),
            &[
                StationLoad::new("front-seats", 400.0),
                StationLoad::new("rear-seats", 400.0),
                StationLoad::new("baggage-1", 150.0),
            ],
            &[FuelLoad::new("main", 43.0)],
        )
        .unwrap();

        let sorted = result.warnings_by_severity();
        assert_eq!(sorted[0].code, WarningCode::StationOverweight);
        assert!(sorted
            .windows(2)
            .all(|pair| pair[0].level >= pair[1].level));
        assert_eq!(sorted.last().unwrap().level, WarningLevel::Warning);
        assert!(!result.is_safe());
    }

    #[test]
    fn test_scenario_helper_matches_slices() {
        let aircraft = c172();
        let mut scenario = LoadingScenario::from_defaults(&aircraft);
        scenario.set_fuel("main", 30.0);

        let from_scenario = calculate_scenario(&aircraft, &scenario).unwrap();
        let direct = calculate(&aircraft, &scenario.station_loads, &scenario.fuel_loads).unwrap();
        assert_eq!(from_scenario, direct);
        assert!(from_scenario.is_safe());
    }
}
