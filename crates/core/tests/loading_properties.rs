//! Property checks over seeded random loadings

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use weight_balance_core::{
    calculate, Aircraft, CalculationResult, FuelLoad, Pounds, PoundInches, StationLoad,
    WarningCode,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const CASES: usize = 500;

/// Random loading that deliberately strays outside every limit now and then
fn random_loading(rng: &mut StdRng, aircraft: &Aircraft) -> (Vec<StationLoad>, Vec<FuelLoad>) {
    let mut stations = Vec::new();
    for station in &aircraft.stations {
        if rng.random_bool(0.8) {
            stations.push(StationLoad::new(
                station.id.clone(),
                rng.random_range(-20.0..450.0),
            ));
        }
    }
    let fuel = aircraft
        .fuel_tanks
        .iter()
        .map(|t| FuelLoad::new(t.id.clone(), rng.random_range(-2.0..(*t.max_gallons + 10.0))))
        .collect();
    (stations, fuel)
}

fn for_each_case(mut check: impl FnMut(&Aircraft, &[StationLoad], &[FuelLoad], &CalculationResult)) {
    let mut rng = StdRng::seed_from_u64(0x5EED_CAFE);
    for aircraft in [Aircraft::cessna_172n(), Aircraft::piper_pa28_181()] {
        for _ in 0..CASES {
            let (stations, fuel) = random_loading(&mut rng, &aircraft);
            let result = calculate(&aircraft, &stations, &fuel).unwrap();
            check(&aircraft, &stations, &fuel, &result);
        }
    }
}

#[test]
fn weight_and_moment_are_conserved() {
    for_each_case(|aircraft, stations, fuel, result| {
        let mut weight = aircraft.empty_weight;
        let mut moment = aircraft.empty_weight * aircraft.empty_weight_arm;
        for load in stations {
            let arm = aircraft.station(&load.station_id).unwrap().arm;
            weight += load.weight;
            moment += load.weight * arm;
        }
        for load in fuel {
            let tank = aircraft.fuel_tank(&load.tank_id).unwrap();
            let fuel_weight = load.gallons * tank.fuel_weight_per_gallon;
            weight += fuel_weight;
            moment += fuel_weight * tank.arm;
        }

        assert_eq!(result.total_weight, weight);
        assert_eq!(result.total_moment, moment);
    });
}

#[test]
fn cg_is_moment_over_weight() {
    for_each_case(|_, _, _, result| {
        if result.total_weight > Pounds::ZERO {
            assert_eq!(result.cg, result.total_moment / result.total_weight);
        } else {
            assert_eq!(*result.cg, 0.0);
        }
    });
}

#[test]
fn details_account_for_every_entry() {
    for_each_case(|aircraft, stations, fuel, result| {
        assert_eq!(result.station_details.len(), stations.len());
        assert_eq!(result.fuel_details.len(), fuel.len());

        let detail_moment: PoundInches = result
            .station_details
            .iter()
            .map(|d| d.moment)
            .chain(result.fuel_details.iter().map(|d| d.moment))
            .sum();
        approx::assert_relative_eq!(
            *(aircraft.empty_moment() + detail_moment),
            *result.total_moment,
            max_relative = 1e-12
        );
    });
}

#[test]
fn flags_agree_with_warnings() {
    for_each_case(|_, _, _, result| {
        assert_eq!(
            !result.is_within_weight_limit,
            result.has_warning(WarningCode::OverMaxGross)
        );
        assert_eq!(
            !result.is_within_cg_envelope,
            result.has_warning(WarningCode::CgOutOfEnvelope)
        );
        assert_eq!(
            !result.is_within_all_station_limits,
            result.has_warning(WarningCode::StationOverweight)
        );
        assert!(
            !(result.has_warning(WarningCode::OverMaxGross)
                && result.has_warning(WarningCode::NearMaxGross))
        );
    });
}

#[test]
fn inside_envelope_means_between_sliced_limits() {
    // Both reference envelopes are convex
    for_each_case(|_, _, _, result| {
        if result.is_within_cg_envelope {
            let limits = result.limits_at_weight.unwrap();
            assert!(limits.forward <= result.cg && result.cg <= limits.aft);
        }
    });
}

#[test]
fn calculation_is_idempotent() {
    for_each_case(|aircraft, stations, fuel, result| {
        let again = calculate(aircraft, stations, fuel).unwrap();
        assert_eq!(&again, result);
    });
}
