use serde::{Deserialize, Serialize};

use super::units::{Gallons, Inches, PoundInches, Pounds, PoundsPerGallon};

/// One vertex of the CG envelope polygon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePoint {
    pub weight: Pounds,
    pub cg: Inches,
}

impl EnvelopePoint {
    #[must_use]
    pub const fn new(weight: f64, cg: f64) -> Self {
        Self {
            weight: Pounds::new(weight),
            cg: Inches::new(cg),
        }
    }
}

/// Static forward/aft CG bounds, used for display when the envelope can't be sliced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgRange {
    pub forward: Inches,
    pub aft: Inches,
}

/// A fixed loading location (seat row, baggage area)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    pub name: String,
    pub arm: Inches,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<Pounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_weight: Option<Pounds>,
}

impl Station {
    fn new(id: &str, name: &str, arm: f64, max_weight: Option<f64>) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            arm: Inches::new(arm),
            max_weight: max_weight.map(Pounds::new),
            default_weight: None,
        }
    }

    fn with_default(mut self, weight: f64) -> Self {
        self.default_weight = Some(Pounds::new(weight));
        self
    }
}

/// A fuel tank with its arm and usable capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelTank {
    pub id: String,
    pub name: String,
    pub arm: Inches,
    pub max_gallons: Gallons,
    pub fuel_weight_per_gallon: PoundsPerGallon,
    #[serde(default)]
    pub is_optional: bool,
}

impl FuelTank {
    fn avgas(id: &str, name: &str, arm: f64, max_gallons: f64) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            arm: Inches::new(arm),
            max_gallons: Gallons::new(max_gallons),
            fuel_weight_per_gallon: PoundsPerGallon::AVGAS,
            is_optional: false,
        }
    }
}

/// Immutable weight-and-balance definition of one airframe
///
/// Supplied by the aircraft data provider already unit-normalized (pounds,
/// inches, US gallons). The engine reads it and never validates or mutates it;
/// share one instance between concurrent calculations behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aircraft {
    pub id: String,
    pub name: String,

    pub empty_weight: Pounds,
    pub empty_weight_arm: Inches,

    pub max_gross_weight: Pounds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ramp_weight: Option<Pounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_landing_weight: Option<Pounds>,

    /// Informational only
    pub useful_load: Pounds,

    pub cg_range: CgRange,
    /// Closed polygon in (CG, weight) space; consecutive vertices form edges, last wraps to first
    pub cg_envelope: Vec<EnvelopePoint>,

    pub stations: Vec<Station>,
    pub fuel_tanks: Vec<FuelTank>,
}

impl Aircraft {
    /// Find a station by id
    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Find a fuel tank by id
    pub fn fuel_tank(&self, id: &str) -> Option<&FuelTank> {
        self.fuel_tanks.iter().find(|t| t.id == id)
    }

    /// Basic empty weight moment
    #[inline]
    pub fn empty_moment(&self) -> PoundInches {
        self.empty_weight * self.empty_weight_arm
    }

    /// Cessna 172N, normal category
    ///
    /// Reference airframe for the golden-value tests. Figures follow the 1978
    /// POH loading graph with a typical basic empty weight.
    pub fn cessna_172n() -> Self {
        Aircraft {
            id: "c172n".to_owned(),
            name: "Cessna 172N Skyhawk".to_owned(),
            empty_weight: Pounds::new(1466.0),
            empty_weight_arm: Inches::new(40.6),
            max_gross_weight: Pounds::new(2300.0),
            max_ramp_weight: Some(Pounds::new(2307.0)),
            max_landing_weight: Some(Pounds::new(2300.0)),
            useful_load: Pounds::new(834.0),
            cg_range: CgRange {
                forward: Inches::new(35.0),
                aft: Inches::new(47.3),
            },
            cg_envelope: vec![
                EnvelopePoint::new(1500.0, 35.0),
                EnvelopePoint::new(1950.0, 35.0),
                EnvelopePoint::new(2300.0, 38.5),
                EnvelopePoint::new(2300.0, 47.3),
                EnvelopePoint::new(1500.0, 47.3),
            ],
            stations: vec![
                Station::new("front-seats", "Pilot & Front Passenger", 37.0, Some(400.0))
                    .with_default(170.0),
                Station::new("rear-seats", "Rear Passengers", 73.0, Some(400.0)),
                Station::new("baggage-1", "Baggage Area 1", 95.0, Some(120.0)),
                Station::new("baggage-2", "Baggage Area 2", 123.0, Some(50.0)),
            ],
            fuel_tanks: vec![FuelTank::avgas("main", "Main Tanks", 48.0, 43.0)],
        }
    }

    /// Piper PA-28-181 Archer, normal category
    ///
    /// Two wing tanks and a forward limit that moves aft above 2050 lb.
    pub fn piper_pa28_181() -> Self {
        Aircraft {
            id: "pa28-181".to_owned(),
            name: "Piper PA-28-181 Archer".to_owned(),
            empty_weight: Pounds::new(1557.5),
            empty_weight_arm: Inches::new(86.2),
            max_gross_weight: Pounds::new(2550.0),
            max_ramp_weight: Some(Pounds::new(2558.0)),
            max_landing_weight: Some(Pounds::new(2550.0)),
            useful_load: Pounds::new(992.5),
            cg_range: CgRange {
                forward: Inches::new(82.0),
                aft: Inches::new(93.0),
            },
            cg_envelope: vec![
                EnvelopePoint::new(1200.0, 82.0),
                EnvelopePoint::new(2050.0, 82.0),
                EnvelopePoint::new(2550.0, 88.6),
                EnvelopePoint::new(2550.0, 93.0),
                EnvelopePoint::new(1200.0, 93.0),
            ],
            stations: vec![
                Station::new("front-seats", "Pilot & Front Passenger", 80.5, None)
                    .with_default(170.0),
                Station::new("rear-seats", "Rear Passengers", 118.1, None),
                Station::new("baggage", "Baggage", 142.8, Some(200.0)),
            ],
            fuel_tanks: vec![
                FuelTank::avgas("left-main", "Left Main", 95.0, 24.0),
                FuelTank::avgas("right-main", "Right Main", 95.0, 24.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let aircraft = Aircraft::cessna_172n();
        assert_eq!(aircraft.station("baggage-1").map(|s| *s.arm), Some(95.0));
        assert_eq!(aircraft.fuel_tank("main").map(|t| *t.max_gallons), Some(43.0));
        assert!(aircraft.station("cargo-pod").is_none());
        assert!(aircraft.fuel_tank("tip").is_none());
    }

    #[test]
    fn test_empty_moment() {
        let aircraft = Aircraft::cessna_172n();
        assert_eq!(*aircraft.empty_moment(), 1466.0 * 40.6);
    }

    #[test]
    fn test_useful_load_is_gross_minus_empty() {
        for aircraft in [Aircraft::cessna_172n(), Aircraft::piper_pa28_181()] {
            assert_eq!(
                aircraft.useful_load,
                aircraft.max_gross_weight - aircraft.empty_weight,
                "{}",
                aircraft.id
            );
        }
    }

    #[test]
    fn test_deserialize_camel_case_data() {
        let json = r#"{
            "id": "test",
            "name": "Test Aircraft",
            "emptyWeight": 1000.0,
            "emptyWeightArm": 40.0,
            "maxGrossWeight": 1600.0,
            "maxLandingWeight": 1550.0,
            "usefulLoad": 600.0,
            "cgRange": { "forward": 35.0, "aft": 45.0 },
            "cgEnvelope": [
                { "weight": 900.0, "cg": 35.0 },
                { "weight": 1600.0, "cg": 35.0 },
                { "weight": 1600.0, "cg": 45.0 },
                { "weight": 900.0, "cg": 45.0 }
            ],
            "stations": [
                { "id": "seat", "name": "Seat", "arm": 38.0, "maxWeight": 250.0 }
            ],
            "fuelTanks": [
                { "id": "main", "name": "Main", "arm": 42.0, "maxGallons": 20.0,
                  "fuelWeightPerGallon": 6.0, "isOptional": true }
            ]
        }"#;

        let aircraft: Aircraft = serde_json::from_str(json).unwrap();
        assert_eq!(aircraft.max_ramp_weight, None);
        assert_eq!(aircraft.max_landing_weight, Some(Pounds::new(1550.0)));
        assert_eq!(aircraft.cg_envelope.len(), 4);
        assert_eq!(aircraft.stations[0].max_weight, Some(Pounds::new(250.0)));
        assert_eq!(aircraft.stations[0].default_weight, None);
        assert!(aircraft.fuel_tanks[0].is_optional);
    }

    #[test]
    fn test_serialize_round_trip_keeps_names() {
        let aircraft = Aircraft::piper_pa28_181();
        let json = serde_json::to_string(&aircraft).unwrap();
        assert!(json.contains("\"fuelWeightPerGallon\":6.0"));
        assert!(json.contains("\"cgEnvelope\""));
        let back: Aircraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, aircraft);
    }
}
