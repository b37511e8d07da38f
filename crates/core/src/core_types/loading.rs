use serde::{Deserialize, Serialize};

use super::aircraft::Aircraft;
use super::units::{Gallons, Pounds};

/// Weight placed at one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationLoad {
    pub station_id: String,
    pub weight: Pounds,
}

impl StationLoad {
    pub fn new(station_id: impl Into<String>, weight: f64) -> Self {
        Self {
            station_id: station_id.into(),
            weight: Pounds::new(weight),
        }
    }
}

/// Fuel in one tank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelLoad {
    pub tank_id: String,
    pub gallons: Gallons,
}

impl FuelLoad {
    pub fn new(tank_id: impl Into<String>, gallons: f64) -> Self {
        Self {
            tank_id: tank_id.into(),
            gallons: Gallons::new(gallons),
        }
    }
}

/// A pilot-entered loading, rebuilt from input state on every recompute
///
/// Ids are not checked here; the calculation rejects ids the aircraft doesn't declare.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingScenario {
    pub station_loads: Vec<StationLoad>,
    pub fuel_loads: Vec<FuelLoad>,
}

impl LoadingScenario {
    /// Every station at its default weight (zero when none is declared), every tank empty
    pub fn from_defaults(aircraft: &Aircraft) -> Self {
        Self {
            station_loads: aircraft
                .stations
                .iter()
                .map(|s| StationLoad {
                    station_id: s.id.clone(),
                    weight: s.default_weight.unwrap_or(Pounds::ZERO),
                })
                .collect(),
            fuel_loads: aircraft
                .fuel_tanks
                .iter()
                .map(|t| FuelLoad {
                    tank_id: t.id.clone(),
                    gallons: Gallons::ZERO,
                })
                .collect(),
        }
    }

    /// Set the weight at a station, replacing an existing entry in place
    pub fn set_station(&mut self, station_id: &str, weight: f64) -> &mut Self {
        match self
            .station_loads
            .iter_mut()
            .find(|l| l.station_id == station_id)
        {
            Some(load) => load.weight = Pounds::new(weight),
            None => self.station_loads.push(StationLoad::new(station_id, weight)),
        }
        self
    }

    /// Set the fuel in a tank, replacing an existing entry in place
    pub fn set_fuel(&mut self, tank_id: &str, gallons: f64) -> &mut Self {
        match self.fuel_loads.iter_mut().find(|l| l.tank_id == tank_id) {
            Some(load) => load.gallons = Gallons::new(gallons),
            None => self.fuel_loads.push(FuelLoad::new(tank_id, gallons)),
        }
        self
    }
}
