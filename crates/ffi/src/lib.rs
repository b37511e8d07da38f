//! C ABI over the weight-and-balance engine
//!
//! Every client platform links this library instead of carrying its own copy of
//! the arithmetic, so a loading produces the same figures everywhere.
//!
//! Conventions:
//! - Functions return `WbErrorCode` (0 = Ok); the message for the last failure
//!   on the calling thread is available from `wb_get_last_error`
//! - Handles (`WbAircraft`, `WbCalculation`) are opaque and freed with their
//!   matching `*_free` function; strings read through them are borrowed
//! - Null or malformed arguments are reported as codes, never as panics

mod aircraft;
mod calculation;
mod envelope;
mod error;
mod helpers;

pub use aircraft::{
    wb_aircraft_builtin, wb_aircraft_free, wb_aircraft_fuel_tank, wb_aircraft_info,
    wb_aircraft_station, WbAircraft, WbAircraftInfo, WbFuelTankInfo, WbStationInfo,
};
pub use calculation::{
    wb_calculate, wb_calculation_free, wb_calculation_summary, wb_calculation_warning,
    WbCalculation, WbCalculationSummary, WbFuelLoad, WbStationLoad, WbWarning,
};
pub use envelope::{wb_limits_at_weight, wb_point_in_envelope, WbCgLimits, WbEnvelopePoint};
pub use error::{wb_get_last_error, wb_get_last_error_code, WbErrorCode};
