use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;
use std::sync::{Arc, LazyLock};

use weight_balance_core::{Aircraft, AircraftCatalog};

use crate::error::{DefaultWbError, WbErrorCode};
use crate::helpers::{
    handle_ffi_result_error, ref_from_ptr, str_from_ptr, to_cstring, track_error, track_result,
    write_out,
};

static CATALOG: LazyLock<AircraftCatalog> = LazyLock::new(AircraftCatalog::builtin);

/// Opaque handle to an immutable aircraft definition.
///
/// Holds a shared reference to the catalog entry together with the C strings
/// handed out by the query functions, so those pointers live as long as the handle.
///
/// # Thread Safety
/// The aircraft data is never mutated. A handle may be read from any number
/// of threads at once; free it exactly once.
pub struct WbAircraft {
    pub(crate) aircraft: Arc<Aircraft>,
    id: CString,
    name: CString,
    station_strings: Vec<(CString, CString)>,
    tank_strings: Vec<(CString, CString)>,
}

impl WbAircraft {
    pub(crate) fn new(aircraft: Arc<Aircraft>) -> Box<Self> {
        let station_strings = aircraft
            .stations
            .iter()
            .map(|s| (to_cstring(&s.id), to_cstring(&s.name)))
            .collect();
        let tank_strings = aircraft
            .fuel_tanks
            .iter()
            .map(|t| (to_cstring(&t.id), to_cstring(&t.name)))
            .collect();

        Box::new(Self {
            id: to_cstring(&aircraft.id),
            name: to_cstring(&aircraft.name),
            station_strings,
            tank_strings,
            aircraft,
        })
    }
}

/// C-compatible summary of an aircraft's limits.
///
/// Optional limits carry a `has_*` flag; the value is 0 when the flag is false.
/// `id` and `name` are borrowed from the handle. **DO NOT FREE THESE POINTERS**.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WbAircraftInfo {
    pub id: *const c_char,
    pub name: *const c_char,
    /// Basic empty weight (lb)
    pub empty_weight: f64,
    /// Empty weight arm (in aft of datum)
    pub empty_weight_arm: f64,
    pub max_gross_weight: f64,
    pub has_max_ramp_weight: bool,
    pub max_ramp_weight: f64,
    pub has_max_landing_weight: bool,
    pub max_landing_weight: f64,
    pub useful_load: f64,
    pub cg_forward_limit: f64,
    pub cg_aft_limit: f64,
    pub station_count: usize,
    pub fuel_tank_count: usize,
    pub envelope_point_count: usize,
}

/// C-compatible view of one loading station.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WbStationInfo {
    pub id: *const c_char,
    pub name: *const c_char,
    pub arm: f64,
    pub has_max_weight: bool,
    pub max_weight: f64,
    pub has_default_weight: bool,
    pub default_weight: f64,
}

/// C-compatible view of one fuel tank.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WbFuelTankInfo {
    pub id: *const c_char,
    pub name: *const c_char,
    pub arm: f64,
    pub max_gallons: f64,
    pub fuel_weight_per_gallon: f64,
    pub is_optional: bool,
}

/// Look up a built-in aircraft by id (`"c172n"`, `"pa28-181"`).
///
/// Returns
/// - `WbErrorCode::Ok` with a new handle in `out_aircraft`; free it with `wb_aircraft_free`
/// - `WbErrorCode::NullPointer` if `id` or `out_aircraft` is null
/// - `WbErrorCode::InvalidString` if `id` is not UTF-8
/// - `WbErrorCode::UnknownAircraft` if no built-in aircraft has that id
///
/// On error `*out_aircraft` is set to null.
///
/// # Safety
/// - `id` must be null or a NUL-terminated string.
/// - `out_aircraft` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn wb_aircraft_builtin(
    id: *const c_char,
    out_aircraft: *mut *mut WbAircraft,
) -> WbErrorCode {
    if out_aircraft.is_null() {
        return track_error(&DefaultWbError::null_pointer("out_aircraft"));
    }

    let lookup = || -> Result<Box<WbAircraft>, DefaultWbError> {
        // SAFETY: caller contract on `id`
        let id = unsafe { str_from_ptr(id, "id") }?;
        CATALOG
            .get(id)
            .map(WbAircraft::new)
            .ok_or_else(|| DefaultWbError::unknown_aircraft(id))
    };

    match track_result(lookup()) {
        Ok(handle) => {
            unsafe {
                *out_aircraft = Box::into_raw(handle);
            }
            WbErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_aircraft = ptr::null_mut();
            }
            code
        }
    }
}

/// Fill `out_info` with the aircraft's limits and collection sizes.
///
/// # Safety
/// - `aircraft` must be null or a live handle from `wb_aircraft_builtin`.
/// - `out_info` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn wb_aircraft_info(
    aircraft: *const WbAircraft,
    out_info: *mut WbAircraftInfo,
) -> WbErrorCode {
    handle_ffi_result_error(|| {
        let handle = unsafe { ref_from_ptr(aircraft, "aircraft") }?;
        let a = &handle.aircraft;
        let info = WbAircraftInfo {
            id: handle.id.as_ptr(),
            name: handle.name.as_ptr(),
            empty_weight: *a.empty_weight,
            empty_weight_arm: *a.empty_weight_arm,
            max_gross_weight: *a.max_gross_weight,
            has_max_ramp_weight: a.max_ramp_weight.is_some(),
            max_ramp_weight: a.max_ramp_weight.map_or(0.0, |w| *w),
            has_max_landing_weight: a.max_landing_weight.is_some(),
            max_landing_weight: a.max_landing_weight.map_or(0.0, |w| *w),
            useful_load: *a.useful_load,
            cg_forward_limit: *a.cg_range.forward,
            cg_aft_limit: *a.cg_range.aft,
            station_count: a.stations.len(),
            fuel_tank_count: a.fuel_tanks.len(),
            envelope_point_count: a.cg_envelope.len(),
        };
        unsafe { write_out(out_info, info, "out_info") }
    })
}

/// Fill `out_station` with the station at `index`, in declaration order.
///
/// Returns `WbErrorCode::OutOfRange` when `index >= station_count`.
///
/// # Safety
/// - `aircraft` must be null or a live handle from `wb_aircraft_builtin`.
/// - `out_station` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn wb_aircraft_station(
    aircraft: *const WbAircraft,
    index: usize,
    out_station: *mut WbStationInfo,
) -> WbErrorCode {
    handle_ffi_result_error(|| {
        let handle = unsafe { ref_from_ptr(aircraft, "aircraft") }?;
        let (Some(station), Some((id, name))) = (
            handle.aircraft.stations.get(index),
            handle.station_strings.get(index),
        ) else {
            return Err(DefaultWbError::out_of_range(
                "index",
                &format!("aircraft has {} stations", handle.aircraft.stations.len()),
            ));
        };
        let info = WbStationInfo {
            id: id.as_ptr(),
            name: name.as_ptr(),
            arm: *station.arm,
            has_max_weight: station.max_weight.is_some(),
            max_weight: station.max_weight.map_or(0.0, |w| *w),
            has_default_weight: station.default_weight.is_some(),
            default_weight: station.default_weight.map_or(0.0, |w| *w),
        };
        unsafe { write_out(out_station, info, "out_station") }
    })
}

/// Fill `out_tank` with the fuel tank at `index`, in declaration order.
///
/// Returns `WbErrorCode::OutOfRange` when `index >= fuel_tank_count`.
///
/// # Safety
/// - `aircraft` must be null or a live handle from `wb_aircraft_builtin`.
/// - `out_tank` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn wb_aircraft_fuel_tank(
    aircraft: *const WbAircraft,
    index: usize,
    out_tank: *mut WbFuelTankInfo,
) -> WbErrorCode {
    handle_ffi_result_error(|| {
        let handle = unsafe { ref_from_ptr(aircraft, "aircraft") }?;
        let (Some(tank), Some((id, name))) = (
            handle.aircraft.fuel_tanks.get(index),
            handle.tank_strings.get(index),
        ) else {
            return Err(DefaultWbError::out_of_range(
                "index",
                &format!("aircraft has {} fuel tanks", handle.aircraft.fuel_tanks.len()),
            ));
        };
        let info = WbFuelTankInfo {
            id: id.as_ptr(),
            name: name.as_ptr(),
            arm: *tank.arm,
            max_gallons: *tank.max_gallons,
            fuel_weight_per_gallon: *tank.fuel_weight_per_gallon,
            is_optional: tank.is_optional,
        };
        unsafe { write_out(out_tank, info, "out_tank") }
    })
}

/// Release a handle returned by `wb_aircraft_builtin`. Null is a no-op.
///
/// # Safety
/// - `aircraft` must be null or a handle from `wb_aircraft_builtin` that has not been freed.
/// - Calculations created from the handle stay valid; they hold their own results.
#[no_mangle]
pub unsafe extern "C" fn wb_aircraft_free(aircraft: *mut WbAircraft) {
    if aircraft.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `wb_aircraft_builtin` and not yet freed
    unsafe {
        drop(Box::from_raw(aircraft));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::wb_get_last_error_code;
    use std::ffi::CStr;

    fn builtin(id: &str) -> *mut WbAircraft {
        let id = CString::new(id).unwrap();
        let mut handle = ptr::null_mut();
        let code = unsafe { wb_aircraft_builtin(id.as_ptr(), &mut handle) };
        assert_eq!(code, WbErrorCode::Ok);
        handle
    }

    #[test]
    fn test_builtin_info() {
        let handle = builtin("c172n");
        let mut info = std::mem::MaybeUninit::<WbAircraftInfo>::uninit();
        let code = unsafe { wb_aircraft_info(handle, info.as_mut_ptr()) };
        assert_eq!(code, WbErrorCode::Ok);
        let info = unsafe { info.assume_init() };

        assert_eq!(unsafe { CStr::from_ptr(info.id) }.to_str().unwrap(), "c172n");
        assert_eq!(info.empty_weight, 1466.0);
        assert_eq!(info.max_gross_weight, 2300.0);
        assert!(info.has_max_ramp_weight);
        assert_eq!(info.max_ramp_weight, 2307.0);
        assert_eq!(info.station_count, 4);
        assert_eq!(info.fuel_tank_count, 1);
        assert_eq!(info.envelope_point_count, 5);

        unsafe { wb_aircraft_free(handle) };
    }

    #[test]
    fn test_unknown_aircraft_nulls_output() {
        let id = CString::new("b737").unwrap();
        let mut handle = ptr::NonNull::<WbAircraft>::dangling().as_ptr();
        let code = unsafe { wb_aircraft_builtin(id.as_ptr(), &mut handle) };
        assert_eq!(code, WbErrorCode::UnknownAircraft);
        assert!(handle.is_null());
        assert_eq!(wb_get_last_error_code(), WbErrorCode::UnknownAircraft);
    }

    #[test]
    fn test_null_arguments() {
        let mut handle = ptr::null_mut();
        let code = unsafe { wb_aircraft_builtin(ptr::null(), &mut handle) };
        assert_eq!(code, WbErrorCode::NullPointer);

        let mut info = std::mem::MaybeUninit::<WbAircraftInfo>::uninit();
        let code = unsafe { wb_aircraft_info(ptr::null(), info.as_mut_ptr()) };
        assert_eq!(code, WbErrorCode::NullPointer);

        unsafe { wb_aircraft_free(ptr::null_mut()) };
    }

    #[test]
    fn test_station_and_tank_by_index() {
        let handle = builtin("pa28-181");

        let mut station = std::mem::MaybeUninit::<WbStationInfo>::uninit();
        let code = unsafe { wb_aircraft_station(handle, 2, station.as_mut_ptr()) };
        assert_eq!(code, WbErrorCode::Ok);
        let station = unsafe { station.assume_init() };
        assert_eq!(unsafe { CStr::from_ptr(station.id) }.to_str().unwrap(), "baggage");
        assert!(station.has_max_weight);
        assert_eq!(station.max_weight, 200.0);

        let mut tank = std::mem::MaybeUninit::<WbFuelTankInfo>::uninit();
        let code = unsafe { wb_aircraft_fuel_tank(handle, 1, tank.as_mut_ptr()) };
        assert_eq!(code, WbErrorCode::Ok);
        let tank = unsafe { tank.assume_init() };
        assert_eq!(unsafe { CStr::from_ptr(tank.id) }.to_str().unwrap(), "right-main");
        assert_eq!(tank.fuel_weight_per_gallon, 6.0);

        let mut past_end = std::mem::MaybeUninit::<WbFuelTankInfo>::uninit();
        let code = unsafe { wb_aircraft_fuel_tank(handle, 2, past_end.as_mut_ptr()) };
        assert_eq!(code, WbErrorCode::OutOfRange);

        unsafe { wb_aircraft_free(handle) };
    }
}
