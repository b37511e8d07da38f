use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use weight_balance_core::{calculate, CalculationResult, FuelLoad, StationLoad, Warning};

use crate::aircraft::WbAircraft;
use crate::error::{DefaultWbError, WbErrorCode};
use crate::helpers::{
    handle_ffi_result_error, ref_from_ptr, slice_from_ptr, str_from_ptr, to_cstring, track_error,
    track_result, write_out,
};

/// Weight placed at one station (lb).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WbStationLoad {
    pub station_id: *const c_char,
    pub weight: f64,
}

/// Fuel loaded into one tank (US gallons).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WbFuelLoad {
    pub tank_id: *const c_char,
    pub gallons: f64,
}

/// Every scalar and flag of a calculation result.
///
/// `forward_limit`/`aft_limit` are the envelope's CG limits at the loaded weight
/// and are 0 when `has_limits_at_weight` is false.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WbCalculationSummary {
    pub total_weight: f64,
    pub total_moment: f64,
    pub cg: f64,
    pub is_within_weight_limit: bool,
    pub is_within_cg_envelope: bool,
    pub is_within_all_station_limits: bool,
    pub weight_margin: f64,
    pub cg_forward_margin: f64,
    pub cg_aft_margin: f64,
    pub has_limits_at_weight: bool,
    pub forward_limit: f64,
    pub aft_limit: f64,
    /// Within gross weight, the CG envelope and every station limit, with no
    /// danger-level warning
    pub is_safe: bool,
    pub warning_count: usize,
}

/// One warning, borrowed from its calculation. **DO NOT FREE THESE POINTERS**.
///
/// `level` is `"caution"`, `"warning"` or `"danger"`; `code` is the stable
/// machine code such as `"OVER_MAX_GROSS"`. `detail` and `regulatory_ref` are
/// null when absent.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WbWarning {
    pub level: *const c_char,
    pub code: *const c_char,
    pub message: *const c_char,
    pub detail: *const c_char,
    pub regulatory_ref: *const c_char,
}

struct WarningStrings {
    level: CString,
    code: CString,
    message: CString,
    detail: Option<CString>,
    regulatory_ref: Option<CString>,
}

impl From<&Warning> for WarningStrings {
    fn from(warning: &Warning) -> Self {
        Self {
            level: to_cstring(warning.level.as_str()),
            code: to_cstring(warning.code.as_str()),
            message: to_cstring(&warning.message),
            detail: warning.detail.as_deref().map(to_cstring),
            regulatory_ref: warning.regulatory_ref.as_deref().map(to_cstring),
        }
    }
}

impl WarningStrings {
    fn as_ffi(&self) -> WbWarning {
        WbWarning {
            level: self.level.as_ptr(),
            code: self.code.as_ptr(),
            message: self.message.as_ptr(),
            detail: self.detail.as_ref().map_or(ptr::null(), |s| s.as_ptr()),
            regulatory_ref: self
                .regulatory_ref
                .as_ref()
                .map_or(ptr::null(), |s| s.as_ptr()),
        }
    }
}

/// Opaque handle to a finished calculation.
///
/// Owns the result and the C strings of its warnings; independent of the
/// aircraft handle it was computed from.
pub struct WbCalculation {
    result: CalculationResult,
    warnings: Vec<WarningStrings>,
}

impl WbCalculation {
    fn new(result: CalculationResult) -> Box<Self> {
        let warnings = result.warnings.iter().map(WarningStrings::from).collect();
        Box::new(Self { result, warnings })
    }

    fn summary(&self) -> WbCalculationSummary {
        let r = &self.result;
        WbCalculationSummary {
            total_weight: *r.total_weight,
            total_moment: *r.total_moment,
            cg: *r.cg,
            is_within_weight_limit: r.is_within_weight_limit,
            is_within_cg_envelope: r.is_within_cg_envelope,
            is_within_all_station_limits: r.is_within_all_station_limits,
            weight_margin: *r.weight_margin,
            cg_forward_margin: *r.cg_forward_margin,
            cg_aft_margin: *r.cg_aft_margin,
            has_limits_at_weight: r.limits_at_weight.is_some(),
            forward_limit: r.limits_at_weight.map_or(0.0, |l| *l.forward),
            aft_limit: r.limits_at_weight.map_or(0.0, |l| *l.aft),
            is_safe: r.is_safe(),
            warning_count: r.warnings.len(),
        }
    }
}

/// Calculate weight and balance for a loading.
///
/// Loads are folded in array order. A zero count accepts a null array.
///
/// Returns
/// - `WbErrorCode::Ok` with a new handle in `out_calculation`; free it with `wb_calculation_free`
/// - `WbErrorCode::NullPointer` if a handle, array, id or `out_calculation` is null
/// - `WbErrorCode::InvalidString` if an id is not UTF-8
/// - `WbErrorCode::UnknownStation` / `WbErrorCode::UnknownFuelTank` for the first id the aircraft does not declare
///
/// Limit violations are not errors; they appear as warnings on the result.
/// On error `*out_calculation` is set to null.
///
/// # Safety
/// - `aircraft` must be null or a live handle from `wb_aircraft_builtin`.
/// - `station_loads` must point to `station_count` loads (or be null when the count is 0); same for `fuel_loads`.
/// - Every id must be a NUL-terminated string.
/// - `out_calculation` must be null or valid for writes.
///
/// Example:
/// ```c
/// WbStationLoad seats[] = {{"front-seats", 340.0}};
/// WbFuelLoad fuel[] = {{"main", 40.0}};
/// WbCalculation *calc = NULL;
/// if (wb_calculate(aircraft, seats, 1, fuel, 1, &calc) == Ok) {
///     WbCalculationSummary summary;
///     wb_calculation_summary(calc, &summary);
///     wb_calculation_free(calc);
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn wb_calculate(
    aircraft: *const WbAircraft,
    station_loads: *const WbStationLoad,
    station_count: usize,
    fuel_loads: *const WbFuelLoad,
    fuel_count: usize,
    out_calculation: *mut *mut WbCalculation,
) -> WbErrorCode {
    if out_calculation.is_null() {
        return track_error(&DefaultWbError::null_pointer("out_calculation"));
    }

    let run = || -> Result<Box<WbCalculation>, DefaultWbError> {
        let handle = unsafe { ref_from_ptr(aircraft, "aircraft") }?;
        let stations = unsafe { slice_from_ptr(station_loads, station_count, "station_loads") }?
            .iter()
            .map(|load| {
                unsafe { str_from_ptr(load.station_id, "station_id") }
                    .map(|id| StationLoad::new(id, load.weight))
            })
            .collect::<Result<Vec<_>, DefaultWbError>>()?;
        let fuel = unsafe { slice_from_ptr(fuel_loads, fuel_count, "fuel_loads") }?
            .iter()
            .map(|load| {
                unsafe { str_from_ptr(load.tank_id, "tank_id") }
                    .map(|id| FuelLoad::new(id, load.gallons))
            })
            .collect::<Result<Vec<_>, DefaultWbError>>()?;

        let result = calculate(&handle.aircraft, &stations, &fuel)?;
        Ok(WbCalculation::new(result))
    };

    match track_result(run()) {
        Ok(calculation) => {
            unsafe {
                *out_calculation = Box::into_raw(calculation);
            }
            WbErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_calculation = ptr::null_mut();
            }
            code
        }
    }
}

/// Fill `out_summary` with the totals, margins and flags of a calculation.
///
/// # Safety
/// - `calculation` must be null or a live handle from `wb_calculate`.
/// - `out_summary` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn wb_calculation_summary(
    calculation: *const WbCalculation,
    out_summary: *mut WbCalculationSummary,
) -> WbErrorCode {
    handle_ffi_result_error(|| {
        let calculation = unsafe { ref_from_ptr(calculation, "calculation") }?;
        unsafe { write_out(out_summary, calculation.summary(), "out_summary") }
    })
}

/// Fill `out_warning` with the warning at `index`, in the order the engine raised them.
///
/// Returns `WbErrorCode::OutOfRange` when `index >= warning_count`.
///
/// # Safety
/// - `calculation` must be null or a live handle from `wb_calculate`.
/// - `out_warning` must be null or valid for writes.
/// - The strings are valid until `wb_calculation_free`.
#[no_mangle]
pub unsafe extern "C" fn wb_calculation_warning(
    calculation: *const WbCalculation,
    index: usize,
    out_warning: *mut WbWarning,
) -> WbErrorCode {
    handle_ffi_result_error(|| {
        let calculation = unsafe { ref_from_ptr(calculation, "calculation") }?;
        let warning = calculation.warnings.get(index).ok_or_else(|| {
            DefaultWbError::out_of_range(
                "index",
                &format!("calculation has {} warnings", calculation.warnings.len()),
            )
        })?;
        unsafe { write_out(out_warning, warning.as_ffi(), "out_warning") }
    })
}

/// Release a handle returned by `wb_calculate`. Null is a no-op.
///
/// # Safety
/// `calculation` must be null or a handle from `wb_calculate` that has not been freed.
#[no_mangle]
pub unsafe extern "C" fn wb_calculation_free(calculation: *mut WbCalculation) {
    if calculation.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `wb_calculate` and not yet freed
    unsafe {
        drop(Box::from_raw(calculation));
    }
}
