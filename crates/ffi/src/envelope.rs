use weight_balance_core::{is_point_in_envelope, limits_at_weight, EnvelopePoint, Inches, Pounds};

use crate::error::{DefaultWbError, WbErrorCode};
use crate::helpers::{handle_ffi_result_error, slice_from_ptr, track_result, write_out};

/// One vertex of a CG envelope: gross weight (lb) and CG (in aft of datum).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WbEnvelopePoint {
    pub weight: f64,
    pub cg: f64,
}

/// Forward and aft CG limits at one weight (in aft of datum).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WbCgLimits {
    pub forward: f64,
    pub aft: f64,
}

fn to_envelope(points: &[WbEnvelopePoint]) -> Vec<EnvelopePoint> {
    points
        .iter()
        .map(|p| EnvelopePoint::new(p.weight, p.cg))
        .collect()
}

/// Test whether (`weight`, `cg`) lies inside the polygon `points[0..len]`.
///
/// Fewer than three vertices is never inside. A null `points` with a non-zero
/// `len` returns false and sets the last error to `WbErrorCode::NullPointer`.
///
/// # Safety
/// `points` must point to `len` vertices, or be null.
#[no_mangle]
pub unsafe extern "C" fn wb_point_in_envelope(
    weight: f64,
    cg: f64,
    points: *const WbEnvelopePoint,
    len: usize,
) -> bool {
    match track_result(unsafe { slice_from_ptr(points, len, "points") }) {
        Ok(points) => is_point_in_envelope(
            Pounds::new(weight),
            Inches::new(cg),
            &to_envelope(points),
        ),
        Err(_) => false,
    }
}

/// Slice the polygon `points[0..len]` horizontally at `weight`.
///
/// Returns
/// - `WbErrorCode::Ok` with the leftmost and rightmost crossings in `out_limits`
/// - `WbErrorCode::OutOfRange` when no edge spans `weight` (outside the envelope's
///   weight span, or fewer than three vertices)
/// - `WbErrorCode::NullPointer` if `out_limits` is null, or `points` is null with a non-zero `len`
///
/// # Safety
/// - `points` must point to `len` vertices, or be null.
/// - `out_limits` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn wb_limits_at_weight(
    weight: f64,
    points: *const WbEnvelopePoint,
    len: usize,
    out_limits: *mut WbCgLimits,
) -> WbErrorCode {
    handle_ffi_result_error(|| {
        let points = unsafe { slice_from_ptr(points, len, "points") }?;
        let limits = limits_at_weight(Pounds::new(weight), &to_envelope(points))
            .ok_or_else(|| {
                DefaultWbError::out_of_range("weight", &format!("{weight} lb is outside the envelope"))
            })?;
        let limits = WbCgLimits {
            forward: *limits.forward,
            aft: *limits.aft,
        };
        unsafe { write_out(out_limits, limits, "out_limits") }
    })
}
