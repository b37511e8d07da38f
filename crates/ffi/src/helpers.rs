use crate::error::{with_last_error_mut, DefaultWbError, WbError, WbErrorCode};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::slice;

/// Set the thread-local error message and code.
/// Accepts any type implementing `WbError` trait.
pub(crate) fn set_last_error(error: &impl WbError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl WbError) -> WbErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result, or clear the last error on success.
pub(crate) fn track_result<T>(result: Result<T, DefaultWbError>) -> Result<T, WbErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Run an FFI body and collapse its result to the code returned across the boundary.
pub(crate) fn handle_ffi_result_error<F>(f: F) -> WbErrorCode
where
    F: FnOnce() -> Result<(), DefaultWbError>,
{
    match track_result(f()) {
        Ok(()) => WbErrorCode::Ok,
        Err(code) => code,
    }
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = WbErrorCode::Ok;
    });
}

/// Borrow a caller-owned C string as `&str`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn str_from_ptr<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<&'a str, DefaultWbError> {
    if ptr.is_null() {
        return Err(DefaultWbError::null_pointer(param_name));
    }
    // SAFETY: non-null and NUL-terminated per the caller contract
    let cstr = unsafe { CStr::from_ptr(ptr) };
    cstr.to_str().map_err(|_| DefaultWbError::invalid_string(param_name))
}

/// Borrow a caller-owned array. A zero length accepts a null pointer.
///
/// # Safety
/// When `len > 0`, `ptr` must point to `len` initialized values that outlive `'a`.
pub(crate) unsafe fn slice_from_ptr<'a, T>(
    ptr: *const T,
    len: usize,
    param_name: &str,
) -> Result<&'a [T], DefaultWbError> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(DefaultWbError::null_pointer(param_name));
    }
    // SAFETY: non-null with `len` elements per the caller contract
    Ok(unsafe { slice::from_raw_parts(ptr, len) })
}

/// Borrow a handle created by this library.
///
/// # Safety
/// `ptr` must be null or a live handle of type `T` returned by this library.
pub(crate) unsafe fn ref_from_ptr<'a, T>(
    ptr: *const T,
    param_name: &str,
) -> Result<&'a T, DefaultWbError> {
    // SAFETY: a non-null handle is live per the caller contract
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultWbError::null_pointer(param_name))
}

/// Write through an out-pointer after checking it for null.
///
/// # Safety
/// `out` must be null or valid for writes of `T`.
pub(crate) unsafe fn write_out<T>(
    out: *mut T,
    value: T,
    param_name: &str,
) -> Result<(), DefaultWbError> {
    if out.is_null() {
        return Err(DefaultWbError::null_pointer(param_name));
    }
    // SAFETY: non-null and writable per the caller contract
    unsafe {
        out.write(value);
    }
    Ok(())
}

/// Owned C string for text produced by the engine. Interior NULs are dropped.
pub(crate) fn to_cstring(text: &str) -> CString {
    CString::new(text.replace('\0', "")).unwrap_or_default()
}
