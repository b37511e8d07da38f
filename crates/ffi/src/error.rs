use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use weight_balance_core::CalculationError;

/// Common interface for FFI error types.
///
/// # Design
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
///
/// # Example
/// ```rust,ignore
/// let err = DefaultWbError::null_pointer("out_aircraft");
/// assert_eq!(err.code(), WbErrorCode::NullPointer);
/// assert_eq!(err.msg(), "Parameter 'out_aircraft' cannot be null");
/// ```
pub(crate) trait WbError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> WbErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `WbError` for the failures the C ABI can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultWbError {
    code: WbErrorCode,
    msg: String,
}

impl DefaultWbError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_aircraft"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: WbErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a C string that is not valid UTF-8.
    pub fn invalid_string(param_name: &str) -> Self {
        Self {
            code: WbErrorCode::InvalidString,
            msg: format!("Parameter '{param_name}' is not valid UTF-8"),
        }
    }

    /// Create error for an aircraft id with no built-in definition.
    pub fn unknown_aircraft(id: &str) -> Self {
        Self {
            code: WbErrorCode::UnknownAircraft,
            msg: format!("Unknown aircraft id '{id}'"),
        }
    }

    /// Create error for an index or weight outside what the target holds.
    ///
    /// # Arguments
    /// * `param_name` - The parameter that was out of range (e.g., `"index"`, `"weight"`)
    /// * `message` - A description of the valid range
    pub fn out_of_range(param_name: &str, message: &str) -> Self {
        Self {
            code: WbErrorCode::OutOfRange,
            msg: format!("Parameter '{param_name}' out of range: {message}"),
        }
    }
}

impl From<CalculationError> for DefaultWbError {
    fn from(error: CalculationError) -> Self {
        let code = match error {
            CalculationError::UnknownStation(_) => WbErrorCode::UnknownStation,
            CalculationError::UnknownFuelTank(_) => WbErrorCode::UnknownFuelTank,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl WbError for DefaultWbError {
    fn code(&self) -> WbErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by weight-and-balance functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WbErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// A C string argument was not valid UTF-8.
    InvalidString = 2,

    /// No built-in aircraft has the requested id.
    UnknownAircraft = 3,

    /// A station load names a station the aircraft does not declare.
    UnknownStation = 4,

    /// A fuel load names a tank the aircraft does not declare.
    UnknownFuelTank = 5,

    /// Index past the end of a collection, or a weight outside the envelope's span.
    OutOfRange = 6,
}

impl From<DefaultWbError> for WbErrorCode {
    fn from(error: DefaultWbError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The `CString` is stored so the pointer handed out by `wb_get_last_error` stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, WbErrorCode)> = const { RefCell::new((None, WbErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, WbErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, WbErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if it succeeded.
///
/// # Thread Safety
/// Error state is per-thread; each thread sees only its own failures.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// WbAircraft *aircraft = NULL;
/// if (wb_aircraft_builtin("c172n", &aircraft) != Ok) {
///     const char *error = wb_get_last_error();
///     if (error) {
///         fprintf(stderr, "Aircraft lookup failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn wb_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns:
/// - `WbErrorCode::Ok` (0) if the last call on this thread succeeded
/// - The specific error code from the last failed operation
#[no_mangle]
pub extern "C" fn wb_get_last_error_code() -> WbErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
