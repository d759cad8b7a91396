use std::panic::UnwindSafe;
use std::cell::RefCell;
use std::os::raw::c_char;
use std::ffi::CString;

use densenl::Error;

// Save the last error message in thread local storage.
//
// This is marginally better than a standard global static value because it
// allow multiple threads to each have separate errors conditions.
thread_local! {
    pub static LAST_ERROR_MESSAGE: RefCell<CString> = RefCell::new(CString::new("").expect("invalid C string"));
}

/// Status type returned by all functions in the C API.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum densenl_status_t {
    /// The function succeeded
    DENSENL_SUCCESS = 0,
    /// A function got an invalid parameter
    DENSENL_INVALID_PARAMETER_ERROR = 1,
    /// There was an error reading or writing JSON
    DENSENL_JSON_ERROR = 2,
    /// A string contains non-utf8 data
    DENSENL_UTF8_ERROR = 3,
    /// The unit cell or cutoff can not be used with the minimum image
    /// convention
    DENSENL_INVALID_GEOMETRY_ERROR = 4,
    /// There was an error reading a structure file with chemfiles
    DENSENL_CHEMFILES_ERROR = 5,
    /// There was an error of unknown kind
    DENSENL_UNKNOWN_ERROR = 254,
    /// There was an internal error (rust panic)
    DENSENL_INTERNAL_PANIC = 255,
}

impl From<Error> for densenl_status_t {
    fn from(error: Error) -> densenl_status_t {
        LAST_ERROR_MESSAGE.with(|message| {
            *message.borrow_mut() = CString::new(format!("{}", error)).expect("error message contains a null byte");
        });
        match error {
            Error::InvalidParameter(_) => densenl_status_t::DENSENL_INVALID_PARAMETER_ERROR,
            Error::InvalidGeometry(_) => densenl_status_t::DENSENL_INVALID_GEOMETRY_ERROR,
            Error::Json(_) => densenl_status_t::DENSENL_JSON_ERROR,
            Error::Utf8(_) => densenl_status_t::DENSENL_UTF8_ERROR,
            Error::Chemfiles(_) => densenl_status_t::DENSENL_CHEMFILES_ERROR,
            Error::Panic(_) => densenl_status_t::DENSENL_INTERNAL_PANIC,
            _ => densenl_status_t::DENSENL_UNKNOWN_ERROR,
        }
    }
}

/// An alternative to `std::panic::catch_unwind` that automatically transform
/// the error into `densenl_status_t`.
pub fn catch_unwind<F>(function: F) -> densenl_status_t where F: FnOnce() -> Result<(), Error> + UnwindSafe {
    match std::panic::catch_unwind(function) {
        Ok(Ok(())) => densenl_status_t::DENSENL_SUCCESS,
        Ok(Err(error)) => error.into(),
        Err(error) => Error::from(error).into()
    }
}

/// Check that pointers (used as C API function parameters) are not null.
#[macro_export]
macro_rules! check_pointers {
    ($pointer: ident) => {
        if $pointer.is_null() {
            return Err(densenl::Error::InvalidParameter(
                format!("got invalid NULL pointer for {}", stringify!($pointer))
            ));
        }
    };
    ($($pointer: ident),* $(,)?) => {
        $(check_pointers!($pointer);)*
    }
}

/// Get the last error message that was created on the current thread.
///
/// @returns the last error message, as a NULL-terminated string
#[no_mangle]
pub unsafe extern "C" fn densenl_last_error() -> *const c_char {
    let mut result = std::ptr::null();
    let wrapper = std::panic::AssertUnwindSafe(&mut result);
    let status = catch_unwind(move || {
        // capture the whole wrapper, not only the `&mut` field
        let wrapper = wrapper;
        LAST_ERROR_MESSAGE.with(|message| {
            *wrapper.0 = message.borrow().as_ptr();
        });
        Ok(())
    });

    if status != densenl_status_t::DENSENL_SUCCESS {
        eprintln!("ERROR: unable to get last error message!");
        return std::ptr::null();
    }

    return result;
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;
    use super::*;

    #[test]
    fn last_error() {
        let status = catch_unwind(|| Err(Error::InvalidGeometry("bad cell".into())));
        assert_eq!(status, densenl_status_t::DENSENL_INVALID_GEOMETRY_ERROR);

        let message = unsafe { CStr::from_ptr(densenl_last_error()) };
        assert_eq!(message.to_str().unwrap(), "invalid geometry: bad cell");
    }

    #[test]
    fn panics() {
        let status = catch_unwind(|| panic!("this is a test"));
        assert_eq!(status, densenl_status_t::DENSENL_INTERNAL_PANIC);

        let message = unsafe { CStr::from_ptr(densenl_last_error()) };
        assert_eq!(message.to_str().unwrap(), "internal error: this is a test");
    }
}
