use std::ffi::CString;
use std::sync::Mutex;

use log::{Record, Metadata};
use once_cell::sync::Lazy;

use super::status::{densenl_status_t, catch_unwind};

/// The "error" level designates very serious errors
pub const DENSENL_LOG_LEVEL_ERROR: i32 = 1;

/// The "warn" level designates hazardous situations
pub const DENSENL_LOG_LEVEL_WARN: i32 = 2;

/// The "info" level designates useful information
pub const DENSENL_LOG_LEVEL_INFO: i32 = 3;

/// The "debug" level designates lower priority information
///
/// By default, log messages at this level are disabled in release mode, and
/// enabled in debug mode.
pub const DENSENL_LOG_LEVEL_DEBUG: i32 = 4;

/// The "trace" level designates very low priority, often extremely verbose,
/// information.
pub const DENSENL_LOG_LEVEL_TRACE: i32 = 5;

/// Callback function type for the logging system. Such functions are called
/// when a log event is emitted in the code.
///
/// The first argument is the log level, one of `DENSENL_LOG_LEVEL_ERROR`,
/// `DENSENL_LOG_LEVEL_WARN` `DENSENL_LOG_LEVEL_INFO`, `DENSENL_LOG_LEVEL_DEBUG`,
/// or `DENSENL_LOG_LEVEL_TRACE`. The second argument is a NULL-terminated
/// string containing the message associated with the log event.
#[allow(non_camel_case_types)]
pub type densenl_logging_callback_t = Option<unsafe extern "C" fn(level: i32, message: *const std::os::raw::c_char)>;

static GLOBAL_CALLBACK: Lazy<Mutex<densenl_logging_callback_t>> = Lazy::new(|| Mutex::new(None));

/// Implementation of `log::Log` that forward all log messages to the global
/// `densenl_logging_callback_t`.
struct DenseNLLogger;

/// Set the given ``callback`` function as the global logging callback. This
/// function will be called on all log events. If a logging callback was already
/// set, it is replaced by the new one.
#[no_mangle]
pub unsafe extern "C" fn densenl_set_logging_callback(callback: densenl_logging_callback_t) -> densenl_status_t {
    catch_unwind(|| {
        *GLOBAL_CALLBACK.lock().expect("mutex was poisoned") = callback;
        // we allow multiple sets of logger, therefore the result will be ignored
        let _ = log::set_boxed_logger(Box::new(DenseNLLogger));

        if cfg!(debug_assertions) {
            log::set_max_level(log::LevelFilter::Debug);
        } else {
            log::set_max_level(log::LevelFilter::Info);
        }

        Ok(())
    })
}

impl log::Log for DenseNLLogger {
    fn enabled(&self, _: &Metadata) -> bool {
       return true;
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("{} -- {}", record.target(), record.args());
            // interior NULL bytes can not be sent to C
            let message = message.replace('\0', "\\0");
            let message_cstr = CString::new(message).expect("message should not contain NULL");
            let callback = *GLOBAL_CALLBACK.lock().expect("mutex was poisoned");
            if let Some(callback) = callback {
                unsafe {
                    callback(record.level() as i32, message_cstr.as_ptr());
                }
            }
        }
    }

    fn flush(&self) {}
}
