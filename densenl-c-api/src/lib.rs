#![warn(clippy::all, clippy::pedantic)]

// disable some style lints
#![allow(clippy::needless_return, clippy::redundant_field_names, clippy::upper_case_acronyms)]
#![allow(clippy::missing_errors_doc, clippy::missing_safety_doc, clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

mod utils;

#[macro_use]
mod status;
pub use self::status::{catch_unwind, densenl_status_t};

mod logging;
pub use self::logging::densenl_logging_callback_t;

pub mod profiling;
pub mod neighbors;
