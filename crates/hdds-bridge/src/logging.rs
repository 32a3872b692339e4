// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Logging initialization for the caller runtime.
//!
//! The bridge logs through the `log` facade under the `hdds_bridge` target.
//! Nothing is printed until the caller installs a logger with one of the
//! functions below; only the first successful call takes effect.

use std::ffi::CStr;
use std::os::raw::c_char;

use crate::native::ReturnCode;

/// Log level for bridge logging.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HddsLogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl From<HddsLogLevel> for log::LevelFilter {
    fn from(level: HddsLogLevel) -> Self {
        match level {
            HddsLogLevel::Off => log::LevelFilter::Off,
            HddsLogLevel::Error => log::LevelFilter::Error,
            HddsLogLevel::Warn => log::LevelFilter::Warn,
            HddsLogLevel::Info => log::LevelFilter::Info,
            HddsLogLevel::Debug => log::LevelFilter::Debug,
            HddsLogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn install(mut builder: env_logger::Builder) -> ReturnCode {
    match builder.format_timestamp_millis().try_init() {
        Ok(()) => ReturnCode::Ok,
        Err(_) => {
            log::debug!("[hdds-bridge] logger already installed");
            ReturnCode::Error
        }
    }
}

/// Log to stderr at `level` and above.
///
/// # Safety
/// Always safe to call.
///
/// # Returns
/// `RETURN_CODE_OK`, or `RETURN_CODE_ERROR` if a logger is already installed.
///
/// # Example (C)
/// ```c
/// hdds_logging_init(HDDS_LOG_LEVEL_DEBUG);
/// ```
#[no_mangle]
pub unsafe extern "C" fn hdds_logging_init(level: HddsLogLevel) -> ReturnCode {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level.into());
    install(builder)
}

/// Log to stderr using `RUST_LOG` when set, `default_level` otherwise.
///
/// # Safety
/// Always safe to call.
#[no_mangle]
pub unsafe extern "C" fn hdds_logging_init_env(default_level: HddsLogLevel) -> ReturnCode {
    let default = log::LevelFilter::from(default_level).to_string();
    install(env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default),
    ))
}

/// Log to stderr with an `env_logger` filter, e.g. `"hdds_bridge=trace,warn"`.
///
/// # Safety
/// - `filter` must be NULL or a valid null-terminated UTF-8 string.
///
/// # Returns
/// `RETURN_CODE_BAD_PARAMETER` for a NULL or non-UTF-8 filter.
#[no_mangle]
pub unsafe extern "C" fn hdds_logging_init_with_filter(filter: *const c_char) -> ReturnCode {
    if filter.is_null() {
        return ReturnCode::BadParameter;
    }
    let Ok(filter) = CStr::from_ptr(filter).to_str() else {
        return ReturnCode::BadParameter;
    };
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    install(builder)
}
