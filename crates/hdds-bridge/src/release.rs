// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Deallocation entry points for memory handed to the caller.
//!
//! Every buffer or string returned across the boundary belongs to the caller
//! and must be given back exactly once, through the function matching its
//! shape. There is no reference counting: releasing twice, or with the wrong
//! function, is undefined behavior. Null is accepted and ignored.
//!
//! # Usage from C
//!
//! ```c
//! uint8_t* handles = NULL;
//! if (hdds_data_writer_get_matched_subscriptions(rt, writer, &handles) == RETURN_CODE_OK) {
//!     uint32_t count;
//!     memcpy(&count, handles, sizeof count);
//!     /* ... */
//!     hdds_release_native_ptr(handles);
//! }
//! ```

use std::os::raw::{c_char, c_void};

use crate::codec::{self, strings};

/// Release a flat buffer of fixed-size elements (or any single C allocation
/// produced by this library).
///
/// # Safety
/// - `ptr` must be NULL or a buffer returned by this library and not yet released.
#[no_mangle]
pub unsafe extern "C" fn hdds_release_native_ptr(ptr: *mut c_void) {
    codec::c_free(ptr);
}

/// Release a basic (`char`) string.
///
/// # Safety
/// - `ptr` must be NULL or a basic string returned by this library and not yet released.
#[no_mangle]
pub unsafe extern "C" fn hdds_release_basic_string_ptr(ptr: *mut c_char) {
    codec::c_free(ptr);
}

/// Release a wide (`wchar_t`) string.
///
/// # Safety
/// - `ptr` must be NULL or a wide string returned by this library and not yet released.
#[no_mangle]
pub unsafe extern "C" fn hdds_release_wide_string_ptr(ptr: *mut libc::wchar_t) {
    codec::c_free(ptr);
}

/// Release a basic string sequence: every slot string, then the buffer.
///
/// # Safety
/// - `ptr` must be NULL or a basic string sequence returned by this library
///   and not yet released.
#[no_mangle]
pub unsafe extern "C" fn hdds_release_basic_string_sequence_ptr(ptr: *mut u8) {
    strings::release_string_sequence::<c_char>(ptr);
}

/// Release a wide string sequence: every slot string, then the buffer.
///
/// # Safety
/// - `ptr` must be NULL or a wide string sequence returned by this library
///   and not yet released.
#[no_mangle]
pub unsafe extern "C" fn hdds_release_wide_string_sequence_ptr(ptr: *mut u8) {
    strings::release_string_sequence::<libc::wchar_t>(ptr);
}
