// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Null-terminated strings and string sequences.
//!
//! Two character widths are supported: basic (`c_char`, UTF-8 bytes) and
//! wide (`wchar_t`, UTF-32 on Unix, UTF-16 on Windows). Every string is its
//! own C allocation so each slot of a sequence can be released independently.

use std::mem::{self, ManuallyDrop};
use std::os::raw::c_char;
use std::ptr::{self, NonNull};

use super::{c_alloc, c_free, FlatSequence};
use crate::error::{BridgeError, Result};

/// Character unit of a null-terminated string.
pub trait CharUnit: Copy + PartialEq + 'static {
    const NUL: Self;

    /// Units for `s`, without terminator.
    fn encode_str(s: &str) -> Vec<Self>;

    /// Lossy conversion back to a Rust string.
    fn decode_units(units: &[Self]) -> String;
}

impl CharUnit for c_char {
    const NUL: Self = 0;

    fn encode_str(s: &str) -> Vec<Self> {
        s.bytes().map(|b| b as c_char).collect()
    }

    fn decode_units(units: &[Self]) -> String {
        let bytes: Vec<u8> = units.iter().map(|&c| c as u8).collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl CharUnit for libc::wchar_t {
    const NUL: Self = 0;

    #[cfg(windows)]
    fn encode_str(s: &str) -> Vec<Self> {
        s.encode_utf16().map(|u| u as Self).collect()
    }

    #[cfg(not(windows))]
    fn encode_str(s: &str) -> Vec<Self> {
        s.chars().map(|c| u32::from(c) as Self).collect()
    }

    #[cfg(windows)]
    fn decode_units(units: &[Self]) -> String {
        let wide: Vec<u16> = units.iter().map(|&u| u as u16).collect();
        String::from_utf16_lossy(&wide)
    }

    #[cfg(not(windows))]
    fn decode_units(units: &[Self]) -> String {
        units
            .iter()
            .map(|&u| char::from_u32(u as u32).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }
}

/// Duplicate `s` into a fresh null-terminated C allocation.
///
/// Fails if `s` contains an interior NUL, which C could not represent.
pub fn duplicate_str<U: CharUnit>(s: &str) -> Result<NonNull<U>> {
    if s.contains('\0') {
        return Err(BridgeError::InteriorNul);
    }
    Ok(duplicate_units(&U::encode_str(s)))
}

fn duplicate_units<U: CharUnit>(units: &[U]) -> NonNull<U> {
    let raw = c_alloc((units.len() + 1) * mem::size_of::<U>()).cast::<U>();
    // SAFETY: the allocation holds units.len() + 1 elements.
    unsafe {
        ptr::copy_nonoverlapping(units.as_ptr(), raw.as_ptr(), units.len());
        raw.as_ptr().add(units.len()).write(U::NUL);
    }
    raw
}

/// Number of units before the terminator. Null reads as 0.
///
/// # Safety
/// `s` must be null or point at a null-terminated string.
pub unsafe fn unit_len<U: CharUnit>(s: *const U) -> usize {
    if s.is_null() {
        return 0;
    }
    let mut len = 0;
    while *s.add(len) != U::NUL {
        len += 1;
    }
    len
}

/// Read a null-terminated string. Null reads as the empty string.
///
/// # Safety
/// `s` must be null or point at a null-terminated string.
pub unsafe fn read_str<U: CharUnit>(s: *const U) -> String {
    let len = unit_len(s);
    if len == 0 {
        return String::new();
    }
    U::decode_units(std::slice::from_raw_parts(s, len))
}

/// Flat sequence of independently allocated strings.
pub struct StringSequence<U: CharUnit> {
    slots: FlatSequence<*mut U>,
}

// SAFETY: the slot strings are uniquely owned by the sequence.
unsafe impl<U: CharUnit> Send for StringSequence<U> {}

impl<U: CharUnit> StringSequence<U> {
    /// Duplicate every string into its own allocation.
    pub fn encode<S: AsRef<str>>(strings: &[S]) -> Result<Self> {
        if strings.iter().any(|s| s.as_ref().contains('\0')) {
            return Err(BridgeError::InteriorNul);
        }
        let slots: Vec<*mut U> = strings
            .iter()
            .map(|s| duplicate_units(&U::encode_str(s.as_ref())).as_ptr())
            .collect();
        Ok(Self {
            slots: FlatSequence::encode(&slots),
        })
    }

    /// Take ownership of a raw string sequence. Returns `None` for null.
    ///
    /// # Safety
    /// `raw` must be a well-formed string sequence of this width, allocated
    /// by this crate, and not owned by anyone else.
    pub unsafe fn from_raw(raw: *mut u8) -> Option<Self> {
        FlatSequence::from_raw(raw).map(|slots| Self { slots })
    }

    /// Release ownership to the caller, who frees it with the matching
    /// `hdds_release_*_string_sequence_ptr`.
    pub fn into_raw(self) -> *mut u8 {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the slots are moved out exactly once.
        let slots = unsafe { ptr::read(&this.slots) };
        slots.into_raw()
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.slots.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<String> {
        // SAFETY: owned slots always point at valid strings.
        self.slots.get(index).map(|s| unsafe { read_str(s) })
    }

    pub fn to_vec(&self) -> Vec<String> {
        // SAFETY: see `get`.
        unsafe { decode_strings::<U>(self.slots.as_ptr()) }
    }
}

impl<U: CharUnit> Drop for StringSequence<U> {
    fn drop(&mut self) {
        for slot in self.slots.to_vec() {
            // SAFETY: every slot was produced by duplicate_units.
            unsafe { c_free(slot) };
        }
    }
}

/// Decode a string sequence into owned Rust strings. Null decodes as empty.
///
/// # Safety
/// `buffer` must be null or a well-formed string sequence of width `U`.
pub unsafe fn decode_strings<U: CharUnit>(buffer: *const u8) -> Vec<String> {
    super::decode::<*mut U>(buffer)
        .into_iter()
        .map(|s| read_str(s))
        .collect()
}

/// Free every slot string, then the outer buffer. Null is a no-op.
///
/// # Safety
/// `buffer` must be null or a string sequence of width `U` owned by the
/// caller; it must not be used afterwards.
pub unsafe fn release_string_sequence<U: CharUnit>(buffer: *mut u8) {
    drop(StringSequence::<U>::from_raw(buffer));
}
