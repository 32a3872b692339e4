// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Flat sequence codec.
//!
//! Variable-length sequences cross the boundary as one self-describing
//! buffer allocated with the C allocator:
//!
//! ```text
//! +----------------+---------------------------------------------+
//! | count: u32 LE  | count x element (native layout, unaligned)  |
//! +----------------+---------------------------------------------+
//!  0              4                                4 + count * size_of::<T>()
//! ```
//!
//! String sequences use the same layout with pointer-sized elements, each
//! pointing at its own null-terminated allocation (see [`strings`]).
//!
//! # Ownership
//!
//! [`FlatSequence`] owns its buffer and frees it on drop. `into_raw` hands the
//! buffer to the caller runtime, which must give it back through the matching
//! `hdds_release_*` function exactly once.
//!
//! # Safety
//!
//! Decoding trusts the buffer completely: a truncated or malformed buffer is
//! undefined behavior. Only null is special-cased (decodes as empty).

pub mod strings;

use std::alloc::Layout;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

pub use strings::{CharUnit, StringSequence};

/// Size of the element count prefix.
pub const HEADER_LEN: usize = mem::size_of::<u32>();

/// Allocate `size` bytes with the C allocator, aborting on exhaustion.
pub(crate) fn c_alloc(size: usize) -> NonNull<u8> {
    let size = size.max(1);
    // SAFETY: malloc with a non-zero size has no preconditions.
    let raw = unsafe { libc::malloc(size) }.cast::<u8>();
    match NonNull::new(raw) {
        Some(ptr) => ptr,
        None => std::alloc::handle_alloc_error(
            Layout::from_size_align(size, 1).unwrap_or_else(|_| Layout::new::<u8>()),
        ),
    }
}

/// Free memory obtained from [`c_alloc`]. Null is a no-op.
///
/// # Safety
/// `ptr` must be null or come from `c_alloc`, and must not be used afterwards.
pub(crate) unsafe fn c_free<T>(ptr: *mut T) {
    if !ptr.is_null() {
        libc::free(ptr.cast::<libc::c_void>());
    }
}

/// Element count written to the prefix, clamped to `u32::MAX`.
pub(crate) fn wire_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| {
        log::error!(
            "[hdds-bridge] sequence of {} elements truncated to {}",
            len,
            u32::MAX
        );
        u32::MAX
    })
}

/// Byte length of a flat buffer holding `count` elements of `T`.
pub const fn encoded_len<T>(count: usize) -> usize {
    HEADER_LEN + count * mem::size_of::<T>()
}

/// Read the element count of a flat buffer. Null reads as 0.
///
/// # Safety
/// `buffer` must be null or point at a well-formed flat buffer.
pub unsafe fn sequence_len(buffer: *const u8) -> usize {
    if buffer.is_null() {
        return 0;
    }
    let mut prefix = [0u8; HEADER_LEN];
    ptr::copy_nonoverlapping(buffer, prefix.as_mut_ptr(), HEADER_LEN);
    u32::from_le_bytes(prefix) as usize
}

/// Owned flat buffer of `T` elements.
pub struct FlatSequence<T: Copy> {
    buffer: NonNull<u8>,
    _marker: PhantomData<T>,
}

// SAFETY: the buffer is uniquely owned plain memory holding `T` values.
unsafe impl<T: Copy + Send> Send for FlatSequence<T> {}
unsafe impl<T: Copy + Sync> Sync for FlatSequence<T> {}

impl<T: Copy> FlatSequence<T> {
    /// Copy `items` into a new buffer. The source is left untouched.
    ///
    /// At most `u32::MAX` elements are encoded; the rest is dropped with an
    /// error log.
    pub fn encode(items: &[T]) -> Self {
        let count = wire_count(items.len());
        let items = &items[..count as usize];
        let buffer = c_alloc(encoded_len::<T>(items.len()));

        // SAFETY: the allocation holds the prefix plus `items.len()` elements.
        unsafe {
            ptr::copy_nonoverlapping(count.to_le_bytes().as_ptr(), buffer.as_ptr(), HEADER_LEN);
            let elements = buffer.as_ptr().add(HEADER_LEN).cast::<T>();
            for (i, item) in items.iter().enumerate() {
                elements.add(i).write_unaligned(*item);
            }
        }

        Self {
            buffer,
            _marker: PhantomData,
        }
    }

    /// Take ownership of a raw buffer previously produced by `into_raw`
    /// (or by [`encode`]). Returns `None` for null.
    ///
    /// # Safety
    /// `raw` must be a well-formed flat buffer of `T`, allocated by this
    /// crate, and not owned by anyone else.
    pub unsafe fn from_raw(raw: *mut u8) -> Option<Self> {
        NonNull::new(raw).map(|buffer| Self {
            buffer,
            _marker: PhantomData,
        })
    }

    /// Release ownership to the caller. Free with `hdds_release_native_ptr`.
    pub fn into_raw(self) -> *mut u8 {
        let raw = self.buffer.as_ptr();
        mem::forget(self);
        raw
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.buffer.as_ptr()
    }

    pub fn len(&self) -> usize {
        // SAFETY: the buffer is always well-formed while owned.
        unsafe { sequence_len(self.buffer.as_ptr()) }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<T> {
        if index >= self.len() {
            return None;
        }
        // SAFETY: index is within the encoded element count.
        Some(unsafe { self.read(index) })
    }

    pub fn to_vec(&self) -> Vec<T> {
        (0..self.len())
            // SAFETY: every index is within the encoded element count.
            .map(|i| unsafe { self.read(i) })
            .collect()
    }

    /// The whole encoded buffer, prefix included.
    pub fn as_bytes(&self) -> &[u8] {
        let len = encoded_len::<T>(self.len());
        // SAFETY: the allocation is exactly `len` bytes and lives as long as self.
        unsafe { std::slice::from_raw_parts(self.buffer.as_ptr(), len) }
    }

    unsafe fn read(&self, index: usize) -> T {
        self.buffer
            .as_ptr()
            .add(HEADER_LEN)
            .cast::<T>()
            .add(index)
            .read_unaligned()
    }
}

impl<T: Copy> Drop for FlatSequence<T> {
    fn drop(&mut self) {
        // SAFETY: the buffer came from c_alloc and is uniquely owned.
        unsafe { c_free(self.buffer.as_ptr()) };
    }
}

impl<T: Copy + std::fmt::Debug> std::fmt::Debug for FlatSequence<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}

/// A `#[repr(C)]` wrapper holding raw flat buffers it is responsible for.
pub trait NestedBuffers {
    /// Free every nested buffer and null the fields.
    ///
    /// # Safety
    /// The nested pointers must be null or owned by this value.
    unsafe fn release_nested(&mut self);
}

/// Owns a wrapper for a scope and releases its nested buffers on drop.
///
/// Used when a wrapper is only lent to the caller for the duration of a call.
pub struct Scoped<W: NestedBuffers>(W);

impl<W: NestedBuffers> Scoped<W> {
    pub fn new(wrapper: W) -> Self {
        Self(wrapper)
    }

    pub fn get(&self) -> &W {
        &self.0
    }

    pub fn as_ptr(&self) -> *const W {
        &self.0
    }
}

impl<W: NestedBuffers> Drop for Scoped<W> {
    fn drop(&mut self) {
        // SAFETY: a scoped wrapper owns its nested buffers.
        unsafe { self.0.release_nested() };
    }
}

/// Encode a sequence into a new flat buffer.
pub fn encode<T: Copy>(items: &[T]) -> FlatSequence<T> {
    FlatSequence::encode(items)
}

/// Decode a flat buffer into a new `Vec`. The buffer is not consumed.
///
/// # Safety
/// `buffer` must be null or a well-formed flat buffer of `T`.
pub unsafe fn decode<T: Copy>(buffer: *const u8) -> Vec<T> {
    let count = sequence_len(buffer);
    let mut out = Vec::with_capacity(count);
    if count == 0 {
        return out;
    }
    let elements = buffer.add(HEADER_LEN).cast::<T>();
    for i in 0..count {
        out.push(elements.add(i).read_unaligned());
    }
    out
}
