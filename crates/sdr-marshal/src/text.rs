//! Text and text sequences.
//!
//! Flat text is a heap copy terminated by NUL. Rust strings may contain NUL
//! bytes; the flat copy ends at the first one, which is all a C reader would
//! see anyway.

use std::ffi::{CStr, c_char};
use std::ptr;

use crate::alloc::{RawAlloc, c_string_layout};
use crate::error::AllocationFailure;
use crate::owned::{ArrayBuilder, FlatArray, Owned};

/// Copy `text` into a freshly allocated C string and return the raw pointer.
/// The caller owns the result.
pub(crate) fn raw_c_string<A: RawAlloc>(
    text: &str,
    alloc: &A,
) -> Result<*mut c_char, AllocationFailure> {
    let bytes = text.as_bytes();
    let bytes = match bytes.iter().position(|&b| b == 0) {
        Some(nul) => &bytes[..nul],
        None => bytes,
    };
    let out = alloc.allocate_zeroed(c_string_layout(bytes.len())?)?;
    // Safety: `out` has room for `bytes.len() + 1` bytes and the trailing one
    // is already zero.
    unsafe { ptr::copy_nonoverlapping(bytes.as_ptr(), out.as_ptr(), bytes.len()) };
    Ok(out.as_ptr().cast())
}

/// Convert text to an owned C string.
pub fn to_c_string<A: RawAlloc>(
    text: &str,
    alloc: A,
) -> Result<Owned<*mut c_char, A>, AllocationFailure> {
    let raw = raw_c_string(text, &alloc)?;
    // Safety: `raw` was just allocated from `alloc`.
    Ok(unsafe { Owned::from_raw(raw, alloc) })
}

/// Copy a C string into owned text.
///
/// NULL reads as empty text. Invalid UTF-8 is replaced with U+FFFD.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string.
pub unsafe fn from_c_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    // Safety: non-null and NUL-terminated per the caller contract.
    unsafe { CStr::from_ptr(ptr) }
        .to_string_lossy()
        .into_owned()
}

/// Convert a sequence of text into an owned array of C strings.
///
/// Either every string is copied or nothing stays allocated.
pub fn to_str_array<S, A>(
    strs: &[S],
    alloc: A,
) -> Result<Owned<FlatArray<*mut c_char>, A>, AllocationFailure>
where
    S: AsRef<str>,
    A: RawAlloc + Copy,
{
    let mut out = ArrayBuilder::new(strs.len(), alloc)?;
    for s in strs {
        out.push(raw_c_string(s.as_ref(), &alloc)?);
    }
    Ok(out.finish())
}

/// Copy an array of C strings into owned text.
///
/// # Safety
///
/// `ptr` must be null or point to `len` pointers, each null or
/// NUL-terminated.
pub unsafe fn from_str_array(ptr: *const *mut c_char, len: usize) -> Vec<String> {
    if ptr.is_null() {
        return Vec::new();
    }
    // Safety: `len` readable pointers per the caller contract.
    let slots = unsafe { std::slice::from_raw_parts(ptr, len) };
    slots
        .iter()
        // Safety: each slot is null or NUL-terminated.
        .map(|&s| unsafe { from_c_string(s) })
        .collect()
}
