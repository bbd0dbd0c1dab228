//! Keyword argument maps.
//!
//! A flat map is two parallel arrays of C strings. Building one goes through
//! [`kwargs_set`], the same single-pair insert exported to C, which grows
//! both arrays by one slot per new key.

use std::ffi::{CStr, c_char};
use std::ptr;

use sdr_types::{Kwargs, KwargsList};

use crate::alloc::{RawAlloc, allocate_array, deallocate_array};
use crate::error::AllocationFailure;
use crate::ffi::types::SdrKwargs;
use crate::owned::{ArrayBuilder, FlatArray, Owned, Release, release_array};
use crate::text::{from_c_string, raw_c_string};

impl Release for SdrKwargs {
    unsafe fn release_in<A: RawAlloc>(&mut self, alloc: &A) {
        // Safety: forwarded contract; both arrays hold `size` strings.
        unsafe {
            release_array(&mut self.vals, self.size, alloc);
            release_array(&mut self.keys, self.size, alloc);
        }
        self.size = 0;
    }
}

impl SdrKwargs {
    /// Borrow the key and value pointer arrays.
    fn slots(&self) -> (&[*mut c_char], &[*mut c_char]) {
        if self.keys.is_null() || self.vals.is_null() {
            return (&[], &[]);
        }
        // Safety: non-null arrays hold `size` pointers each.
        unsafe {
            (
                std::slice::from_raw_parts(self.keys, self.size),
                std::slice::from_raw_parts(self.vals, self.size),
            )
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        let (keys, _) = self.slots();
        keys.iter().position(|&k| {
            // Safety: keys are NUL-terminated strings.
            !k.is_null() && unsafe { CStr::from_ptr(k) }.to_bytes() == key.as_bytes()
        })
    }
}

/// Set `key` to `value`, replacing any existing value.
///
/// A new key grows both arrays by one. On failure `args` is left exactly as
/// it was and nothing is leaked.
///
/// # Safety
///
/// `args` must be zeroed or built entirely from `alloc`.
pub unsafe fn kwargs_set<A: RawAlloc>(
    args: &mut SdrKwargs,
    key: &str,
    value: &str,
    alloc: &A,
) -> Result<(), AllocationFailure> {
    if let Some(index) = args.position(key) {
        let mut new_val = raw_c_string(value, alloc)?;
        // Safety: `index < size`; the slot holds a string from `alloc`.
        unsafe {
            let slot = args.vals.add(index);
            std::mem::swap(&mut *slot, &mut new_val);
            new_val.release_in(alloc);
        }
        return Ok(());
    }

    let size = args.size;
    let grown = size.checked_add(1).ok_or(AllocationFailure)?;

    // Safety: both strings come from `alloc`; the guards free them on error.
    let new_key = unsafe { Owned::from_raw(raw_c_string(key, alloc)?, alloc) };
    let new_val = unsafe { Owned::from_raw(raw_c_string(value, alloc)?, alloc) };

    let keys = allocate_array::<*mut c_char, _>(grown, alloc)?;
    let vals = match allocate_array::<*mut c_char, _>(grown, alloc) {
        Ok(vals) => vals,
        Err(err) => {
            // Safety: allocated just above with the same length.
            unsafe { deallocate_array(keys, grown, alloc) };
            return Err(err);
        }
    };

    let (old_keys, old_vals) = args.slots();
    // Safety: the new arrays have `grown` slots; the old ones have `size`.
    unsafe {
        ptr::copy_nonoverlapping(old_keys.as_ptr(), keys.as_ptr(), old_keys.len());
        ptr::copy_nonoverlapping(old_vals.as_ptr(), vals.as_ptr(), old_vals.len());
        keys.as_ptr().add(size).write(new_key.into_raw());
        vals.as_ptr().add(size).write(new_val.into_raw());
    }

    // Only the old pointer arrays go; the strings moved to the new ones.
    for old in [args.keys, args.vals] {
        if let Some(old) = ptr::NonNull::new(old) {
            // Safety: the old arrays came from `alloc` with `size` slots.
            unsafe { deallocate_array(old, size, alloc) };
        }
    }
    args.keys = keys.as_ptr();
    args.vals = vals.as_ptr();
    args.size = grown;
    Ok(())
}

/// Look up the value stored for `key`.
///
/// # Safety
///
/// `args` must be zeroed or hold `size` valid strings in each array.
pub unsafe fn kwargs_get<'a>(args: &'a SdrKwargs, key: &str) -> Option<&'a CStr> {
    let index = args.position(key)?;
    let (_, vals) = args.slots();
    let val = *vals.get(index)?;
    // Safety: values are NUL-terminated strings owned by `args`.
    (!val.is_null()).then(|| unsafe { CStr::from_ptr(val) })
}

/// Convert a map into an owned flat map.
///
/// An empty map yields non-null, zero-length arrays.
pub fn to_flat_kwargs<A: RawAlloc + Copy>(
    args: &Kwargs,
    alloc: A,
) -> Result<Owned<SdrKwargs, A>, AllocationFailure> {
    let mut out = Owned::<SdrKwargs, A>::empty(alloc);
    let flat = out.get_mut();
    flat.keys = allocate_array::<*mut c_char, _>(0, &alloc)?.as_ptr();
    flat.vals = allocate_array::<*mut c_char, _>(0, &alloc)?.as_ptr();

    for (key, value) in args {
        // Safety: `out` was built from `alloc` only.
        if let Err(err) = unsafe { kwargs_set(out.get_mut(), key, value, &alloc) } {
            tracing::debug!(entries = out.size, "rolling back partially built kwargs");
            return Err(err);
        }
    }
    Ok(out)
}

/// Copy a flat map into an owned map. Later duplicate keys win.
///
/// # Safety
///
/// `args` must be zeroed or hold `size` valid strings in each array.
pub unsafe fn from_flat_kwargs(args: &SdrKwargs) -> Kwargs {
    let (keys, vals) = args.slots();
    keys.iter()
        .zip(vals)
        // Safety: every slot is null or NUL-terminated.
        .map(|(&k, &v)| unsafe { (from_c_string(k), from_c_string(v)) })
        .collect()
}

/// Convert a list of maps into an owned flat array of maps.
pub fn to_flat_kwargs_list<A: RawAlloc + Copy>(
    list: &[Kwargs],
    alloc: A,
) -> Result<Owned<FlatArray<SdrKwargs>, A>, AllocationFailure> {
    let mut out = ArrayBuilder::new(list.len(), alloc)?;
    for args in list {
        out.push(to_flat_kwargs(args, alloc)?.into_raw());
    }
    Ok(out.finish())
}

/// Copy a flat array of maps. NULL reads as empty.
///
/// # Safety
///
/// `ptr` must be null or point to `len` valid maps.
pub unsafe fn from_flat_kwargs_list(ptr: *const SdrKwargs, len: usize) -> KwargsList {
    if ptr.is_null() {
        return KwargsList::new();
    }
    // Safety: `len` readable maps per the caller contract.
    let maps = unsafe { std::slice::from_raw_parts(ptr, len) };
    // Safety: each map is valid per the caller contract.
    maps.iter().map(|m| unsafe { from_flat_kwargs(m) }).collect()
}
