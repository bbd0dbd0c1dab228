//! Numeric sequences and ranges.

use sdr_types::Range;

use crate::alloc::RawAlloc;
use crate::error::AllocationFailure;
use crate::ffi::types::SdrRange;
use crate::owned::{ArrayBuilder, FlatArray, Owned, Release};

/// Copy numeric values into an owned flat array.
///
/// Works for any plain element type (`f64`, `u32`, [`SdrRange`]).
pub fn to_numeric_list<T, A>(
    values: &[T],
    alloc: A,
) -> Result<Owned<FlatArray<T>, A>, AllocationFailure>
where
    T: Copy + Release,
    A: RawAlloc + Copy,
{
    let mut out = ArrayBuilder::new(values.len(), alloc)?;
    for &value in values {
        out.push(value);
    }
    Ok(out.finish())
}

/// Copy a flat numeric array into a vector. NULL reads as empty.
///
/// # Safety
///
/// `ptr` must be null or point to `len` initialised values.
pub unsafe fn from_numeric_list<T: Copy>(ptr: *const T, len: usize) -> Vec<T> {
    if ptr.is_null() {
        return Vec::new();
    }
    // Safety: `len` readable values per the caller contract.
    unsafe { std::slice::from_raw_parts(ptr, len) }.to_vec()
}

/// Convert ranges to an owned flat array.
pub fn to_range_list<A>(
    ranges: &[Range],
    alloc: A,
) -> Result<Owned<FlatArray<SdrRange>, A>, AllocationFailure>
where
    A: RawAlloc + Copy,
{
    let mut out = ArrayBuilder::new(ranges.len(), alloc)?;
    for range in ranges {
        out.push(SdrRange::from_rust(range));
    }
    Ok(out.finish())
}

/// Copy a flat range array into owned ranges. NULL reads as empty.
///
/// # Safety
///
/// `ptr` must be null or point to `len` ranges.
pub unsafe fn from_range_list(ptr: *const SdrRange, len: usize) -> Vec<Range> {
    // Safety: forwarded contract.
    unsafe { from_numeric_list(ptr, len) }
        .into_iter()
        .map(SdrRange::to_rust)
        .collect()
}
