//! Argument descriptors.
//!
//! A flat descriptor owns five strings and two string arrays. It is filled
//! field by field inside an [`Owned`], so a failure at any field releases the
//! fields already filled, in reverse order, before the error is returned.
//! Lists add a second level: a failure in element `k` also releases elements
//! `0..k` and the list array.

use sdr_types::{ArgInfo, ArgInfoList};

use crate::alloc::RawAlloc;
use crate::error::{AllocationFailure, MarshalError};
use crate::ffi::types::{SdrArgInfo, SdrArgInfoType, SdrRange};
use crate::owned::{ArrayBuilder, FlatArray, Owned, Release, release_array};
use crate::text::{from_c_string, from_str_array, raw_c_string, to_str_array};

impl Release for SdrArgInfo {
    unsafe fn release_in<A: RawAlloc>(&mut self, alloc: &A) {
        // Safety: forwarded contract. Unfilled fields are null and skipped.
        unsafe {
            release_array(&mut self.option_names, self.num_options, alloc);
            release_array(&mut self.options, self.num_options, alloc);
            self.units.release_in(alloc);
            self.description.release_in(alloc);
            self.name.release_in(alloc);
            self.value.release_in(alloc);
            self.key.release_in(alloc);
        }
        self.num_options = 0;
    }
}

fn check_options(info: &ArgInfo) -> Result<(), MarshalError> {
    if info.options_aligned() {
        return Ok(());
    }
    tracing::warn!(
        key = %info.key,
        options = info.options.len(),
        option_names = info.option_names.len(),
        "rejecting argument with misaligned option labels"
    );
    Err(MarshalError::OptionCountMismatch {
        key: info.key.clone(),
        options: info.options.len(),
        option_names: info.option_names.len(),
    })
}

/// Fill `out` in field order. On error, whatever was filled stays in `out`
/// for the caller to release.
fn fill<A: RawAlloc>(
    out: &mut SdrArgInfo,
    info: &ArgInfo,
    alloc: &A,
) -> Result<(), AllocationFailure> {
    out.key = raw_c_string(&info.key, alloc)?;
    out.value = raw_c_string(&info.value, alloc)?;
    out.name = raw_c_string(&info.name, alloc)?;
    out.description = raw_c_string(&info.description, alloc)?;
    out.units = raw_c_string(&info.units, alloc)?;
    out.type_ = SdrArgInfoType::from_rust(info.arg_type);
    out.range = SdrRange::from_rust(&info.range);

    let (options, num_options) = to_str_array(&info.options, alloc)?
        .into_raw()
        .into_raw_parts();
    out.options = options;
    out.num_options = num_options;

    let (option_names, _) = to_str_array(&info.option_names, alloc)?
        .into_raw()
        .into_raw_parts();
    out.option_names = option_names;
    Ok(())
}

/// Convert a descriptor into an owned flat descriptor.
///
/// Fails without allocating if `options` and `option_names` differ in
/// length.
pub fn to_flat_arg_info<A: RawAlloc + Copy>(
    info: &ArgInfo,
    alloc: A,
) -> Result<Owned<SdrArgInfo, A>, MarshalError> {
    check_options(info)?;
    let mut out = Owned::<SdrArgInfo, A>::empty(alloc);
    if let Err(err) = fill(out.get_mut(), info, &alloc) {
        tracing::debug!(key = %info.key, "rolling back partially built argument info");
        return Err(err.into());
    }
    Ok(out)
}

/// Copy a flat descriptor into an owned one.
///
/// # Safety
///
/// Every string field must be null or NUL-terminated, and both option arrays
/// null or holding `num_options` strings.
pub unsafe fn from_flat_arg_info(info: &SdrArgInfo) -> ArgInfo {
    // Safety: forwarded contract.
    unsafe {
        ArgInfo {
            key: from_c_string(info.key),
            value: from_c_string(info.value),
            name: from_c_string(info.name),
            description: from_c_string(info.description),
            units: from_c_string(info.units),
            arg_type: info.type_.to_rust(),
            range: info.range.to_rust(),
            options: from_str_array(info.options, info.num_options),
            option_names: from_str_array(info.option_names, info.num_options),
        }
    }
}

/// Convert a list of descriptors into an owned flat array.
///
/// Every descriptor is validated before anything is allocated.
pub fn to_flat_arg_info_list<A: RawAlloc + Copy>(
    infos: &[ArgInfo],
    alloc: A,
) -> Result<Owned<FlatArray<SdrArgInfo>, A>, MarshalError> {
    infos.iter().try_for_each(check_options)?;
    let mut out = ArrayBuilder::new(infos.len(), alloc)?;
    for info in infos {
        out.push(to_flat_arg_info(info, alloc)?.into_raw());
    }
    Ok(out.finish())
}

/// Copy a flat array of descriptors. NULL reads as empty.
///
/// # Safety
///
/// `ptr` must be null or point to `len` valid descriptors.
pub unsafe fn from_flat_arg_info_list(ptr: *const SdrArgInfo, len: usize) -> ArgInfoList {
    if ptr.is_null() {
        return ArgInfoList::new();
    }
    // Safety: `len` readable descriptors per the caller contract.
    let infos = unsafe { std::slice::from_raw_parts(ptr, len) };
    // Safety: each descriptor is valid per the caller contract.
    infos.iter().map(|info| unsafe { from_flat_arg_info(info) }).collect()
}
