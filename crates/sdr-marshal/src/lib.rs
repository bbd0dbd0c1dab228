//! All-or-nothing marshaling of the SDR data model across a C ABI.
//!
//! Owned values from [`sdr_types`] are converted into flat `#[repr(C)]`
//! values (NUL-terminated strings, pointer-and-length arrays, parallel key
//! and value arrays) and back again. Every conversion into the flat form
//! either completes or releases everything it allocated and reports
//! [`AllocationFailure`]; no partially built value is ever returned.
//!
//! Flat values produced here are wrapped in [`Owned`], which releases them
//! on drop. [`Owned::into_raw`] hands a value to C, after which the matching
//! `sdr_*` release function in [`ffi::functions`] frees it.

pub mod alloc;
mod arg_info;
pub mod error;
pub mod ffi;
mod kwargs;
mod numeric;
pub mod owned;
mod text;

pub use alloc::{CountingHeap, Heap, RawAlloc};
pub use arg_info::{
    from_flat_arg_info, from_flat_arg_info_list, to_flat_arg_info, to_flat_arg_info_list,
};
pub use error::{AllocationFailure, MarshalError};
pub use kwargs::{
    from_flat_kwargs, from_flat_kwargs_list, kwargs_get, kwargs_set, to_flat_kwargs,
    to_flat_kwargs_list,
};
pub use numeric::{from_numeric_list, from_range_list, to_numeric_list, to_range_list};
pub use owned::{FlatArray, Owned, Release};
pub use text::{from_c_string, from_str_array, to_c_string, to_str_array};
