//! Ownership of flat values.
//!
//! A flat value is plain data full of raw pointers. [`Owned`] ties one to the
//! allocator it came from and frees it exactly once. Composite conversions
//! build inside an `Owned` (or an [`ArrayBuilder`]) so that an early return
//! releases whatever was already filled in.

use std::ffi::{CStr, c_char};
use std::mem::ManuallyDrop;
use std::ops::Deref;
use std::ptr::{self, NonNull};

use crate::alloc::{Heap, RawAlloc, allocate_array, c_string_layout, deallocate_array};
use crate::error::AllocationFailure;
use crate::ffi::types::SdrRange;

/// A flat value that can free what it points to.
pub trait Release {
    /// Free every allocation reachable from `self` and reset it to its empty
    /// state (null pointers, zero lengths). Null pointers are skipped, so a
    /// partially built value releases cleanly.
    ///
    /// # Safety
    ///
    /// Every allocation reachable from `self` must have come from `alloc` and
    /// must not be referenced from anywhere else.
    unsafe fn release_in<A: RawAlloc>(&mut self, alloc: &A);
}

impl Release for *mut c_char {
    unsafe fn release_in<A: RawAlloc>(&mut self, alloc: &A) {
        let Some(ptr) = NonNull::new(*self) else {
            return;
        };
        // Safety: strings are written NUL-terminated and never shortened.
        let len = unsafe { CStr::from_ptr(ptr.as_ptr()) }.count_bytes();
        if let Ok(layout) = c_string_layout(len) {
            // Safety: the layout matches the one used by `to_c_string`.
            unsafe { alloc.deallocate(ptr.cast(), layout) };
        }
        *self = ptr::null_mut();
    }
}

macro_rules! impl_plain_release {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Release for $ty {
                #[inline]
                unsafe fn release_in<A: RawAlloc>(&mut self, _alloc: &A) {}
            }
        )*
    };
}

impl_plain_release!(f64, u32, SdrRange);

/// Release `len` elements at `*ptr`, then the array itself, and null the
/// pointer.
///
/// # Safety
///
/// `*ptr` must be null or an array of `len` elements from `alloc`.
pub(crate) unsafe fn release_array<T: Release, A: RawAlloc>(
    ptr: &mut *mut T,
    len: usize,
    alloc: &A,
) {
    let Some(base) = NonNull::new(*ptr) else {
        return;
    };
    for i in 0..len {
        // Safety: `i < len` and the array holds `len` initialised elements.
        unsafe { (*base.as_ptr().add(i)).release_in(alloc) };
    }
    // Safety: allocated by `allocate_array::<T>(len)`.
    unsafe { deallocate_array(base, len, alloc) };
    *ptr = ptr::null_mut();
}

// ─── FlatArray ───────────────────────────────────────────────────────

/// A pointer and its element count: the Rust view of a `T *, size_t` pair.
///
/// The pointer is never null for arrays produced by this crate, even when
/// `len` is zero.
#[derive(Debug)]
pub struct FlatArray<T> {
    ptr: *mut T,
    len: usize,
}

impl<T> FlatArray<T> {
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow the elements.
    pub fn as_slice(&self) -> &[T] {
        match NonNull::new(self.ptr) {
            // Safety: non-null arrays hold `len` initialised elements.
            Some(ptr) => unsafe { std::slice::from_raw_parts(ptr.as_ptr(), self.len) },
            None => &[],
        }
    }

    /// Split into the raw pointer and length handed to C.
    pub fn into_raw_parts(self) -> (*mut T, usize) {
        (self.ptr, self.len)
    }

    /// Reassemble an array from its raw parts.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to `len` initialised elements.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        Self { ptr, len }
    }
}

impl<T: Release> Release for FlatArray<T> {
    unsafe fn release_in<A: RawAlloc>(&mut self, alloc: &A) {
        // Safety: forwarded contract.
        unsafe { release_array(&mut self.ptr, self.len, alloc) };
        self.len = 0;
    }
}

// ─── Owned ───────────────────────────────────────────────────────────

/// Exclusive owner of a flat value.
///
/// Dropping an `Owned` releases the value through the allocator it was built
/// with. [`into_raw`](Self::into_raw) gives the value away instead, after
/// which the receiver is responsible for releasing it exactly once.
#[derive(derive_more::Debug)]
pub struct Owned<T: Release, A: RawAlloc = Heap> {
    value: T,
    #[debug(skip)]
    alloc: A,
}

impl<T: Release, A: RawAlloc> Owned<T, A> {
    /// Take ownership of a flat value.
    ///
    /// # Safety
    ///
    /// Every allocation reachable from `value` must come from `alloc` and be
    /// referenced nowhere else.
    pub unsafe fn from_raw(value: T, alloc: A) -> Self {
        Self { value, alloc }
    }

    /// Give the value away without releasing it.
    pub fn into_raw(self) -> T {
        let this = ManuallyDrop::new(self);
        // Safety: `this` is never dropped, so each field is read exactly once.
        let (value, alloc) = unsafe { (ptr::read(&this.value), ptr::read(&this.alloc)) };
        drop(alloc);
        value
    }

    /// Release the value now.
    pub fn release(self) {
        drop(self);
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    pub(crate) fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Release + Default, A: RawAlloc> Owned<T, A> {
    /// An empty value, to be filled in place.
    pub(crate) fn empty(alloc: A) -> Self {
        Self {
            value: T::default(),
            alloc,
        }
    }
}

impl<T: Release, A: RawAlloc> Deref for Owned<T, A> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Release, A: RawAlloc> Drop for Owned<T, A> {
    fn drop(&mut self) {
        // Safety: upheld by construction (`from_raw` contract or built here).
        unsafe { self.value.release_in(&self.alloc) };
    }
}

// Safety: the value is exclusively owned; nothing else can reach its
// allocations, so moving it to another thread is sound when the allocator can
// move too.
unsafe impl<T: Release, A: RawAlloc + Send> Send for Owned<T, A> {}
// Safety: shared access only reads through the pointers.
unsafe impl<T: Release, A: RawAlloc + Sync> Sync for Owned<T, A> {}

// ─── ArrayBuilder ────────────────────────────────────────────────────

/// Scoped acquisition of a flat array that is filled one slot at a time.
///
/// If dropped before [`finish`](Self::finish), the slots filled so far and
/// the array itself are released.
pub(crate) struct ArrayBuilder<T: Release, A: RawAlloc + Copy> {
    ptr: NonNull<T>,
    capacity: usize,
    filled: usize,
    alloc: A,
}

impl<T: Release, A: RawAlloc + Copy> ArrayBuilder<T, A> {
    /// Allocate a zeroed array of `capacity` slots.
    pub(crate) fn new(capacity: usize, alloc: A) -> Result<Self, AllocationFailure> {
        Ok(Self {
            ptr: allocate_array(capacity, &alloc)?,
            capacity,
            filled: 0,
            alloc,
        })
    }

    /// Store the next element. The builder takes over its release.
    pub(crate) fn push(&mut self, value: T) {
        assert!(self.filled < self.capacity, "array builder overflow");
        // Safety: `filled < capacity`; the slot holds zeroed memory that owns
        // nothing, so overwriting without dropping is fine.
        unsafe { self.ptr.as_ptr().add(self.filled).write(value) };
        self.filled += 1;
    }

    /// Hand over the completed array.
    pub(crate) fn finish(self) -> Owned<FlatArray<T>, A> {
        debug_assert_eq!(self.filled, self.capacity);
        let this = ManuallyDrop::new(self);
        let array = FlatArray {
            ptr: this.ptr.as_ptr(),
            len: this.capacity,
        };
        Owned {
            value: array,
            alloc: this.alloc,
        }
    }
}

impl<T: Release, A: RawAlloc + Copy> Drop for ArrayBuilder<T, A> {
    fn drop(&mut self) {
        if self.filled < self.capacity {
            tracing::debug!(
                filled = self.filled,
                capacity = self.capacity,
                "rolling back partially built array"
            );
        }
        let base = self.ptr.as_ptr();
        for i in 0..self.filled {
            // Safety: slots below `filled` were written by `push`.
            unsafe { (*base.add(i)).release_in(&self.alloc) };
        }
        // Safety: allocated in `new` with the same capacity.
        unsafe { deallocate_array(self.ptr, self.capacity, &self.alloc) };
    }
}
