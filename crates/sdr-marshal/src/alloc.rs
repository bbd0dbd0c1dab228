//! Allocation seam for flat values.
//!
//! Every flat value is carved out of a [`RawAlloc`]. Production code uses
//! [`Heap`]; tests use [`CountingHeap`] to observe leaks and to force a
//! failure at a chosen allocation step.

use std::alloc::{self, Layout};
use std::ffi::c_char;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::AllocationFailure;

/// A source of zero-initialised raw memory.
///
/// # Safety
///
/// Implementors must return memory that is valid for `layout`, zero-filled
/// and not aliased. `deallocate` is only ever called with a pointer obtained
/// from `allocate_zeroed` on the same allocator, with the same layout.
pub unsafe trait RawAlloc {
    /// Allocate `layout.size()` zeroed bytes.
    fn allocate_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocationFailure>;

    /// Return memory obtained from [`allocate_zeroed`](Self::allocate_zeroed).
    ///
    /// # Safety
    ///
    /// `ptr` must come from this allocator with exactly `layout`, and must not
    /// be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

unsafe impl<A: RawAlloc + ?Sized> RawAlloc for &A {
    #[inline]
    fn allocate_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocationFailure> {
        (**self).allocate_zeroed(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // Safety: forwarded contract.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

// ─── Heap ────────────────────────────────────────────────────────────

/// The process allocator. This is what values handed to C are built with,
/// and what the `sdr_*` release functions free with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heap;

unsafe impl RawAlloc for Heap {
    fn allocate_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocationFailure> {
        if layout.size() == 0 {
            return Err(AllocationFailure);
        }
        // Safety: the layout has a non-zero size.
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        NonNull::new(ptr).ok_or(AllocationFailure)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // Safety: the caller guarantees `ptr` was allocated here with `layout`.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

// ─── CountingHeap ────────────────────────────────────────────────────

/// [`Heap`] wrapper that counts outstanding allocations and can inject a
/// failure at a given step.
///
/// Steps are numbered from zero in the order allocation is attempted. A
/// conversion that succeeds against `CountingHeap::new()` with
/// `attempts() == k` can be re-run with `failing_at(i)` for every `i < k`
/// to exercise each rollback path.
#[derive(Debug, Default)]
pub struct CountingHeap {
    attempts: AtomicUsize,
    live: AtomicUsize,
    live_bytes: AtomicUsize,
    fail_at: Option<usize>,
}

impl CountingHeap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A heap whose `step`-th allocation attempt fails.
    pub fn failing_at(step: usize) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::default()
        }
    }

    /// Number of allocation attempts so far, failed ones included.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Number of allocations not yet returned.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }

    /// Bytes held by allocations not yet returned.
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.load(Ordering::Relaxed)
    }
}

unsafe impl RawAlloc for CountingHeap {
    fn allocate_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocationFailure> {
        let step = self.attempts.fetch_add(1, Ordering::Relaxed);
        if self.fail_at == Some(step) {
            return Err(AllocationFailure);
        }
        let ptr = Heap.allocate_zeroed(layout)?;
        self.live.fetch_add(1, Ordering::Relaxed);
        self.live_bytes.fetch_add(layout.size(), Ordering::Relaxed);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live.fetch_sub(1, Ordering::Relaxed);
        self.live_bytes.fetch_sub(layout.size(), Ordering::Relaxed);
        // Safety: forwarded contract; every pointer here came from `Heap`.
        unsafe { Heap.deallocate(ptr, layout) }
    }
}

// ─── Layouts ─────────────────────────────────────────────────────────

/// Layout for an array of `len` elements.
///
/// Always reserves at least one slot so that empty arrays are real,
/// non-null allocations that release like any other. Overflow is reported
/// as an allocation failure.
pub(crate) fn array_layout<T>(len: usize) -> Result<Layout, AllocationFailure> {
    Layout::array::<T>(len.max(1)).map_err(|_| AllocationFailure)
}

/// Layout for a NUL-terminated string holding `len` bytes of text.
pub(crate) fn c_string_layout(len: usize) -> Result<Layout, AllocationFailure> {
    let size = len.checked_add(1).ok_or(AllocationFailure)?;
    Layout::array::<c_char>(size).map_err(|_| AllocationFailure)
}

/// Allocate a zeroed array of `len` elements.
pub(crate) fn allocate_array<T, A: RawAlloc>(
    len: usize,
    alloc: &A,
) -> Result<NonNull<T>, AllocationFailure> {
    let layout = array_layout::<T>(len)?;
    Ok(alloc.allocate_zeroed(layout)?.cast())
}

/// Free an array of `len` elements without touching its contents.
///
/// # Safety
///
/// `ptr` must come from [`allocate_array`] with the same `len` and `alloc`.
pub(crate) unsafe fn deallocate_array<T, A: RawAlloc>(ptr: NonNull<T>, len: usize, alloc: &A) {
    if let Ok(layout) = array_layout::<T>(len) {
        // Safety: same layout as the allocation, per the caller contract.
        unsafe { alloc.deallocate(ptr.cast(), layout) }
    }
}
