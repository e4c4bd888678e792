//! Splitting a range into prologue, vector body and epilogue
//!
//! A range is processed in three phases: a scalar *prologue* that walks up to
//! the first address on the alignment boundary, a *body* of whole vectors
//! that can use aligned loads, and a scalar *epilogue* for what is left over
//! (always less than one vector).
//!
//! ```text
//!  first                aligned                                 last
//!    |--- prologue ---|--- body (k × lanes) ---|--- epilogue ---|
//! ```
//!
//! Only addresses are inspected here, no memory is ever read.

mod alignment;

pub use alignment::Alignment;

use serde::{Deserialize, Serialize};

/// Element counts of the three phases of a range
///
/// `prologue + body + epilogue` is the range length, `body` is a multiple of
/// the lane count the partition was computed for and `epilogue` is less than
/// that lane count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partition {
    /// Elements processed one by one before the first aligned address
    pub prologue: usize,
    /// Elements processed as whole vectors
    pub body: usize,
    /// Elements processed one by one after the last whole vector
    pub epilogue: usize,
}

impl Partition {
    /// Length of the partitioned range.
    #[inline]
    pub const fn len(&self) -> usize {
        self.prologue + self.body + self.epilogue
    }

    /// Whether the partitioned range is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of vectors in the body.
    #[inline]
    pub const fn vectors(&self, lanes: usize) -> usize {
        self.body / lanes
    }
}

/// Partition the range of `len` elements starting at `first`.
///
/// If `first` can never reach the boundary by whole elements (the byte gap is
/// not a multiple of the element size) or the boundary lies past the end of
/// the address space, the whole range goes to the prologue.
///
/// # Panics
///
/// If `lanes` is zero or `T` is zero-sized.
pub fn partition_ptr<T>(first: *const T, len: usize, lanes: usize, alignment: Alignment) -> Partition {
    assert!(lanes > 0, "a vector holds at least one lane");
    let size = core::mem::size_of::<T>();
    assert!(size > 0, "zero-sized elements cannot be partitioned");

    let addr = first.addr();
    let prologue = match alignment.align_up(addr) {
        Some(aligned) if (aligned - addr) % size == 0 => len.min((aligned - addr) / size),
        _ => len,
    };

    let remaining = len.saturating_sub(prologue);
    let body = remaining - remaining % lanes;

    Partition {
        prologue,
        body,
        epilogue: len - prologue - body,
    }
}

/// Partition `data` for vectors of `lanes` elements on `alignment`.
///
/// # Panics
///
/// See [`partition_ptr`].
#[inline]
pub fn partition<T>(data: &[T], lanes: usize, alignment: Alignment) -> Partition {
    partition_ptr(data.as_ptr(), data.len(), lanes, alignment)
}
