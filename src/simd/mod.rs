//! Hardware vector values
//!
//! The engines only ever talk to vectors through the [`Pack`] trait: build one
//! from a scalar, load it from memory (aligned or not), store it back (aligned
//! or not) and combine it with the usual arithmetic operators. Which concrete
//! pack an element type maps to is decided by [`Element::Vector`], once per
//! target, and never at runtime.
//!
//! Two backends are provided:
//!
//! - [`Lanes`], an array-backed pack that works everywhere and leaves the
//!   actual instruction selection to LLVM.
//! - [`F32x4`] and [`F64x2`] on x86_64, which call the SSE intrinsics
//!   directly. They are only used when the vector size is 16 bytes and the
//!   `portable` feature is off.

mod portable;
#[cfg(all(target_arch = "x86_64", not(feature = "portable")))]
mod sse;

use core::fmt::Debug;
use num_traits::Num;

pub use portable::Lanes;
#[cfg(all(target_arch = "x86_64", not(feature = "portable")))]
pub use sse::{F32x4, F64x2};

/// Size in bytes of one native vector register on the compilation target.
#[cfg(target_feature = "avx512f")]
pub const VECTOR_BYTES: usize = 64;

/// Size in bytes of one native vector register on the compilation target.
#[cfg(all(target_feature = "avx", not(target_feature = "avx512f")))]
pub const VECTOR_BYTES: usize = 32;

/// Size in bytes of one native vector register on the compilation target.
#[cfg(not(target_feature = "avx"))]
pub const VECTOR_BYTES: usize = 16;

const _: () = assert!(VECTOR_BYTES.is_power_of_two());

/// A vector of `LANES` scalars that fits a hardware register
///
/// # Safety
///
/// Engines rely on `LANES` being the exact number of scalars read by the
/// loads and written by the stores, and on `ALIGN` being a power of two that
/// is sufficient for the aligned variants.
///
/// Engines walk memory in strides of `LANES` scalars, so packs used with them
/// must also have a stride of `LANES * size_of::<Scalar>()` bytes that is a
/// multiple of `ALIGN`. This is checked at compile time for every
/// instantiation, see [`stride_keeps_alignment`].
pub unsafe trait Pack: Copy + Debug {
    /// Scalar type held in each lane
    type Scalar: Copy;

    /// Number of lanes
    const LANES: usize;

    /// Alignment in bytes expected by [`load_aligned`](Pack::load_aligned)
    /// and [`store_aligned`](Pack::store_aligned)
    const ALIGN: usize;

    /// Broadcast `value` into every lane.
    fn splat(value: Self::Scalar) -> Self;

    /// Read `LANES` scalars starting at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `LANES` scalars and aligned to `ALIGN`.
    unsafe fn load_aligned(ptr: *const Self::Scalar) -> Self;

    /// Read `LANES` scalars starting at `ptr`, whatever its alignment.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `LANES` scalars.
    unsafe fn load_unaligned(ptr: *const Self::Scalar) -> Self;

    /// Write every lane starting at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing `LANES` scalars and aligned to `ALIGN`.
    unsafe fn store_aligned(self, ptr: *mut Self::Scalar);

    /// Write every lane starting at `ptr`, whatever its alignment.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing `LANES` scalars.
    unsafe fn store_unaligned(self, ptr: *mut Self::Scalar);

    /// Load the first `LANES` scalars of `src`.
    ///
    /// # Panics
    ///
    /// If `src` holds less than `LANES` scalars.
    #[inline(always)]
    fn from_slice(src: &[Self::Scalar]) -> Self {
        assert!(src.len() >= Self::LANES, "slice too short for a full pack");
        // SAFETY: length checked above, unaligned load has no other requirement
        unsafe { Self::load_unaligned(src.as_ptr()) }
    }

    /// Store every lane into the first `LANES` slots of `dst`.
    ///
    /// # Panics
    ///
    /// If `dst` holds less than `LANES` scalars.
    #[inline(always)]
    fn write_to_slice(self, dst: &mut [Self::Scalar]) {
        assert!(dst.len() >= Self::LANES, "slice too short for a full pack");
        // SAFETY: length checked above, unaligned store has no other requirement
        unsafe { self.store_unaligned(dst.as_mut_ptr()) }
    }
}

/// Scalar type that has a native vector representation
pub trait Element: Num + Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// Native pack for this element type on the compilation target
    type Vector: Pack<Scalar = Self>;
}

macro_rules! portable_elements {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                type Vector = Lanes<$t, { VECTOR_BYTES / core::mem::size_of::<$t>() }>;
            }
        )*
    };
}

portable_elements!(i8, i16, i32, i64, u8, u16, u32, u64);

#[cfg(not(all(target_arch = "x86_64", not(feature = "portable"), not(target_feature = "avx"))))]
portable_elements!(f32, f64);

#[cfg(all(target_arch = "x86_64", not(feature = "portable"), not(target_feature = "avx")))]
impl Element for f32 {
    type Vector = F32x4;
}

#[cfg(all(target_arch = "x86_64", not(feature = "portable"), not(target_feature = "avx")))]
impl Element for f64 {
    type Vector = F64x2;
}

/// Number of lanes of the native pack of `T`.
#[inline(always)]
pub const fn lanes<T: Element>() -> usize {
    <T::Vector as Pack>::LANES
}

/// Whether consecutive packs of `V` laid end to end all stay on `V::ALIGN`
/// when the first one does.
#[inline(always)]
pub const fn stride_keeps_alignment<V: Pack>() -> bool {
    (V::LANES * core::mem::size_of::<V::Scalar>()) % V::ALIGN == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn lane_counts_fill_one_register() {
        assert_eq!(lanes::<u8>(), VECTOR_BYTES);
        assert_eq!(lanes::<i16>(), VECTOR_BYTES / 2);
        assert_eq!(lanes::<i32>(), VECTOR_BYTES / 4);
        assert_eq!(lanes::<f32>(), VECTOR_BYTES / 4);
        assert_eq!(lanes::<u64>(), VECTOR_BYTES / 8);
        assert_eq!(lanes::<f64>(), VECTOR_BYTES / 8);
    }

    #[test]
    fn same_size_types_share_a_width() {
        assert_eq!(lanes::<i32>(), lanes::<f32>());
        assert_eq!(lanes::<u64>(), lanes::<f64>());
        assert_eq!(lanes::<i8>(), lanes::<u8>());
    }

    #[test]
    fn native_packs_align_to_their_size() {
        assert_eq!(<<f32 as Element>::Vector as Pack>::ALIGN, VECTOR_BYTES);
        assert_eq!(<<f64 as Element>::Vector as Pack>::ALIGN, VECTOR_BYTES);
        assert_eq!(<<u16 as Element>::Vector as Pack>::ALIGN, VECTOR_BYTES);
    }

    #[test]
    fn slice_helpers_roundtrip_native_f32() {
        let src: Vec<f32> = (0..lanes::<f32>()).map(|i| i as f32 * 0.5).collect();
        let pack = <f32 as Element>::Vector::from_slice(&src);
        let mut dst = vec![0.0_f32; src.len() + 1];
        pack.write_to_slice(&mut dst);

        for (a, b) in src.iter().zip(&dst) {
            assert_abs_diff_eq!(*a, *b);
        }
        assert_abs_diff_eq!(dst[src.len()], 0.0_f32);
    }

    #[test]
    fn native_packs_stride_on_their_alignment() {
        macro_rules! check {
            ($($t:ty),*) => {
                $(assert!(stride_keeps_alignment::<<$t as Element>::Vector>(), stringify!($t));)*
            };
        }
        check!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);
    }

    #[test]
    fn odd_lane_counts_break_the_stride() {
        assert!(!stride_keeps_alignment::<Lanes<i32, 3>>());
        assert!(!stride_keeps_alignment::<Lanes<u8, 5>>());
        assert!(stride_keeps_alignment::<Lanes<i32, 4>>());
        assert!(stride_keeps_alignment::<Lanes<u16, 1>>());
    }

    #[test]
    #[should_panic(expected = "slice too short")]
    fn from_slice_rejects_short_input() {
        let _ = <i32 as Element>::Vector::from_slice(&[1, 2]);
    }
}
