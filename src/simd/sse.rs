//! SSE packs for x86_64
//!
//! SSE and SSE2 are part of the x86_64 baseline, so none of these need
//! runtime feature detection.

use core::arch::x86_64::{
    __m128, __m128d, _mm_add_pd, _mm_add_ps, _mm_div_pd, _mm_div_ps, _mm_load_pd, _mm_load_ps,
    _mm_loadu_pd, _mm_loadu_ps, _mm_mul_pd, _mm_mul_ps, _mm_set1_pd, _mm_set1_ps, _mm_store_pd,
    _mm_store_ps, _mm_storeu_pd, _mm_storeu_ps, _mm_sub_pd, _mm_sub_ps, _mm_xor_pd, _mm_xor_ps,
};
use core::ops::{Add, Div, Mul, Neg, Sub};

use super::Pack;

/// Four `f32` lanes in an `xmm` register
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct F32x4(__m128);

/// Two `f64` lanes in an `xmm` register
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct F64x2(__m128d);

macro_rules! sse_pack {
    (
        $pack:ident, $scalar:ty, $lanes:expr,
        set1: $set1:ident,
        load: $load:ident, loadu: $loadu:ident,
        store: $store:ident, storeu: $storeu:ident,
        add: $add:ident, sub: $sub:ident, mul: $mul:ident, div: $div:ident,
        xor: $xor:ident
    ) => {
        unsafe impl Pack for $pack {
            type Scalar = $scalar;
            const LANES: usize = $lanes;
            const ALIGN: usize = 16;

            #[inline(always)]
            fn splat(value: $scalar) -> Self {
                // SAFETY: SSE2 is part of the x86_64 baseline
                Self(unsafe { $set1(value) })
            }

            #[inline(always)]
            unsafe fn load_aligned(ptr: *const $scalar) -> Self {
                // SAFETY: caller guarantees 16 readable bytes at a 16-byte boundary
                Self(unsafe { $load(ptr) })
            }

            #[inline(always)]
            unsafe fn load_unaligned(ptr: *const $scalar) -> Self {
                // SAFETY: caller guarantees 16 readable bytes
                Self(unsafe { $loadu(ptr) })
            }

            #[inline(always)]
            unsafe fn store_aligned(self, ptr: *mut $scalar) {
                // SAFETY: caller guarantees 16 writable bytes at a 16-byte boundary
                unsafe { $store(ptr, self.0) }
            }

            #[inline(always)]
            unsafe fn store_unaligned(self, ptr: *mut $scalar) {
                // SAFETY: caller guarantees 16 writable bytes
                unsafe { $storeu(ptr, self.0) }
            }
        }

        impl Add for $pack {
            type Output = Self;

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                // SAFETY: register-only intrinsic from the SSE2 baseline
                Self(unsafe { $add(self.0, rhs.0) })
            }
        }

        impl Sub for $pack {
            type Output = Self;

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                // SAFETY: register-only intrinsic from the SSE2 baseline
                Self(unsafe { $sub(self.0, rhs.0) })
            }
        }

        impl Mul for $pack {
            type Output = Self;

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                // SAFETY: register-only intrinsic from the SSE2 baseline
                Self(unsafe { $mul(self.0, rhs.0) })
            }
        }

        impl Div for $pack {
            type Output = Self;

            #[inline(always)]
            fn div(self, rhs: Self) -> Self {
                // SAFETY: register-only intrinsic from the SSE2 baseline
                Self(unsafe { $div(self.0, rhs.0) })
            }
        }

        impl Neg for $pack {
            type Output = Self;

            // Flips the sign bit only, like scalar negation
            #[inline(always)]
            fn neg(self) -> Self {
                // SAFETY: register-only intrinsics from the SSE2 baseline
                Self(unsafe { $xor(self.0, $set1(-0.0)) })
            }
        }
    };
}

sse_pack!(
    F32x4, f32, 4,
    set1: _mm_set1_ps,
    load: _mm_load_ps, loadu: _mm_loadu_ps,
    store: _mm_store_ps, storeu: _mm_storeu_ps,
    add: _mm_add_ps, sub: _mm_sub_ps, mul: _mm_mul_ps, div: _mm_div_ps,
    xor: _mm_xor_ps
);

sse_pack!(
    F64x2, f64, 2,
    set1: _mm_set1_pd,
    load: _mm_load_pd, loadu: _mm_loadu_pd,
    store: _mm_store_pd, storeu: _mm_storeu_pd,
    add: _mm_add_pd, sub: _mm_sub_pd, mul: _mm_mul_pd, div: _mm_div_pd,
    xor: _mm_xor_pd
);
