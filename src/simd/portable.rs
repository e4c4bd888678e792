use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

use super::Pack;

/// Array-backed pack of `N` lanes
///
/// Arithmetic is written as plain per-lane loops over a fixed-size array,
/// which LLVM turns into vector instructions for the target. Memory accesses
/// go through `[T; N]` reads and writes, the aligned variants only add a
/// debug check on the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(transparent)]
pub struct Lanes<T, const N: usize>(pub [T; N]);

impl<T: Copy, const N: usize> Lanes<T, N> {
    /// Wrap an array.
    #[inline(always)]
    pub const fn new(array: [T; N]) -> Self {
        Self(array)
    }

    /// Unwrap into the underlying array.
    #[inline(always)]
    pub const fn to_array(self) -> [T; N] {
        self.0
    }

    #[inline(always)]
    fn zip_with(mut self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        for (l, r) in self.0.iter_mut().zip(rhs.0) {
            *l = f(*l, r);
        }
        self
    }
}

impl<T: Copy, const N: usize> From<[T; N]> for Lanes<T, N> {
    #[inline(always)]
    fn from(array: [T; N]) -> Self {
        Self(array)
    }
}

impl<T: Copy, const N: usize> AsRef<[T]> for Lanes<T, N> {
    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

unsafe impl<T: Copy + Debug, const N: usize> Pack for Lanes<T, N> {
    type Scalar = T;
    const LANES: usize = N;
    const ALIGN: usize = (N * core::mem::size_of::<T>()).next_power_of_two();

    #[inline(always)]
    fn splat(value: T) -> Self {
        Self([value; N])
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const T) -> Self {
        debug_assert_eq!(ptr.addr() % Self::ALIGN, 0, "misaligned aligned load");
        // SAFETY: caller guarantees N readable scalars, and ALIGN is a
        //         multiple of align_of::<T>()
        Self(unsafe { ptr.cast::<[T; N]>().read() })
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const T) -> Self {
        // SAFETY: caller guarantees N readable scalars
        Self(unsafe { ptr.cast::<[T; N]>().read_unaligned() })
    }

    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut T) {
        debug_assert_eq!(ptr.addr() % Self::ALIGN, 0, "misaligned aligned store");
        // SAFETY: caller guarantees N writable scalars at sufficient alignment
        unsafe { ptr.cast::<[T; N]>().write(self.0) }
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, ptr: *mut T) {
        // SAFETY: caller guarantees N writable scalars
        unsafe { ptr.cast::<[T; N]>().write_unaligned(self.0) }
    }
}

macro_rules! lanes_binop {
    ($($trait:ident :: $method:ident),*) => {
        $(
            impl<T: Copy + $trait<Output = T>, const N: usize> $trait for Lanes<T, N> {
                type Output = Self;

                #[inline(always)]
                fn $method(self, rhs: Self) -> Self {
                    self.zip_with(rhs, T::$method)
                }
            }
        )*
    };
}

lanes_binop!(Add::add, Sub::sub, Mul::mul, Div::div);

impl<T: Copy + Neg<Output = T>, const N: usize> Neg for Lanes<T, N> {
    type Output = Self;

    #[inline(always)]
    fn neg(mut self) -> Self {
        for lane in &mut self.0 {
            *lane = -*lane;
        }
        self
    }
}
