//! Mapping functions
//!
//! A mapping function has two call shapes: one for a single scalar, used by
//! the prologue and the epilogue, and one for a whole pack, used by the body.
//! Both must compute the same thing lane by lane. Nothing checks it, and if
//! they disagree the output depends on the buffer alignment.

use core::ops;

use crate::simd::{Element, Pack};

/// Element-wise mapping `T -> U`
pub trait UnaryOp<T: Element, U: Element = T> {
    /// Map one element.
    fn scalar(&self, x: T) -> U;

    /// Map every lane of a pack.
    fn vector(&self, x: T::Vector) -> U::Vector;
}

/// Element-wise mapping `(T1, T2) -> U`
pub trait BinaryOp<T1: Element, T2: Element = T1, U: Element = T1> {
    /// Map one pair of elements.
    fn scalar(&self, a: T1, b: T2) -> U;

    /// Map every pair of lanes of two packs.
    fn vector(&self, a: T1::Vector, b: T2::Vector) -> U::Vector;
}

impl<T: Element, U: Element, O: UnaryOp<T, U> + ?Sized> UnaryOp<T, U> for &O {
    #[inline(always)]
    fn scalar(&self, x: T) -> U {
        (**self).scalar(x)
    }

    #[inline(always)]
    fn vector(&self, x: T::Vector) -> U::Vector {
        (**self).vector(x)
    }
}

impl<T1: Element, T2: Element, U: Element, O: BinaryOp<T1, T2, U> + ?Sized> BinaryOp<T1, T2, U> for &O {
    #[inline(always)]
    fn scalar(&self, a: T1, b: T2) -> U {
        (**self).scalar(a, b)
    }

    #[inline(always)]
    fn vector(&self, a: T1::Vector, b: T2::Vector) -> U::Vector {
        (**self).vector(a, b)
    }
}

/// Pair of closures acting as a mapping function, see [`lanewise`]
#[derive(Clone, Copy, Debug)]
pub struct Lanewise<S, V> {
    scalar: S,
    vector: V,
}

/// Build a mapping function from its scalar and vector shapes.
///
/// ```
/// use lanewise::{lanewise, transform, Element};
///
/// type F32s = <f32 as Element>::Vector;
///
/// let input = [1.0_f32, 2.0, 3.0];
/// let mut output = [0.0_f32; 3];
/// let square = lanewise(|x: f32| x * x, |x: F32s| x * x);
/// transform(&input, &mut output, square);
/// assert_eq!(output, [1.0, 4.0, 9.0]);
/// ```
pub fn lanewise<S, V>(scalar: S, vector: V) -> Lanewise<S, V> {
    Lanewise { scalar, vector }
}

impl<T, U, S, V> UnaryOp<T, U> for Lanewise<S, V>
where
    T: Element,
    U: Element,
    S: Fn(T) -> U,
    V: Fn(T::Vector) -> U::Vector,
{
    #[inline(always)]
    fn scalar(&self, x: T) -> U {
        (self.scalar)(x)
    }

    #[inline(always)]
    fn vector(&self, x: T::Vector) -> U::Vector {
        (self.vector)(x)
    }
}

impl<T1, T2, U, S, V> BinaryOp<T1, T2, U> for Lanewise<S, V>
where
    T1: Element,
    T2: Element,
    U: Element,
    S: Fn(T1, T2) -> U,
    V: Fn(T1::Vector, T2::Vector) -> U::Vector,
{
    #[inline(always)]
    fn scalar(&self, a: T1, b: T2) -> U {
        (self.scalar)(a, b)
    }

    #[inline(always)]
    fn vector(&self, a: T1::Vector, b: T2::Vector) -> U::Vector {
        (self.vector)(a, b)
    }
}

/// Adds a constant to every element
#[derive(Clone, Copy, Debug)]
pub struct AddValue<T: Element> {
    value: T,
    splat: T::Vector,
}

impl<T: Element> AddValue<T> {
    /// Add `value`.
    pub fn new(value: T) -> Self {
        Self { value, splat: T::Vector::splat(value) }
    }
}

impl<T> UnaryOp<T> for AddValue<T>
where
    T: Element,
    T::Vector: ops::Add<Output = T::Vector>,
{
    #[inline(always)]
    fn scalar(&self, x: T) -> T {
        x + self.value
    }

    #[inline(always)]
    fn vector(&self, x: T::Vector) -> T::Vector {
        x + self.splat
    }
}

/// Multiplies every element by a constant
#[derive(Clone, Copy, Debug)]
pub struct Scale<T: Element> {
    factor: T,
    splat: T::Vector,
}

impl<T: Element> Scale<T> {
    /// Multiply by `factor`.
    pub fn new(factor: T) -> Self {
        Self { factor, splat: T::Vector::splat(factor) }
    }
}

impl<T> UnaryOp<T> for Scale<T>
where
    T: Element,
    T::Vector: ops::Mul<Output = T::Vector>,
{
    #[inline(always)]
    fn scalar(&self, x: T) -> T {
        x * self.factor
    }

    #[inline(always)]
    fn vector(&self, x: T::Vector) -> T::Vector {
        x * self.splat
    }
}

macro_rules! binary_arith {
    ($($(#[$doc:meta])* $name:ident => $trait:ident :: $method:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $name;

            impl<T> BinaryOp<T> for $name
            where
                T: Element,
                T::Vector: ops::$trait<Output = T::Vector>,
            {
                #[inline(always)]
                fn scalar(&self, a: T, b: T) -> T {
                    ops::$trait::$method(a, b)
                }

                #[inline(always)]
                fn vector(&self, a: T::Vector, b: T::Vector) -> T::Vector {
                    ops::$trait::$method(a, b)
                }
            }
        )*
    };
}

binary_arith!(
    /// Element-wise sum
    Add => Add::add,
    /// Element-wise difference
    Sub => Sub::sub,
    /// Element-wise product
    Mul => Mul::mul,
);
