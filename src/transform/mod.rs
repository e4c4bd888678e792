//! Element-wise transforms over contiguous buffers
//!
//! Every call runs in three phases, computed once from the first input:
//!
//! 1. a scalar prologue up to the first address on the alignment boundary,
//! 2. a vector body of whole packs, read from the first input with aligned
//!    loads, written with aligned or unaligned stores depending on where
//!    the output lands,
//! 3. a scalar epilogue for the leftover elements.
//!
//! Any phase may be empty. Exactly one mapping is applied per element, in
//! order, and no memory is allocated.
//!
//! # Examples
//!
//! ```
//! use lanewise::{transform, transform2, Add, AddValue};
//!
//! let input = [41_i32; 10];
//! let mut output = [0_i32; 10];
//! transform(&input, &mut output, AddValue::new(1));
//! assert_eq!(output, [42; 10]);
//!
//! let ones = [1_i32; 10];
//! let mut sums = [0_i32; 10];
//! transform2(&input, &ones, &mut sums, Add);
//! assert_eq!(sums, [42; 10]);
//! ```

mod binary;
mod error;
mod ops;
mod plan;
mod unary;

#[cfg(test)]
mod testing;

pub use error::TransformError;
pub use ops::{lanewise, Add, AddValue, BinaryOp, Lanewise, Mul, Scale, Sub, UnaryOp};
pub use plan::{Access, Plan};

use serde::{Deserialize, Serialize};

use crate::partition::Alignment;
use crate::simd::{Element, Pack};

/// Transform configuration
///
/// The only knob is the alignment boundary the prologue walks up to. It
/// defaults to [`Alignment::PLATFORM`] and must be at least as strict as the
/// aligned accesses of every pack involved in a call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    alignment: Alignment,
}

impl Transform {
    /// Configuration for the compilation target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom alignment boundary.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Configured alignment boundary.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Plan of a unary transform from `input` into `output`.
    pub fn plan_unary<T: Element, U>(&self, input: &[T], output: &[U]) -> Plan {
        Plan::unary(input, output.as_ptr(), <T::Vector as Pack>::LANES, self.alignment)
    }

    /// Plan of a binary transform from `input1` and `input2` into `output`.
    pub fn plan_binary<T1: Element, T2, U>(&self, input1: &[T1], input2: &[T2], output: &[U]) -> Plan {
        Plan::binary(input1, input2.as_ptr(), output.as_ptr(), <T1::Vector as Pack>::LANES, self.alignment)
    }

    fn check_alignment<V: Pack>(&self) -> Result<(), TransformError> {
        let required = Alignment::of::<V>();
        if self.alignment.implies(required) {
            Ok(())
        } else {
            Err(TransformError::InsufficientAlignment {
                configured: self.alignment.get(),
                required: required.get(),
            })
        }
    }
}

/// Map `input` into the front of `output` with `op`, on the target's
/// preferred alignment.
///
/// Returns the part of `output` that was not written.
///
/// # Panics
///
/// If `output` is shorter than `input`.
pub fn transform<'o, T, U, O>(input: &[T], output: &'o mut [U], op: O) -> &'o mut [U]
where
    T: Element,
    U: Element,
    O: UnaryOp<T, U>,
{
    Transform::default().unary(input, output, op)
}

/// Map `input1` and the front of `input2` pairwise into the front of
/// `output` with `op`, on the target's preferred alignment.
///
/// Returns the part of `output` that was not written.
///
/// # Panics
///
/// If `input2` or `output` is shorter than `input1`.
pub fn transform2<'o, T1, T2, U, O>(input1: &[T1], input2: &[T2], output: &'o mut [U], op: O) -> &'o mut [U]
where
    T1: Element,
    T2: Element,
    U: Element,
    O: BinaryOp<T1, T2, U>,
{
    Transform::default().binary(input1, input2, output, op)
}

/// Apply the scalar shape of `op` element by element.
#[inline]
fn scalar_unary<T: Element, U: Element>(input: &[T], output: &mut [U], op: &impl UnaryOp<T, U>) {
    for (dst, &src) in output.iter_mut().zip(input) {
        *dst = op.scalar(src);
    }
}

/// Apply the scalar shape of `op` pair by pair.
#[inline]
fn scalar_binary<T1: Element, T2: Element, U: Element>(
    input1: &[T1],
    input2: &[T2],
    output: &mut [U],
    op: &impl BinaryOp<T1, T2, U>,
) {
    for ((dst, &a), &b) in output.iter_mut().zip(input1).zip(input2) {
        *dst = op.scalar(a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_platform_alignment() {
        assert_eq!(Transform::new().alignment(), Alignment::PLATFORM);
    }

    #[test]
    fn builder_overrides_alignment() {
        let a = Alignment::new(128).unwrap();
        assert_eq!(Transform::new().with_alignment(a).alignment(), a);
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = Transform::new().with_alignment(Alignment::new(64).unwrap());
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"alignment":64}"#);
        assert_eq!(serde_json::from_str::<Transform>(&json).unwrap(), config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        assert_eq!(serde_json::from_str::<Transform>("{}").unwrap(), Transform::default());
        assert!(serde_json::from_str::<Transform>(r#"{"alignment":24}"#).is_err());
    }

    #[test]
    fn loose_alignment_is_reported() {
        let t = Transform::new().with_alignment(Alignment::new(4).unwrap());
        let err = t.check_alignment::<<f32 as Element>::Vector>().unwrap_err();
        assert_eq!(
            err,
            TransformError::InsufficientAlignment { configured: 4, required: Alignment::PLATFORM.get() }
        );
    }
}
