//! Alignment-aware element-wise transforms
//!
//! `lanewise` maps one or two input buffers into an output buffer, element by
//! element, using hardware vector instructions for the bulk of the work. The
//! buffers may start anywhere: each call walks a short scalar prologue until
//! the first input sits on the vector alignment boundary, runs whole vectors
//! with aligned loads, then finishes the remainder one element at a time.
//!
//! ```
//! use lanewise::{transform, AddValue};
//!
//! let input = vec![41.0_f32; 10];
//! let mut output = vec![0.0_f32; 10];
//! transform(&input[1..], &mut output[1..], AddValue::new(1.0));
//! assert!(output[1..].iter().all(|&x| x == 42.0));
//! ```

mod display;
mod partition;
mod simd;
mod transform;

pub use partition::{partition, partition_ptr, Alignment, Partition};
pub use simd::{lanes, stride_keeps_alignment, Element, Lanes, Pack, VECTOR_BYTES};
#[cfg(all(target_arch = "x86_64", not(feature = "portable")))]
pub use simd::{F32x4, F64x2};
pub use transform::{
    lanewise, transform, transform2, Access, Add, AddValue, BinaryOp, Lanewise, Mul, Plan, Scale,
    Sub, Transform, TransformError, UnaryOp,
};
