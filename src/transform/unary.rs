use crate::partition::Partition;
use crate::simd::{stride_keeps_alignment, Element, Pack};

use super::{scalar_unary, Access, Plan, Transform, TransformError, UnaryOp};

impl Transform {
    /// Map `input` into the front of `output` with `op`.
    ///
    /// Returns the part of `output` that was not written.
    ///
    /// # Panics
    ///
    /// On any of the conditions [`try_unary`](Transform::try_unary) reports.
    pub fn unary<'o, T, U, O>(&self, input: &[T], output: &'o mut [U], op: O) -> &'o mut [U]
    where
        T: Element,
        U: Element,
        O: UnaryOp<T, U>,
    {
        match self.try_unary(input, output, op) {
            Ok(rest) => rest,
            Err(e) => panic!("{e}"),
        }
    }

    /// Map `input` into the front of `output` with `op`.
    ///
    /// Returns the part of `output` that was not written.
    ///
    /// # Errors
    ///
    /// - [`TransformError::OutputTooShort`] if `output` is shorter than `input`
    /// - [`TransformError::InsufficientAlignment`] if the configured boundary
    ///   is looser than the aligned accesses of `T` or `U` need
    pub fn try_unary<'o, T, U, O>(&self, input: &[T], output: &'o mut [U], op: O) -> Result<&'o mut [U], TransformError>
    where
        T: Element,
        U: Element,
        O: UnaryOp<T, U>,
    {
        const {
            assert!(
                <T::Vector as Pack>::LANES == <U::Vector as Pack>::LANES,
                "input and output packs must have the same number of lanes"
            );
            assert!(
                stride_keeps_alignment::<T::Vector>() && stride_keeps_alignment::<U::Vector>(),
                "pack stride must be a multiple of the pack alignment"
            );
        }

        let len = input.len();
        if output.len() < len {
            return Err(TransformError::OutputTooShort { needed: len, available: output.len() });
        }
        self.check_alignment::<T::Vector>()?;
        self.check_alignment::<U::Vector>()?;

        let lanes = <T::Vector as Pack>::LANES;
        let plan = Plan::unary(input, output.as_ptr(), lanes, self.alignment);
        let Partition { prologue, body, epilogue } = plan.partition;
        tracing::trace!(len, prologue, body, epilogue, access = ?plan.access, "unary transform");

        let (written, rest) = output.split_at_mut(len);
        let (head_in, tail_in) = input.split_at(prologue);
        let (body_in, tail_in) = tail_in.split_at(body);
        let (head_out, tail_out) = written.split_at_mut(prologue);
        let (body_out, tail_out) = tail_out.split_at_mut(body);

        scalar_unary(head_in, head_out, &op);

        let chunks = body_in.chunks_exact(lanes).zip(body_out.chunks_exact_mut(lanes));
        match plan.access {
            Access::Aligned => {
                for (src, dst) in chunks {
                    // SAFETY: both chunks hold exactly `lanes` elements. The
                    //         first pair starts on the boundary, and the pack
                    //         strides keep every later pair on it
                    unsafe {
                        let x = T::Vector::load_aligned(src.as_ptr());
                        op.vector(x).store_aligned(dst.as_mut_ptr());
                    }
                }
            }
            Access::Unaligned => {
                for (src, dst) in chunks {
                    // SAFETY: both chunks hold exactly `lanes` elements, the
                    //         prologue put the first `src` on the boundary and
                    //         the stride keeps the others there
                    unsafe {
                        let x = T::Vector::load_aligned(src.as_ptr());
                        op.vector(x).store_unaligned(dst.as_mut_ptr());
                    }
                }
            }
        }

        scalar_unary(tail_in, tail_out, &op);
        Ok(rest)
    }
}
