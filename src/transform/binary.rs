use crate::partition::Partition;
use crate::simd::{stride_keeps_alignment, Element, Pack};

use super::{scalar_binary, Access, BinaryOp, Plan, Transform, TransformError};

impl Transform {
    /// Map `input1` and the front of `input2` pairwise into the front of
    /// `output` with `op`.
    ///
    /// Returns the part of `output` that was not written.
    ///
    /// # Panics
    ///
    /// On any of the conditions [`try_binary`](Transform::try_binary) reports.
    pub fn binary<'o, T1, T2, U, O>(&self, input1: &[T1], input2: &[T2], output: &'o mut [U], op: O) -> &'o mut [U]
    where
        T1: Element,
        T2: Element,
        U: Element,
        O: BinaryOp<T1, T2, U>,
    {
        match self.try_binary(input1, input2, output, op) {
            Ok(rest) => rest,
            Err(e) => panic!("{e}"),
        }
    }

    /// Map `input1` and the front of `input2` pairwise into the front of
    /// `output` with `op`.
    ///
    /// Phases are computed from `input1` alone, the other two streams move
    /// in lockstep with it. In the body, `input1` is always read with aligned
    /// loads. `input2` and `output` get aligned access only if both of them
    /// are on the boundary there, otherwise both are accessed unaligned.
    ///
    /// Returns the part of `output` that was not written.
    ///
    /// # Errors
    ///
    /// - [`TransformError::SecondInputTooShort`] if `input2` is shorter than `input1`
    /// - [`TransformError::OutputTooShort`] if `output` is shorter than `input1`
    /// - [`TransformError::InsufficientAlignment`] if the configured boundary
    ///   is looser than the aligned accesses of `T1`, `T2` or `U` need
    pub fn try_binary<'o, T1, T2, U, O>(
        &self,
        input1: &[T1],
        input2: &[T2],
        output: &'o mut [U],
        op: O,
    ) -> Result<&'o mut [U], TransformError>
    where
        T1: Element,
        T2: Element,
        U: Element,
        O: BinaryOp<T1, T2, U>,
    {
        const {
            assert!(
                <T1::Vector as Pack>::LANES == <T2::Vector as Pack>::LANES,
                "both input packs must have the same number of lanes"
            );
            assert!(
                <T1::Vector as Pack>::LANES == <U::Vector as Pack>::LANES,
                "input and output packs must have the same number of lanes"
            );
            assert!(
                stride_keeps_alignment::<T1::Vector>()
                    && stride_keeps_alignment::<T2::Vector>()
                    && stride_keeps_alignment::<U::Vector>(),
                "pack stride must be a multiple of the pack alignment"
            );
        }

        let len = input1.len();
        if input2.len() < len {
            return Err(TransformError::SecondInputTooShort { needed: len, available: input2.len() });
        }
        if output.len() < len {
            return Err(TransformError::OutputTooShort { needed: len, available: output.len() });
        }
        self.check_alignment::<T1::Vector>()?;
        self.check_alignment::<T2::Vector>()?;
        self.check_alignment::<U::Vector>()?;

        let lanes = <T1::Vector as Pack>::LANES;
        let plan = Plan::binary(input1, input2.as_ptr(), output.as_ptr(), lanes, self.alignment);
        let Partition { prologue, body, epilogue } = plan.partition;
        tracing::trace!(len, prologue, body, epilogue, access = ?plan.access, "binary transform");

        let (written, rest) = output.split_at_mut(len);
        let (head1, tail1) = input1.split_at(prologue);
        let (body1, tail1) = tail1.split_at(body);
        let (input2, _) = input2.split_at(len);
        let (head2, tail2) = input2.split_at(prologue);
        let (body2, tail2) = tail2.split_at(body);
        let (head_out, tail_out) = written.split_at_mut(prologue);
        let (body_out, tail_out) = tail_out.split_at_mut(body);

        scalar_binary(head1, head2, head_out, &op);

        let chunks = body1
            .chunks_exact(lanes)
            .zip(body2.chunks_exact(lanes))
            .zip(body_out.chunks_exact_mut(lanes));
        match plan.access {
            Access::Aligned => {
                for ((a, b), dst) in chunks {
                    // SAFETY: all chunks hold exactly `lanes` elements. The
                    //         first ones start on the boundary, and the pack
                    //         strides keep every later one on it
                    unsafe {
                        let x = T1::Vector::load_aligned(a.as_ptr());
                        let y = T2::Vector::load_aligned(b.as_ptr());
                        op.vector(x, y).store_aligned(dst.as_mut_ptr());
                    }
                }
            }
            Access::Unaligned => {
                for ((a, b), dst) in chunks {
                    // SAFETY: all chunks hold exactly `lanes` elements, the
                    //         prologue put the first `a` on the boundary and
                    //         the stride keeps the others there
                    unsafe {
                        let x = T1::Vector::load_aligned(a.as_ptr());
                        let y = T2::Vector::load_unaligned(b.as_ptr());
                        op.vector(x, y).store_unaligned(dst.as_mut_ptr());
                    }
                }
            }
        }

        scalar_binary(tail1, tail2, tail_out, &op);
        Ok(rest)
    }
}
