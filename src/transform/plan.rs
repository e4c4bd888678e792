use serde::{Deserialize, Serialize};

use crate::partition::{partition, Alignment, Partition};

/// Memory access flavour used by the vector body
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Access {
    /// Aligned loads and stores on every stream
    Aligned,
    /// Unaligned accesses on the streams that are not known to be aligned
    Unaligned,
}

/// How one transform call walks its streams
///
/// The first input stream is always read with aligned loads in the body, the
/// prologue exists to make that possible. `access` tells how the other
/// streams (second input, output) are accessed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plan {
    /// Phase lengths, computed from the first input
    pub partition: Partition,
    /// Access flavour of the remaining streams in the body
    pub access: Access,
}

impl Plan {
    /// Plan over one input and an output.
    ///
    /// The output is checked where the body starts, i.e. after the
    /// prologue has moved it forward.
    pub(crate) fn unary<T, U>(input: &[T], output: *const U, lanes: usize, alignment: Alignment) -> Self {
        let partition = partition(input, lanes, alignment);
        let aligned = alignment.is_aligned(output.wrapping_add(partition.prologue));
        Self {
            partition,
            access: if aligned { Access::Aligned } else { Access::Unaligned },
        }
    }

    /// Plan over two inputs and an output.
    ///
    /// Aligned access is only picked when both the second input and the
    /// output are on the boundary at the start of the body. Otherwise both
    /// fall back to unaligned access.
    pub(crate) fn binary<T1, T2, U>(
        input1: &[T1],
        input2: *const T2,
        output: *const U,
        lanes: usize,
        alignment: Alignment,
    ) -> Self {
        let partition = partition(input1, lanes, alignment);
        let aligned = alignment.is_aligned(input2.wrapping_add(partition.prologue))
            && alignment.is_aligned(output.wrapping_add(partition.prologue));
        Self {
            partition,
            access: if aligned { Access::Aligned } else { Access::Unaligned },
        }
    }
}
