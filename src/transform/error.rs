use std::error::Error as StdError;
use std::fmt;

/// Violated precondition of a transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    /// Output holds fewer elements than the input range
    OutputTooShort {
        /// Length of the input range
        needed: usize,
        /// Length of the output
        available: usize,
    },
    /// Second input holds fewer elements than the first one
    SecondInputTooShort {
        /// Length of the first input
        needed: usize,
        /// Length of the second input
        available: usize,
    },
    /// Boundary is zero or not a power of two
    InvalidAlignment(usize),
    /// Configured boundary is looser than what aligned accesses of a pack need
    InsufficientAlignment {
        /// Boundary of the configuration, in bytes
        configured: usize,
        /// `ALIGN` of the pack that needs more
        required: usize,
    },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::OutputTooShort { needed, available } => write!(
                f,
                "output holds {available} elements, {needed} are needed"
            ),
            TransformError::SecondInputTooShort { needed, available } => write!(
                f,
                "second input holds {available} elements, {needed} are needed"
            ),
            TransformError::InvalidAlignment(bytes) => {
                write!(f, "alignment of {bytes} bytes is not a power of two")
            }
            TransformError::InsufficientAlignment { configured, required } => write!(
                f,
                "alignment of {configured} bytes is below the {required} bytes required by aligned vector access"
            ),
        }
    }
}

impl StdError for TransformError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_numbers() {
        let e = TransformError::OutputTooShort { needed: 10, available: 7 };
        assert_eq!(e.to_string(), "output holds 7 elements, 10 are needed");

        let e = TransformError::InvalidAlignment(12);
        assert_eq!(e.to_string(), "alignment of 12 bytes is not a power of two");

        let e = TransformError::InsufficientAlignment { configured: 4, required: 16 };
        assert!(e.to_string().contains("below the 16 bytes"));
    }
}
