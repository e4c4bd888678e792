use core::num::NonZeroUsize;
use serde::{Deserialize, Serialize};

use crate::simd::{Pack, VECTOR_BYTES};
use crate::TransformError;

/// Power-of-two byte boundary for vector memory accesses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Alignment(NonZeroUsize);

impl Alignment {
    /// Preferred boundary of the compilation target (one full vector register).
    pub const PLATFORM: Self = Self::from_pow2(VECTOR_BYTES);

    const fn from_pow2(bytes: usize) -> Self {
        assert!(bytes.is_power_of_two());
        match NonZeroUsize::new(bytes) {
            Some(bytes) => Self(bytes),
            None => unreachable!(),
        }
    }

    /// Validate a byte count.
    ///
    /// # Errors
    ///
    /// [`TransformError::InvalidAlignment`] if `bytes` is zero or not a power of two.
    pub fn new(bytes: usize) -> Result<Self, TransformError> {
        if bytes.is_power_of_two() {
            Ok(Self::from_pow2(bytes))
        } else {
            Err(TransformError::InvalidAlignment(bytes))
        }
    }

    /// Boundary required by the aligned accesses of pack `V`.
    pub const fn of<V: Pack>() -> Self {
        Self::from_pow2(V::ALIGN)
    }

    /// Byte count.
    #[inline(always)]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    #[inline(always)]
    const fn mask(self) -> usize {
        self.0.get() - 1
    }

    /// Whether `ptr` sits on this boundary.
    #[inline(always)]
    pub fn is_aligned<T>(self, ptr: *const T) -> bool {
        ptr.addr() & self.mask() == 0
    }

    /// Round `addr` up to the next multiple of this boundary, `None` if that
    /// leaves the address space.
    #[inline(always)]
    pub const fn align_up(self, addr: usize) -> Option<usize> {
        match addr.checked_add(self.mask()) {
            Some(bumped) => Some(bumped & !self.mask()),
            None => None,
        }
    }

    /// Whether an address on this boundary also sits on `other`.
    #[inline(always)]
    pub const fn implies(self, other: Self) -> bool {
        self.get() >= other.get()
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::PLATFORM
    }
}

impl TryFrom<usize> for Alignment {
    type Error = TransformError;

    fn try_from(bytes: usize) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl From<Alignment> for usize {
    fn from(alignment: Alignment) -> Self {
        alignment.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::Lanes;
    use core::ptr::without_provenance;

    #[test]
    fn rejects_non_powers_of_two() {
        for bytes in [0, 3, 6, 24, 48, 100] {
            assert!(
                matches!(Alignment::new(bytes), Err(TransformError::InvalidAlignment(b)) if b == bytes),
                "{bytes} must be rejected"
            );
        }
    }

    #[test]
    fn accepts_powers_of_two() {
        for shift in 0..12 {
            assert_eq!(Alignment::new(1 << shift).unwrap().get(), 1 << shift);
        }
    }

    #[test]
    fn platform_matches_vector_size() {
        assert_eq!(Alignment::PLATFORM.get(), VECTOR_BYTES);
        assert_eq!(Alignment::default(), Alignment::PLATFORM);
    }

    #[test]
    fn of_pack_reads_its_requirement() {
        assert_eq!(Alignment::of::<Lanes<f64, 4>>().get(), 32);
        assert_eq!(Alignment::of::<Lanes<u8, 4>>().get(), 4);
    }

    #[test]
    fn align_up_rounds_to_next_boundary() {
        let a = Alignment::new(16).unwrap();
        assert_eq!(a.align_up(0), Some(0));
        assert_eq!(a.align_up(1), Some(16));
        assert_eq!(a.align_up(16), Some(16));
        assert_eq!(a.align_up(17), Some(32));
        assert_eq!(a.align_up(usize::MAX - 3), None);
    }

    #[test]
    fn is_aligned_checks_low_bits() {
        let a = Alignment::new(32).unwrap();
        assert!(a.is_aligned(without_provenance::<f32>(0x1000)));
        assert!(a.is_aligned(without_provenance::<f32>(0x1020)));
        assert!(!a.is_aligned(without_provenance::<f32>(0x1004)));
        assert!(!a.is_aligned(without_provenance::<f32>(0x1010)));
    }

    #[test]
    fn implies_smaller_boundaries() {
        let big = Alignment::new(64).unwrap();
        let small = Alignment::new(16).unwrap();
        assert!(big.implies(small));
        assert!(big.implies(big));
        assert!(!small.implies(big));
    }

    #[test]
    fn serde_validates_on_the_way_in() {
        let a: Alignment = serde_json::from_str("32").unwrap();
        assert_eq!(a.get(), 32);
        assert_eq!(serde_json::to_string(&a).unwrap(), "32");
        assert!(serde_json::from_str::<Alignment>("12").is_err());
    }
}
