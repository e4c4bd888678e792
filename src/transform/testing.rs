//! Buffers with a known base alignment, so tests can pick the exact
//! misalignment of every stream.

use crate::partition::Alignment;

/// Heap buffer whose element 0 sits on a 128-byte boundary
pub(crate) struct Buffer<T> {
    storage: Vec<Block>,
    len: usize,
    _marker: core::marker::PhantomData<T>,
}

#[derive(Clone, Copy)]
#[repr(C, align(128))]
struct Block([u8; 128]);

impl<T: Copy> Buffer<T> {
    pub(crate) fn filled(len: usize, value: T) -> Self {
        Self::from_fn(len, |_| value)
    }

    pub(crate) fn from_fn(len: usize, mut f: impl FnMut(usize) -> T) -> Self {
        let bytes = len * core::mem::size_of::<T>();
        let blocks = bytes.div_ceil(128).max(1);
        let mut buffer = Self {
            storage: vec![Block([0; 128]); blocks],
            len,
            _marker: core::marker::PhantomData,
        };
        for (i, slot) in buffer.as_mut_slice().iter_mut().enumerate() {
            *slot = f(i);
        }
        buffer
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: storage spans at least len elements and Block is more
        //         aligned than any element type used in tests
        unsafe { core::slice::from_raw_parts(self.storage.as_ptr().cast::<T>(), self.len) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and the borrow is exclusive
        unsafe { core::slice::from_raw_parts_mut(self.storage.as_mut_ptr().cast::<T>(), self.len) }
    }
}

#[test]
fn base_is_on_every_vector_boundary() {
    let buffer = Buffer::filled(3, 0_u8);
    assert!(Alignment::new(128).unwrap().is_aligned(buffer.as_slice().as_ptr()));
    assert_eq!(buffer.as_slice(), &[0, 0, 0]);
}
