use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// A generational index into an [`Arena`](super::arena::Arena).
///
/// The generation is bumped every time a slot is released, so a handle that outlives its
/// element can never silently alias whatever is stored in the slot afterwards.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Handle {
    index: NonZero<RawHandle>,
    generation: u32,
}

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn new(index: usize, generation: u32) -> Self {
        assert!(index <= Self::MAX, "`Handle::new()` - `index` > `Handle::MAX`!");
        // `index + 1` cannot be zero and cannot overflow.
        #[allow(clippy::cast_possible_truncation)]
        let index = NonZero::new((index + 1) as RawHandle).unwrap();
        Self { index, generation }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.index.get() - 1) as usize
    }

    #[inline]
    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}
