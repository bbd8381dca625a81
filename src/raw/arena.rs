use alloc::vec::Vec;

use super::handle::Handle;
use crate::Error;

struct Slot<T> {
    generation: u32,
    element: Option<T>,
}

pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
}

impl<T> Arena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        Ok(Self {
            slots,
            free: Vec::new(),
        })
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes sure the next `additional` allocations cannot fail.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        let needed = additional.saturating_sub(self.free.len());
        if self.slots.len() + needed > Handle::MAX {
            return Err(Error::CapacityExceeded { max: Handle::MAX });
        }
        self.slots.try_reserve(needed)?;
        Ok(())
    }

    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle, Error> {
        if let Some(index) = self.free.pop() {
            // Reuse a free slot; its generation was bumped when it was released.
            let slot = &mut self.slots[index];
            slot.element = Some(element);
            return Ok(Handle::new(index, slot.generation));
        }

        if self.slots.len() >= Handle::MAX {
            return Err(Error::CapacityExceeded { max: Handle::MAX });
        }
        self.slots.try_reserve(1)?;
        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        Ok(Handle::new(self.slots.len() - 1, 0))
    }

    #[inline]
    pub(crate) fn try_get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.element.as_ref())
    }

    #[inline]
    pub(crate) fn try_get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.element.as_mut())
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.try_get(handle).expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.try_get_mut(handle).expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = self
            .slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .expect("`Arena::take()` - `handle` is invalid!");
        let element = slot.element.take().expect("`Arena::take()` - `handle` is invalid!");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index());
        element
    }
}
