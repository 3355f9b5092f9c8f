//! Ordered, optionally-populated slots.
//!
//! Devices expose a fixed or growing row of slots (keys, sounds, channel
//! entries). `SlotList` holds them and implements the reorder/assign/clear
//! edits. Out-of-range indices are ignored.

use crate::buffer::SampleBuffer;

/// Ordered list of optional items.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotList<T> {
    items: Vec<Option<T>>,
}

impl<T> Default for SlotList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> SlotList<T> {
    /// Creates `len` empty slots.
    pub fn with_len(len: usize) -> Self {
        Self {
            items: std::iter::repeat_with(|| None).take(len).collect(),
        }
    }

    /// Creates a list from explicit slots.
    pub fn from_slots(items: Vec<Option<T>>) -> Self {
        Self { items }
    }

    /// Number of slots, populated or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no slots at all.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item in slot `index`, if populated.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index).and_then(Option::as_ref)
    }

    /// Mutable access to the item in slot `index`, if populated.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index).and_then(Option::as_mut)
    }

    /// Puts `item` into slot `index`, returning the previous occupant.
    pub fn set(&mut self, index: usize, item: T) -> Option<T> {
        self.items.get_mut(index).and_then(|slot| slot.replace(item))
    }

    /// Empties slot `index` without shifting the others.
    pub fn clear(&mut self, index: usize) -> Option<T> {
        self.items.get_mut(index).and_then(Option::take)
    }

    /// Appends a populated slot.
    pub fn push(&mut self, item: T) {
        self.items.push(Some(item));
    }

    /// Removes slot `index`, shifting later slots down.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            self.items.remove(index)
        } else {
            None
        }
    }

    /// Moves the slot at `from` so it ends up at `to`, shifting the slots in
    /// between by one.
    pub fn move_item(&mut self, from: usize, to: usize) {
        if from >= self.items.len() || to >= self.items.len() {
            return;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
    }

    /// Exchanges two slots.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.items.len() && b < self.items.len() {
            self.items.swap(a, b);
        }
    }

    /// Iterates over every slot in order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> {
        self.items.iter().map(Option::as_ref)
    }

    /// Iterates over populated slots in order.
    pub fn populated(&self) -> impl Iterator<Item = &T> {
        self.items.iter().flatten()
    }

    /// Returns true if at least one slot is populated.
    pub fn any_populated(&self) -> bool {
        self.items.iter().any(Option::is_some)
    }

    /// Maps every populated item, keeping the slot layout.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> SlotList<U> {
        SlotList {
            items: self.items.iter().map(|slot| slot.as_ref().map(&mut f)).collect(),
        }
    }
}

impl SlotList<SampleBuffer> {
    /// Combined duration of every populated buffer, in seconds.
    pub fn duration(&self) -> f64 {
        self.populated().map(SampleBuffer::duration).sum()
    }
}
