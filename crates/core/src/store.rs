//! In-memory slot store: the single source of truth for the active form.
//!
//! The store is pure state with no network awareness. Remote side effects
//! (uploads, cleanup deletes) are the sync layer's job; it calls back into
//! the store through the operations defined here, which are synchronous and
//! atomic with respect to the event loop.

use crate::slot::{ImageSlot, SlotPatch};
use crate::types::SlotId;

/// Ordered collection of [`ImageSlot`]s making up the current form.
///
/// Invariant: at most one slot per id. Operations other than
/// [`replace_all`](Self::replace_all) / [`reset`](Self::reset) never change
/// the identity or order of slots they do not target.
#[derive(Debug, Clone, Default)]
pub struct SlotStore {
    slots: Vec<ImageSlot>,
}

impl SlotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fresh empty slot at the head of the collection
    /// (most-recently-added first). Returns the new slot's id.
    pub fn add(&mut self) -> SlotId {
        let slot = ImageSlot::new();
        let id = slot.id.clone();
        self.slots.insert(0, slot);
        id
    }

    /// Remove the slot matching `id`, returning it so the caller can
    /// trigger remote cleanup. Remaining slots keep their order.
    pub fn remove(&mut self, id: &str) -> Option<ImageSlot> {
        let index = self.slots.iter().position(|slot| slot.id == id)?;
        Some(self.slots.remove(index))
    }

    /// Merge `patch` into the slot matching `id`.
    ///
    /// Returns `true` if a slot was matched. Unmatched ids are a silent
    /// no-op, so a delayed upload result landing after its slot was removed
    /// simply drops.
    pub fn update(&mut self, id: &str, patch: SlotPatch) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == id) else {
            return false;
        };
        if let Some(label) = patch.label {
            slot.label = label;
        }
        if let Some(image_url) = patch.image_url {
            slot.image_url = Some(image_url);
        }
        if let Some(path) = patch.path {
            slot.path = Some(path);
        }
        true
    }

    /// Discard the collection and install `slots` verbatim, preserving the
    /// given order. Used when a server-driven page of images is loaded.
    pub fn replace_all(&mut self, slots: Vec<ImageSlot>) {
        self.slots = slots;
    }

    /// Empty the collection. Used after a successful submit.
    pub fn reset(&mut self) {
        self.slots.clear();
    }

    /// The current slot collection, in order.
    pub fn slots(&self) -> &[ImageSlot] {
        &self.slots
    }

    /// Look up a slot by id.
    pub fn get(&self, id: &str) -> Option<&ImageSlot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
