//! Position store: the observable bridge from simulation to presentation.
//!
//! One slot per node holds the latest published position and a generation
//! counter. Renderers keep a [`PositionWatcher`] per node and poll it each
//! frame; a watcher only yields when something new was published.
//!
//! Writers are the engine (`publish`, once per integrated body per tick) and
//! the interaction controller while the engine is suspended (see
//! `Engine::drag_to`). Their access never overlaps in time.

use std::collections::HashMap;

use super::states::{NVec2, PhysicsBody};

/// Copyable reference to one slot of a [`PositionStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionHandle(usize);

#[derive(Debug, Clone)]
struct Slot {
    value: NVec2,
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct PositionStore {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    slots: Vec<Slot>,
}

impl PositionStore {
    /// One slot per body, seeded with the body's current position.
    pub fn from_bodies(bodies: &[PhysicsBody]) -> Self {
        let mut store = Self::default();
        for b in bodies {
            store.insert(&b.id, b.x);
        }
        store
    }

    fn insert(&mut self, id: &str, value: NVec2) -> PositionHandle {
        if let Some(&i) = self.index.get(id) {
            self.slots[i].value = value;
            return PositionHandle(i);
        }
        let i = self.slots.len();
        self.ids.push(id.to_string());
        self.index.insert(id.to_string(), i);
        self.slots.push(Slot { value, generation: 0 });
        PositionHandle(i)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn handle(&self, id: &str) -> Option<PositionHandle> {
        self.index.get(id).map(|&i| PositionHandle(i))
    }

    pub fn get(&self, handle: PositionHandle) -> NVec2 {
        self.slots[handle.0].value
    }

    pub fn get_by_id(&self, id: &str) -> Option<NVec2> {
        self.handle(id).map(|h| self.get(h))
    }

    pub fn generation(&self, handle: PositionHandle) -> u64 {
        self.slots[handle.0].generation
    }

    /// Overwrite a slot and bump its generation so watchers see the change.
    pub(crate) fn publish(&mut self, handle: PositionHandle, value: NVec2) {
        let slot = &mut self.slots[handle.0];
        slot.value = value;
        slot.generation += 1;
    }

    /// Watcher that reports the current value on its first poll.
    pub fn subscribe(&self, id: &str) -> Option<PositionWatcher> {
        self.handle(id).map(|handle| PositionWatcher { handle, seen: None })
    }

    /// (id, position) for every slot, insertion order.
    pub fn snapshot(&self) -> Vec<(String, NVec2)> {
        self.ids
            .iter()
            .cloned()
            .zip(self.slots.iter().map(|s| s.value))
            .collect()
    }
}

/// Per-subscriber cursor over one slot.
#[derive(Debug, Clone)]
pub struct PositionWatcher {
    handle: PositionHandle,
    seen: Option<u64>,
}

impl PositionWatcher {
    pub fn handle(&self) -> PositionHandle {
        self.handle
    }

    /// New value since the last poll, if any.
    pub fn poll(&mut self, store: &PositionStore) -> Option<NVec2> {
        let generation = store.generation(self.handle);
        if self.seen == Some(generation) {
            return None;
        }
        self.seen = Some(generation);
        Some(store.get(self.handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PositionStore {
        PositionStore::from_bodies(&[
            PhysicsBody::at_rest("a", NVec2::new(1.0, 2.0)),
            PhysicsBody::at_rest("b", NVec2::new(3.0, 4.0)),
        ])
    }

    #[test]
    fn lookup_by_id() {
        let s = store();
        assert_eq!(s.get_by_id("b"), Some(NVec2::new(3.0, 4.0)));
        assert_eq!(s.get_by_id("missing"), None);
    }

    #[test]
    fn watcher_yields_only_on_change() {
        let mut s = store();
        let mut w = s.subscribe("a").unwrap();

        assert_eq!(w.poll(&s), Some(NVec2::new(1.0, 2.0)));
        assert_eq!(w.poll(&s), None);

        let h = w.handle();
        s.publish(h, NVec2::new(9.0, 9.0));
        assert_eq!(w.poll(&s), Some(NVec2::new(9.0, 9.0)));
        assert_eq!(w.poll(&s), None);
    }

    #[test]
    fn watchers_are_independent() {
        let mut s = store();
        let mut w1 = s.subscribe("b").unwrap();
        let mut w2 = s.subscribe("b").unwrap();
        w1.poll(&s);
        s.publish(w1.handle(), NVec2::new(0.0, 0.0));
        assert!(w2.poll(&s).is_some());
        assert!(w1.poll(&s).is_some());
    }
}
