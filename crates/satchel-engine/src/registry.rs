//! Element registry and owner-ID allocation.
//!
//! [`ElementRegistry`] maps live [`OwnerId`]s to their records and keeps a
//! secondary payload → ID index so identity lookups do not scan. IDs come
//! from an [`IdPool`] that always hands out the smallest unused value.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use indexmap::IndexMap;
use satchel_core::{Extent, Footprint, InventoryError, OwnerId, Position};

/// Allocator for positive owner IDs with smallest-free reuse.
///
/// Every ID below `next_fresh` is either live or in `free`. Releasing the
/// highest live ID lowers `next_fresh` and absorbs any free IDs directly
/// beneath it, so allocating and then releasing a run of IDs restores the
/// pool to exactly its earlier state.
#[derive(Clone, Debug)]
pub(crate) struct IdPool {
    /// Lowest ID never handed out since the high-water mark last dropped.
    next_fresh: u64,
    /// Released IDs below `next_fresh`.
    free: BTreeSet<u32>,
    /// Largest ID this pool may issue.
    limit: u32,
}

impl IdPool {
    pub(crate) fn new() -> Self {
        Self::with_limit(u32::MAX)
    }

    pub(crate) fn with_limit(limit: u32) -> Self {
        Self {
            next_fresh: 1,
            free: BTreeSet::new(),
            limit,
        }
    }

    /// The ID the next [`allocate`](Self::allocate) would return.
    pub(crate) fn peek(&self) -> Option<OwnerId> {
        match self.free.first() {
            Some(&raw) => OwnerId::new(raw),
            None if self.next_fresh <= self.limit as u64 => OwnerId::new(self.next_fresh as u32),
            None => None,
        }
    }

    pub(crate) fn allocate(&mut self) -> Result<OwnerId, InventoryError> {
        if let Some(raw) = self.free.pop_first() {
            return OwnerId::new(raw).ok_or(InventoryError::IdSpaceExhausted);
        }
        if self.next_fresh > self.limit as u64 {
            return Err(InventoryError::IdSpaceExhausted);
        }
        let raw = self.next_fresh as u32;
        self.next_fresh += 1;
        OwnerId::new(raw).ok_or(InventoryError::IdSpaceExhausted)
    }

    pub(crate) fn release(&mut self, id: OwnerId) {
        let raw = id.get();
        debug_assert!((raw as u64) < self.next_fresh, "released unallocated id {raw}");
        if raw as u64 + 1 != self.next_fresh {
            self.free.insert(raw);
            return;
        }
        self.next_fresh -= 1;
        while let Some(&last) = self.free.last() {
            if last as u64 + 1 != self.next_fresh {
                break;
            }
            self.free.pop_last();
            self.next_fresh -= 1;
        }
    }

    pub(crate) fn reset(&mut self) {
        self.next_fresh = 1;
        self.free.clear();
    }
}

impl Default for IdPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Live bookkeeping for one stored element.
///
/// Never handed out of the crate; read paths build
/// [`Element`](crate::notify::Element) snapshots instead.
#[derive(Clone, Debug)]
pub(crate) struct ElementRecord<P> {
    pub(crate) id: OwnerId,
    pub(crate) payload: P,
    pub(crate) anchor: Position,
    pub(crate) rotated: bool,
}

impl<P> ElementRecord<P> {
    /// The covered rectangle for a base (unrotated) size.
    pub(crate) fn footprint(&self, base: Extent) -> Footprint {
        Footprint::new(self.anchor, base.oriented(self.rotated))
    }
}

/// Owner ID → record map with a payload identity index.
///
/// Iteration follows insertion order.
#[derive(Debug)]
pub(crate) struct ElementRegistry<P> {
    records: IndexMap<OwnerId, ElementRecord<P>>,
    by_payload: HashMap<P, OwnerId>,
    ids: IdPool,
}

impl<P: Clone + Eq + Hash> ElementRegistry<P> {
    pub(crate) fn new() -> Self {
        Self::with_id_pool(IdPool::new())
    }

    pub(crate) fn with_id_pool(ids: IdPool) -> Self {
        Self {
            records: IndexMap::new(),
            by_payload: HashMap::new(),
            ids,
        }
    }

    /// Register a payload at `anchor`, allocating the smallest free ID.
    ///
    /// The caller guarantees the payload is not already registered.
    pub(crate) fn insert(
        &mut self,
        payload: P,
        anchor: Position,
        rotated: bool,
    ) -> Result<OwnerId, InventoryError> {
        debug_assert!(!self.by_payload.contains_key(&payload));
        let id = self.ids.allocate()?;
        self.by_payload.insert(payload.clone(), id);
        self.records.insert(
            id,
            ElementRecord {
                id,
                payload,
                anchor,
                rotated,
            },
        );
        Ok(id)
    }

    /// Unregister `id`, returning its record and freeing the ID.
    pub(crate) fn remove(&mut self, id: OwnerId) -> Option<ElementRecord<P>> {
        let record = self.records.shift_remove(&id)?;
        self.by_payload.remove(&record.payload);
        self.ids.release(id);
        Some(record)
    }

    pub(crate) fn get(&self, id: OwnerId) -> Option<&ElementRecord<P>> {
        self.records.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: OwnerId) -> Option<&mut ElementRecord<P>> {
        self.records.get_mut(&id)
    }

    pub(crate) fn id_of(&self, payload: &P) -> Option<OwnerId> {
        self.by_payload.get(payload).copied()
    }

    pub(crate) fn find(&self, payload: &P) -> Option<&ElementRecord<P>> {
        self.id_of(payload).and_then(|id| self.records.get(&id))
    }

    pub(crate) fn contains(&self, payload: &P) -> bool {
        self.by_payload.contains_key(payload)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &ElementRecord<P>> {
        self.records.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The ID the next insertion would receive.
    pub(crate) fn next_id(&self) -> Option<OwnerId> {
        self.ids.peek()
    }

    /// Remove every record in insertion order and reset the ID pool.
    pub(crate) fn drain(&mut self) -> Vec<ElementRecord<P>> {
        self.by_payload.clear();
        self.ids.reset();
        self.records.drain(..).map(|(_, record)| record).collect()
    }
}

impl<P: Clone + Eq + Hash> Default for ElementRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}
