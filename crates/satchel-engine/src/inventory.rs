//! The placement engine.
//!
//! [`Inventory`] ties the occupancy grid, the element registry and the
//! change notifier together. Every mutating operation validates policy
//! (filter, size physicality, duplicate identity), updates grid and
//! registry together, and on success emits exactly one change event.
//!
//! # Search order
//!
//! Automatic placement is first-fit over anchors in row-major order
//! (`y` outer, `x` inner, both from 0). At each anchor the unrotated
//! orientation is tried before the rotated one. The result is fully
//! determined by the grid contents and the item size.

use std::fmt;
use std::hash::Hash;

use smallvec::SmallVec;
use tracing::{debug, trace};

use satchel_core::{ConfigError, Extent, InventoryError, OwnerId, Position};
use satchel_grid::OccupancyGrid;

use crate::config::InventoryConfig;
use crate::notify::{ChangeEvent, ChangeKind, ChangeNotifier, Element, SubscriberId};
use crate::registry::{ElementRecord, ElementRegistry};

/// Size lookup: payload → unrotated extent.
///
/// The result for a given payload must not change while it is stored.
pub type SizeFn<P> = Box<dyn Fn(&P) -> Extent>;

/// Admission predicate applied to payloads on insertion.
pub type FilterFn<P> = Box<dyn Fn(&P) -> bool>;

/// An anchor and orientation where an element can be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Minimum-x, minimum-y cell of the footprint.
    pub anchor: Position,
    /// Whether the element is turned 90°.
    pub rotated: bool,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rotated {
            write!(f, "{} (rotated)", self.anchor)
        } else {
            write!(f, "{}", self.anchor)
        }
    }
}

/// A fixed-size grid inventory of rotatable, variable-footprint items.
///
/// Payloads are identified by `Eq + Hash` and are expected to be cheap
/// handles (see [`ItemRef`](satchel_core::ItemRef)); the inventory clones
/// them into its registry and into event snapshots.
///
/// # Examples
///
/// ```
/// use satchel_core::{Extent, Position};
/// use satchel_engine::{Inventory, InventoryConfig};
///
/// // Payloads are (name, width, height) tuples here.
/// let mut inv = Inventory::new(InventoryConfig::new(4, 4), |p: &(&str, i32, i32)| {
///     Extent::new(p.1, p.2)
/// })
/// .unwrap();
///
/// assert!(inv.add(("shield", 2, 2)).unwrap());
/// assert!(inv.add(("spear", 1, 4)).unwrap());
/// assert_eq!(inv.find(&("spear", 1, 4)).unwrap().anchor(), Position::new(2, 0));
/// assert_eq!(inv.len(), 2);
/// ```
pub struct Inventory<P> {
    config: InventoryConfig,
    grid: OccupancyGrid,
    registry: ElementRegistry<P>,
    size_of: SizeFn<P>,
    filter: Option<FilterFn<P>>,
    notifier: ChangeNotifier<P>,
}

impl<P: Clone + Eq + Hash> Inventory<P> {
    /// Create an empty inventory.
    ///
    /// `size_of` maps each payload to its unrotated extent. The default
    /// filter accepts everything.
    pub fn new(
        config: InventoryConfig,
        size_of: impl Fn(&P) -> Extent + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = OccupancyGrid::new(config.width, config.height)?;
        Ok(Self {
            config,
            grid,
            registry: ElementRegistry::new(),
            size_of: Box::new(size_of),
            filter: None,
            notifier: ChangeNotifier::new(),
        })
    }

    /// Builder-style [`set_filter`](Self::set_filter).
    pub fn with_filter(mut self, filter: impl Fn(&P) -> bool + 'static) -> Self {
        self.set_filter(filter);
        self
    }

    // ── Configuration ──────────────────────────────────────────────

    /// The configuration this inventory was built from.
    pub fn config(&self) -> InventoryConfig {
        self.config
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Replace the admission filter.
    ///
    /// Takes effect for future insertions only; elements already stored
    /// are never re-checked.
    pub fn set_filter(&mut self, filter: impl Fn(&P) -> bool + 'static) {
        self.filter = Some(Box::new(filter));
    }

    /// Restore the default accept-all filter.
    pub fn reset_filter(&mut self) {
        self.filter = None;
    }

    /// Whether the current filter admits `payload`.
    pub fn accepts(&self, payload: &P) -> bool {
        self.filter.as_ref().map_or(true, |f| f(payload))
    }

    /// The unrotated extent the size lookup reports for `payload`.
    pub fn size_of(&self, payload: &P) -> Extent {
        (self.size_of)(payload)
    }

    /// Register a change listener.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&ChangeEvent<P>) + 'static,
    ) -> SubscriberId {
        self.notifier.subscribe(listener)
    }

    /// Remove a change listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // ── Insertion ──────────────────────────────────────────────────

    /// Insert `payload` at the first position where it fits.
    ///
    /// Returns `Ok(false)` without mutating if the filter rejects the
    /// payload, if it is already stored, or if no anchor/orientation
    /// fits. Returns `Err(InvalidSize)` if its size is not physical.
    pub fn add(&mut self, payload: P) -> Result<bool, InventoryError> {
        let Some(id) = self.place_first_fit(payload)? else {
            return Ok(false);
        };
        self.emit_for(ChangeKind::Added, &[id]);
        Ok(true)
    }

    /// Insert `payload` at exactly `slot` in the given orientation.
    ///
    /// Checks run in a fixed order: filter, size, identity, fit. Any
    /// failed check except size returns `Ok(false)` with no mutation.
    pub fn add_at(
        &mut self,
        payload: P,
        slot: Position,
        rotated: bool,
    ) -> Result<bool, InventoryError> {
        if !self.accepts(&payload) {
            trace!(x = slot.x, y = slot.y, "add_at rejected by filter");
            return Ok(false);
        }
        let base = self.checked_size(&payload)?;
        if self.registry.contains(&payload) {
            trace!(x = slot.x, y = slot.y, "add_at rejected: already stored");
            return Ok(false);
        }
        if !self.grid.fits(slot, base.oriented(rotated), None) {
            return Ok(false);
        }
        let id = self.place(payload, Placement { anchor: slot, rotated }, base)?;
        self.emit_for(ChangeKind::Added, &[id]);
        Ok(true)
    }

    /// Insert every payload, in order, or none of them.
    ///
    /// Uses the same search as [`add`](Self::add) for each item. If any
    /// item cannot be placed, every item placed by this call is removed
    /// again and the grid is restored exactly; the call returns
    /// `Ok(false)`, or the error that stopped it. On success a single
    /// [`ChangeKind::Added`] event covers all new elements.
    pub fn try_add_all<I>(&mut self, payloads: I) -> Result<bool, InventoryError>
    where
        I: IntoIterator<Item = P>,
    {
        let mut placed: SmallVec<[OwnerId; 8]> = SmallVec::new();
        for payload in payloads {
            match self.place_first_fit(payload) {
                Ok(Some(id)) => placed.push(id),
                Ok(None) => {
                    self.rollback(&placed);
                    return Ok(false);
                }
                Err(e) => {
                    self.rollback(&placed);
                    return Err(e);
                }
            }
        }
        if !placed.is_empty() {
            debug!(count = placed.len(), "batch committed");
            self.emit_for(ChangeKind::Added, &placed);
        }
        Ok(true)
    }

    // ── Relocation and removal ─────────────────────────────────────

    /// Move a stored element to `slot` with the given orientation.
    ///
    /// The element's own cells count as free, so it may slide or rotate
    /// into space it already covers. Returns `Ok(false)` with the grid
    /// untouched if the new footprint does not fit.
    pub fn move_to(
        &mut self,
        payload: &P,
        slot: Position,
        rotated: bool,
    ) -> Result<bool, InventoryError> {
        let id = self.registry.id_of(payload).ok_or(InventoryError::NotFound)?;
        let base = self.size_of(payload);
        let size = base.oriented(rotated);
        if !size.is_physical() {
            return Err(InventoryError::InvalidSize { size });
        }
        if !self.grid.fits(slot, size, Some(id)) {
            trace!(%id, x = slot.x, y = slot.y, rotated, "move does not fit");
            return Ok(false);
        }
        let Some(record) = self.registry.get_mut(id) else {
            return Err(InventoryError::NotFound);
        };
        let old = record.footprint(base);
        record.anchor = slot;
        record.rotated = rotated;
        self.grid.stamp(old.anchor, old.size, None);
        self.grid.stamp(slot, size, Some(id));
        debug!(%id, x = slot.x, y = slot.y, rotated, "element moved");
        self.emit_for(ChangeKind::Moved, &[id]);
        Ok(true)
    }

    /// Remove `payload`, returning the stored handle, or `None` if absent.
    pub fn remove(&mut self, payload: &P) -> Option<P> {
        let id = self.registry.id_of(payload)?;
        self.remove_id(id)
    }

    /// Remove whichever element covers `slot`.
    ///
    /// Errors with `SlotOutOfBounds` outside the grid and `EmptySlot` when
    /// no element covers the cell.
    pub fn remove_at(&mut self, slot: Position) -> Result<P, InventoryError> {
        self.check_slot(slot)?;
        let id = self
            .grid
            .owner_at(slot)
            .ok_or(InventoryError::EmptySlot { slot })?;
        self.remove_id(id).ok_or(InventoryError::EmptySlot { slot })
    }

    /// Remove everything in one step.
    ///
    /// Emits a single [`ChangeKind::Removed`] event covering every element
    /// that was present (nothing when already empty) and returns the
    /// payloads in insertion order.
    pub fn clear(&mut self) -> Vec<P> {
        if self.registry.is_empty() {
            return Vec::new();
        }
        let snapshots: SmallVec<[Element<P>; 1]> =
            self.registry.iter().map(|r| self.snapshot(r)).collect();
        let payloads: Vec<P> = self
            .registry
            .drain()
            .into_iter()
            .map(|r| r.payload)
            .collect();
        self.grid.clear();
        debug!(count = payloads.len(), "inventory cleared");
        self.notifier
            .emit(&ChangeEvent::new(ChangeKind::Removed, snapshots));
        payloads
    }

    // ── Forecasts ──────────────────────────────────────────────────

    /// Whether `add_at(payload, slot, rotated)` would succeed.
    ///
    /// If `payload` is already stored its own cells count as free, which
    /// makes this the right check for previewing a drag to a new slot.
    /// Never mutates and never notifies.
    pub fn test_add(&self, slot: Position, payload: &P, rotated: bool) -> bool {
        if !self.accepts(payload) {
            return false;
        }
        let base = self.size_of(payload);
        base.is_physical()
            && self
                .grid
                .fits(slot, base.oriented(rotated), self.registry.id_of(payload))
    }

    /// First-fit placement for `payload`, ignoring the filter.
    ///
    /// For a payload that is not stored this is where [`add`](Self::add)
    /// would put it. For a stored payload [`add`](Self::add) would return
    /// `Ok(false)`; the result is then a relocation forecast: the first
    /// placement [`move_to`](Self::move_to) would accept, counting the
    /// element's own cells as free.
    pub fn find_space(&self, payload: &P) -> Option<Placement> {
        let base = self.size_of(payload);
        if !base.is_physical() {
            return None;
        }
        self.search(base, self.registry.id_of(payload))
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Whether `payload` is stored.
    pub fn contains(&self, payload: &P) -> bool {
        self.registry.contains(payload)
    }

    /// Snapshot of the element storing `payload`.
    pub fn find(&self, payload: &P) -> Option<Element<P>> {
        self.registry.find(payload).map(|r| self.snapshot(r))
    }

    /// Snapshot of the first element, in insertion order, whose payload
    /// satisfies `pred`.
    pub fn find_by(&self, mut pred: impl FnMut(&P) -> bool) -> Option<Element<P>> {
        self.registry
            .iter()
            .find(|r| pred(&r.payload))
            .map(|r| self.snapshot(r))
    }

    /// Snapshot of the element covering `slot`, or `Ok(None)` if empty.
    pub fn get(&self, slot: Position) -> Result<Option<Element<P>>, InventoryError> {
        self.check_slot(slot)?;
        Ok(self
            .grid
            .owner_at(slot)
            .and_then(|id| self.registry.get(id))
            .map(|r| self.snapshot(r)))
    }

    /// Snapshots of every element, in insertion order.
    pub fn get_all(&self) -> Vec<Element<P>> {
        self.registry.iter().map(|r| self.snapshot(r)).collect()
    }

    /// Whether the stored `payload` is turned 90°.
    pub fn is_rotated(&self, payload: &P) -> Result<bool, InventoryError> {
        self.registry
            .find(payload)
            .map(|r| r.rotated)
            .ok_or(InventoryError::NotFound)
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// The owner ID the next insertion will receive: the smallest unused
    /// positive value. `None` only if the ID space is exhausted.
    pub fn next_id(&self) -> Option<OwnerId> {
        self.registry.next_id()
    }

    /// Number of unclaimed cells.
    pub fn free_cells(&self) -> usize {
        self.grid.cell_count() - self.grid.occupied_count()
    }

    /// Read-only view of the occupancy grid.
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Debug dump of the grid; see [`OccupancyGrid`]'s `Display`.
    pub fn dump(&self) -> String {
        self.grid.to_string()
    }

    // ── Internals ──────────────────────────────────────────────────

    fn checked_size(&self, payload: &P) -> Result<Extent, InventoryError> {
        let size = self.size_of(payload);
        if size.is_physical() {
            Ok(size)
        } else {
            Err(InventoryError::InvalidSize { size })
        }
    }

    fn check_slot(&self, slot: Position) -> Result<(), InventoryError> {
        if self.grid.in_bounds(slot) {
            Ok(())
        } else {
            Err(InventoryError::SlotOutOfBounds {
                slot,
                width: self.grid.width(),
                height: self.grid.height(),
            })
        }
    }

    /// First-fit scan for a physical `base` size.
    fn search(&self, base: Extent, ignore: Option<OwnerId>) -> Option<Placement> {
        let rotated = base.rotated();
        let try_rotated = !base.is_square();
        self.grid.anchors().find_map(|anchor| {
            if self.grid.fits(anchor, base, ignore) {
                Some(Placement {
                    anchor,
                    rotated: false,
                })
            } else if try_rotated && self.grid.fits(anchor, rotated, ignore) {
                Some(Placement {
                    anchor,
                    rotated: true,
                })
            } else {
                None
            }
        })
    }

    /// Policy checks plus first-fit placement, without notifying.
    ///
    /// `Ok(None)` covers every expected rejection.
    fn place_first_fit(&mut self, payload: P) -> Result<Option<OwnerId>, InventoryError> {
        if !self.accepts(&payload) {
            trace!("add rejected by filter");
            return Ok(None);
        }
        let base = self.checked_size(&payload)?;
        if self.registry.contains(&payload) {
            trace!("add rejected: already stored");
            return Ok(None);
        }
        let Some(placement) = self.search(base, None) else {
            trace!(w = base.w, h = base.h, "no space");
            return Ok(None);
        };
        self.place(payload, placement, base).map(Some)
    }

    /// Register and stamp. The caller has already verified the fit.
    fn place(
        &mut self,
        payload: P,
        placement: Placement,
        base: Extent,
    ) -> Result<OwnerId, InventoryError> {
        let Placement { anchor, rotated } = placement;
        let id = self.registry.insert(payload, anchor, rotated)?;
        self.grid.stamp(anchor, base.oriented(rotated), Some(id));
        debug!(%id, x = anchor.x, y = anchor.y, rotated, "element added");
        Ok(id)
    }

    /// Free the footprint and unregister, emitting a removal event.
    fn remove_id(&mut self, id: OwnerId) -> Option<P> {
        let snapshot = self.registry.get(id).map(|r| self.snapshot(r))?;
        let record = self.unplace(id)?;
        debug!(%id, "element removed");
        self.notifier.emit(&ChangeEvent::new(
            ChangeKind::Removed,
            SmallVec::from_elem(snapshot, 1),
        ));
        Some(record.payload)
    }

    /// Free the footprint and unregister, without notifying.
    fn unplace(&mut self, id: OwnerId) -> Option<ElementRecord<P>> {
        let record = self.registry.get(id)?;
        let footprint = record.footprint(self.size_of(&record.payload));
        self.grid.stamp(footprint.anchor, footprint.size, None);
        self.registry.remove(id)
    }

    /// Undo a partial batch, newest first.
    fn rollback(&mut self, placed: &[OwnerId]) {
        if placed.is_empty() {
            return;
        }
        trace!(count = placed.len(), "rolling back batch");
        for &id in placed.iter().rev() {
            self.unplace(id);
        }
    }

    fn snapshot(&self, record: &ElementRecord<P>) -> Element<P> {
        Element::snapshot(record, self.size_of(&record.payload))
    }

    fn emit_for(&mut self, kind: ChangeKind, ids: &[OwnerId]) {
        let elements: SmallVec<[Element<P>; 1]> = ids
            .iter()
            .filter_map(|&id| self.registry.get(id))
            .map(|r| self.snapshot(r))
            .collect();
        self.notifier.emit(&ChangeEvent::new(kind, elements));
    }
}

impl<P> fmt::Debug for Inventory<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inventory")
            .field("config", &self.config)
            .field("grid", &self.grid)
            .field("filtered", &self.filter.is_some())
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::IdPool;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Payloads are `(tag, w, h)`; the tag keeps identities distinct.
    type Box3 = (u32, i32, i32);

    fn inv(w: u32, h: u32) -> Inventory<Box3> {
        Inventory::new(InventoryConfig::new(w, h), |p: &Box3| Extent::new(p.1, p.2)).unwrap()
    }

    fn events(inv: &mut Inventory<Box3>) -> Rc<RefCell<Vec<(ChangeKind, Vec<u32>)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        inv.subscribe(move |ev: &ChangeEvent<Box3>| {
            let tags = ev.elements().iter().map(|e| e.payload().0).collect();
            sink.borrow_mut().push((ev.kind(), tags));
        });
        log
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Inventory::new(InventoryConfig::new(0, 3), |p: &Box3| Extent::new(p.1, p.2));
        assert!(matches!(err, Err(ConfigError::ZeroDimension { name: "width" })));
    }

    #[test]
    fn add_prefers_unrotated_at_same_anchor() {
        let mut inv = inv(3, 3);
        assert!(inv.add((1, 1, 3)).unwrap());
        assert_eq!(inv.find(&(1, 1, 3)).unwrap().anchor(), Position::ORIGIN);
        assert!(!inv.is_rotated(&(1, 1, 3)).unwrap());
    }

    #[test]
    fn add_falls_back_to_rotated() {
        // A 1x3 bar in a 3x1 grid only fits lying down.
        let mut inv = inv(3, 1);
        assert!(inv.add((1, 1, 3)).unwrap());
        assert!(inv.is_rotated(&(1, 1, 3)).unwrap());
        assert_eq!(inv.dump(), "1 1 1\n");
    }

    #[test]
    fn duplicate_identity_rejected_without_mutation() {
        let mut inv = inv(4, 4);
        let log = events(&mut inv);
        assert!(inv.add((7, 1, 1)).unwrap());
        let before = inv.grid().clone();
        assert!(!inv.add((7, 1, 1)).unwrap());
        assert!(!inv.add_at((7, 1, 1), Position::new(3, 3), false).unwrap());
        assert_eq!(inv.grid(), &before);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn invalid_size_errors_before_mutation() {
        let mut inv = inv(4, 4);
        assert_eq!(
            inv.add((1, 0, 2)),
            Err(InventoryError::InvalidSize {
                size: Extent::new(0, 2)
            })
        );
        assert!(inv.is_empty());
        assert!(inv.grid().is_clear());
    }

    #[test]
    fn filter_checked_before_size_and_identity() {
        let mut inv = inv(4, 4).with_filter(|p: &Box3| p.0 != 9);
        // Rejected by filter even though the size is bad.
        assert_eq!(inv.add((9, 0, 0)), Ok(false));
        assert_eq!(inv.add_at((9, -1, 1), Position::ORIGIN, false), Ok(false));
        inv.reset_filter();
        assert!(inv.add_at((9, 1, 1), Position::ORIGIN, false).unwrap());
    }

    #[test]
    fn filter_is_not_retroactive() {
        let mut inv = inv(4, 4);
        assert!(inv.add((1, 1, 1)).unwrap());
        inv.set_filter(|_: &Box3| false);
        assert!(inv.contains(&(1, 1, 1)));
        assert!(inv.move_to(&(1, 1, 1), Position::new(3, 3), false).unwrap());
        assert!(!inv.add((2, 1, 1)).unwrap());
    }

    #[test]
    fn add_at_checks_only_the_requested_orientation() {
        let mut inv = inv(4, 2);
        assert!(!inv.add_at((1, 1, 3), Position::ORIGIN, false).unwrap());
        assert!(inv.add_at((1, 1, 3), Position::ORIGIN, true).unwrap());
        assert_eq!(inv.dump(), "1 1 1 0\n0 0 0 0\n");
    }

    #[test]
    fn move_unknown_payload_is_not_found() {
        let mut inv = inv(4, 4);
        assert_eq!(
            inv.move_to(&(1, 1, 1), Position::ORIGIN, false),
            Err(InventoryError::NotFound)
        );
        assert_eq!(inv.is_rotated(&(1, 1, 1)), Err(InventoryError::NotFound));
    }

    #[test]
    fn failed_move_leaves_grid_untouched() {
        let mut inv = inv(4, 4);
        let log = events(&mut inv);
        inv.add((1, 2, 2)).unwrap();
        inv.add((2, 2, 2)).unwrap();
        let before = inv.grid().clone();
        assert!(!inv.move_to(&(1, 2, 2), Position::new(1, 0), false).unwrap());
        assert!(!inv.move_to(&(1, 2, 2), Position::new(3, 3), false).unwrap());
        assert_eq!(inv.grid(), &before);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn move_slides_over_own_cells() {
        let mut inv = inv(4, 4);
        let log = events(&mut inv);
        inv.add((1, 2, 1)).unwrap();
        assert!(inv.move_to(&(1, 2, 1), Position::new(1, 0), false).unwrap());
        assert_eq!(inv.dump(), "0 1 1 0\n0 0 0 0\n0 0 0 0\n0 0 0 0\n");
        assert_eq!(log.borrow().last().unwrap(), &(ChangeKind::Moved, vec![1]));
    }

    #[test]
    fn remove_at_errors_on_bad_slots() {
        let mut inv = inv(2, 2);
        assert_eq!(
            inv.remove_at(Position::new(0, 0)),
            Err(InventoryError::EmptySlot {
                slot: Position::ORIGIN
            })
        );
        assert!(matches!(
            inv.remove_at(Position::new(2, 0)),
            Err(InventoryError::SlotOutOfBounds { .. })
        ));
        assert!(matches!(
            inv.get(Position::new(0, -1)),
            Err(InventoryError::SlotOutOfBounds { .. })
        ));
    }

    #[test]
    fn remove_at_any_covered_cell() {
        let mut inv = inv(3, 3);
        inv.add((5, 2, 2)).unwrap();
        assert_eq!(inv.remove_at(Position::new(1, 1)), Ok((5, 2, 2)));
        assert!(inv.grid().is_clear());
    }

    #[test]
    fn remove_absent_returns_none() {
        let mut inv = inv(3, 3);
        let log = events(&mut inv);
        assert_eq!(inv.remove(&(1, 1, 1)), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn removed_id_reused_by_next_add() {
        let mut inv = inv(4, 4);
        inv.add((1, 1, 1)).unwrap();
        inv.add((2, 1, 1)).unwrap();
        inv.add((3, 1, 1)).unwrap();
        inv.remove(&(2, 1, 1));
        inv.add((4, 1, 1)).unwrap();
        assert_eq!(inv.find(&(4, 1, 1)).unwrap().id().get(), 2);
    }

    #[test]
    fn batch_rolls_back_on_invalid_size() {
        let mut inv = inv(4, 4);
        let log = events(&mut inv);
        let before = inv.grid().clone();
        let result = inv.try_add_all(vec![(1, 1, 1), (2, 2, 2), (3, 0, 1)]);
        assert_eq!(
            result,
            Err(InventoryError::InvalidSize {
                size: Extent::new(0, 1)
            })
        );
        assert_eq!(inv.grid(), &before);
        assert!(inv.is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn batch_rejects_duplicates_within_itself() {
        let mut inv = inv(4, 4);
        assert_eq!(inv.try_add_all(vec![(1, 1, 1), (1, 1, 1)]), Ok(false));
        assert!(inv.is_empty());
    }

    #[test]
    fn batch_rolls_back_on_id_exhaustion() {
        let mut inv = inv(4, 4);
        inv.registry = ElementRegistry::with_id_pool(IdPool::with_limit(2));
        assert!(inv.add((1, 1, 1)).unwrap());
        let before = inv.grid().clone();
        assert_eq!(
            inv.try_add_all(vec![(2, 1, 1), (3, 1, 1)]),
            Err(InventoryError::IdSpaceExhausted)
        );
        assert_eq!(inv.grid(), &before);
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.registry.next_id().map(OwnerId::get), Some(2));
    }

    #[test]
    fn empty_batch_succeeds_silently() {
        let mut inv = inv(2, 2);
        let log = events(&mut inv);
        assert_eq!(inv.try_add_all(Vec::new()), Ok(true));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_add_never_mutates() {
        let mut inv = inv(4, 4);
        inv.add((1, 2, 2)).unwrap();
        let before = inv.grid().clone();
        assert!(inv.test_add(Position::new(2, 0), &(2, 2, 2), false));
        assert!(!inv.test_add(Position::new(1, 0), &(2, 2, 2), false));
        // Own cells are ignored for a stored payload.
        assert!(inv.test_add(Position::new(1, 0), &(1, 2, 2), false));
        assert!(!inv.test_add(Position::ORIGIN, &(3, 0, 2), false));
        assert_eq!(inv.grid(), &before);
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_add_respects_filter() {
        let inv = inv(4, 4).with_filter(|p: &Box3| p.1 == 1);
        assert!(inv.test_add(Position::ORIGIN, &(1, 1, 2), false));
        assert!(!inv.test_add(Position::ORIGIN, &(1, 2, 2), false));
    }

    #[test]
    fn find_space_matches_add() {
        let mut inv = inv(4, 4);
        inv.add((1, 3, 1)).unwrap();
        let expected = inv.find_space(&(2, 2, 3)).unwrap();
        assert_eq!(
            expected,
            Placement {
                anchor: Position::new(0, 1),
                rotated: false
            }
        );
        inv.add((2, 2, 3)).unwrap();
        let stored = inv.find(&(2, 2, 3)).unwrap();
        assert_eq!(stored.anchor(), expected.anchor);
        assert_eq!(stored.is_rotated(), expected.rotated);
    }

    #[test]
    fn clear_emits_one_event_for_everything() {
        let mut inv = inv(4, 4);
        let log = events(&mut inv);
        inv.try_add_all(vec![(1, 1, 1), (2, 2, 1), (3, 1, 2)]).unwrap();
        let payloads = inv.clear();
        assert_eq!(payloads, vec![(1, 1, 1), (2, 2, 1), (3, 1, 2)]);
        assert!(inv.grid().is_clear());
        assert!(inv.is_empty());
        assert_eq!(
            *log.borrow(),
            vec![
                (ChangeKind::Added, vec![1, 2, 3]),
                (ChangeKind::Removed, vec![1, 2, 3]),
            ]
        );
        assert!(inv.clear().is_empty());
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn find_by_and_get_all_use_insertion_order() {
        let mut inv = inv(4, 4);
        inv.add((10, 1, 1)).unwrap();
        inv.add((20, 2, 1)).unwrap();
        inv.add((30, 2, 1)).unwrap();
        let found = inv.find_by(|p| p.1 == 2).unwrap();
        assert_eq!(found.payload().0, 20);
        let tags: Vec<u32> = inv.get_all().iter().map(|e| e.payload().0).collect();
        assert_eq!(tags, vec![10, 20, 30]);
        assert_eq!(inv.free_cells(), 16 - 5);
    }

    #[test]
    fn snapshot_is_decoupled_from_later_moves() {
        let mut inv = inv(4, 4);
        inv.add((1, 1, 1)).unwrap();
        let before = inv.find(&(1, 1, 1)).unwrap();
        inv.move_to(&(1, 1, 1), Position::new(2, 2), false).unwrap();
        assert_eq!(before.anchor(), Position::ORIGIN);
        assert_eq!(inv.find(&(1, 1, 1)).unwrap().anchor(), Position::new(2, 2));
    }

    #[test]
    fn find_space_for_stored_payload_forecasts_relocation() {
        let mut inv = inv(3, 2);
        inv.add_at((1, 2, 1), Position::new(1, 1), false).unwrap();
        let forecast = inv.find_space(&(1, 2, 1)).unwrap();
        assert_eq!(
            forecast,
            Placement {
                anchor: Position::ORIGIN,
                rotated: false
            }
        );
        let before = inv.grid().clone();
        assert_eq!(inv.add((1, 2, 1)), Ok(false));
        assert_eq!(inv.grid(), &before);
        assert!(inv
            .move_to(&(1, 2, 1), forecast.anchor, forecast.rotated)
            .unwrap());
        assert_eq!(inv.dump(), "1 1 0\n0 0 0\n");
    }

    #[test]
    fn unsubscribed_listener_gets_nothing() {
        let mut inv = inv(4, 4);
        let log = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&log);
        let id = inv.subscribe(move |_: &ChangeEvent<Box3>| *sink.borrow_mut() += 1);
        inv.add((1, 1, 1)).unwrap();
        assert!(inv.unsubscribe(id));
        assert!(!inv.unsubscribe(id));
        inv.add((2, 1, 1)).unwrap();
        inv.clear();
        assert_eq!(*log.borrow(), 1);
    }
}
