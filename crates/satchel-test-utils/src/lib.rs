//! Test utilities and fixtures for Satchel development.
//!
//! Provides item fixtures ([`Item`], [`item`], [`inventory_of`]), a
//! [`RecordingListener`] that captures change events, and
//! [`check_consistent`]/[`assert_consistent`] for verifying that an
//! inventory's grid and element registry agree.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::RefCell;
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use satchel_core::{OwnerId, Position};
use satchel_engine::{ChangeEvent, ChangeKind, Inventory};

pub use fixtures::{inventory_of, item, Item, TestItem};

/// Captures every change event an inventory emits.
///
/// Clones share the same log, so one copy can be moved into the inventory
/// while the test keeps another for assertions.
pub struct RecordingListener<P> {
    events: Rc<RefCell<Vec<ChangeEvent<P>>>>,
}

impl<P: Clone + Eq + Hash + 'static> RecordingListener<P> {
    /// Subscribe a new recorder to `inventory`.
    pub fn attach(inventory: &mut Inventory<P>) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        inventory.subscribe(move |event: &ChangeEvent<P>| {
            sink.borrow_mut().push(event.clone());
        });
        Self { events }
    }

    /// All recorded events, oldest first.
    pub fn events(&self) -> Vec<ChangeEvent<P>> {
        self.events.borrow().clone()
    }

    /// Kinds of all recorded events, oldest first.
    pub fn kinds(&self) -> Vec<ChangeKind> {
        self.events.borrow().iter().map(|e| e.kind()).collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// The most recent event.
    pub fn last(&self) -> Option<ChangeEvent<P>> {
        self.events.borrow().last().cloned()
    }

    /// Forget everything recorded so far.
    pub fn reset(&self) {
        self.events.borrow_mut().clear();
    }
}

impl<P> Clone for RecordingListener<P> {
    fn clone(&self) -> Self {
        Self {
            events: Rc::clone(&self.events),
        }
    }
}

/// Verify the grid/registry invariant.
///
/// For every stored element, each footprint cell lies inside the grid and
/// holds that element's ID; every other cell is empty; IDs are distinct;
/// and every claimed cell resolves back to its element through `get`.
pub fn check_consistent<P: Clone + Eq + Hash>(inventory: &Inventory<P>) -> Result<(), String> {
    let grid = inventory.grid();
    let elements = inventory.get_all();
    let mut seen: HashSet<OwnerId> = HashSet::new();
    let mut expected = vec![0u32; grid.cell_count()];

    for element in &elements {
        if !seen.insert(element.id()) {
            return Err(format!("duplicate owner id {}", element.id()));
        }
        let footprint = element.footprint();
        if !grid.contains_footprint(&footprint) {
            return Err(format!(
                "element {} footprint {:?} leaves the grid",
                element.id(),
                footprint
            ));
        }
        for cell in footprint.cells() {
            let idx = cell.y as usize * grid.width() as usize + cell.x as usize;
            if expected[idx] != 0 {
                return Err(format!(
                    "elements {} and {} overlap at {cell}",
                    expected[idx],
                    element.id()
                ));
            }
            expected[idx] = element.id().get();
        }
    }

    if grid.cells() != expected.as_slice() {
        return Err(format!(
            "grid does not match registry\n  grid:\n{}",
            inventory.dump()
        ));
    }

    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let slot = Position::new(x, y);
            let via_get = inventory
                .get(slot)
                .map_err(|e| format!("get({slot}) failed: {e}"))?
                .map(|e| e.id());
            if via_get != grid.owner_at(slot) {
                return Err(format!("get({slot}) disagrees with grid"));
            }
        }
    }

    if inventory.len() != elements.len() {
        return Err("len() disagrees with get_all()".to_string());
    }
    Ok(())
}

/// Panic with a readable message if [`check_consistent`] fails.
pub fn assert_consistent<P: Clone + Eq + Hash>(inventory: &Inventory<P>) {
    if let Err(msg) = check_consistent(inventory) {
        panic!("inventory inconsistent: {msg}");
    }
}
