//! Reusable item fixtures and inventory builders.
//!
//! - [`Item`]: a named payload with a fixed extent.
//! - [`item`]: build an [`ItemRef<Item>`] handle in one call.
//! - [`inventory_of`]: an empty inventory sized by [`Item::size`].

use satchel_core::{Extent, ItemRef};
use satchel_engine::{Inventory, InventoryConfig};

/// A test payload: a label and an unrotated size.
///
/// Stored behind [`ItemRef`], so two items with the same name and size are
/// still distinct payloads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub size: Extent,
}

impl Item {
    pub fn new(name: impl Into<String>, w: i32, h: i32) -> Self {
        Self {
            name: name.into(),
            size: Extent::new(w, h),
        }
    }
}

/// Handle type used throughout the workspace tests.
pub type TestItem = ItemRef<Item>;

/// Build a fresh item handle.
pub fn item(name: &str, w: i32, h: i32) -> TestItem {
    ItemRef::new(Item::new(name, w, h))
}

/// An empty `width × height` inventory of [`TestItem`]s.
///
/// # Panics
///
/// Panics if the dimensions are invalid.
pub fn inventory_of(width: u32, height: u32) -> Inventory<TestItem> {
    Inventory::new(InventoryConfig::new(width, height), |i: &TestItem| i.size)
        .expect("test inventory dimensions must be valid")
}
