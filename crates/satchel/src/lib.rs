//! Satchel: a grid inventory engine for rectangular items.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Satchel sub-crates. For most users, adding `satchel` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use satchel::prelude::*;
//!
//! // Payloads are compared by identity, so wrap them in an `ItemRef`.
//! #[derive(Debug)]
//! struct Gear {
//!     name: &'static str,
//!     size: Extent,
//! }
//!
//! let mut pack = Inventory::new(InventoryConfig::new(4, 4), |g: &ItemRef<Gear>| g.size).unwrap();
//! let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
//! let sink = log.clone();
//! pack.subscribe(move |ev: &ChangeEvent<ItemRef<Gear>>| sink.borrow_mut().push(ev.kind()));
//!
//! let rifle = ItemRef::new(Gear { name: "rifle", size: Extent::new(1, 4) });
//! let medkit = ItemRef::new(Gear { name: "medkit", size: Extent::new(2, 2) });
//! assert!(pack.add(rifle.clone()).unwrap());
//! assert!(pack.add(medkit.clone()).unwrap());
//! assert_eq!(pack.find(&medkit).unwrap().anchor(), Position::new(1, 0));
//!
//! // Lay the rifle flat along the bottom row.
//! assert!(pack.move_to(&rifle, Position::new(0, 3), true).unwrap());
//! assert_eq!(pack.find(&rifle).unwrap().payload().name, "rifle");
//! assert_eq!(*log.borrow(), vec![ChangeKind::Added, ChangeKind::Added, ChangeKind::Moved]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `satchel-core` | Coordinates, extents, footprints, owner IDs, errors |
//! | [`grid`] | `satchel-grid` | The occupancy grid |
//! | [`engine`] | `satchel-engine` | Inventory, configuration, change events |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types and errors (`satchel-core`).
///
/// Contains [`types::Position`], [`types::Extent`], [`types::Footprint`],
/// [`types::OwnerId`], the [`types::ItemRef`] identity handle, and the
/// error enums.
pub use satchel_core as types;

/// The occupancy grid (`satchel-grid`).
///
/// [`grid::OccupancyGrid`] records which owner claims each cell. Most users
/// only read it through [`engine::Inventory::grid`].
pub use satchel_grid as grid;

/// Placement engine (`satchel-engine`).
///
/// [`engine::Inventory`] for placement, [`engine::ChangeEvent`] and
/// [`engine::Element`] for notifications and snapshots.
pub use satchel_engine as engine;

/// Common imports for typical Satchel usage.
///
/// ```rust
/// use satchel::prelude::*;
/// ```
///
/// This imports the inventory and its configuration, the coordinate types,
/// the identity handle, change events and errors.
pub mod prelude {
    // Core types
    pub use satchel_core::{Extent, Footprint, ItemRef, OwnerId, Position};

    // Errors
    pub use satchel_core::{ConfigError, InventoryError};

    // Engine
    pub use satchel_engine::{
        ChangeEvent, ChangeKind, Element, Inventory, InventoryConfig, Placement, SubscriberId,
    };
}
