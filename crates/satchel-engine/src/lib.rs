//! Placement engine for Satchel grid inventories.
//!
//! This crate owns everything above the raw occupancy grid:
//!
//! - [`Inventory`]: fit testing, first-fit search, single and batch
//!   insertion, relocation, removal and forecasts.
//! - [`ChangeEvent`] with [`Element`] snapshots: synchronous
//!   added/moved/removed notifications, delivered to listeners registered
//!   through [`Inventory::subscribe`].
//! - [`InventoryConfig`]: grid dimensions and their validation.
//!
//! The element registry and owner-ID pool are internal; read paths always
//! return snapshots so callers cannot desynchronize grid and registry.
//!
//! Everything is single-threaded and synchronous. An inventory has no
//! internal locking; callers sharing one across threads serialize access
//! themselves.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod inventory;
pub mod notify;
mod registry;

pub use config::InventoryConfig;
pub use inventory::{FilterFn, Inventory, Placement, SizeFn};
pub use notify::{ChangeEvent, ChangeKind, Element, SubscriberId};
