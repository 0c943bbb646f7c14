//! Core types for the Satchel grid inventory engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental values used throughout the Satchel workspace:
//! grid coordinates and extents, footprints, owner IDs, the identity
//! handle for stored items, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod error;
pub mod footprint;
pub mod handle;
pub mod id;

pub use coord::{Extent, Position};
pub use error::{ConfigError, InventoryError, ParseCoordError};
pub use footprint::Footprint;
pub use handle::ItemRef;
pub use id::OwnerId;
