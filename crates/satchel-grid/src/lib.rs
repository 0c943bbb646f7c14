//! Occupancy grid for the Satchel inventory engine.
//!
//! [`OccupancyGrid`] is the single source of truth for which cells of an
//! inventory are claimed and by whom. It offers exactly two primitives:
//! a fit test ([`OccupancyGrid::fits`]) and an unchecked writer
//! ([`OccupancyGrid::stamp`]). Element bookkeeping lives one layer up in
//! `satchel-engine`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;

pub use grid::OccupancyGrid;
