//! Inventory configuration and validation.
//!
//! [`InventoryConfig`] is the builder-input for constructing an
//! [`Inventory`](crate::Inventory). [`validate()`](InventoryConfig::validate)
//! checks the grid dimensions before any allocation happens.

use satchel_core::ConfigError;
use satchel_grid::OccupancyGrid;

/// Grid dimensions for an inventory. Immutable once the inventory exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Number of columns. Must be in `1..=i32::MAX`.
    pub width: u32,
    /// Number of rows. Must be in `1..=i32::MAX`.
    pub height: u32,
}

impl InventoryConfig {
    /// Default width in cells.
    pub const DEFAULT_WIDTH: u32 = 10;

    /// Default height in cells.
    pub const DEFAULT_HEIGHT: u32 = 10;

    /// Create a config for a `width × height` grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cell_count().map(|_| ())
    }

    /// Total number of cells, or the reason the dimensions are invalid.
    pub fn cell_count(&self) -> Result<usize, ConfigError> {
        OccupancyGrid::check_dimensions(self.width, self.height)
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}
