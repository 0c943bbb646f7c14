//! Fixed-size occupancy grid of owner IDs.

use std::fmt;

use satchel_core::{ConfigError, Extent, Footprint, OwnerId, Position};

/// A `width × height` array of owner IDs, stored row-major.
///
/// Each cell holds the raw value of the [`OwnerId`] that claims it, or `0`
/// when empty. The grid knows nothing about elements; keeping it consistent
/// with a registry is the caller's job. [`fits`](Self::fits) is the only
/// check and [`stamp`](Self::stamp) the only writer.
///
/// # Examples
///
/// ```
/// use satchel_core::{Extent, OwnerId, Position};
/// use satchel_grid::OccupancyGrid;
///
/// let mut grid = OccupancyGrid::new(4, 3).unwrap();
/// let id = OwnerId::new(1).unwrap();
/// assert!(grid.fits(Position::new(0, 0), Extent::new(2, 2), None));
///
/// grid.stamp(Position::new(0, 0), Extent::new(2, 2), Some(id));
/// assert!(!grid.fits(Position::new(1, 1), Extent::new(2, 2), None));
/// assert!(grid.fits(Position::new(1, 1), Extent::new(2, 2), Some(id)));
/// assert_eq!(grid.to_string(), "1 1 0 0\n1 1 0 0\n0 0 0 0\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    cells: Vec<u32>,
}

impl OccupancyGrid {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create an empty grid.
    ///
    /// Returns `Err(ConfigError::ZeroDimension)` if either dimension is 0,
    /// `Err(ConfigError::DimensionTooLarge)` if either exceeds `i32::MAX`,
    /// or `Err(ConfigError::CellCountOverflow)` if the cell count is not
    /// addressable.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        let cell_count = Self::check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![0; cell_count],
        })
    }

    /// Validate grid dimensions and return the cell count.
    pub fn check_dimensions(width: u32, height: u32) -> Result<usize, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroDimension { name: "width" });
        }
        if height == 0 {
            return Err(ConfigError::ZeroDimension { name: "height" });
        }
        if width > Self::MAX_DIM {
            return Err(ConfigError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(ConfigError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        let value = width as u64 * height as u64;
        usize::try_from(value).map_err(|_| ConfigError::CellCountOverflow { value })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// `true` if `pos` addresses a cell of this grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// `true` if the whole footprint lies inside the grid.
    pub fn contains_footprint(&self, footprint: &Footprint) -> bool {
        footprint.size.is_physical()
            && footprint.anchor.x >= 0
            && footprint.anchor.y >= 0
            && footprint.right() <= self.width as i64
            && footprint.bottom() <= self.height as i64
    }

    /// Owner of the cell at `pos`, or `None` if empty or out of bounds.
    pub fn owner_at(&self, pos: Position) -> Option<OwnerId> {
        if !self.in_bounds(pos) {
            return None;
        }
        OwnerId::new(self.cells[self.index(pos)])
    }

    /// Whether a footprint of `size` anchored at `anchor` can be claimed.
    ///
    /// Returns `false` if `size` is not physical, if the footprint leaves
    /// the grid, or if any covered cell is held by an owner other than
    /// `ignore`. Passing the owner's own ID as `ignore` lets an element
    /// slide or rotate into cells it already covers.
    pub fn fits(&self, anchor: Position, size: Extent, ignore: Option<OwnerId>) -> bool {
        let footprint = Footprint::new(anchor, size);
        if !self.contains_footprint(&footprint) {
            return false;
        }
        let ignore = ignore.map_or(0, OwnerId::get);
        let (x0, y0) = (anchor.x as usize, anchor.y as usize);
        let (w, h) = (size.w as usize, size.h as usize);
        let stride = self.width as usize;
        (y0..y0 + h).all(|y| {
            let row = &self.cells[y * stride + x0..y * stride + x0 + w];
            row.iter().all(|&c| c == 0 || c == ignore)
        })
    }

    /// Write `owner` (or empty, for `None`) into every covered cell.
    ///
    /// Performs no overlap checking: callers validate with
    /// [`fits`](Self::fits) first. A non-physical `size` writes nothing.
    ///
    /// # Panics
    ///
    /// Panics if the footprint extends outside the grid.
    pub fn stamp(&mut self, anchor: Position, size: Extent, owner: Option<OwnerId>) {
        let footprint = Footprint::new(anchor, size);
        if !footprint.size.is_physical() {
            return;
        }
        assert!(
            self.contains_footprint(&footprint),
            "stamp outside grid: anchor {anchor}, size {size}, grid {}x{}",
            self.width,
            self.height
        );
        let raw = owner.map_or(0, OwnerId::get);
        let (x0, y0) = (anchor.x as usize, anchor.y as usize);
        let (w, h) = (size.w as usize, size.h as usize);
        let stride = self.width as usize;
        for y in y0..y0 + h {
            self.cells[y * stride + x0..y * stride + x0 + w].fill(raw);
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Raw row-major cell values (`0` = empty).
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Raw values of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u32] {
        let stride = self.width as usize;
        let start = y as usize * stride;
        &self.cells[start..start + stride]
    }

    /// Number of claimed cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// `true` when no cell is claimed.
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Row-major scan of candidate anchors: `(0,0), (1,0), ..., (w-1,h-1)`.
    pub fn anchors(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }
}

/// Debug dump: one line per row, IDs space-separated, rows in increasing y.
///
/// This is an inspection aid and not a stable format.
impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let mut first = true;
            for cell in self.row(y) {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{cell}")?;
                first = false;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
