//! The rectangle of cells an element covers.

use crate::coord::{Extent, Position};

/// An axis-aligned rectangle anchored at its minimum-x, minimum-y cell.
///
/// Covers `[anchor.x, anchor.x + size.w) × [anchor.y, anchor.y + size.h)`.
/// The `size` is already oriented: callers apply rotation before building
/// a footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Footprint {
    /// Minimum-x, minimum-y cell.
    pub anchor: Position,
    /// Oriented size.
    pub size: Extent,
}

impl Footprint {
    /// Create a footprint from an anchor and an oriented size.
    pub const fn new(anchor: Position, size: Extent) -> Self {
        Self { anchor, size }
    }

    /// Exclusive right edge, widened to avoid `i32` overflow.
    pub fn right(&self) -> i64 {
        self.anchor.x as i64 + self.size.w as i64
    }

    /// Exclusive bottom edge, widened to avoid `i32` overflow.
    pub fn bottom(&self) -> i64 {
        self.anchor.y as i64 + self.size.h as i64
    }

    /// `true` if `pos` lies inside the rectangle.
    pub fn contains(&self, pos: Position) -> bool {
        self.size.is_physical()
            && pos.x >= self.anchor.x
            && pos.y >= self.anchor.y
            && (pos.x as i64) < self.right()
            && (pos.y as i64) < self.bottom()
    }

    /// `true` if the two rectangles share at least one cell.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.size.is_physical()
            && other.size.is_physical()
            && (self.anchor.x as i64) < other.right()
            && (other.anchor.x as i64) < self.right()
            && (self.anchor.y as i64) < other.bottom()
            && (other.anchor.y as i64) < self.bottom()
    }

    /// Every covered cell in row-major order. Empty for a non-physical size.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let Footprint { anchor, size } = *self;
        let (w, h) = if size.is_physical() {
            (size.w, size.h)
        } else {
            (0, 0)
        };
        (0..h).flat_map(move |dy| {
            (0..w).map(move |dx| Position::new(anchor.x + dx, anchor.y + dy))
        })
    }
}
