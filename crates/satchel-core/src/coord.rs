//! Grid positions and 2D extents.
//!
//! Both types share the same textual grammar: two whitespace-separated
//! integers (`"3 4"`), formatted back as `<3, 4>`.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseCoordError;

/// A cell address in an inventory grid.
///
/// The valid range for a grid of `width × height` is
/// `[0, width) × [0, height)`. Negative values are representable so that
/// out-of-range requests can be expressed and rejected instead of wrapped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Position {
    /// The origin cell `(0, 0)`.
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    /// Create a position from column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

impl FromStr for Position {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = parse_pair(s)?;
        Ok(Self { x, y })
    }
}

/// A two-dimensional size in cells.
///
/// An extent is *physical* when both dimensions are strictly positive.
/// Only physical extents can occupy grid cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extent {
    /// Width in cells.
    pub w: i32,
    /// Height in cells.
    pub h: i32,
}

impl Extent {
    /// Create an extent from width and height.
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// `true` when both dimensions are strictly positive.
    pub const fn is_physical(&self) -> bool {
        self.w > 0 && self.h > 0
    }

    /// The extent turned 90°: width and height swapped.
    pub const fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }

    /// The extent in the requested orientation.
    pub const fn oriented(&self, rotated: bool) -> Self {
        if rotated {
            self.rotated()
        } else {
            *self
        }
    }

    /// `true` when rotating changes nothing (`w == h`).
    pub const fn is_square(&self) -> bool {
        self.w == self.h
    }

    /// Number of cells covered, or 0 for a non-physical extent.
    pub fn area(&self) -> u64 {
        if self.is_physical() {
            self.w as u64 * self.h as u64
        } else {
            0
        }
    }
}

impl From<(i32, i32)> for Extent {
    fn from((w, h): (i32, i32)) -> Self {
        Self { w, h }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.w, self.h)
    }
}

impl FromStr for Extent {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = parse_pair(s)?;
        Ok(Self { w, h })
    }
}

/// Parse exactly two whitespace-separated `i32` tokens.
fn parse_pair(s: &str) -> Result<(i32, i32), ParseCoordError> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(ParseCoordError::WrongArity {
            found: tokens.len(),
        });
    }
    let parse = |token: &str| {
        token
            .parse::<i32>()
            .map_err(|_| ParseCoordError::InvalidInteger {
                token: token.to_string(),
            })
    };
    Ok((parse(tokens[0])?, parse(tokens[1])?))
}
