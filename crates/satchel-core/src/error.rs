//! Error types for the Satchel inventory engine.
//!
//! Errors are reserved for contract violations by the caller. Expected
//! outcomes such as "no room", "filter rejected" or "already stored" are
//! reported through `bool`/`Option` returns and never appear here.

use std::error::Error;
use std::fmt;

use crate::coord::{Extent, Position};

/// Errors from inventory operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InventoryError {
    /// The size looked up for a payload has a dimension `<= 0`.
    InvalidSize {
        /// The offending (oriented) size.
        size: Extent,
    },
    /// The operation requires a stored payload, but it is absent.
    NotFound,
    /// Every positive `u32` is already assigned to a live element.
    IdSpaceExhausted,
    /// `remove_at` targeted a cell that no element claims.
    EmptySlot {
        /// The empty cell.
        slot: Position,
    },
    /// A slot lookup fell outside the grid.
    SlotOutOfBounds {
        /// The requested cell.
        slot: Position,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { size } => {
                write!(f, "invalid size {size}: both dimensions must be positive")
            }
            Self::NotFound => write!(f, "element not found in inventory"),
            Self::IdSpaceExhausted => write!(f, "owner id space exhausted"),
            Self::EmptySlot { slot } => write!(f, "slot {slot} is empty"),
            Self::SlotOutOfBounds {
                slot,
                width,
                height,
            } => {
                write!(f, "slot {slot} out of bounds: [0, {width}) x [0, {height})")
            }
        }
    }
}

impl Error for InventoryError {}

/// Errors detected while validating an inventory configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A grid dimension is zero.
    ZeroDimension {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
    },
    /// A grid dimension does not fit the `i32` coordinate range.
    DimensionTooLarge {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
        /// The configured value.
        value: u32,
        /// The largest accepted value.
        max: u32,
    },
    /// `width * height` does not fit in `usize`.
    CellCountOverflow {
        /// The product that overflowed, widened.
        value: u64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension { name } => write!(f, "{name} must be at least 1"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} {value} exceeds maximum of {max}")
            }
            Self::CellCountOverflow { value } => {
                write!(f, "cell count {value} exceeds addressable memory")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from parsing a [`Position`] or [`Extent`] from text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseCoordError {
    /// The input did not contain exactly two whitespace-separated tokens.
    WrongArity {
        /// Number of tokens found.
        found: usize,
    },
    /// A token was not a valid `i32`.
    InvalidInteger {
        /// The offending token.
        token: String,
    },
}

impl fmt::Display for ParseCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongArity { found } => {
                write!(f, "expected two integers, found {found} tokens")
            }
            Self::InvalidInteger { token } => write!(f, "invalid integer '{token}'"),
        }
    }
}

impl Error for ParseCoordError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = InventoryError::InvalidSize {
            size: Extent::new(0, 2),
        };
        assert_eq!(
            e.to_string(),
            "invalid size <0, 2>: both dimensions must be positive"
        );
        let e = InventoryError::SlotOutOfBounds {
            slot: Position::new(5, 0),
            width: 4,
            height: 4,
        };
        assert_eq!(e.to_string(), "slot <5, 0> out of bounds: [0, 4) x [0, 4)");
        assert_eq!(
            ConfigError::ZeroDimension { name: "width" }.to_string(),
            "width must be at least 1"
        );
    }
}
