//! Strongly-typed owner identifiers.

use std::fmt;
use std::num::NonZeroU32;

/// Identifies the element that claims a grid cell.
///
/// Owner IDs are positive; the raw cell value `0` means "empty" and has no
/// `OwnerId` representation. IDs are drawn from a reusable pool (the
/// smallest free value is always handed out next), so they stay bounded
/// by the number of live elements rather than growing with history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(NonZeroU32);

impl OwnerId {
    /// The smallest valid ID.
    pub const MIN: OwnerId = OwnerId(NonZeroU32::MIN);

    /// Wrap a raw cell value. Returns `None` for the empty marker `0`.
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// The raw value as stored in grid cells.
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NonZeroU32> for OwnerId {
    fn from(v: NonZeroU32) -> Self {
        Self(v)
    }
}

impl From<OwnerId> for u32 {
    fn from(id: OwnerId) -> Self {
        id.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_an_owner() {
        assert_eq!(OwnerId::new(0), None);
        assert_eq!(OwnerId::new(7).map(OwnerId::get), Some(7));
    }

    #[test]
    fn min_is_one() {
        assert_eq!(OwnerId::MIN.get(), 1);
        assert_eq!(OwnerId::MIN.to_string(), "1");
    }
}
