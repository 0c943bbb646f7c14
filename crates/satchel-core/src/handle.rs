//! Identity handles for externally-owned items.
//!
//! The inventory stores payloads by identity: two distinct items that happen
//! to compare equal field-by-field are still different items. Payload types
//! express that identity through `Eq + Hash`. Types that already carry a
//! unique key (an entity ID, a database row) can be stored directly; for
//! everything else [`ItemRef`] wraps an `Rc` and compares by pointer.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

/// A shared reference to an item, compared and hashed by address.
///
/// Cloning an `ItemRef` yields the same identity. Two `ItemRef`s built from
/// separate `ItemRef::new` calls are never equal, whatever their contents.
///
/// ```
/// use satchel_core::ItemRef;
///
/// let a = ItemRef::new("sword");
/// let b = ItemRef::new("sword");
/// assert_eq!(a, a.clone());
/// assert_ne!(a, b);
/// ```
pub struct ItemRef<T>(Rc<T>);

impl<T> ItemRef<T> {
    /// Move `value` behind a new identity.
    pub fn new(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Adopt an existing `Rc`, keeping its identity.
    pub fn from_rc(rc: Rc<T>) -> Self {
        Self(rc)
    }

    /// The underlying `Rc`.
    pub fn as_rc(&self) -> &Rc<T> {
        &self.0
    }

    /// `true` if both handles point at the same item.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for ItemRef<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> PartialEq for ItemRef<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for ItemRef<T> {}

impl<T> Hash for ItemRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl<T> Deref for ItemRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for ItemRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ItemRef").field(&*self.0).finish()
    }
}

impl<T> From<Rc<T>> for ItemRef<T> {
    fn from(rc: Rc<T>) -> Self {
        Self(rc)
    }
}
