//! Change notification: element snapshots, events and listeners.
//!
//! Every successful mutation of an inventory's contents produces exactly
//! one [`ChangeEvent`], delivered synchronously to each subscribed listener
//! before the mutating call returns. Batch operations produce one event for
//! the whole batch.

use std::fmt;

use smallvec::SmallVec;

use satchel_core::{Extent, Footprint, OwnerId, Position};

use crate::registry::ElementRecord;

/// Immutable snapshot of a stored element.
///
/// Snapshots are copies: holding or dropping one has no effect on the
/// inventory, and a later move of the element does not update an earlier
/// snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element<P> {
    id: OwnerId,
    payload: P,
    anchor: Position,
    rotated: bool,
    size: Extent,
}

impl<P: Clone> Element<P> {
    /// Snapshot a live record; `base` is the unrotated looked-up size.
    pub(crate) fn snapshot(record: &ElementRecord<P>, base: Extent) -> Self {
        Self {
            id: record.id,
            payload: record.payload.clone(),
            anchor: record.anchor,
            rotated: record.rotated,
            size: base.oriented(record.rotated),
        }
    }
}

impl<P> Element<P> {
    /// Owner ID stamped into the element's cells.
    pub fn id(&self) -> OwnerId {
        self.id
    }

    /// The stored payload handle.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consume the snapshot, keeping the payload handle.
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Minimum-x, minimum-y cell of the footprint.
    pub fn anchor(&self) -> Position {
        self.anchor
    }

    /// Whether the element is stored turned 90°.
    pub fn is_rotated(&self) -> bool {
        self.rotated
    }

    /// Oriented size, i.e. the footprint's extent.
    pub fn size(&self) -> Extent {
        self.size
    }

    /// The covered rectangle.
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.anchor, self.size)
    }
}

/// Which notification channel an event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Elements were inserted.
    Added,
    /// An element changed anchor and/or rotation.
    Moved,
    /// Elements were taken out.
    Removed,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Moved => write!(f, "moved"),
            Self::Removed => write!(f, "removed"),
        }
    }
}

/// One notification: a kind plus the snapshots it covers.
///
/// Single-element operations carry one snapshot; batch insertion and
/// [`clear`](crate::Inventory::clear) carry one per affected element.
/// For [`ChangeKind::Moved`] the snapshot reflects the new placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent<P> {
    kind: ChangeKind,
    elements: SmallVec<[Element<P>; 1]>,
}

impl<P> ChangeEvent<P> {
    pub(crate) fn new(kind: ChangeKind, elements: SmallVec<[Element<P>; 1]>) -> Self {
        Self { kind, elements }
    }

    /// The notification channel.
    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// Affected elements, in operation order.
    pub fn elements(&self) -> &[Element<P>] {
        &self.elements
    }

    /// Number of affected elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// `true` if the event covers no element. Never the case for
    /// delivered events.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Handle returned by [`Inventory::subscribe`](crate::Inventory::subscribe),
/// used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A boxed change listener.
pub(crate) type Listener<P> = Box<dyn FnMut(&ChangeEvent<P>)>;

/// Fan-out of change events to subscribed listeners.
///
/// Listeners are called in subscription order and only ever see
/// `&ChangeEvent`. Calling back into the notifying inventory from a
/// listener is unsupported: an inventory shared through
/// `Rc<RefCell<Inventory<P>>>` is still mutably borrowed during delivery,
/// so a reentrant `borrow_mut()` panics.
pub(crate) struct ChangeNotifier<P> {
    listeners: Vec<(SubscriberId, Listener<P>)>,
    next_id: u64,
}

impl<P> ChangeNotifier<P> {
    /// Create a notifier with no listeners.
    pub(crate) fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a listener for all three channels.
    pub(crate) fn subscribe(
        &mut self,
        listener: impl FnMut(&ChangeEvent<P>) + 'static,
    ) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if `id` was not subscribed.
    pub(crate) fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener. Empty events are dropped.
    pub(crate) fn emit(&mut self, event: &ChangeEvent<P>) {
        if event.is_empty() {
            return;
        }
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl<P> Default for ChangeNotifier<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for ChangeNotifier<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn element(raw: u32, payload: &'static str) -> Element<&'static str> {
        let record = ElementRecord {
            id: OwnerId::new(raw).unwrap(),
            payload,
            anchor: Position::new(1, 0),
            rotated: true,
        };
        Element::snapshot(&record, Extent::new(1, 2))
    }

    #[test]
    fn snapshot_copies_oriented_size() {
        let e = element(3, "bow");
        assert_eq!(e.id().get(), 3);
        assert_eq!(*e.payload(), "bow");
        assert_eq!(e.size(), Extent::new(2, 1));
        assert!(e.is_rotated());
        assert_eq!(e.footprint().cells().count(), 2);
    }

    #[test]
    fn listeners_receive_events_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();
        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            notifier.subscribe(move |ev: &ChangeEvent<&'static str>| {
                log.borrow_mut().push((tag, ev.kind(), ev.len()));
            });
        }
        let event = ChangeEvent::new(ChangeKind::Added, smallvec![element(1, "a")]);
        notifier.emit(&event);
        assert_eq!(
            *log.borrow(),
            vec![
                ("first", ChangeKind::Added, 1),
                ("second", ChangeKind::Added, 1)
            ]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut notifier = ChangeNotifier::new();
        let c = Rc::clone(&count);
        let id = notifier.subscribe(move |_: &ChangeEvent<&'static str>| *c.borrow_mut() += 1);
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.emit(&ChangeEvent::new(
            ChangeKind::Removed,
            smallvec![element(1, "a")],
        ));
        assert_eq!(*count.borrow(), 0);
        assert!(notifier.listeners.is_empty());
    }

    #[test]
    fn empty_events_are_not_delivered() {
        let count = Rc::new(RefCell::new(0));
        let mut notifier = ChangeNotifier::new();
        let c = Rc::clone(&count);
        notifier.subscribe(move |_: &ChangeEvent<u8>| *c.borrow_mut() += 1);
        notifier.emit(&ChangeEvent::new(ChangeKind::Removed, SmallVec::new()));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ChangeKind::Moved.to_string(), "moved");
    }
}
