//! Current note list relay with a single observer.
//!
//! # Responsibility
//! - Hold the latest full list of notes.
//! - Push every replacement to the registered observer inline.
//!
//! # Invariants
//! - At most one observer; `subscribe` replaces the previous one.
//! - Subscribing does not replay the held list; only later `set` calls notify.
//! - Every notification carries the whole list (no diffs).

use crate::model::note::Note;
use log::{debug, warn};
use std::sync::mpsc::Sender;

/// Receiver of full note-list snapshots.
pub trait NotesObserver {
    fn on_notes_changed(&mut self, notes: &[Note]);
}

impl<F> NotesObserver for F
where
    F: FnMut(&[Note]),
{
    fn on_notes_changed(&mut self, notes: &[Note]) {
        self(notes)
    }
}

/// Forwards owned snapshots over a channel. A dropped receiver is logged and
/// otherwise ignored.
impl NotesObserver for Sender<Vec<Note>> {
    fn on_notes_changed(&mut self, notes: &[Note]) {
        if self.send(notes.to_vec()).is_err() {
            warn!("event=projection_notify module=projection status=error error_code=receiver_dropped");
        }
    }
}

/// Holder of the current note list.
#[derive(Default)]
pub struct NotesProjection {
    notes: Vec<Note>,
    observer: Option<Box<dyn NotesObserver>>,
}

impl NotesProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the held list and notifies the observer, if any.
    pub fn set(&mut self, notes: Vec<Note>) {
        self.notes = notes;
        if let Some(observer) = self.observer.as_mut() {
            debug!(
                "event=projection_notify module=projection status=ok count={}",
                self.notes.len()
            );
            observer.on_notes_changed(&self.notes);
        }
    }

    /// Registers `observer`, dropping any previous one.
    pub fn subscribe(&mut self, observer: impl NotesObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Removes the current observer. Returns whether one was registered.
    pub fn unsubscribe(&mut self) -> bool {
        self.observer.take().is_some()
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    /// Returns the held list.
    pub fn current(&self) -> &[Note] {
        &self.notes
    }
}

#[cfg(test)]
mod tests {
    use super::NotesProjection;
    use crate::model::note::Note;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn set_without_observer_only_stores() {
        let mut projection = NotesProjection::new();
        projection.set(vec![Note::with_id(1, "A", "B")]);
        assert_eq!(projection.current().len(), 1);
        assert!(!projection.has_observer());
    }

    #[test]
    fn later_subscription_replaces_earlier_one() {
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));
        let mut projection = NotesProjection::new();

        let sink = Rc::clone(&first);
        projection.subscribe(move |_: &[Note]| *sink.borrow_mut() += 1);
        let sink = Rc::clone(&second);
        projection.subscribe(move |_: &[Note]| *sink.borrow_mut() += 1);
        projection.set(Vec::new());

        assert_eq!(*first.borrow(), 0);
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let calls = Rc::new(RefCell::new(0));
        let mut projection = NotesProjection::new();
        let sink = Rc::clone(&calls);
        projection.subscribe(move |_: &[Note]| *sink.borrow_mut() += 1);

        assert!(projection.unsubscribe());
        assert!(!projection.unsubscribe());
        projection.set(vec![Note::with_id(1, "A", "B")]);
        assert_eq!(*calls.borrow(), 0);
    }
}
