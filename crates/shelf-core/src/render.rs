//! Render notifications
//!
//! Mutations do not draw anything themselves. After a change has been
//! saved, the shelf sends a payload-free [`RenderSignal`] through a
//! [`RenderTrigger`]; the single [`RenderReceiver`] on the other end belongs
//! to whatever displays the shelf, which re-reads the collection from
//! storage when it sees a signal.
//!
//! ```text
//! let (trigger, receiver) = render::channel();
//! let mut shelf = Shelf::new(store, trigger);
//!
//! shelf.add_book(NewBook::new("Dune", "Herbert", "1965", false));
//! if receiver.pending() > 0 {
//!     draw(&shelf.shelves());
//! }
//! ```

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tracing::debug;

/// Notification that the stored collection changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderSignal {
    BooksChanged,
}

/// Sending half, held by the shelf
#[derive(Debug, Clone)]
pub struct RenderTrigger {
    tx: Sender<RenderSignal>,
}

/// Receiving half, held by the one render consumer
///
/// Not `Clone`: a trigger has exactly one subscriber.
#[derive(Debug)]
pub struct RenderReceiver {
    rx: Receiver<RenderSignal>,
}

/// Create a connected trigger/receiver pair
pub fn channel() -> (RenderTrigger, RenderReceiver) {
    let (tx, rx) = mpsc::channel();
    (RenderTrigger { tx }, RenderReceiver { rx })
}

impl RenderTrigger {
    /// Announce that the stored collection changed
    ///
    /// Signals sent after the receiver is gone are dropped.
    pub fn notify(&self) {
        if self.tx.send(RenderSignal::BooksChanged).is_err() {
            debug!("Render receiver dropped, signal discarded");
        }
    }
}

impl RenderReceiver {
    /// Drain all queued signals and return how many there were
    ///
    /// Several changes between two draws only need one redraw, so callers
    /// only care whether the count is non-zero.
    pub fn pending(&self) -> usize {
        let mut count = 0;
        loop {
            match self.rx.try_recv() {
                Ok(RenderSignal::BooksChanged) => count += 1,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_signal_initially() {
        let (_trigger, receiver) = channel();
        assert_eq!(receiver.pending(), 0);
    }

    #[test]
    fn test_signals_are_drained() {
        let (trigger, receiver) = channel();

        trigger.notify();
        trigger.notify();
        trigger.notify();

        assert_eq!(receiver.pending(), 3);
        assert_eq!(receiver.pending(), 0);
    }

    #[test]
    fn test_cloned_trigger_reaches_same_receiver() {
        let (trigger, receiver) = channel();
        let other = trigger.clone();

        trigger.notify();
        other.notify();

        assert_eq!(receiver.pending(), 2);
    }

    #[test]
    fn test_notify_without_receiver_is_harmless() {
        let (trigger, receiver) = channel();
        drop(receiver);

        trigger.notify();
    }

    #[test]
    fn test_pending_after_trigger_dropped() {
        let (trigger, receiver) = channel();
        trigger.notify();
        drop(trigger);

        assert_eq!(receiver.pending(), 1);
        assert_eq!(receiver.pending(), 0);
    }
}
