use std::cell::Cell;
use std::rc::{Rc, Weak};

/// Observer list for document changes. Subscribers hold a `Subscription`
/// and poll it from the event loop; dropping the handle unregisters it.
#[derive(Debug, Default)]
pub struct Notifier {
    subscribers: Vec<Weak<Cell<bool>>>,
}

#[derive(Debug)]
pub struct Subscription {
    changed: Rc<Cell<bool>>,
}

impl Notifier {
    pub fn subscribe(&mut self) -> Subscription {
        let changed = Rc::new(Cell::new(false));
        self.subscribers.push(Rc::downgrade(&changed));
        Subscription { changed }
    }

    pub fn notify(&mut self) {
        self.subscribers.retain(|weak| match weak.upgrade() {
            Some(flag) => {
                flag.set(true);
                true
            }
            None => false,
        });
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

impl Subscription {
    /// Returns whether a change arrived since the last call, and resets.
    pub fn take_changed(&self) -> bool {
        self.changed.replace(false)
    }
}
