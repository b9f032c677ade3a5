use crate::history::{History, HistoryEntry};
use crate::location::{Location, NavigationType};

pub type SubscriptionId = usize;

type Listener = Box<dyn FnMut(&[&str])>;

/// Follows the routing runtime and keeps the paths visited in this session,
/// reconciled against back/forward navigation.
///
/// Seed it with the location observed on mount, then feed it every change
/// of `(key, pathname, search, action)` through [`update`](Self::update).
pub struct NavigationHistoryTracker {
    history: History,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: SubscriptionId,
}

impl NavigationHistoryTracker {
    pub fn new(initial: &Location) -> Self {
        Self {
            history: History::new(HistoryEntry::from(initial)),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Processes one navigation. Listeners run before this returns, and only
    /// if the log actually changed.
    pub fn update(&mut self, location: &Location, action: NavigationType) -> bool {
        let changed = self.history.record(HistoryEntry::from(location), action);
        if changed {
            self.notify();
        }
        changed
    }

    pub fn paths(&self) -> Vec<&str> {
        self.history.paths()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[&str]) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let paths = self.history.paths();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&paths);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::DEFAULT_KEY;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn loc(key: &str, path: &str) -> Location {
        Location::parse(key, path).unwrap()
    }

    #[test]
    fn starts_with_initial_location() {
        let tracker = NavigationHistoryTracker::new(&Location::new(DEFAULT_KEY, "/library", ""));
        assert_eq!(tracker.paths(), vec!["/library"]);
    }

    #[test]
    fn listeners_see_every_change() {
        let mut tracker = NavigationHistoryTracker::new(&loc(DEFAULT_KEY, "/library"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        tracker.subscribe(move |paths| {
            sink.borrow_mut()
                .push(paths.iter().map(|p| p.to_string()).collect::<Vec<_>>());
        });

        tracker.update(&loc("k1", "/manga/5"), NavigationType::Push);
        tracker.update(&loc("k2", "/manga/5/chapter/1"), NavigationType::Push);

        assert_eq!(
            *seen.borrow(),
            vec![
                vec!["/library", "/manga/5"],
                vec!["/library", "/manga/5", "/manga/5/chapter/1"],
            ]
        );
    }

    #[test]
    fn initial_echo_does_not_notify() {
        let mut tracker = NavigationHistoryTracker::new(&loc(DEFAULT_KEY, "/library"));
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        tracker.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(!tracker.update(&loc(DEFAULT_KEY, "/library"), NavigationType::Pop));
        assert_eq!(*calls.borrow(), 0);

        assert!(tracker.update(&loc(DEFAULT_KEY, "/library?tab=1"), NavigationType::Pop));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut tracker = NavigationHistoryTracker::new(&loc(DEFAULT_KEY, "/library"));
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = tracker.subscribe(move |_| *counter.borrow_mut() += 1);

        tracker.update(&loc("k1", "/updates"), NavigationType::Push);
        assert!(tracker.unsubscribe(id));
        assert!(!tracker.unsubscribe(id));
        tracker.update(&loc("k2", "/settings"), NavigationType::Push);

        assert_eq!(*calls.borrow(), 1);
    }
}
