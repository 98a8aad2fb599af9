//! A minimal multicast event.
//!
//! `Event<A>` keeps a list of subscriber handles and calls all of them,
//! synchronously and in subscription order, whenever the owner publishes.
//! Handles are compared by identity (`Rc::ptr_eq`), so subscribing the same
//! handle twice has no effect and removing a handle that was never
//! subscribed is fine.
//!
//! ```
//! use std::{cell::Cell, rc::Rc};
//! use app_core::event::{handler, Event};
//!
//! let count = Rc::new(Cell::new(0));
//! let event: Event<u32> = Event::new();
//! let counter = count.clone();
//! let h = handler(move |n: &u32| {
//!     counter.set(counter.get() + n);
//!     Ok(())
//! });
//! event.subscribe(&h);
//! event.subscribe(&h);
//! event.publish(&2).unwrap();
//! assert_eq!(count.get(), 2);
//! ```

use std::{cell::RefCell, fmt, rc::Rc};

/// A subscriber. Returning an error stops the fan-out.
pub type Handler<A> = Rc<dyn Fn(&A) -> Result<(), String>>;

/// Wraps a closure into a [`Handler`].
pub fn handler<A, F>(f: F) -> Handler<A>
where
    F: Fn(&A) -> Result<(), String> + 'static,
{
    Rc::new(f)
}

pub struct Event<A> {
    handlers: RefCell<Vec<Handler<A>>>,
}

impl<A> Event<A> {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Registers `handler`. Does nothing if the very same handle is already
    /// registered.
    pub fn subscribe(&self, handler: &Handler<A>) {
        let mut handlers = self.handlers.borrow_mut();
        if handlers.iter().any(|h| Rc::ptr_eq(h, handler)) {
            log::trace!("handler already subscribed, ignoring");
            return;
        }
        handlers.push(Rc::clone(handler));
    }

    /// Removes `handler` if it is registered.
    pub fn unsubscribe(&self, handler: &Handler<A>) {
        self.handlers.borrow_mut().retain(|h| !Rc::ptr_eq(h, handler));
    }

    /// Calls every handler registered at the time of the call with `args`.
    ///
    /// Handlers may subscribe, unsubscribe or publish from within their body;
    /// such changes are seen by the next call to `publish`. The first handler
    /// error aborts the fan-out and is returned.
    pub fn publish(&self, args: &A) -> Result<(), String> {
        // Snapshot, so that handlers are free to touch this event.
        let handlers: Vec<Handler<A>> = self.handlers.borrow().clone();
        for handler in handlers.iter() {
            handler(args)?;
        }
        Ok(())
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}

impl<A> Default for Event<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, name: &'static str) -> Handler<String> {
        let log = log.clone();
        handler(move |arg: &String| {
            log.borrow_mut().push(format!("{name}:{arg}"));
            Ok(())
        })
    }

    #[test]
    fn test_publish_reaches_every_subscriber_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let event = Event::new();
        event.subscribe(&recorder(&log, "a"));
        event.subscribe(&recorder(&log, "b"));

        event.publish(&"x".to_string()).unwrap();

        assert_eq!(*log.borrow(), vec!["a:x", "b:x"]);
    }

    #[test]
    fn test_double_subscribe_is_single_invocation() {
        let calls = Rc::new(Cell::new(0));
        let event: Event<()> = Event::new();
        let c = calls.clone();
        let h = handler(move |_: &()| {
            c.set(c.get() + 1);
            Ok(())
        });
        event.subscribe(&h);
        event.subscribe(&h);
        assert_eq!(event.subscriber_count(), 1);

        event.publish(&()).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_equal_closures_are_distinct_handles() {
        let calls = Rc::new(Cell::new(0));
        let event: Event<()> = Event::new();
        for _ in 0..2 {
            let c = calls.clone();
            event.subscribe(&handler(move |_: &()| {
                c.set(c.get() + 1);
                Ok(())
            }));
        }
        event.publish(&()).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let event = Event::new();
        let a = recorder(&log, "a");
        let b = recorder(&log, "b");
        event.subscribe(&a);
        event.subscribe(&b);
        event.unsubscribe(&a);

        event.publish(&"1".to_string()).unwrap();
        assert_eq!(*log.borrow(), vec!["b:1"]);

        // Removing twice, or removing something never added, is a no-op.
        event.unsubscribe(&a);
        event.unsubscribe(&recorder(&log, "c"));
        assert_eq!(event.subscriber_count(), 1);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let event: Event<u8> = Event::default();
        assert!(event.is_empty());
        assert!(event.publish(&1).is_ok());
    }

    #[test]
    fn test_subscribe_during_publish_applies_next_time() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let event = Rc::new(Event::new());
        let late = recorder(&log, "late");

        let ev = Rc::downgrade(&event);
        let late_clone = late.clone();
        event.subscribe(&handler(move |_: &String| {
            if let Some(ev) = ev.upgrade() {
                ev.subscribe(&late_clone);
            }
            Ok(())
        }));

        event.publish(&"first".to_string()).unwrap();
        assert!(log.borrow().is_empty());

        event.publish(&"second".to_string()).unwrap();
        assert_eq!(*log.borrow(), vec!["late:second"]);
    }

    #[test]
    fn test_handler_error_stops_fan_out() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let event = Event::new();
        event.subscribe(&recorder(&log, "a"));
        event.subscribe(&handler(|_: &String| Err("boom".to_string())));
        event.subscribe(&recorder(&log, "c"));

        let res = event.publish(&"x".to_string());

        assert_eq!(res, Err("boom".to_string()));
        assert_eq!(*log.borrow(), vec!["a:x"]);
    }
}
