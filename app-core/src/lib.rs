#![warn(clippy::all, rust_2018_idioms)]

pub mod event;
pub mod logger;
pub mod queue;
pub mod string_error;

pub use event::{handler, Event, Handler};
pub use logger::{ConsoleLogger, Logger};
pub use queue::ActionQueue;

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::{handler, ActionQueue, Event};

    #[derive(Debug, Clone, PartialEq)]
    enum Action {
        Click,
        Pick(String),
    }

    // Actions queued during a frame are published after the frame, and a
    // subscriber may queue follow-up work for the next frame.
    #[test]
    fn test_queue_feeds_event() {
        let _ = env_logger::builder().is_test(true).try_init();

        let queue = Rc::new(RefCell::new(ActionQueue::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let clicked: Event<()> = Event::new();
        let picked: Event<String> = Event::new();

        let q = queue.clone();
        clicked.subscribe(&handler(move |_: &()| {
            q.borrow_mut().queue_action(Action::Pick("data.csv".into()));
            Ok(())
        }));
        let s = seen.clone();
        picked.subscribe(&handler(move |path: &String| {
            s.borrow_mut().push(path.clone());
            Ok(())
        }));

        queue.borrow_mut().queue_action(Action::Click);
        for _frame in 0..2 {
            let actions = queue.borrow_mut().take_actions();
            for action in actions {
                let res = match action {
                    Action::Click => clicked.publish(&()),
                    Action::Pick(path) => picked.publish(&path),
                };
                assert!(res.is_ok());
            }
        }

        assert_eq!(*seen.borrow(), vec!["data.csv".to_string()]);
        assert!(queue.borrow().is_empty());
    }
}
