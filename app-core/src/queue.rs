/// Collects actions while a frame is being drawn, so they can be run once
/// the frame no longer borrows the state the actions want to touch.
#[derive(Debug)]
pub struct ActionQueue<A> {
    queue: Vec<A>,
}

impl<A> ActionQueue<A> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn queue_action(&mut self, action: A) {
        self.queue.push(action);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Hands out all queued actions in the order they were queued.
    pub fn take_actions(&mut self) -> Vec<A> {
        std::mem::take(&mut self.queue)
    }

    pub fn discard_actions(&mut self) {
        self.queue.clear();
    }
}

impl<A> Default for ActionQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}
