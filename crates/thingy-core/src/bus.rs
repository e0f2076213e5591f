use std::collections::VecDeque;

use crate::event::Event;

/// FIFO queue between input polling and the shell loop.
///
/// Input and timers [`publish`](Self::publish); the loop [`drain`](Self::drain)s
/// everything once per frame and handles it in order. Consecutive resizes
/// collapse into the newest one, since only the final size matters to the pet.
#[derive(Debug, Default)]
pub struct EventBus {
    queue: VecDeque<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, event: Event) {
        let is_resize = |e: &Event| matches!(e, Event::Resize { .. });
        if is_resize(&event) && self.queue.back().is_some_and(is_resize) {
            self.queue.pop_back();
        }
        self.queue.push_back(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<Event> {
        self.queue.drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }
}
