use crate::chat::log::MessageId;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingReply {
    for_message: MessageId,
    due: Instant,
}

/// Delayed replies keyed by the user message that triggered them.
///
/// Nothing fires on its own: the event loop calls `take_due` on every tick and
/// gets back the message ids whose delay has elapsed, earliest deadline first.
#[derive(Debug, Clone)]
pub struct ReplyScheduler {
    delay: Duration,
    pending: Vec<PendingReply>,
}

impl ReplyScheduler {
    pub fn new(delay: Duration) -> Self {
        ReplyScheduler {
            delay,
            pending: Vec::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules a reply to `id` at `now + delay`. Rescheduling an id replaces it.
    pub fn schedule(&mut self, id: MessageId, now: Instant) {
        self.cancel(id);
        self.pending.push(PendingReply {
            for_message: id,
            due: now + self.delay,
        });
    }

    /// Returns true if a pending reply was dropped.
    pub fn cancel(&mut self, id: MessageId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.for_message != id);
        self.pending.len() != before
    }

    /// Drops every pending reply and returns how many there were.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    pub fn take_due(&mut self, now: Instant) -> Vec<MessageId> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = rest;
        due.sort_by_key(|p| (p.due, p.for_message));
        due.into_iter().map(|p| p.for_message).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
