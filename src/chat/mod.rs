pub mod log;
pub mod scheduler;

pub use log::{ChatLog, Message, MessageId, Sender};
pub use scheduler::ReplyScheduler;

use crate::data::ChatSettings;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// The echo bot: every user message earns one canned reply after a fixed delay.
#[derive(Debug, Clone)]
pub struct ChatSession {
    log: ChatLog,
    scheduler: ReplyScheduler,
    canned_reply: String,
}

impl ChatSession {
    pub fn new(settings: &ChatSettings) -> Self {
        ChatSession {
            log: ChatLog::with_greeting(&settings.greeting),
            scheduler: ReplyScheduler::new(Duration::from_millis(settings.reply_delay_ms)),
            canned_reply: settings.canned_reply.clone(),
        }
    }

    /// Posts a user message and schedules its reply. Blank text is ignored.
    pub fn send(&mut self, text: &str, now: Instant) -> Option<MessageId> {
        let id = self.log.push_user(text)?;
        self.scheduler.schedule(id, now);
        debug!(
            message = id.0,
            delay_ms = self.scheduler.delay().as_millis() as u64,
            "reply scheduled"
        );
        Some(id)
    }

    /// Appends replies whose delay has elapsed. Returns how many were delivered.
    pub fn tick(&mut self, now: Instant) -> usize {
        let due = self.scheduler.take_due(now);
        for id in &due {
            self.log.push_bot(&self.canned_reply);
            debug!(message = id.0, "reply delivered");
        }
        due.len()
    }

    pub fn cancel_pending(&mut self) -> usize {
        let n = self.scheduler.cancel_all();
        if n > 0 {
            info!(count = n, "pending chat replies cancelled");
        }
        n
    }

    pub fn pending_replies(&self) -> usize {
        self.scheduler.pending_count()
    }

    pub fn messages(&self) -> &[Message] {
        self.log.messages()
    }
}
