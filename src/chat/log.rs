use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
}

/// Ordered transcript of one chat session.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<Message>,
    next_id: u64,
}

impl ChatLog {
    /// A log opened by a single bot greeting.
    pub fn with_greeting(greeting: &str) -> Self {
        let mut log = ChatLog::default();
        log.push(Sender::Bot, greeting);
        log
    }

    /// Appends a user message. Blank text is ignored.
    pub fn push_user(&mut self, text: &str) -> Option<MessageId> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.push(Sender::User, text))
    }

    pub fn push_bot(&mut self, text: &str) -> MessageId {
        self.push(Sender::Bot, text)
    }

    fn push(&mut self, sender: Sender, text: &str) -> MessageId {
        self.next_id += 1;
        let id = MessageId(self.next_id);
        self.messages.push(Message {
            id,
            text: text.to_string(),
            sender,
        });
        id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
