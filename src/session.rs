//! In-memory state of one chat widget session
//!
//! Holds the message history and the open/typing flags a UI shell renders.
//! Nothing here is persisted; dropping the session forgets the conversation.
//! Scheduling the delayed reply is left to the caller: `send` returns a
//! `PendingReply` carrying the delay, and `deliver` appends it once the caller's
//! timer fires. A reply that is never delivered has no side effects.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::config::ChatConfig;
use crate::delay::TypingDelay;
use crate::knowledge::KnowledgeBase;
use crate::matcher::{pick_greeting_with, resolve_with};
use crate::types::{ChatMessage, Resolution, Role};

/// A resolved bot reply waiting for its typing delay to elapse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub content: String,
    pub delay: Duration,
    pub resolution: Resolution,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    kb: Arc<KnowledgeBase>,
    typing_delay: TypingDelay,
    messages: Vec<ChatMessage>,
    next_id: u64,
    is_open: bool,
    is_typing: bool,
}

impl ChatSession {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self::with_typing_delay(kb, TypingDelay::default())
    }

    pub fn with_config(kb: Arc<KnowledgeBase>, config: &ChatConfig) -> Self {
        Self::with_typing_delay(kb, config.typing)
    }

    pub fn with_typing_delay(kb: Arc<KnowledgeBase>, typing_delay: TypingDelay) -> Self {
        Self {
            kb,
            typing_delay,
            messages: Vec::new(),
            next_id: 1,
            is_open: false,
            is_typing: false,
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Open the chat surface, greeting if the conversation is still empty
    pub fn open(&mut self) -> Option<&ChatMessage> {
        self.open_with(&mut rand::thread_rng())
    }

    pub fn open_with<R: Rng>(&mut self, rng: &mut R) -> Option<&ChatMessage> {
        self.is_open = true;
        if !self.messages.is_empty() {
            return None;
        }
        let greeting = pick_greeting_with(&self.kb, rng).to_string();
        Some(self.push(Role::Bot, greeting))
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Flip the open state and return the new one
    pub fn toggle(&mut self) -> bool {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
        self.is_open
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Example prompts, offered only until the user has said something
    pub fn suggestions(&self) -> &[String] {
        if self.messages.iter().any(|m| m.role == Role::User) {
            &[]
        } else {
            self.kb.suggestions()
        }
    }

    /// Record a user message and resolve the reply; blank text is ignored
    pub fn send(&mut self, text: &str) -> Option<PendingReply> {
        self.send_with(text, &mut rand::thread_rng())
    }

    pub fn send_with<R: Rng>(&mut self, text: &str, rng: &mut R) -> Option<PendingReply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.push(Role::User, text.to_string());

        let resolution = resolve_with(&self.kb, text, rng);
        let content = self.kb.response_for(&resolution).to_string();
        let delay = self.typing_delay.duration(&content);
        self.is_typing = true;

        debug!(delay_ms = delay.as_millis() as u64, "reply pending");
        Some(PendingReply {
            content,
            delay,
            resolution,
        })
    }

    /// Append a pending reply as a bot message and stop the typing indicator
    pub fn deliver(&mut self, reply: PendingReply) -> &ChatMessage {
        self.is_typing = false;
        self.push(Role::Bot, reply.content)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.is_typing = false;
    }

    fn push(&mut self, role: Role, content: String) -> &ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage { id, role, content });
        &self.messages[self.messages.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Intent;
    use rand::rngs::mock::StepRng;

    fn session() -> ChatSession {
        let kb = KnowledgeBase::new(
            vec![Intent::new(["contact", "email", "hire"], "Reach me at x@y.com")],
            vec!["Welcome!".to_string(), "Hello there!".to_string()],
            vec!["Not sure, try asking about skills.".to_string()],
            vec!["How can I contact you?".to_string()],
            vec![],
        )
        .unwrap();
        ChatSession::new(Arc::new(kb))
    }

    #[test]
    fn test_greets_once_on_first_open() {
        let mut s = session();
        let mut rng = StepRng::new(0, 0);

        let greeting = s.open_with(&mut rng).cloned().unwrap();
        assert_eq!(greeting.role, Role::Bot);
        assert_eq!(greeting.content, "Welcome!");
        assert!(s.is_open());

        s.close();
        assert!(s.open_with(&mut rng).is_none());
        assert!(!s.toggle());
        assert!(s.toggle());
        assert_eq!(s.messages().len(), 1);
    }

    #[test]
    fn test_send_and_deliver() {
        let mut s = session();
        let mut rng = StepRng::new(0, 0);
        s.open_with(&mut rng);
        assert_eq!(s.suggestions().len(), 1);

        let reply = s.send_with("  How can I CONTACT you??  ", &mut rng).unwrap();
        assert_eq!(reply.content, "Reach me at x@y.com");
        assert_eq!(reply.resolution, Resolution::Intent { intent: 0, pattern: 0 });
        assert_eq!(
            reply.delay,
            Duration::from_millis(600 + 15 * "Reach me at x@y.com".len() as u64)
        );
        assert!(s.is_typing());
        assert!(s.suggestions().is_empty());

        let user = &s.messages()[1];
        assert_eq!(user.role, Role::User);
        assert_eq!(user.content, "How can I CONTACT you??");

        let bot = s.deliver(reply).clone();
        assert_eq!(bot.role, Role::Bot);
        assert!(!s.is_typing());

        let ids: Vec<u64> = s.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_blank_send_is_ignored() {
        let mut s = session();
        assert!(s.send("   ").is_none());
        assert!(s.messages().is_empty());
        assert!(!s.is_typing());
    }

    #[test]
    fn test_dropped_reply_leaves_history_alone() {
        let mut s = session();
        let reply = s.send("asdkjhasd").unwrap();
        assert!(reply.resolution.is_fallback());
        drop(reply);
        assert_eq!(s.messages().len(), 1);
    }

    #[test]
    fn test_clear_starts_over() {
        let mut s = session();
        let mut rng = StepRng::new(0, 0);
        s.open_with(&mut rng);
        s.send_with("email?", &mut rng);
        s.clear();
        assert!(s.messages().is_empty());
        assert!(!s.is_typing());
        assert!(s.open_with(&mut rng).is_some());
        assert!(s.messages()[0].id > 1);
    }

    #[test]
    fn test_config_typing_delay() {
        let kb = Arc::new(KnowledgeBase::builtin().unwrap());
        let config = ChatConfig {
            kb_path: None,
            typing: TypingDelay {
                base_ms: 0,
                per_char_ms: 0,
                max_ms: 0,
            },
        };
        let mut s = ChatSession::with_config(kb, &config);
        let reply = s.send("bye").unwrap();
        assert_eq!(reply.delay, Duration::ZERO);
    }
}
