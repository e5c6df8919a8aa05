//! Floating chat widget state.
//!
//! DESIGN
//! ======
//! Each send pushes the user's message and a bot placeholder. The request
//! carries the conversation as it stood before the new message; the reply
//! (or the timeout text) later replaces that placeholder by id, so several
//! sends in flight cannot overwrite each other.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use pulldown_cmark::{Event, Options, Parser, html};

use crate::net::error::ApiError;
use crate::net::types::{ChatRequest, ChatTurn};

pub const GREETING: &str = "Hi! How can I help you today?";
pub const THINKING: &str = "Thinking...";
pub const TIMEOUT_REPLY: &str = "Server is taking too long to respond. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Role name in the `history` sent to the chat backend.
    pub fn wire_role(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "assistant",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    /// A placeholder still waiting for its reply.
    pub pending: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatState {
    pub open: bool,
    pub input: String,
    pub messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            open: false,
            input: String::new(),
            messages: vec![ChatMessage { id: 0, sender: Sender::Bot, text: GREETING.to_owned(), pending: false }],
            next_id: 1,
        }
    }
}

impl ChatState {
    fn push(&mut self, sender: Sender, text: &str, pending: bool) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage { id, sender, text: text.to_owned(), pending });
        id
    }

    /// Start a send from the current input. Returns the placeholder id and
    /// the request to post, or `None` for blank input.
    pub fn begin_send(&mut self) -> Option<(u64, ChatRequest)> {
        let message = self.input.trim().to_owned();
        if message.is_empty() {
            return None;
        }
        let history = self
            .messages
            .iter()
            .filter(|m| !m.pending)
            .map(|m| ChatTurn { role: m.sender.wire_role().to_owned(), content: m.text.clone() })
            .collect();
        self.push(Sender::User, &message, false);
        let placeholder = self.push(Sender::Bot, THINKING, true);
        self.input.clear();
        Some((placeholder, ChatRequest { message, history }))
    }

    /// Replace the placeholder with the reply, or with the timeout text on
    /// any error.
    pub fn finish_send(&mut self, placeholder: u64, result: Result<String, ApiError>) {
        let text = match result {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("chat request failed: {e}");
                TIMEOUT_REPLY.to_owned()
            }
        };
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == placeholder) {
            message.text = text;
            message.pending = false;
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }
}

/// Render a bot reply as HTML with any raw HTML in the source dropped.
pub fn render_markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
