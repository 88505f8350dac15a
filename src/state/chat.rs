//! Chat session state
//!
//! Ordered, append-only message log plus the pending-request flag. A user
//! message is appended as soon as it is sent; the matching bot message is
//! appended when the request finishes, whatever the outcome.

use crate::api::AskResponse;
use crate::error::ClientError;
use crate::export::ExportEntry;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Greeting the log starts with, and is reset to on clear
pub const GREETING: &str = "Hello! I'm your organizational AI assistant. How can I help you today?";

/// Bot reply used when a request fails for any reason
pub const FALLBACK_REPLY: &str =
    "Sorry, there was an error processing your message. Please try again.";

/// Classification attached to the fallback reply
pub const ERROR_CLASSIFICATION: &str = "error";

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed by the user
    User,
    /// Answer from the assistant
    Bot,
}

impl Sender {
    /// Convert the sender to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// Display tier for an answer's confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    /// 70% and above
    High,
    /// 40% to 69%
    Medium,
    /// Below 40%
    Low,
}

impl ConfidenceTier {
    /// Bucket a confidence in `[0, 1]`
    ///
    /// The value is rounded to a whole percent before comparing.
    pub fn from_confidence(confidence: f64) -> Self {
        let percent = confidence_percent(confidence);
        if percent >= 70 {
            ConfidenceTier::High
        } else if percent >= 40 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

/// Confidence as a rounded whole percent
pub fn confidence_percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

/// Answer metadata carried by bot messages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Answer certainty in `[0, 1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Source document titles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    /// Category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
}

impl MessageMetadata {
    /// Metadata for the fallback reply
    pub fn error() -> Self {
        Self {
            confidence: Some(0.0),
            sources: Some(Vec::new()),
            classification: Some(ERROR_CLASSIFICATION.to_string()),
        }
    }
}

impl From<&AskResponse> for MessageMetadata {
    fn from(response: &AskResponse) -> Self {
        Self {
            confidence: Some(response.confidence),
            sources: Some(response.sources.clone()),
            classification: Some(response.classification.clone()),
        }
    }
}

/// A single entry of the chat log
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Message body
    pub text: String,
    /// Author
    pub sender: Sender,
    /// When the message was added
    pub timestamp: DateTime<Utc>,
    /// Answer metadata (empty for user messages)
    pub metadata: MessageMetadata,
}

impl Message {
    /// A message typed by the user
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            metadata: MessageMetadata::default(),
        }
    }

    /// A message from the assistant
    pub fn bot(text: impl Into<String>, metadata: MessageMetadata) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            metadata,
        }
    }

    /// Confidence tier, if the message carries a confidence
    pub fn tier(&self) -> Option<ConfidenceTier> {
        self.metadata.confidence.map(ConfidenceTier::from_confidence)
    }

    /// Compute everything the view needs to draw this message
    pub fn render(&self) -> RenderedMessage {
        let mut rendered = RenderedMessage {
            sender: self.sender,
            text: format_text(&self.text),
            time: self
                .timestamp
                .with_timezone(&Local)
                .format("%H:%M")
                .to_string(),
            badge: None,
            sources: None,
            classification: None,
        };

        if self.sender != Sender::Bot {
            return rendered;
        }

        if let (Some(confidence), Some(tier)) = (self.metadata.confidence, self.tier()) {
            rendered.badge = Some((
                tier,
                format!("Confidence: {}%", confidence_percent(confidence)),
            ));

            if let Some(sources) = self.metadata.sources.as_ref().filter(|s| !s.is_empty()) {
                rendered.sources = Some(format!("Sources: {}", sources.join(", ")));
            }
            if let Some(class) = self.metadata.classification.as_ref().filter(|c| !c.is_empty())
            {
                rendered.classification = Some(format!("Category: {}", class));
            }
        }

        rendered
    }
}

/// Display-ready form of a [`Message`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    /// Author, selects avatar and alignment
    pub sender: Sender,
    /// Body with bullets normalized
    pub text: String,
    /// Local `HH:MM`
    pub time: String,
    /// Confidence tier and label
    pub badge: Option<(ConfidenceTier, String)>,
    /// `Sources: ...` line
    pub sources: Option<String>,
    /// `Category: ...` line
    pub classification: Option<String>,
}

/// Normalize list markers: lines starting with `* ` are shown as `• `
pub fn format_text(text: &str) -> String {
    text.lines()
        .map(|line| match line.strip_prefix("* ") {
            Some(rest) => format!("• {}", rest),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Chat log and request state
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<Message>,
    pending: bool,
    input: String,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self {
            messages: vec![Message::bot(GREETING, MessageMetadata::default())],
            pending: false,
            input: String::new(),
        }
    }
}

impl ChatSession {
    /// New session holding only the greeting
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in the order they were added
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages exchanged since the greeting
    pub fn history_len(&self) -> usize {
        self.messages.len().saturating_sub(1)
    }

    /// Whether a request is in flight
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Current input draft
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the input draft
    pub fn set_input(&mut self, input: String) {
        self.input = input;
    }

    /// Character counter shown under the input
    pub fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Whether `text` would be accepted by [`ChatSession::begin_send`]
    pub fn can_send(&self, text: &str) -> bool {
        !self.pending && !text.trim().is_empty()
    }

    /// Start sending `text`
    ///
    /// Returns the trimmed question to ask, or `None` when the text is blank
    /// or a request is already pending. On acceptance the user message is
    /// appended immediately and the draft is cleared.
    pub fn begin_send(&mut self, text: &str) -> Option<String> {
        if !self.can_send(text) {
            return None;
        }
        let question = text.trim().to_string();
        self.messages.push(Message::user(question.clone()));
        self.input.clear();
        self.pending = true;
        Some(question)
    }

    /// Finish the in-flight request, appending exactly one bot message
    pub fn complete(&mut self, result: Result<AskResponse, ClientError>) {
        if !self.pending {
            tracing::warn!("Received an answer with no request pending");
        }
        self.pending = false;

        let message = match result {
            Ok(response) => {
                let metadata = MessageMetadata::from(&response);
                Message::bot(response.answer, metadata)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error sending message");
                Message::bot(FALLBACK_REPLY, MessageMetadata::error())
            }
        };
        self.messages.push(message);
    }

    /// Reset the log to the single greeting
    pub fn reset(&mut self) {
        self.messages = vec![Message::bot(GREETING, MessageMetadata::default())];
    }

    /// Snapshot of the log for export
    pub fn export_entries(&self) -> Vec<ExportEntry> {
        self.messages.iter().map(ExportEntry::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(confidence: f64) -> AskResponse {
        AskResponse {
            answer: "Answer".to_string(),
            confidence,
            sources: vec!["Doc A".to_string(), "Doc B".to_string()],
            classification: "general".to_string(),
        }
    }

    #[test]
    fn test_new_session_has_greeting() {
        let chat = ChatSession::new();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].text, GREETING);
        assert_eq!(chat.messages()[0].sender, Sender::Bot);
        assert_eq!(chat.history_len(), 0);
        assert!(!chat.is_pending());
    }

    #[test]
    fn test_blank_send_is_rejected() {
        let mut chat = ChatSession::new();
        assert_eq!(chat.begin_send(""), None);
        assert_eq!(chat.begin_send("   \n\t"), None);
        assert_eq!(chat.messages().len(), 1);
        assert!(!chat.is_pending());
    }

    #[test]
    fn test_send_appends_user_message_and_sets_pending() {
        let mut chat = ChatSession::new();
        chat.set_input("  hello  ".to_string());
        let question = chat.begin_send("  hello  ");
        assert_eq!(question.as_deref(), Some("hello"));
        assert!(chat.is_pending());
        assert_eq!(chat.input(), "");
        let last = chat.messages().last().unwrap();
        assert_eq!(last.sender, Sender::User);
        assert_eq!(last.text, "hello");
    }

    #[test]
    fn test_second_send_while_pending_is_dropped() {
        let mut chat = ChatSession::new();
        assert!(chat.begin_send("first").is_some());
        assert!(chat.begin_send("second").is_none());
        assert_eq!(chat.messages().len(), 2);
    }

    #[test]
    fn test_complete_success_appends_answer() {
        let mut chat = ChatSession::new();
        chat.begin_send("question");
        chat.complete(Ok(answer(0.8)));

        assert!(!chat.is_pending());
        let last = chat.messages().last().unwrap();
        assert_eq!(last.text, "Answer");
        assert_eq!(last.metadata.confidence, Some(0.8));
        assert_eq!(last.metadata.classification.as_deref(), Some("general"));
    }

    #[test]
    fn test_complete_failure_appends_fallback() {
        let mut chat = ChatSession::new();
        chat.begin_send("question");
        chat.complete(Err(ClientError::Status {
            status: 500,
            body: String::new(),
        }));

        let last = chat.messages().last().unwrap();
        assert_eq!(last.text, FALLBACK_REPLY);
        assert_eq!(last.metadata, MessageMetadata::error());
        assert_eq!(chat.messages().len(), 3);
    }

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(ConfidenceTier::from_confidence(0.95), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_confidence(0.55), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_confidence(0.10), ConfidenceTier::Low);
    }

    #[test]
    fn test_confidence_tier_boundaries() {
        assert_eq!(ConfidenceTier::from_confidence(0.70), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_confidence(0.40), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_confidence(0.39), ConfidenceTier::Low);
        // Rounded to a whole percent first
        assert_eq!(ConfidenceTier::from_confidence(0.696), ConfidenceTier::High);
    }

    #[test]
    fn test_render_bot_message() {
        let message = Message::bot("Answer", MessageMetadata::from(&answer(0.55)));
        let rendered = message.render();
        assert_eq!(
            rendered.badge,
            Some((ConfidenceTier::Medium, "Confidence: 55%".to_string()))
        );
        assert_eq!(rendered.sources.as_deref(), Some("Sources: Doc A, Doc B"));
        assert_eq!(rendered.classification.as_deref(), Some("Category: general"));
        assert_eq!(rendered.time.len(), 5);
    }

    #[test]
    fn test_render_user_message_has_no_badge() {
        let rendered = Message::user("hi").render();
        assert!(rendered.badge.is_none());
        assert!(rendered.sources.is_none());
        assert!(rendered.classification.is_none());
    }

    #[test]
    fn test_render_does_not_touch_stored_data() {
        let message = Message::bot("* one\n* two", MessageMetadata::from(&answer(0.1)));
        let before = message.clone();
        let rendered = message.render();
        assert_eq!(rendered.text, "• one\n• two");
        assert_eq!(message, before);
    }

    #[test]
    fn test_reset_leaves_single_greeting() {
        let mut chat = ChatSession::new();
        chat.begin_send("question");
        chat.complete(Ok(answer(0.9)));
        assert_eq!(chat.history_len(), 2);
        chat.reset();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.history_len(), 0);
        assert_eq!(chat.messages()[0].text, GREETING);
    }
}
