//! Conversation, node, and message types.

use chrono::{DateTime, NaiveDate, TimeZone};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;

/// Author role of assistant-generated messages.
pub const ASSISTANT_ROLE: &str = "assistant";

/// One exported chat session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConversationRecord {
    /// Conversation title, if present.
    #[serde(default)]
    pub title: Option<String>,

    /// Message nodes keyed by node id. Only the values are consulted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub mapping: IndexMap<String, MessageNode>,
}

impl ConversationRecord {
    /// Iterate over the messages present in this conversation's mapping.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.mapping.values().filter_map(|node| node.message.as_ref())
    }
}

/// A node in the conversation mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageNode {
    /// The message carried by this node. Root and system nodes often have none.
    #[serde(default)]
    pub message: Option<Message>,
}

/// A single chat message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Message author.
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: Author,

    /// Creation time as fractional seconds since the Unix epoch.
    #[serde(default)]
    pub create_time: Option<f64>,

    /// Message content.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Content,
}

impl Message {
    /// Author role, if recorded.
    pub fn role(&self) -> Option<&str> {
        self.author.role.as_deref()
    }

    /// Whether the message was written by the assistant.
    pub fn is_assistant(&self) -> bool {
        self.role() == Some(ASSISTANT_ROLE)
    }

    /// Usable creation timestamp.
    ///
    /// A missing, zero, or non-finite `create_time` carries no date.
    pub fn timestamp(&self) -> Option<f64> {
        self.create_time.filter(|ts| ts.is_finite() && *ts != 0.0)
    }

    /// Calendar date of the message in the given time zone.
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        let ts = self.timestamp()?;
        let secs = ts.floor();
        let nanos = ((ts - secs) * 1_000_000_000.0).round().min(999_999_999.0) as u32;
        let utc = DateTime::from_timestamp(secs as i64, nanos)?;
        Some(utc.with_timezone(tz).date_naive())
    }

    /// Message text with all parts joined by single spaces.
    pub fn text(&self) -> String {
        self.content.joined_text()
    }
}

/// Message author.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    /// Role: "user", "assistant", "system", "tool", ...
    #[serde(default)]
    pub role: Option<String>,
}

/// Message content.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Content {
    /// Ordered content parts.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parts: Vec<Part>,
}

impl Content {
    /// Join every part with a single space.
    ///
    /// Non-text parts contribute an empty segment, so they still produce a
    /// separator: `["a", {..}, "b"]` joins to `"a  b"`.
    pub fn joined_text(&self) -> String {
        self.parts
            .iter()
            .map(Part::as_text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A content part: plain text or anything else (images, tool payloads).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    /// Text part.
    Text(String),
    /// Any non-string part.
    Other(Value),
}

impl Part {
    /// Text of this part, or `""` for non-text parts.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Other(_) => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn message(json: &str) -> Message {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_joined_text_keeps_separator_for_non_text_parts() {
        let msg = message(r#"{"content": {"parts": ["hello", {"asset": "img"}, "world"]}}"#);
        assert_eq!(msg.text(), "hello  world");
    }

    #[test]
    fn test_joined_text_empty_parts() {
        let msg = message(r#"{"content": {"parts": []}}"#);
        assert_eq!(msg.text(), "");
    }

    #[test]
    fn test_missing_fields_are_tolerated() {
        let msg = message(r#"{"author": null, "content": null, "create_time": null}"#);
        assert_eq!(msg.role(), None);
        assert_eq!(msg.timestamp(), None);
        assert_eq!(msg.text(), "");

        let msg = message("{}");
        assert!(!msg.is_assistant());
    }

    #[test]
    fn test_zero_timestamp_is_unusable() {
        let msg = message(r#"{"create_time": 0}"#);
        assert_eq!(msg.timestamp(), None);
        assert_eq!(msg.date_in(&Utc), None);
    }

    #[test]
    fn test_date_in_utc() {
        // 2021-01-01T12:00:00.5Z
        let msg = message(r#"{"create_time": 1609502400.5}"#);
        assert_eq!(msg.date_in(&Utc), NaiveDate::from_ymd_opt(2021, 1, 1));
    }

    #[test]
    fn test_conversation_messages_skip_empty_nodes() {
        let conv: ConversationRecord = serde_json::from_str(
            r#"{
                "title": "Test",
                "mapping": {
                    "root": {"message": null, "children": ["a"]},
                    "a": {"message": {"author": {"role": "assistant"}, "content": {"parts": ["hi"]}}},
                    "b": {}
                }
            }"#,
        )
        .unwrap();

        let messages: Vec<_> = conv.messages().collect();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].is_assistant());
    }

    #[test]
    fn test_missing_mapping_is_empty() {
        let conv: ConversationRecord = serde_json::from_str(r#"{"title": "t"}"#).unwrap();
        assert_eq!(conv.messages().count(), 0);
    }
}
