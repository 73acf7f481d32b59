//! Synthetic ChatGPT export generators.
//!
//! Builds deterministic `conversations.json` documents for tests, so the
//! expected totals can be computed directly from the configuration.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Map, Value};

/// Configuration for a synthetic export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Number of conversations.
    pub conversations: usize,
    /// Messages per conversation, alternating user and assistant.
    pub messages_per_conversation: usize,
    /// Words in every message.
    pub words_per_message: usize,
    /// Timestamp of the first message.
    pub start_time: DateTime<Utc>,
    /// Spacing between consecutive messages.
    pub step: Duration,
    /// Add a root node without a message to every conversation.
    pub include_root_nodes: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            conversations: 3,
            messages_per_conversation: 4,
            words_per_message: 5,
            start_time: Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap(),
            step: Duration::hours(7),
            include_root_nodes: true,
        }
    }
}

impl ExportConfig {
    /// Total number of messages generated.
    pub fn total_messages(&self) -> usize {
        self.conversations * self.messages_per_conversation
    }

    /// Number of assistant messages generated.
    pub fn assistant_messages(&self) -> usize {
        self.conversations * (self.messages_per_conversation / 2)
    }
}

/// A single message node value.
pub fn message(role: &str, create_time: Option<f64>, parts: Vec<Value>) -> Value {
    json!({
        "message": {
            "id": "generated",
            "author": { "role": role, "name": null, "metadata": {} },
            "create_time": create_time,
            "content": { "content_type": "text", "parts": parts },
            "status": "finished_successfully"
        },
        "parent": null,
        "children": []
    })
}

/// Wrap message nodes into a conversation record.
pub fn conversation(title: &str, nodes: Vec<Value>) -> Value {
    let mapping: Map<String, Value> = nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| (format!("node-{i}"), node))
        .collect();
    json!({
        "title": title,
        "create_time": 1_683_000_000.0,
        "mapping": mapping
    })
}

/// Generate a full export document.
pub fn generate_export(config: &ExportConfig) -> Value {
    let sentence = vec!["word"; config.words_per_message].join(" ");
    let mut index = 0i32;

    let conversations: Vec<Value> = (0..config.conversations)
        .map(|c| {
            let mut nodes = Vec::new();
            if config.include_root_nodes {
                nodes.push(json!({ "message": null, "parent": null, "children": [] }));
            }
            for m in 0..config.messages_per_conversation {
                let role = if m % 2 == 0 { "user" } else { "assistant" };
                let ts = config.start_time + config.step * index;
                index += 1;
                nodes.push(message(
                    role,
                    Some(ts.timestamp() as f64),
                    vec![Value::String(sentence.clone())],
                ));
            }
            conversation(&format!("Conversation {c}"), nodes)
        })
        .collect();

    Value::Array(conversations)
}
