//! Data model for ChatGPT conversation exports.
//!
//! A `conversations.json` export is an array of conversation records. Each
//! record holds a `mapping` of node id to node, and each node may carry a
//! message. Only the fields the statistics need are modelled; everything
//! else in the export is ignored during deserialization.
//!
//! Exports in the wild are inconsistent: fields go missing or turn up as
//! `null`. Every field here is defaulted so such records degrade to
//! "skippable" instead of failing the whole document.

pub mod conversation;

pub use conversation::*;

use serde::{Deserialize, Deserializer};

/// Deserialize a field that may be absent or `null` into its default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
