//! Domain models for the progress dashboard.
//!
//! # Core Concepts
//!
//! - [`ProgressDocument`]: The single JSON payload describing all dashboard content for one
//!   page load. Every collection is optional and defaults to empty.
//! - [`StatusRow`]: One task-tracking record with a constrained lifecycle state ([`RowStatus`]).
//! - [`Agent`]: A named unit of work with a free-text status and optional deliverables.
//! - [`ActivityEntry`]: A timestamped free-text log line.
//!
//! All entities are read-only projections created at load time and discarded on the next
//! reload. Nothing here is mutated after deserialization.

mod activity;
mod agent;
mod document;
mod status_row;

pub use activity::*;
pub use agent::*;
pub use document::*;
pub use status_row::*;

use serde::{Deserialize, Deserializer};

/// Deserialize an optional text field, treating `null`, non-string values and `""` as absent.
pub(crate) fn non_empty_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(text_of(value).filter(|s| !s.is_empty()))
}

/// Deserialize a required text field leniently: absent or `null` becomes `""`, numbers and
/// booleans are rendered as their JSON text.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(text_of(value).unwrap_or_default())
}

/// Deserialize a list of text items leniently: `null` or a non-list becomes empty, numbers
/// and booleans become their JSON text, and items with no text form are dropped.
pub(crate) fn lenient_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items.into_iter().filter_map(text_of).collect(),
        _ => Vec::new(),
    })
}

fn text_of(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
