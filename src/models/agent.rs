use serde::{Deserialize, Serialize};

use super::{lenient_text, lenient_text_list, non_empty_text};

/// Label shown when an agent carries no status.
pub const DEFAULT_AGENT_STATUS: &str = "planned";

/// A named unit of work shown as a card.
///
/// Unlike [`super::RowStatus`], the agent `status` is a free-text label and is displayed
/// verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Agent {
    #[serde(default, deserialize_with = "lenient_text")]
    pub key: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "non_empty_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "non_empty_text")]
    pub goal: Option<String>,
    #[serde(default, deserialize_with = "lenient_text_list")]
    pub deliverables: Vec<String>,
}

impl Agent {
    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_AGENT_STATUS)
    }
}
