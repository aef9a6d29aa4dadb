use serde::{Deserialize, Serialize};

use super::{non_empty_text, ActivityEntry, Agent, StatusRow};

/// The whole dashboard payload for one page load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDocument {
    /// Raw timestamp; the current instant is shown when absent.
    #[serde(default, deserialize_with = "non_empty_text")]
    pub last_updated: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status_rows: Vec<StatusRow>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub agents: Vec<Agent>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub activity: Vec<ActivityEntry>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProgressDocument {
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
