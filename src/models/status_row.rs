use serde::{Deserialize, Deserializer, Serialize};

use super::{lenient_text, non_empty_text};

/// One row of the status table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusRow {
    #[serde(default, deserialize_with = "lenient_text")]
    pub area: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub task: String,
    /// Rendered as an em-dash placeholder when absent.
    #[serde(default, deserialize_with = "non_empty_text")]
    pub owner: Option<String>,
    #[serde(default)]
    pub status: RowStatus,
    #[serde(default, deserialize_with = "non_empty_text")]
    pub notes: Option<String>,
}

/// Lifecycle state of a status row.
///
/// - `Todo`: Not started (also the fallback for absent or unrecognized values)
/// - `InProgress`: Being worked on
/// - `Done`: Finished
/// - `Blocked`: Stuck on something external
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Blocked,
}

impl RowStatus {
    pub const ALL: [RowStatus; 4] = [Self::Todo, Self::InProgress, Self::Done, Self::Blocked];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inprogress",
            Self::Done => "done",
            Self::Blocked => "blocked",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Self::Todo),
            "inprogress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }

    /// Resolve a raw status value, coercing anything unrecognized to `Todo`.
    pub fn resolve(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }

    /// Display label shown in the status badge.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Done => "已完成",
            Self::InProgress => "進行中",
            Self::Blocked => "卡住",
            Self::Todo => "待辦",
        }
    }

    /// Extra visual class for the badge. `Todo` carries none.
    pub fn badge_class(&self) -> Option<&'static str> {
        match self {
            Self::Todo => None,
            other => Some(other.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for RowStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Self::resolve).unwrap_or_default())
    }
}
