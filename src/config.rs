//! Runtime configuration loaded from environment variables.
//!
//! - `PROGRESS_BOARD_SOURCE` - URL or file path of the progress document
//!   (default: `./data/progress.json`)
//! - `PROGRESS_BOARD_PORT` - Port for `pboard serve` (default: `3000`)
//! - `PROGRESS_BOARD_TITLE` - Page title (default: `Project Progress`)

use crate::client::Source;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TITLE: &str = "Project Progress";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub source: Source,
    pub port: u16,
    pub title: String,
}

impl BoardConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let source = lookup("PROGRESS_BOARD_SOURCE")
            .filter(|s| !s.trim().is_empty())
            .map(|s| Source::parse(&s))
            .unwrap_or_default();

        let port = lookup("PROGRESS_BOARD_PORT")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let title = lookup("PROGRESS_BOARD_TITLE")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Self {
            source,
            port,
            title,
        }
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
