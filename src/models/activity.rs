use serde::{Deserialize, Serialize};

use super::lenient_text;

/// A timestamped log line. `time` is kept raw and parsed at render time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
}
