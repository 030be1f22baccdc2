use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A registered candidate. Created once at registration, never mutated or
/// deleted afterwards. Serialized field names match the on-disk
/// `candidates.json` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: u64,
    pub name: String,
    /// Unique across the roster, compared case-insensitively.
    pub email: String,
    pub phone: String,
    pub college: String,
    pub branch: String,
    pub gender: String,
    #[serde(default)]
    pub backlogs: u32,
    /// Stored resume blob name (`<epoch-millis>_<original-name>`), set only
    /// when the upload was written successfully.
    #[serde(default)]
    pub resume_name: Option<String>,
}

impl Record for Candidate {
    const FILE_STEM: &'static str = "candidates";
}
