//! Candidate type and the injected lookup interface.

use serde::{Deserialize, Serialize};

/// A mentionable item returned by the host's lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Stable identifier written into the reference
    pub id: String,
    /// Human-readable label shown in the panel and the reference text
    pub label: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Decode a JSON array of `{"id", "label"}` objects, as returned by a
    /// typical directory endpoint
    pub fn parse_list(json: &str) -> Result<Vec<Candidate>, LookupError> {
        serde_json::from_str(json).map_err(|e| LookupError::Failed(e.to_string()))
    }

    /// Markdown reference inserted on commit, e.g. `[@ada](user:1) `
    pub fn reference(&self, trigger: char) -> String {
        format!("[{}{}]({}) ", trigger, self.label, self.id)
    }
}

/// Why a lookup produced no candidates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("mention lookup failed: {0}")]
    Failed(String),
    #[error("mention lookup timed out")]
    Timeout,
}

/// Host-provided candidate source.
///
/// Called from a worker thread, never from the update loop, so it may block
/// on network I/O.
pub trait MentionLookup: Send + Sync {
    fn lookup(&self, query: &str) -> Result<Vec<Candidate>, LookupError>;
}

impl<F> MentionLookup for F
where
    F: Fn(&str) -> Result<Vec<Candidate>, LookupError> + Send + Sync,
{
    fn lookup(&self, query: &str) -> Result<Vec<Candidate>, LookupError> {
        self(query)
    }
}
