//! Completed-calculation record handed to the persistence collaborator.

use serde::{Deserialize, Serialize};

/// One committed calculation. Immutable once created; storage mechanics
/// belong to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Balanced expression text (all brackets closed, no dangling operator).
    pub expression: String,
    /// Formatted result as it was displayed.
    pub result: String,
    /// Commit time, milliseconds since the Unix epoch.
    pub timestamp_millis: i64,
}

impl HistoryEntry {
    pub fn new(
        expression: impl Into<String>,
        result: impl Into<String>,
        timestamp_millis: i64,
    ) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
            timestamp_millis,
        }
    }

    /// Shareable one-line form, e.g. `2+2 = 4`.
    pub fn share_line(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }
}
