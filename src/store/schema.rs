use serde::{Deserialize, Serialize};

use crate::session::result::LessonSummary;

const SCHEMA_VERSION: u32 = 1;

/// Keep at most this many finished lessons in history.
pub const HISTORY_LIMIT: usize = 500;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonHistoryData {
    pub schema_version: u32,
    #[serde(default)]
    pub summaries: Vec<LessonSummary>,
}

impl Default for LessonHistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            summaries: Vec::new(),
        }
    }
}

impl LessonHistoryData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    pub fn push(&mut self, summary: LessonSummary) {
        self.summaries.push(summary);
        if self.summaries.len() > HISTORY_LIMIT {
            let overflow = self.summaries.len() - HISTORY_LIMIT;
            self.summaries.drain(..overflow);
        }
    }

    /// Most recent summary for a lesson, if it was ever finished.
    pub fn last_for(&self, lesson_id: &str) -> Option<&LessonSummary> {
        self.summaries.iter().rev().find(|s| s.lesson_id == lesson_id)
    }
}
