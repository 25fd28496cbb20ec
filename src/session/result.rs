use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lesson::Lesson;
use crate::session::scheduler::MasteryQueue;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonSummary {
    pub lesson_id: String,
    pub lesson_title: String,
    pub correct: usize,
    pub total: usize,
    pub total_attempts: u32,
    #[serde(default)]
    pub retried_out: usize,
    #[serde(default)]
    pub corrected: bool,
    pub timestamp: DateTime<Utc>,
}

impl LessonSummary {
    /// Tally the final answer of every exercise the session presented.
    pub fn from_queue<R>(lesson: &Lesson, queue: &MasteryQueue<R>) -> Self {
        let answers = queue.answers();
        let correct = answers.values().filter(|r| r.is_correct).count();
        let total_attempts = answers.values().map(|r| r.attempts).sum();

        Self {
            lesson_id: lesson.display_id().to_string(),
            lesson_title: lesson.title.clone(),
            correct,
            total: queue.exercise_count(),
            total_attempts,
            retried_out: answers.len() - correct,
            corrected: queue.correction_total().is_some(),
            timestamp: Utc::now(),
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }

    pub fn is_perfect(&self) -> bool {
        self.correct == self.total && !self.corrected
    }
}
