use serde::{Deserialize, Serialize};

/// Case-insensitive, position-exact comparison. No partial credit.
pub fn check_answer<A: AsRef<str>, B: AsRef<str>>(submitted: &[A], solution: &[B]) -> bool {
    submitted.len() == solution.len()
        && submitted
            .iter()
            .zip(solution)
            .all(|(s, t)| s.as_ref().to_lowercase() == t.as_ref().to_lowercase())
}

/// Outcome history for one exercise within a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub is_correct: bool,
    pub attempts: u32,
}

impl AttemptRecord {
    pub fn record(&mut self, is_correct: bool) {
        self.is_correct = is_correct;
        self.attempts = self.attempts.saturating_add(1);
    }
}
