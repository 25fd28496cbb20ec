pub mod builtin;
pub mod stub;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lesson::LessonRecord;

pub const MIN_PROMPT_LEN: usize = 10;
pub const MAX_PROMPT_LEN: usize = 5000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("prompt must be at least {min} characters", min = MIN_PROMPT_LEN)]
    TooShort,
    #[error("prompt cannot exceed {max} characters", max = MAX_PROMPT_LEN)]
    TooLong,
}

pub fn validate_prompt(prompt: &str) -> Result<&str, PromptError> {
    let trimmed = prompt.trim();
    let len = trimmed.chars().count();
    if len < MIN_PROMPT_LEN {
        Err(PromptError::TooShort)
    } else if len > MAX_PROMPT_LEN {
        Err(PromptError::TooLong)
    } else {
        Ok(trimmed)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    A1,
    A2,
    B1,
    B2,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Difficulty::A1, Difficulty::A2, Difficulty::B1, Difficulty::B2];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::A1 => "A1",
            Difficulty::A2 => "A2",
            Difficulty::B1 => "B1",
            Difficulty::B2 => "B2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationParams {
    pub difficulty: Difficulty,
    pub min_exercises: usize,
    pub max_exercises: usize,
    pub exercise_type: String,
    pub mode: String,
    pub source_language: String,
    pub target_language: String,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            min_exercises: 1,
            max_exercises: 10,
            exercise_type: "reorder".to_string(),
            mode: "translate".to_string(),
            source_language: "en".to_string(),
            target_language: "de".to_string(),
        }
    }
}

/// Source of lesson content. Output is unsanitized; callers pass it through
/// `Lesson::from_record` before a session sees it.
pub trait ContentGenerator {
    fn generate(&mut self, prompt: &str, params: &GenerationParams) -> Result<LessonRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_length_bounds() {
        assert_eq!(validate_prompt("  too short "), Err(PromptError::TooShort));
        assert_eq!(validate_prompt("  ordering at a café  "), Ok("ordering at a café"));
        assert_eq!(validate_prompt(&"x".repeat(5001)), Err(PromptError::TooLong));
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!(Difficulty::from_name("b1"), Some(Difficulty::B1));
        assert_eq!(Difficulty::from_name("C2"), None);
    }
}
