use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lesson::tokens::{parse_tokens, sanitize_tokens};

pub const TITLE_MAX_LEN: usize = 120;
pub const MAX_SOLUTION_TOKENS: usize = 15;
pub const MAX_DISTRACTOR_TOKENS: usize = 5;

pub const ALLOWED_EXERCISE_TYPES: &[&str] = &["reorder"];
pub const ALLOWED_MODES: &[&str] = &["translate"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,

    #[error("lesson has no exercises")]
    NoExercises,

    #[error("exercise {position}: question text cannot be empty")]
    EmptyQuestion { position: usize },

    #[error("exercise {position}: solution must contain at least one token")]
    EmptySolution { position: usize },

    #[error("exercise {position}: {count} solution tokens exceeds the limit of {max}")]
    TooManySolutionTokens {
        position: usize,
        count: usize,
        max: usize,
    },

    #[error("duplicate exercise id {id:?}")]
    DuplicateId { id: String },
}

fn default_exercise_type() -> String {
    "reorder".to_string()
}

fn default_mode() -> String {
    "translate".to_string()
}

/// Keep `value` if it is one of `allowed`, otherwise use `fallback()`.
fn allowed_or(value: &str, allowed: &[&str], fallback: fn() -> String) -> String {
    let value = value.trim();
    if allowed.contains(&value) {
        value.to_string()
    } else {
        fallback()
    }
}

/// Serialized exercise as produced by a content source. Token lists are
/// delimited strings and have not been sanitized yet.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExerciseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default = "default_exercise_type", rename = "type")]
    pub exercise_type: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(alias = "questionText")]
    pub question_text: String,
    #[serde(alias = "solutionTokens")]
    pub solution_tokens: String,
    #[serde(default, alias = "distractorTokens")]
    pub distractor_tokens: String,
    #[serde(default, alias = "sourceLanguage", skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    #[serde(default, alias = "targetLanguage", skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LessonRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub exercises: Vec<ExerciseRecord>,
}

/// A validated reorder exercise. Read-only once a session holds it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exercise {
    pub id: String,
    pub order_index: usize,
    pub exercise_type: String,
    pub mode: String,
    pub question_text: String,
    pub solution_tokens: Vec<String>,
    pub distractor_tokens: Vec<String>,
}

impl Exercise {
    pub fn new(
        id: &str,
        order_index: usize,
        question_text: &str,
        solution_tokens: &[&str],
        distractor_tokens: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            order_index,
            exercise_type: default_exercise_type(),
            mode: default_mode(),
            question_text: question_text.to_string(),
            solution_tokens: solution_tokens.iter().map(|t| t.to_string()).collect(),
            distractor_tokens: distractor_tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Sanitize and validate a record that sits at `position` in lesson order.
    pub fn from_record(record: &ExerciseRecord, position: usize) -> Result<Self, LessonError> {
        let question_text = record.question_text.trim();
        if question_text.is_empty() {
            return Err(LessonError::EmptyQuestion { position });
        }

        let sanitized = sanitize_tokens(&record.solution_tokens, &record.distractor_tokens);
        let solution_tokens = parse_tokens(&sanitized.solution);
        if solution_tokens.is_empty() {
            return Err(LessonError::EmptySolution { position });
        }
        if solution_tokens.len() > MAX_SOLUTION_TOKENS {
            return Err(LessonError::TooManySolutionTokens {
                position,
                count: solution_tokens.len(),
                max: MAX_SOLUTION_TOKENS,
            });
        }

        let mut distractor_tokens = parse_tokens(&sanitized.distractors);
        distractor_tokens.truncate(MAX_DISTRACTOR_TOKENS);

        let id = record
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("exercise-{position}"));

        Ok(Self {
            id,
            order_index: position,
            exercise_type: allowed_or(
                &record.exercise_type,
                ALLOWED_EXERCISE_TYPES,
                default_exercise_type,
            ),
            mode: allowed_or(&record.mode, ALLOWED_MODES, default_mode),
            question_text: question_text.to_string(),
            solution_tokens,
            distractor_tokens,
        })
    }

    /// Solution rendered as the learner would read it.
    pub fn solution_text(&self) -> String {
        self.solution_tokens.join(" ")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lesson {
    pub id: Option<String>,
    pub title: String,
    pub exercises: Vec<Exercise>,
}

impl Lesson {
    /// Build a lesson in canonical order: records are sorted by their
    /// `index` (falling back to file position) and re-indexed from zero.
    pub fn from_record(record: &LessonRecord) -> Result<Self, LessonError> {
        let title: String = record.title.trim().chars().take(TITLE_MAX_LEN).collect();
        if title.is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        if record.exercises.is_empty() {
            return Err(LessonError::NoExercises);
        }

        let mut ordered: Vec<(usize, &ExerciseRecord)> = record
            .exercises
            .iter()
            .enumerate()
            .map(|(pos, ex)| (ex.index.unwrap_or(pos), ex))
            .collect();
        ordered.sort_by_key(|(index, _)| *index);

        let mut seen = HashSet::new();
        let mut exercises = Vec::with_capacity(ordered.len());
        for (position, (_, ex)) in ordered.into_iter().enumerate() {
            let exercise = Exercise::from_record(ex, position)?;
            if !seen.insert(exercise.id.clone()) {
                return Err(LessonError::DuplicateId { id: exercise.id });
            }
            exercises.push(exercise);
        }

        Ok(Self {
            id: record.id.clone(),
            title,
            exercises,
        })
    }

    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.title)
    }
}
