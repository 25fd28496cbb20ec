use anyhow::Result;

use crate::generator::{ContentGenerator, GenerationParams, validate_prompt};
use crate::lesson::tokens::join_tokens;
use crate::lesson::{ExerciseRecord, LessonRecord};

const STUB_MAX_EXERCISES: usize = 5;
const PROMPT_PREVIEW_CHARS: usize = 50;

/// Deterministic placeholder lessons, used when no real content source is
/// configured and in tests.
#[derive(Debug, Default)]
pub struct StubGenerator;

impl StubGenerator {
    pub fn exercise_count(params: &GenerationParams) -> usize {
        let upper = params.max_exercises.min(STUB_MAX_EXERCISES);
        params.min_exercises.max(1).min(upper).max(1)
    }
}

impl ContentGenerator for StubGenerator {
    fn generate(&mut self, prompt: &str, params: &GenerationParams) -> Result<LessonRecord> {
        let prompt = validate_prompt(prompt)?;
        let preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();

        let exercises = (0..Self::exercise_count(params))
            .map(|i| ExerciseRecord {
                id: None,
                index: Some(i),
                exercise_type: params.exercise_type.clone(),
                mode: params.mode.clone(),
                question_text: format!("Stub exercise {} for prompt: \"{preview}...\"", i + 1),
                solution_tokens: join_tokens(&[
                    format!("word{i}_1"),
                    format!("word{i}_2"),
                    format!("word{i}_3"),
                ]),
                distractor_tokens: String::new(),
                source_language: Some(params.source_language.clone()),
                target_language: Some(params.target_language.clone()),
            })
            .collect();

        tracing::info!(difficulty = params.difficulty.as_str(), "generated stub lesson");
        Ok(LessonRecord {
            id: None,
            title: format!("Stub Lesson ({})", params.difficulty.as_str()),
            exercises,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Difficulty, PromptError};
    use crate::lesson::Lesson;

    #[test]
    fn count_is_clamped() {
        let mut params = GenerationParams::default();
        assert_eq!(StubGenerator::exercise_count(&params), 1);
        params.min_exercises = 8;
        assert_eq!(StubGenerator::exercise_count(&params), 5);
        params.min_exercises = 0;
        params.max_exercises = 0;
        assert_eq!(StubGenerator::exercise_count(&params), 1);
        params.min_exercises = 3;
        params.max_exercises = 4;
        assert_eq!(StubGenerator::exercise_count(&params), 3);
    }

    #[test]
    fn generated_lesson_validates() {
        let params = GenerationParams {
            difficulty: Difficulty::B2,
            min_exercises: 3,
            ..Default::default()
        };
        let record = StubGenerator
            .generate("Ordering breakfast in Berlin", &params)
            .unwrap();
        assert_eq!(record.title, "Stub Lesson (B2)");

        let lesson = Lesson::from_record(&record).unwrap();
        assert_eq!(lesson.exercises.len(), 3);
        assert_eq!(lesson.exercises[2].solution_tokens, vec!["word2_1", "word2_2", "word2_3"]);
        assert!(lesson.exercises[0].question_text.starts_with("Stub exercise 1 for prompt"));
    }

    #[test]
    fn short_prompt_is_rejected() {
        let err = StubGenerator
            .generate("hi", &GenerationParams::default())
            .unwrap_err();
        assert_eq!(err.downcast_ref::<PromptError>(), Some(&PromptError::TooShort));
    }
}
