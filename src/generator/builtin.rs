use anyhow::{Context, Result};
use rust_embed::Embed;

use crate::lesson::LessonRecord;

#[derive(Embed)]
#[folder = "assets/lessons/"]
struct LessonAssets;

/// Names of the bundled phrasebook lessons, sorted.
pub fn available_lessons() -> Vec<String> {
    let mut names: Vec<String> = LessonAssets::iter()
        .filter_map(|f| f.strip_suffix(".json").map(|n| n.to_string()))
        .collect();
    names.sort();
    names
}

pub fn load(name: &str) -> Result<LessonRecord> {
    let filename = format!("{name}.json");
    let file = LessonAssets::get(&filename)
        .with_context(|| format!("no bundled lesson named {name:?}"))?;
    let record = serde_json::from_slice(file.data.as_ref())
        .with_context(|| format!("bundled lesson {name:?} is malformed"))?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::Lesson;

    #[test]
    fn every_bundled_lesson_validates() {
        let names = available_lessons();
        assert!(!names.is_empty());
        for name in names {
            let record = load(&name).unwrap();
            let lesson = Lesson::from_record(&record)
                .unwrap_or_else(|e| panic!("bundled lesson {name} invalid: {e}"));
            assert!(!lesson.exercises.is_empty());
        }
    }

    #[test]
    fn unknown_lesson_is_an_error() {
        assert!(load("does-not-exist").is_err());
    }
}
