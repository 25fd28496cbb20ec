use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::lesson::{Lesson, LessonRecord};
use crate::session::result::LessonSummary;
use crate::store::schema::LessonHistoryData;

const HISTORY_FILE: &str = "lesson_history.json";

/// A user lesson found on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonEntry {
    pub name: String,
    pub path: PathBuf,
}

pub struct JsonStore {
    base_dir: PathBuf,
    lessons_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("satzbau");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        let lessons_dir = base_dir.join("lessons");
        Ok(Self {
            base_dir,
            lessons_dir,
        })
    }

    pub fn with_lessons_dir(mut self, lessons_dir: PathBuf) -> Self {
        self.lessons_dir = lessons_dir;
        self
    }

    pub fn lessons_dir(&self) -> &Path {
        &self.lessons_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn write_atomic<T: Serialize>(path: &Path, data: &T) -> Result<()> {
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Read and validate a lesson file. The result is ready for a session.
    pub fn load_lesson_file(path: &Path) -> Result<Lesson> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read lesson {}", path.display()))?;
        let record: LessonRecord = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse lesson {}", path.display()))?;
        let lesson = Lesson::from_record(&record)
            .with_context(|| format!("invalid lesson {}", path.display()))?;
        Ok(lesson)
    }

    /// `*.json` files in the lessons directory, sorted by name. A missing
    /// directory simply has no lessons.
    pub fn list_lessons(&self) -> Result<Vec<LessonEntry>> {
        if !self.lessons_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries: Vec<LessonEntry> = fs::read_dir(&self.lessons_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|x| x.to_str()) == Some("json"))
            .filter_map(|path| {
                let name = path.file_stem()?.to_str()?.to_string();
                Some(LessonEntry { name, path })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Persist a lesson under a slug of its title, never overwriting an
    /// existing file.
    pub fn save_lesson(&self, record: &LessonRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.lessons_dir)?;
        let slug = slugify(&record.title);
        let mut path = self.lessons_dir.join(format!("{slug}.json"));
        let mut n = 2;
        while path.exists() {
            path = self.lessons_dir.join(format!("{slug}-{n}.json"));
            n += 1;
        }
        Self::write_atomic(&path, record)?;
        tracing::info!(path = %path.display(), "saved lesson");
        Ok(path)
    }

    /// History is best-effort: unreadable or stale files start over.
    pub fn load_history(&self) -> LessonHistoryData {
        let path = self.file_path(HISTORY_FILE);
        if !path.exists() {
            return LessonHistoryData::default();
        }
        let data: Option<LessonHistoryData> = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok());
        match data {
            Some(data) if !data.needs_reset() => data,
            _ => {
                tracing::warn!(path = %path.display(), "discarding unreadable lesson history");
                LessonHistoryData::default()
            }
        }
    }

    pub fn save_history(&self, data: &LessonHistoryData) -> Result<()> {
        Self::write_atomic(&self.file_path(HISTORY_FILE), data)
    }

    pub fn record_summary(&self, summary: LessonSummary) -> Result<LessonHistoryData> {
        let mut history = self.load_history();
        history.push(summary);
        self.save_history(&history)?;
        Ok(history)
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for ch in title.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "lesson".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::ExerciseRecord;
    use chrono::Utc;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    fn record(title: &str) -> LessonRecord {
        LessonRecord {
            id: None,
            title: title.to_string(),
            exercises: vec![ExerciseRecord {
                exercise_type: "reorder".to_string(),
                mode: "translate".to_string(),
                question_text: "Good evening".to_string(),
                solution_tokens: "Guten, Abend".to_string(),
                distractor_tokens: "abend, Morgen".to_string(),
                ..Default::default()
            }],
        }
    }

    fn summary(id: &str, correct: usize) -> LessonSummary {
        LessonSummary {
            lesson_id: id.to_string(),
            lesson_title: id.to_string(),
            correct,
            total: 3,
            total_attempts: 5,
            retried_out: 3 - correct,
            corrected: true,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_save_then_list_and_load_lesson() {
        let (_dir, store) = make_test_store();
        assert!(store.list_lessons().unwrap().is_empty());

        let path = store.save_lesson(&record("Abends im Restaurant!")).unwrap();
        assert!(path.ends_with("abends-im-restaurant.json"));

        let second = store.save_lesson(&record("Abends im Restaurant!")).unwrap();
        assert!(second.ends_with("abends-im-restaurant-2.json"));

        let entries = store.list_lessons().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "abends-im-restaurant");

        let lesson = JsonStore::load_lesson_file(&entries[0].path).unwrap();
        assert_eq!(lesson.exercises[0].solution_tokens, vec!["Guten", "Abend"]);
        assert_eq!(lesson.exercises[0].distractor_tokens, vec!["Morgen"]);
    }

    #[test]
    fn test_invalid_lesson_file_reports_path() {
        let (dir, _store) = make_test_store();
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"{"title": "  ", "exercises": []}"#).unwrap();
        let err = JsonStore::load_lesson_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
        assert!(format!("{err:#}").contains("title cannot be empty"));
    }

    #[test]
    fn test_history_round_trip() {
        let (_dir, store) = make_test_store();
        assert!(store.load_history().summaries.is_empty());

        store.record_summary(summary("cafe", 1)).unwrap();
        let history = store.record_summary(summary("cafe", 3)).unwrap();
        assert_eq!(history.summaries.len(), 2);

        let reloaded = store.load_history();
        assert_eq!(reloaded.summaries.len(), 2);
        assert_eq!(reloaded.last_for("cafe").unwrap().correct, 3);
        assert!(reloaded.last_for("other").is_none());
    }

    #[test]
    fn test_corrupt_or_stale_history_resets() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(HISTORY_FILE), "not json").unwrap();
        assert!(store.load_history().summaries.is_empty());

        fs::write(
            store.file_path(HISTORY_FILE),
            r#"{"schema_version": 99, "summaries": []}"#,
        )
        .unwrap();
        assert!(!store.load_history().needs_reset());
    }

    #[test]
    fn test_no_tmp_files_left_behind() {
        let (dir, store) = make_test_store();
        store.save_history(&LessonHistoryData::default()).unwrap();
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Im Café"), "im-café");
        assert_eq!(slugify("  ?? "), "lesson");
        assert_eq!(slugify("A -- B"), "a-b");
    }
}
