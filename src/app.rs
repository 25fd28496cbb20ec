use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use satzbau::config::Config;
use satzbau::generator::builtin;
use satzbau::generator::{ContentGenerator, stub::StubGenerator};
use satzbau::lesson::Lesson;
use satzbau::session::result::LessonSummary;
use satzbau::session::scheduler::MasteryQueue;
use satzbau::store::json_store::JsonStore;
use satzbau::store::schema::LessonHistoryData;

use crate::ui::components::menu::{Menu, MenuItem, menu_key};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    LessonSelect,
    Lesson,
    Summary,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LessonSource {
    Builtin(String),
    File(PathBuf),
}

/// One entry of the lesson picker.
#[derive(Clone, Debug)]
pub struct LessonChoice {
    pub name: String,
    pub source: LessonSource,
}

impl LessonChoice {
    pub fn load(&self) -> Result<Lesson> {
        match &self.source {
            LessonSource::Builtin(name) => {
                let record = builtin::load(name)?;
                Lesson::from_record(&record)
                    .with_context(|| format!("invalid built-in lesson {name}"))
            }
            LessonSource::File(path) => JsonStore::load_lesson_file(path),
        }
    }
}

pub struct App {
    pub screen: AppScreen,
    pub menu: Menu<'static>,
    pub choices: Vec<LessonChoice>,
    pub theme: &'static Theme,
    pub config: Config,
    pub store: Option<JsonStore>,
    pub history: LessonHistoryData,
    pub lesson: Option<Lesson>,
    pub queue: Option<MasteryQueue<SmallRng>>,
    pub last_summary: Option<LessonSummary>,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_else(|| {
            tracing::warn!(
                theme = %config.theme,
                available = ?Theme::available_themes(),
                "unknown theme, using default"
            );
            Theme::default()
        });
        let store = match JsonStore::new() {
            Ok(store) => Some(store.with_lessons_dir(PathBuf::from(&config.lessons_dir))),
            Err(err) => {
                tracing::warn!(error = %err, "running without persistent storage");
                None
            }
        };
        Self::with_store(config, store, theme)
    }

    pub fn with_store(config: Config, store: Option<JsonStore>, theme: Theme) -> Self {
        let theme: &'static Theme = Box::leak(Box::new(theme));
        let history = store
            .as_ref()
            .map(JsonStore::load_history)
            .unwrap_or_default();

        let mut app = Self {
            screen: AppScreen::LessonSelect,
            menu: Menu::new(Vec::new(), theme),
            choices: Vec::new(),
            theme,
            config,
            store,
            history,
            lesson: None,
            queue: None,
            last_summary: None,
            status: None,
            should_quit: false,
        };
        app.refresh_lessons();
        app
    }

    /// Rebuild the picker from the bundled lessons and the lessons directory.
    pub fn refresh_lessons(&mut self) {
        let mut choices: Vec<LessonChoice> = builtin::available_lessons()
            .into_iter()
            .map(|name| LessonChoice {
                name: name.clone(),
                source: LessonSource::Builtin(name),
            })
            .collect();

        if let Some(ref store) = self.store {
            match store.list_lessons() {
                Ok(entries) => choices.extend(entries.into_iter().map(|e| LessonChoice {
                    name: e.name,
                    source: LessonSource::File(e.path),
                })),
                Err(err) => {
                    tracing::warn!(dir = %store.lessons_dir().display(), error = %err, "failed to list lessons");
                }
            }
        }

        let items = choices
            .iter()
            .enumerate()
            .map(|(i, choice)| MenuItem {
                key: menu_key(i).map(|k| k.to_string()).unwrap_or_default(),
                label: choice.name.clone(),
                description: self.choice_description(choice),
            })
            .collect();

        let selected = self.menu.selected;
        self.menu.items = items;
        self.menu.selected = selected.min(choices.len().saturating_sub(1));
        self.choices = choices;
    }

    fn choice_description(&self, choice: &LessonChoice) -> String {
        let origin = match choice.source {
            LessonSource::Builtin(_) => "built-in",
            LessonSource::File(_) => "saved",
        };
        match self.history.last_for(&choice.name) {
            Some(last) => format!("{origin}, last score {}/{}", last.correct, last.total),
            None => origin.to_string(),
        }
    }

    pub fn start_selected(&mut self) {
        let Some(choice) = self.choices.get(self.menu.selected).cloned() else {
            return;
        };
        match choice.load() {
            Ok(mut lesson) => {
                // History is keyed by picker name so it lines up with the menu.
                lesson.id = Some(choice.name);
                self.start_lesson(lesson);
            }
            Err(err) => {
                tracing::warn!(lesson = %choice.name, error = %format!("{err:#}"), "failed to load lesson");
                self.status = Some(format!("{err:#}"));
            }
        }
    }

    /// Start a picker entry by name.
    pub fn start_named(&mut self, name: &str) -> Result<()> {
        let Some(choice) = self.choices.iter().find(|c| c.name == name) else {
            bail!("no lesson named {name:?}");
        };
        let mut lesson = choice.load()?;
        lesson.id = Some(choice.name.clone());
        self.start_lesson(lesson);
        Ok(())
    }

    /// Start a lesson file. Files from the lessons directory are keyed by
    /// their picker name like any other picker entry.
    pub fn start_file(&mut self, path: &Path) -> Result<()> {
        let mut lesson = JsonStore::load_lesson_file(path)?;
        if let Some(name) = self.picker_name_for(path) {
            lesson.id = Some(name);
        }
        self.start_lesson(lesson);
        Ok(())
    }

    fn picker_name_for(&self, path: &Path) -> Option<String> {
        let wanted = fs::canonicalize(path).ok()?;
        self.choices.iter().find_map(|choice| match &choice.source {
            LessonSource::File(p) if fs::canonicalize(p).ok().as_ref() == Some(&wanted) => {
                Some(choice.name.clone())
            }
            _ => None,
        })
    }

    /// Generate a lesson from a prompt, keep a copy on disk when possible and
    /// start it.
    pub fn start_generated(&mut self, prompt: &str) -> Result<()> {
        let params = self.config.generation_params();
        let record = StubGenerator.generate(prompt, &params)?;
        let mut lesson = Lesson::from_record(&record).context("generated lesson is invalid")?;

        let saved = match self.store {
            Some(ref store) => match store.save_lesson(&record) {
                Ok(path) => Some(path),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to save generated lesson");
                    None
                }
            },
            None => None,
        };
        self.refresh_lessons();
        if let Some(name) = saved.as_deref().and_then(|path| self.picker_name_for(path)) {
            lesson.id = Some(name);
        }
        self.start_lesson(lesson);
        Ok(())
    }

    pub fn start_lesson(&mut self, lesson: Lesson) {
        let rng = match self.config.shuffle_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        tracing::info!(lesson = %lesson.display_id(), exercises = lesson.exercises.len(), "lesson started");
        let queue = MasteryQueue::new(lesson.exercises.clone(), rng);
        self.lesson = Some(lesson);
        self.queue = Some(queue);
        self.status = None;
        self.screen = AppScreen::Lesson;
        if self.queue.as_ref().is_some_and(|q| q.is_complete()) {
            self.finish_lesson();
        }
    }

    pub fn select_slot(&mut self, slot: usize) {
        if let Some(ref mut queue) = self.queue {
            queue.select_slot(slot);
        }
    }

    pub fn clear_current(&mut self) {
        if let Some(ref mut queue) = self.queue {
            queue.clear_current();
        }
    }

    /// Enter: check an open answer, or move on from a checked one.
    pub fn confirm(&mut self) {
        let Some(ref mut queue) = self.queue else {
            return;
        };
        if queue.is_locked() {
            queue.advance();
        } else {
            queue.check_answer();
        }
        if queue.is_complete() {
            self.finish_lesson();
        }
    }

    fn finish_lesson(&mut self) {
        let (Some(lesson), Some(queue)) = (&self.lesson, &self.queue) else {
            return;
        };
        let summary = LessonSummary::from_queue(lesson, queue);
        tracing::info!(
            lesson = %summary.lesson_id,
            correct = summary.correct,
            total = summary.total,
            "lesson complete"
        );

        match self.store {
            Some(ref store) => match store.record_summary(summary.clone()) {
                Ok(history) => self.history = history,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to save lesson history");
                    self.history.push(summary.clone());
                }
            },
            None => self.history.push(summary.clone()),
        }

        self.last_summary = Some(summary);
        self.screen = AppScreen::Summary;
        self.refresh_lessons();
    }

    pub fn retry_lesson(&mut self) {
        if let Some(lesson) = self.lesson.clone() {
            self.start_lesson(lesson);
        }
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::LessonSelect;
        self.queue = None;
    }
}
