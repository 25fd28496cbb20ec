use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::lesson::Exercise;
use crate::session::answer::{AttemptRecord, check_answer};
use crate::session::token_bank::TokenBank;

/// Checks allowed per exercise before the correction pass gives up on it.
pub const RETRY_LIMIT: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Initial,
    Correction,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Initial => "initial",
            Phase::Correction => "correction",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueProgress {
    pub position: usize,
    pub len: usize,
}

/// Single-session mastery scheduler.
///
/// Every command is total: when its precondition does not hold it leaves the
/// state untouched. The random source only feeds the token bank shuffle, so a
/// seeded `R` makes a session fully reproducible from its command log.
pub struct MasteryQueue<R> {
    exercises: Vec<Exercise>,
    play_queue: Vec<usize>,
    pointer: usize,
    phase: Phase,
    answers: HashMap<String, AttemptRecord>,
    current_selection: Vec<String>,
    used_slots: HashSet<usize>,
    token_bank: TokenBank,
    locked: bool,
    complete: bool,
    correction_total: Option<usize>,
    rng: R,
}

impl<R: Rng> MasteryQueue<R> {
    pub fn new(exercises: Vec<Exercise>, rng: R) -> Self {
        let mut queue = Self {
            exercises: Vec::new(),
            play_queue: Vec::new(),
            pointer: 0,
            phase: Phase::Initial,
            answers: HashMap::new(),
            current_selection: Vec::new(),
            used_slots: HashSet::new(),
            token_bank: TokenBank::empty(),
            locked: false,
            complete: false,
            correction_total: None,
            rng,
        };
        queue.init(exercises);
        queue
    }

    /// Start over with a fresh exercise list. An empty list completes at once.
    pub fn init(&mut self, exercises: Vec<Exercise>) -> &Self {
        self.play_queue = (0..exercises.len()).collect();
        self.exercises = exercises;
        self.pointer = 0;
        self.phase = Phase::Initial;
        self.answers.clear();
        self.correction_total = None;
        self.complete = self.exercises.is_empty();

        tracing::debug!(exercises = self.exercises.len(), "session initialized");
        if self.complete {
            self.clear_presentation();
        } else {
            self.activate();
        }
        self
    }

    pub fn select_token(&mut self, token: &str, slot: usize) -> &Self {
        if self.locked || self.complete || slot >= self.token_bank.len() {
            return self;
        }
        if !self.used_slots.insert(slot) {
            return self;
        }
        self.current_selection.push(token.to_string());
        self
    }

    /// Select whatever token the bank shows at `slot`.
    pub fn select_slot(&mut self, slot: usize) -> &Self {
        match self.token_bank.token(slot).map(str::to_string) {
            Some(token) => self.select_token(&token, slot),
            None => self,
        }
    }

    pub fn clear_current(&mut self) -> &Self {
        if self.locked {
            return self;
        }
        self.current_selection.clear();
        self.used_slots.clear();
        self
    }

    pub fn check_answer(&mut self) -> &Self {
        if self.locked || self.complete || self.current_selection.is_empty() {
            return self;
        }
        let Some(exercise) = self.active_exercise() else {
            return self;
        };

        let is_correct = check_answer(&self.current_selection, &exercise.solution_tokens);
        let id = exercise.id.clone();
        let record = self.answers.entry(id.clone()).or_default();
        record.record(is_correct);
        tracing::debug!(
            exercise = %id,
            correct = is_correct,
            attempts = record.attempts,
            phase = self.phase.as_str(),
            "answer checked"
        );

        self.locked = true;
        self
    }

    pub fn advance(&mut self) -> &Self {
        if !self.locked || self.complete {
            return self;
        }
        match self.phase {
            Phase::Initial => self.advance_initial(),
            Phase::Correction => self.advance_correction(),
        }
        self
    }

    fn advance_initial(&mut self) {
        if self.pointer + 1 < self.play_queue.len() {
            self.pointer += 1;
            self.activate();
            return;
        }

        let correction_queue: Vec<usize> = self
            .play_queue
            .iter()
            .copied()
            .filter(|&idx| !self.is_marked_correct(idx))
            .collect();

        if correction_queue.is_empty() {
            self.finish();
            return;
        }

        tracing::debug!(pending = correction_queue.len(), "entering correction pass");
        self.correction_total = Some(correction_queue.len());
        self.play_queue = correction_queue;
        self.pointer = 0;
        self.phase = Phase::Correction;
        self.activate();
    }

    fn advance_correction(&mut self) {
        let idx = self.play_queue[self.pointer];
        let record = self
            .answers
            .get(&self.exercises[idx].id)
            .copied()
            .unwrap_or_default();

        self.play_queue.remove(self.pointer);
        if record.is_correct || record.attempts >= RETRY_LIMIT {
            tracing::debug!(
                exercise = %self.exercises[idx].id,
                mastered = record.is_correct,
                attempts = record.attempts,
                "exercise resolved"
            );
        } else {
            tracing::debug!(exercise = %self.exercises[idx].id, attempts = record.attempts, "exercise deferred");
            self.play_queue.push(idx);
        }

        if self.play_queue.is_empty() {
            self.finish();
            return;
        }
        // The next item shifted into the vacated slot; only wrap at the end.
        if self.pointer >= self.play_queue.len() {
            self.pointer = 0;
        }
        self.activate();
    }

    fn is_marked_correct(&self, idx: usize) -> bool {
        self.answers
            .get(&self.exercises[idx].id)
            .is_some_and(|r| r.is_correct)
    }

    fn activate(&mut self) {
        self.current_selection.clear();
        self.used_slots.clear();
        self.locked = false;
        let idx = self.play_queue[self.pointer];
        self.token_bank = TokenBank::shuffled(&self.exercises[idx], &mut self.rng);
    }

    fn finish(&mut self) {
        self.complete = true;
        tracing::debug!(
            mastered = self.answers.values().filter(|r| r.is_correct).count(),
            total = self.exercises.len(),
            "session complete"
        );
    }

    fn clear_presentation(&mut self) {
        self.current_selection.clear();
        self.used_slots.clear();
        self.token_bank = TokenBank::empty();
        self.locked = false;
    }
}

impl<R> MasteryQueue<R> {
    pub fn active_exercise(&self) -> Option<&Exercise> {
        self.active_index().map(|idx| &self.exercises[idx])
    }

    /// Position of the active exercise in the original lesson order.
    pub fn active_index(&self) -> Option<usize> {
        if self.complete {
            return None;
        }
        self.play_queue.get(self.pointer).copied()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn correction_total(&self) -> Option<usize> {
        self.correction_total
    }

    pub fn progress(&self) -> QueueProgress {
        QueueProgress {
            position: self.pointer,
            len: self.play_queue.len(),
        }
    }

    pub fn play_queue(&self) -> &[usize] {
        &self.play_queue
    }

    pub fn current_selection(&self) -> &[String] {
        &self.current_selection
    }

    pub fn used_slots(&self) -> &HashSet<usize> {
        &self.used_slots
    }

    pub fn token_bank(&self) -> &TokenBank {
        &self.token_bank
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn answers(&self) -> &HashMap<String, AttemptRecord> {
        &self.answers
    }

    /// Outcome of the check that locked the active exercise.
    pub fn last_outcome(&self) -> Option<AttemptRecord> {
        if !self.locked {
            return None;
        }
        self.active_exercise()
            .and_then(|ex| self.answers.get(&ex.id))
            .copied()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }
}
