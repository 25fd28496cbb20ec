use rand::Rng;
use rand::seq::SliceRandom;

use crate::lesson::Exercise;

/// Display order of the answer buttons for the active exercise. Slots are
/// positions in this order and stay stable until the exercise changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenBank {
    slots: Vec<String>,
}

impl TokenBank {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Solution tokens followed by distractors, then shuffled in place.
    pub fn shuffled<R: Rng + ?Sized>(exercise: &Exercise, rng: &mut R) -> Self {
        let mut slots: Vec<String> = exercise
            .solution_tokens
            .iter()
            .chain(&exercise.distractor_tokens)
            .cloned()
            .collect();
        slots.shuffle(rng);
        Self { slots }
    }

    pub fn token(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }

    pub fn tokens(&self) -> &[String] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
