//! Fake note generation for seeding and tests.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

use super::NoteRepository;
use crate::error::NoteResult;
use crate::models::{Note, NoteInput};

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat",
];

pub struct NoteFactory<R: Rng = StdRng> {
    rng: R,
    owners: Option<RangeInclusive<i64>>,
}

impl NoteFactory<StdRng> {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible output for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for NoteFactory<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> NoteFactory<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng, owners: None }
    }

    /// Attach a random owner from `range` to roughly half of the notes
    pub fn with_owners(mut self, range: RangeInclusive<i64>) -> Self {
        self.owners = Some(range);
        self
    }

    pub fn make(&mut self) -> NoteInput {
        let title = capitalize(&self.words(2..=5));

        let sentence_count = self.rng.gen_range(2..=5);
        let body = (0..sentence_count)
            .map(|_| {
                let words = self.words(6..=14);
                format!("{}.", capitalize(&words))
            })
            .collect::<Vec<_>>()
            .join(" ");

        let user_id = match self.owners.clone() {
            Some(range) if self.rng.gen_bool(0.5) => Some(self.rng.gen_range(range)),
            _ => None,
        };

        NoteInput {
            title,
            body,
            user_id,
        }
    }

    pub fn make_many(&mut self, count: usize) -> Vec<NoteInput> {
        (0..count).map(|_| self.make()).collect()
    }

    /// Generate `count` notes and persist each one
    pub fn create_many(
        &mut self,
        repo: &dyn NoteRepository,
        count: usize,
    ) -> NoteResult<Vec<Note>> {
        self.make_many(count)
            .iter()
            .map(|input| repo.create_note(input))
            .collect()
    }

    fn words(&mut self, count: RangeInclusive<usize>) -> String {
        let count = self.rng.gen_range(count);
        (0..count)
            .filter_map(|_| WORDS.choose(&mut self.rng).copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
