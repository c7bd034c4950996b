//! Notes and the cycling note store
//!
//! The store hands out notes in a shuffled order. When every note has been
//! handed out it reshuffles the whole sequence and starts again, so reads
//! never go out of bounds and every note keeps coming back.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One text item from the content feed
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Note {
    /// Source identifier, used only to drop duplicates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub content: String,
}

impl Note {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
        }
    }

    pub fn with_id(id: u64, content: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            content: content.into(),
        }
    }
}

/// Shuffled notes plus a read cursor
#[derive(Clone, Debug, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    cursor: usize,
}

impl NoteStore {
    /// Build a store from loaded notes, dropping duplicates and shuffling once
    pub fn from_notes<R: Rng + ?Sized>(notes: Vec<Note>, rng: &mut R) -> Self {
        let mut seen_ids = HashSet::new();
        let mut seen_content = HashSet::new();

        let mut unique: Vec<Note> = notes
            .into_iter()
            .filter(|note| match note.id {
                Some(id) => seen_ids.insert(id),
                None => seen_content.insert(note.content.clone()),
            })
            .collect();
        unique.shuffle(rng);

        Self {
            notes: unique,
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    /// Index of the next note, reshuffling when the cursor reached the end
    ///
    /// Returns `None` only for an empty store.
    pub fn next_index<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.notes.is_empty() {
            return None;
        }

        if self.cursor >= self.notes.len() {
            self.notes.shuffle(rng);
            self.cursor = 0;
            log::debug!("Note store exhausted, reshuffled {} notes", self.notes.len());
        }

        let index = self.cursor;
        self.cursor += 1;
        Some(index)
    }

    /// Next note in the cycle
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Note> {
        let index = self.next_index(rng)?;
        self.notes.get(index)
    }

    /// Up to `count` distinct note indices, without moving the cursor
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<usize> {
        let count = count.min(self.notes.len());
        rand::seq::index::sample(rng, self.notes.len(), count).into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn notes(contents: &[&str]) -> Vec<Note> {
        contents.iter().map(|c| Note::new(*c)).collect()
    }

    #[test]
    fn test_empty_store_yields_nothing() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut store = NoteStore::from_notes(Vec::new(), &mut rng);

        assert!(store.is_empty());
        assert!(store.next(&mut rng).is_none());
        assert!(store.sample(8, &mut rng).is_empty());
    }

    #[test]
    fn test_fourth_call_on_three_notes_reshuffles() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut store = NoteStore::from_notes(notes(&["a", "b", "c"]), &mut rng);

        for _ in 0..3 {
            assert!(store.next(&mut rng).is_some());
        }
        assert_eq!(store.cursor(), 3);

        let fourth = store.next(&mut rng).cloned().unwrap();
        assert!(["a", "b", "c"].contains(&fourth.content.as_str()));
        assert_eq!(store.cursor(), 1);
    }

    #[test]
    fn test_every_note_visited_each_cycle() {
        let mut rng = SmallRng::seed_from_u64(42);
        let contents = ["one", "two", "three", "four", "five"];
        let mut store = NoteStore::from_notes(notes(&contents), &mut rng);

        for _cycle in 0..4 {
            let mut seen: Vec<String> = (0..contents.len())
                .map(|_| store.next(&mut rng).unwrap().content.clone())
                .collect();
            seen.sort();
            let mut expected: Vec<String> = contents.iter().map(|c| c.to_string()).collect();
            expected.sort();
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn test_duplicates_dropped() {
        let mut rng = SmallRng::seed_from_u64(3);
        let store = NoteStore::from_notes(
            vec![
                Note::with_id(1, "first"),
                Note::with_id(1, "first again"),
                Note::with_id(2, "first"),
                Note::new("plain"),
                Note::new("plain"),
            ],
            &mut rng,
        );

        // id 1 once, id 2 kept despite same content, "plain" once
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_sample_is_distinct_and_keeps_cursor() {
        let mut rng = SmallRng::seed_from_u64(9);
        let store = NoteStore::from_notes(notes(&["a", "b", "c"]), &mut rng);

        let mut picked = store.sample(8, &mut rng);
        assert_eq!(picked.len(), 3);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 3);
        assert_eq!(store.cursor(), 0);
    }
}
