use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, warn};
use rand::Rng;
use rand::prelude::IteratorRandom;
use serde::{Deserialize, Serialize};

use crate::error::ArtError;
use crate::io;
use super::predecessors::Predecessors;
use super::transition_matrix::TransitionMatrix;

/// Order-1 character model built from training text.
///
/// For every character `c` seen at position `i >= 1` of a training text,
/// the model records which character came right before it.
///
/// Sampling draws from those *predecessor* counts, and the result is used
/// as the character that *follows* `c` during generation. The table is
/// therefore read backwards compared to a forward Markov chain; this is
/// the observable behavior of the generator and is kept as is.
///
/// # Invariants
/// - Every key maps to a non-empty `Predecessors`
/// - Counts only grow; nothing is ever removed
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct TransitionModel {
	/// Mapping from a character to the counts of characters seen before it.
	states: BTreeMap<char, Predecessors>,
}

impl TransitionModel {
	/// Creates an empty model.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records every adjacent pair of `text`.
	///
	/// For each position `i >= 1`, counts `text[i-1]` as a predecessor of
	/// `text[i]`. Texts of zero or one character change nothing.
	///
	/// Returns the last character of `text`, `None` if it is empty.
	pub fn observe(&mut self, text: &str) -> Option<char> {
		let mut chars = text.chars();
		let mut prev_char = chars.next()?;
		let mut pairs = 0usize;

		for current_char in chars {
			self.states.entry(current_char).or_default().add(prev_char);
			prev_char = current_char;
			pairs += 1;
		}

		debug!("Observed {} transitions, model has {} keys", pairs, self.states.len());
		Some(prev_char)
	}

	/// Reads a whole file and observes its content, with accented letters
	/// replaced by their base letter when `fold_accents` is set.
	///
	/// # Errors
	/// Returns an error if the file cannot be read.
	pub fn observe_file<P: AsRef<Path>>(&mut self, path: P, fold_accents: bool) -> Result<Option<char>, ArtError> {
		let mut text = io::read_text(&path)?;
		if fold_accents {
			text = io::fold_accents(&text);
		}
		if text.chars().nth(1).is_none() {
			warn!("{} holds no transitions", path.as_ref().display());
		}
		Ok(self.observe(&text))
	}

	/// Draws the character that follows `current`.
	///
	/// The draw is weighted by the predecessor counts recorded under
	/// `current` (see the type documentation for the direction).
	///
	/// # Errors
	/// Returns `UnknownCharacter` if `current` is not a key of the model.
	pub fn sample_successor<R: Rng>(&self, current: char, rng: &mut R) -> Result<char, ArtError> {
		self.states
			.get(&current)
			.and_then(|predecessors| predecessors.sample(rng))
			.ok_or(ArtError::UnknownCharacter(current))
	}

	/// Picks one key uniformly at random.
	///
	/// Returns `None` if the model is empty.
	pub fn random_key<R: Rng>(&self, rng: &mut R) -> Option<char> {
		self.states.keys().choose(rng).copied()
	}

	/// Predecessor counts recorded for `key`.
	pub fn predecessors(&self, key: char) -> Option<&Predecessors> {
		self.states.get(&key)
	}

	/// Number of times `prev_char` was seen right before `key`.
	pub fn count(&self, key: char, prev_char: char) -> usize {
		self.states.get(&key).map_or(0, |p| p.count(prev_char))
	}

	/// Number of times `key` was preceded by any character.
	pub fn total(&self, key: char) -> usize {
		self.states.get(&key).map_or(0, Predecessors::total)
	}

	pub fn contains(&self, key: char) -> bool {
		self.states.contains_key(&key)
	}

	/// Keys in character order.
	pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
		self.states.keys().copied()
	}

	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Probabilities derived from the counts, for inspection.
	pub fn transition_matrix(&self) -> TransitionMatrix {
		TransitionMatrix::from_counts(self.states.iter().map(|(key, p)| (*key, p)))
	}

	/// Merges another model into this one.
	///
	/// Counts for matching keys and predecessors are summed; keys missing
	/// here are cloned.
	pub fn merge(&mut self, other: &Self) {
		for (key, predecessors) in &other.states {
			if let Some(existing) = self.states.get_mut(key) {
				existing.merge(predecessors);
			} else {
				self.states.insert(*key, predecessors.clone());
			}
		}
	}
}
