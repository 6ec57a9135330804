use std::collections::BTreeMap;

use rand::Rng;

use serde::{Deserialize, Serialize};


/// Predecessor counts recorded for one character of the transition model.
///
/// Each entry `p => n` means that `p` was observed immediately before the
/// key character `n` times.
///
/// ## Responsibilities:
/// - Accumulate predecessor occurrences during training
/// - Draw one predecessor with probability proportional to its count
/// - Merge with the counts of another model for the same key
///
/// ## Invariants
/// - A `Predecessors` stored in a model is never empty
/// - Each occurrence count is strictly positive
///
/// Counts are kept in a `BTreeMap`: the iteration order, and therefore the
/// sampled character for a given random draw, does not depend on the process.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Predecessors {
	counts: BTreeMap<char, usize>,
}

impl Predecessors {
	/// Creates an empty set of counts.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more occurrence of `prev_char` before the key.
	pub fn add(&mut self, prev_char: char) {
		*self.counts.entry(prev_char).or_insert(0) += 1;
	}

	/// Number of times `prev_char` was seen before the key (0 if never).
	pub fn count(&self, prev_char: char) -> usize {
		self.counts.get(&prev_char).copied().unwrap_or(0)
	}

	/// Sum of all counts.
	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Iterates over `(predecessor, count)` in character order.
	pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
		self.counts.iter().map(|(c, n)| (*c, *n))
	}

	/// Draws a predecessor using weighted random sampling.
	///
	/// The probability of selecting a character is proportional to its
	/// count: one draw in `0..total`, then a cumulative subtraction to find
	/// the bucket.
	///
	/// Returns `None` if there are no counts.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<char> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (prev_char, occurrence) in &self.counts {
			if r < *occurrence {
				return Some(*prev_char);
			}
			r -= occurrence;
		}

		// Unreachable while counts sum to `total`
		self.counts.keys().next_back().copied()
	}

	/// Adds the counts of `other` to this one.
	pub fn merge(&mut self, other: &Self) {
		for (prev_char, occurrence) in &other.counts {
			*self.counts.entry(*prev_char).or_insert(0) += *occurrence;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn test_add_accumulates() {
		let mut predecessors = Predecessors::new();
		predecessors.add('a');
		predecessors.add('a');
		predecessors.add('b');
		assert_eq!(predecessors.count('a'), 2);
		assert_eq!(predecessors.count('b'), 1);
		assert_eq!(predecessors.count('z'), 0);
		assert_eq!(predecessors.total(), 3);
	}

	#[test]
	fn test_empty_samples_nothing() {
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(Predecessors::new().sample(&mut rng), None);
	}

	#[test]
	fn test_single_candidate_is_always_drawn() {
		let mut predecessors = Predecessors::new();
		predecessors.add('x');
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..100 {
			assert_eq!(predecessors.sample(&mut rng), Some('x'));
		}
	}

	#[test]
	fn test_merge_sums_counts() {
		let mut left = Predecessors::new();
		left.add('a');
		let mut right = Predecessors::new();
		right.add('a');
		right.add('c');
		left.merge(&right);
		assert_eq!(left.iter().collect::<Vec<_>>(), vec![('a', 2), ('c', 1)]);
	}
}
