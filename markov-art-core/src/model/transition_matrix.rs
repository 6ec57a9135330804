use std::collections::BTreeMap;

use serde::Serialize;

use super::predecessors::Predecessors;

/// Per-key probabilities derived from predecessor counts.
///
/// Each row sums to 1.0 (up to rounding). Generation does not use it:
/// sampling with integer weights gives the same distribution. It is kept for
/// inspecting a trained model.
#[derive(Serialize, Clone, Debug, PartialEq, Default)]
pub struct TransitionMatrix {
	rows: BTreeMap<char, BTreeMap<char, f64>>,
}

impl TransitionMatrix {
	/// Builds the matrix; every probability is `count / total` rounded to
	/// three decimals.
	pub(crate) fn from_counts<'a, I>(states: I) -> Self
	where
		I: IntoIterator<Item = (char, &'a Predecessors)>,
	{
		let mut rows = BTreeMap::new();
		for (key, predecessors) in states {
			let total = predecessors.total() as f64;
			if total == 0.0 {
				continue;
			}
			let row = predecessors
				.iter()
				.map(|(prev_char, count)| (prev_char, round3(count as f64 / total)))
				.collect();
			rows.insert(key, row);
		}
		Self { rows }
	}

	/// Probability of `prev_char` under `key`.
	pub fn probability(&self, key: char, prev_char: char) -> Option<f64> {
		self.rows.get(&key)?.get(&prev_char).copied()
	}

	pub fn row(&self, key: char) -> Option<&BTreeMap<char, f64>> {
		self.rows.get(&key)
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

fn round3(value: f64) -> f64 {
	(value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
	use crate::model::transition_model::TransitionModel;

	#[test]
	fn test_probabilities_are_rounded() {
		let mut model = TransitionModel::new();
		// 'c' preceded by 'a' twice and 'b' once
		model.observe("acacbc");
		let matrix = model.transition_matrix();

		assert_eq!(matrix.probability('c', 'a'), Some(0.667));
		assert_eq!(matrix.probability('c', 'b'), Some(0.333));
		assert_eq!(matrix.probability('c', 'z'), None);
	}

	#[test]
	fn test_rows_sum_to_one() {
		let mut model = TransitionModel::new();
		model.observe("the quick brown fox jumps over the lazy dog");
		let matrix = model.transition_matrix();

		assert_eq!(matrix.len(), model.len());
		for key in model.keys() {
			let sum: f64 = matrix.row(key).unwrap().values().sum();
			assert!((sum - 1.0).abs() < 0.01, "row {key:?} sums to {sum}");
		}
	}
}
