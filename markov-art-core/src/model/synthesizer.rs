use std::str::FromStr;

use log::{debug, info};
use rand::Rng;

use crate::error::ArtError;
use super::transition_model::TransitionModel;

/// Strategy used to select the character generation starts from.
///
/// # Variants
/// - `Random`: a key of the model, picked uniformly at random.
/// - `Custom(String)`: the last character of the given string. An empty
///   string behaves like `Random`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum StartSeed {
	#[default]
	Random,
	Custom(String),
}

impl StartSeed {
	/// The explicit seed character, if any.
	pub fn seed_char(&self) -> Option<char> {
		match self {
			Self::Random => None,
			Self::Custom(s) => s.chars().last(),
		}
	}
}

impl FromStr for StartSeed {
	type Err = ArtError;

	/// Parses `"random"`, `"none"` or `"custom:<text>"`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		const PREFIX: &str = "custom:";
		match s {
			s if s.eq_ignore_ascii_case("random") || s.eq_ignore_ascii_case("none") => Ok(Self::Random),
			s if s.get(..PREFIX.len()).is_some_and(|p| p.eq_ignore_ascii_case(PREFIX)) => {
				let value = &s[PREFIX.len()..];
				if value.is_empty() {
					Err(ArtError::Settings("Custom seed cannot be empty".into()))
				} else {
					Ok(Self::Custom(value.to_owned()))
				}
			}
			_ => Err(ArtError::Settings("Seed must start with 'custom:' or be 'random'/'none'".into())),
		}
	}
}

/// Converts a caller-supplied length into a generation length.
///
/// # Errors
/// Returns `InvalidLength` for negative values.
pub fn checked_length(requested: i64) -> Result<usize, ArtError> {
	usize::try_from(requested).map_err(|_| ArtError::InvalidLength(requested))
}

/// Drives a trained `TransitionModel` to produce new text.
///
/// The model is only read; several synthesizers may share one.
pub struct TextSynthesizer<'a> {
	model: &'a TransitionModel,
}

impl<'a> TextSynthesizer<'a> {
	pub fn new(model: &'a TransitionModel) -> Self {
		Self { model }
	}

	/// Generates exactly `length` characters.
	///
	/// Starting from `seed_char` (or a random key when `None`), repeatedly
	/// samples the next character from the current one. The seed itself is
	/// not part of the output.
	///
	/// # Errors
	/// - `EmptyModel` if the model has no keys
	/// - `UnknownCharacter` if a sampled character is not itself a key; this
	///   can happen for a character only ever seen at the very start of the
	///   training text
	pub fn generate<R: Rng>(&self, length: usize, seed_char: Option<char>, rng: &mut R) -> Result<String, ArtError> {
		if self.model.is_empty() {
			return Err(ArtError::EmptyModel);
		}

		let mut current_char = match seed_char {
			Some(c) => c,
			None => self.model.random_key(rng).ok_or(ArtError::EmptyModel)?,
		};
		debug!("Generating {} characters from {:?}", length, current_char);

		let mut text = String::with_capacity(length);
		for _ in 0..length {
			let next_char = self.model.sample_successor(current_char, rng)?;
			text.push(next_char);
			current_char = next_char;
		}

		info!("Generated {} characters", length);
		Ok(text)
	}

	/// Generates `length` characters following the seed strategy.
	pub fn generate_from<R: Rng>(&self, length: usize, start_seed: &StartSeed, rng: &mut R) -> Result<String, ArtError> {
		self.generate(length, start_seed.seed_char(), rng)
	}
}
