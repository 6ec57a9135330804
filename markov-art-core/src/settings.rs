use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ArtError;
use crate::io;
use crate::model::synthesizer::{StartSeed, checked_length};
use crate::render::canvas::Bounds;
use crate::render::pen::{PenStyle, Shape};
use crate::render::renderer::Layout;

/// Parameters of one train / generate / render run.
///
/// Every field has a default, so a settings file only needs the values it
/// changes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
	/// Width of the visible drawing area.
	pub window_width: f32,
	/// Height of the visible drawing area.
	pub window_height: f32,
	pub horizontal_step: f32,
	pub vertical_step: f32,
	/// Radius of the circle drawn for each letter.
	pub font_size: f32,
	/// Any SVG color.
	pub background: String,
	/// Shape the pen starts with.
	pub shape: String,
	pub stroke_width: f32,
	/// Number of characters to generate. Signed so that a negative request
	/// can be reported instead of wrapping.
	pub num_chars: i64,
	/// Generation starts from the last character of this string; empty
	/// means a random start.
	pub start: String,
	/// Seed of the random generator; `None` draws from the OS.
	pub rng_seed: Option<u64>,
	/// Folder holding the `.txt` training files.
	pub data_dir: String,
	/// Training file name inside `data_dir`.
	pub training_file: String,
	/// Replace accented letters before training.
	pub fold_accents: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			window_width: 1260.0,
			window_height: 660.0,
			horizontal_step: 10.0,
			vertical_step: 10.0,
			font_size: 22.0,
			background: "black".to_owned(),
			shape: "classic".to_owned(),
			stroke_width: 1.0,
			num_chars: 2000,
			start: "t".to_owned(),
			rng_seed: None,
			data_dir: "./data".to_owned(),
			training_file: "lyrics.txt".to_owned(),
			fold_accents: true,
		}
	}
}

impl Settings {
	/// Loads settings from a JSON file; missing fields keep their default.
	///
	/// # Errors
	/// Returns an error if the file cannot be read, parsed, or validated.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArtError> {
		let text = io::read_text(path)?;
		let settings: Self = serde_json::from_str(&text).map_err(|e| ArtError::Settings(e.to_string()))?;
		settings.validate()?;
		Ok(settings)
	}

	/// Checks that every value can be used for a run.
	///
	/// # Errors
	/// - `Settings` for non-positive or infinite sizes and steps
	/// - `InvalidLength` for a negative character count
	/// - `Canvas` for an unknown shape name
	pub fn validate(&self) -> Result<(), ArtError> {
		let positive = [
			("window_width", self.window_width),
			("window_height", self.window_height),
			("horizontal_step", self.horizontal_step),
			("vertical_step", self.vertical_step),
			("font_size", self.font_size),
			("stroke_width", self.stroke_width),
		];
		for (name, value) in positive {
			if !(value > 0.0 && value.is_finite()) {
				return Err(ArtError::Settings(format!("{name} must be positive and finite, got {value}")));
			}
		}
		checked_length(self.num_chars)?;
		self.shape.parse::<Shape>()?;
		Ok(())
	}

	pub fn bounds(&self) -> Bounds {
		Bounds::centered(self.window_width, self.window_height)
	}

	pub fn layout(&self) -> Layout {
		Layout {
			horizontal_step: self.horizontal_step,
			vertical_step: self.vertical_step,
			font_size: self.font_size,
			bounds: self.bounds(),
		}
	}

	/// Style the pen starts (and is reset) with.
	pub fn pen_style(&self) -> Result<PenStyle, ArtError> {
		Ok(PenStyle {
			width: self.stroke_width,
			shape: self.shape.parse()?,
			..PenStyle::default()
		})
	}

	pub fn length(&self) -> Result<usize, ArtError> {
		checked_length(self.num_chars)
	}

	pub fn start_seed(&self) -> StartSeed {
		if self.start.is_empty() {
			StartSeed::Random
		} else {
			StartSeed::Custom(self.start.clone())
		}
	}

	/// Full path of the training file.
	pub fn training_path(&self) -> std::path::PathBuf {
		io::normalize_folder(&self.data_dir).join(&self.training_file)
	}
}
