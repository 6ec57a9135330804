use std::{fmt, io};

/// Failure reported by a `Canvas` collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
	/// The requested shape name is not one the canvas knows how to stamp.
	UnknownShape(String),
	/// The final image could not be written out.
	Write(String),
}

impl fmt::Display for CanvasError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::UnknownShape(name) => write!(f, "unknown shape '{name}'"),
			Self::Write(reason) => write!(f, "failed to write canvas: {reason}"),
		}
	}
}

impl std::error::Error for CanvasError {}

/// Every failure the training, synthesis and rendering pipeline can report.
///
/// None of these are retried internally: synthesis is deterministic for a
/// fixed model and random sequence, so the caller has to change its inputs.
#[derive(Debug)]
pub enum ArtError {
	/// Generation was requested before any transition was observed.
	EmptyModel,
	/// Sampling was requested for a character that is not a key of the model.
	UnknownCharacter(char),
	/// The requested generation length is negative.
	InvalidLength(i64),
	/// A canvas collaborator refused an operation.
	Canvas(CanvasError),
	/// Reading training text or writing generated text failed.
	Io(io::Error),
	/// A configuration value is out of range.
	Settings(String),
}

impl fmt::Display for ArtError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::EmptyModel => write!(f, "the transition model is empty"),
			Self::UnknownCharacter(c) => write!(f, "no transitions recorded for {c:?}"),
			Self::InvalidLength(length) => write!(f, "invalid generation length {length}"),
			Self::Canvas(e) => write!(f, "canvas error: {e}"),
			Self::Io(e) => write!(f, "i/o error: {e}"),
			Self::Settings(reason) => write!(f, "invalid settings: {reason}"),
		}
	}
}

impl std::error::Error for ArtError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Canvas(e) => Some(e),
			Self::Io(e) => Some(e),
			_ => None,
		}
	}
}

impl From<CanvasError> for ArtError {
	fn from(e: CanvasError) -> Self {
		Self::Canvas(e)
	}
}

impl From<io::Error> for ArtError {
	fn from(e: io::Error) -> Self {
		Self::Io(e)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_names_the_character() {
		let e = ArtError::UnknownCharacter('q');
		assert_eq!(e.to_string(), "no transitions recorded for 'q'");
	}

	#[test]
	fn test_canvas_error_is_the_source() {
		use std::error::Error;

		let e = ArtError::from(CanvasError::UnknownShape("blob".to_owned()));
		assert!(e.source().is_some());
		assert!(e.to_string().contains("blob"));
	}
}
