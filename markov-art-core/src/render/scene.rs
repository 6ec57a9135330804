use serde::{Deserialize, Serialize};

use crate::error::ArtError;
use super::art::ArtGenerator;
use super::canvas::{Bounds, Canvas, DrawOp, RecordingCanvas};
use super::pen::PenStyle;
use super::renderer::Layout;

/// A rendered text as a replayable list of drawing commands.
///
/// This is what the server sends to the viewer: the viewer replays `ops`
/// onto its own canvas.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Scene {
	pub text: String,
	pub seed: u64,
	pub background: String,
	pub bounds: Bounds,
	pub ops: Vec<DrawOp>,
}

impl Scene {
	/// Renders `text` onto a recording canvas.
	pub fn record(text: &str, seed: u64, layout: Layout, style: PenStyle, background: &str) -> Result<Self, ArtError> {
		let mut art = ArtGenerator::new(RecordingCanvas::new(), layout, style);
		art.render(text)?;
		let canvas = art.finish()?;
		Ok(Self {
			text: text.to_owned(),
			seed,
			background: background.to_owned(),
			bounds: layout.bounds,
			ops: canvas.into_ops(),
		})
	}

	/// Sends every command to `canvas`, then flushes it.
	pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<(), ArtError> {
		for op in &self.ops {
			canvas.apply(op.clone())?;
		}
		canvas.flush()?;
		Ok(())
	}
}
