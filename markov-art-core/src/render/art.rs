use log::{debug, info};

use crate::error::ArtError;
use super::canvas::Canvas;
use super::pen::{PenState, PenStyle};
use super::renderer::{GlyphRenderer, Layout};

/// Renders whole texts onto one canvas.
///
/// Owns the pen and the canvas for the duration of a run: characters are
/// processed strictly in order, each one starting where the previous one
/// left the cursor.
pub struct ArtGenerator<C: Canvas> {
	canvas: C,
	layout: Layout,
	pen: PenState,
}

impl<C: Canvas> ArtGenerator<C> {
	pub fn new(canvas: C, layout: Layout, style: PenStyle) -> Self {
		Self { canvas, layout, pen: PenState::new(style) }
	}

	pub fn pen(&self) -> &PenState {
		&self.pen
	}

	pub fn canvas(&self) -> &C {
		&self.canvas
	}

	/// Draws `text` starting from the top-left corner.
	///
	/// The pen is raised, moved to the origin and its style captured as the
	/// initial one before the first character.
	///
	/// # Errors
	/// Aborts on the first canvas error; marks already drawn stay on the canvas.
	pub fn render(&mut self, text: &str) -> Result<(), ArtError> {
		let mut renderer = GlyphRenderer::new(&mut self.canvas, self.layout);
		renderer.reset(&mut self.pen, self.layout.bounds.origin())?;
		self.pen.capture_initial();

		let mut count = 0usize;
		for c in text.chars() {
			renderer.draw_char(&mut self.pen, c)?;
			count += 1;
		}
		debug!("Pen ended at ({}, {})", self.pen.position.x, self.pen.position.y);
		info!("Rendered {} characters", count);
		Ok(())
	}

	/// Flushes the canvas and hands it back.
	pub fn finish(mut self) -> Result<C, ArtError> {
		self.canvas.flush()?;
		Ok(self.canvas)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::CanvasError;
	use crate::render::canvas::{Bounds, DrawOp, RecordingCanvas};
	use crate::render::pen::Point;

	/// Records commands and fails on the `fail_at`-th circle.
	struct FailingCanvas {
		inner: RecordingCanvas,
		circles: usize,
		fail_at: usize,
	}

	impl Canvas for FailingCanvas {
		fn apply(&mut self, op: DrawOp) -> Result<(), CanvasError> {
			if let DrawOp::Circle { .. } = op {
				self.circles += 1;
				if self.circles == self.fail_at {
					return Err(CanvasError::Write("disk full".to_owned()));
				}
			}
			self.inner.apply(op)
		}
	}

	fn generator(width: f32, height: f32) -> ArtGenerator<RecordingCanvas> {
		let layout = Layout {
			horizontal_step: 10.0,
			vertical_step: 10.0,
			font_size: 5.0,
			bounds: Bounds::centered(width, height),
		};
		ArtGenerator::new(RecordingCanvas::new(), layout, PenStyle::default())
	}

	#[test]
	fn test_letters_past_right_margin_start_next_line() {
		// ceil(95 / 10) + 1 letters: the tenth advance crosses the right margin
		let mut art = generator(95.0, 200.0);
		art.render(&"a".repeat(11)).unwrap();

		let centers: Vec<Point> = art.canvas().marks().into_iter().map(|(_, pen)| pen.position).collect();
		assert_eq!(centers.len(), 11);
		assert_eq!(centers[0], Point::new(-47.5, 100.0));
		assert_eq!(centers[9], Point::new(42.5, 100.0));
		assert_eq!(centers[10], Point::new(-47.5, 90.0));
	}

	#[test]
	fn test_render_is_reproducible() {
		let text = "Hi, there!\nIs it 42? \"Yes\": fine - ok.";
		let mut first = generator(120.0, 60.0);
		let mut second = generator(120.0, 60.0);
		first.render(text).unwrap();
		second.render(text).unwrap();
		assert_eq!(first.canvas().ops(), second.canvas().ops());
	}

	#[test]
	fn test_cursor_stays_in_bounds() {
		let layout = Layout {
			horizontal_step: 10.0,
			vertical_step: 10.0,
			font_size: 5.0,
			bounds: Bounds::centered(60.0, 40.0),
		};
		let bounds = layout.bounds;
		let mut canvas = RecordingCanvas::new();
		let mut pen = PenState::default();
		let mut renderer = GlyphRenderer::new(&mut canvas, layout);
		renderer.reset(&mut pen, bounds.origin()).unwrap();

		let text = "The quick brown fox,\njumps over the lazy dog!? 0123456789,,,,";
		for c in text.chars().cycle().take(500) {
			renderer.draw_char(&mut pen, c).unwrap();
			let p = pen.position;
			assert!(p.x >= bounds.left && p.x <= bounds.right, "x out of bounds: {p:?}");
			assert!(p.y >= bounds.bottom && p.y <= bounds.top, "y out of bounds: {p:?}");
		}
	}

	#[test]
	fn test_finish_flushes() {
		let mut art = generator(100.0, 100.0);
		art.render("ab").unwrap();
		let canvas = art.finish().unwrap();
		assert!(canvas.is_flushed());
		assert!(matches!(canvas.ops()[0], DrawOp::PenUp));
	}

	#[test]
	fn test_canvas_error_aborts_the_run() {
		let layout = Layout {
			horizontal_step: 10.0,
			vertical_step: 10.0,
			font_size: 5.0,
			bounds: Bounds::centered(100.0, 100.0),
		};
		let canvas = FailingCanvas { inner: RecordingCanvas::new(), circles: 0, fail_at: 2 };
		let mut art = ArtGenerator::new(canvas, layout, PenStyle::default());

		let result = art.render("abcd");
		assert!(matches!(result, Err(ArtError::Canvas(CanvasError::Write(_)))));

		// Nothing after the failing 'b' reached the canvas
		assert_eq!(art.canvas().circles, 2);
		assert_eq!(art.canvas().inner.marks().len(), 1);
		assert!(matches!(art.canvas().inner.ops().last(), Some(DrawOp::SetColor { .. })));
		assert_eq!(art.pen().position, Point::new(-40.0, 50.0));
	}
}
