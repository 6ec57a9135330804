use serde::{Deserialize, Serialize};

use crate::error::CanvasError;
use super::canvas::{Bounds, Canvas, DrawOp};
use super::glyph::CharClass;
use super::pen::{PenState, Point, Rgb, Shape};

/// Italics-like skew applied after a quote.
const QUOTE_TILT: f32 = 15.0;
const QUOTE_STRETCH: (f32, f32) = (0.8, 0.2);
/// Scale used to stamp `?` and `!` marks.
const MARK_STRETCH: (f32, f32) = (0.5, 0.5);
const COLON_EXTRA_WIDTH: f32 = 3.0;
const DASH_TILT: f32 = 30.0;
const DASH_EXTRA_WIDTH: f32 = 1.0;
/// The period dot is a little smaller than a letter.
const DOT_SHRINK: f32 = 3.0;

/// Cursor advance and mark size used while rendering.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Layout {
	/// Distance the cursor advances after each character.
	pub horizontal_step: f32,
	/// Distance between two lines.
	pub vertical_step: f32,
	/// Radius of the circle drawn for a letter.
	pub font_size: f32,
	pub bounds: Bounds,
}

/// State machine turning one character into pen mutations and marks.
///
/// Every mutation of the pen is mirrored to the canvas as a `DrawOp`, so the
/// canvas pen and `PenState` never drift apart.
pub struct GlyphRenderer<'a, C: Canvas + ?Sized> {
	canvas: &'a mut C,
	layout: Layout,
}

impl<'a, C: Canvas + ?Sized> GlyphRenderer<'a, C> {
	pub fn new(canvas: &'a mut C, layout: Layout) -> Self {
		Self { canvas, layout }
	}

	/// Renders one character, then advances and wraps the cursor.
	///
	/// # Errors
	/// Returns the first error raised by the canvas.
	pub fn draw_char(&mut self, pen: &mut PenState, c: char) -> Result<(), CanvasError> {
		let saved = pen.snapshot();
		self.set_heading(pen, 0.0)?;
		self.pen_down(pen)?;

		match CharClass::of(c) {
			CharClass::Letter(color) => {
				self.set_color(pen, color)?;
				self.canvas.apply(DrawOp::Circle { radius: self.layout.font_size })?;
			}
			CharClass::Space => self.pen_up(pen)?,
			CharClass::Period => {
				self.canvas.apply(DrawOp::Dot { radius: self.layout.font_size - DOT_SHRINK })?;
				self.restore_initial(pen)?;
			}
			CharClass::Comma => {
				let target = pen.ahead(self.layout.horizontal_step);
				self.move_to(pen, target)?;
			}
			CharClass::Quote => self.set_stretch(pen, QUOTE_STRETCH, QUOTE_TILT)?,
			CharClass::Question => self.stamp_mark(pen, Shape::Triangle, 90.0, saved.position, saved.stretch)?,
			CharClass::Exclamation => self.stamp_mark(pen, Shape::Arrow, 270.0, saved.position, saved.stretch)?,
			CharClass::ColonSemicolon => self.set_width(pen, saved.width + COLON_EXTRA_WIDTH)?,
			CharClass::Dash => {
				let stretch = pen.style.stretch;
				self.set_stretch(pen, stretch, DASH_TILT)?;
				self.set_width(pen, saved.width + DASH_EXTRA_WIDTH)?;
			}
			CharClass::Newline => {
				self.pen_up(pen)?;
				let target = Point::new(self.layout.bounds.left, saved.position.y - self.layout.vertical_step);
				self.move_to(pen, target)?;
			}
			CharClass::Digit(d) => {
				let (d, tilt) = (f32::from(d), pen.style.tilt);
				self.set_stretch(pen, (3.0 * d, d), tilt)?;
			}
			CharClass::Other => (),
		}

		self.pen_up(pen)?;
		self.set_heading(pen, 0.0)?;
		let advanced = pen.ahead(self.layout.horizontal_step);
		self.move_to(pen, advanced)?;

		let wrapped = self.layout.bounds.wrap(pen.position, self.layout.vertical_step);
		if wrapped != pen.position {
			self.move_to(pen, wrapped)?;
		}
		Ok(())
	}

	/// Stamps a half-size `shape` facing `heading`, then puts the scale and
	/// position back and resets the style.
	fn stamp_mark(
		&mut self,
		pen: &mut PenState,
		shape: Shape,
		heading: f32,
		position: Point,
		stretch: (f32, f32),
	) -> Result<(), CanvasError> {
		let tilt = pen.style.tilt;
		self.set_stretch(pen, MARK_STRETCH, tilt)?;
		self.set_heading(pen, heading)?;
		pen.style.shape = shape;
		self.canvas.apply(DrawOp::Stamp { shape, stretch: MARK_STRETCH, heading })?;
		self.set_stretch(pen, stretch, tilt)?;
		if pen.position != position {
			self.move_to(pen, position)?;
		}
		self.restore_initial(pen)
	}

	/// Positions a raised pen at `origin` and syncs the canvas with the
	/// pen's whole style.
	pub fn reset(&mut self, pen: &mut PenState, origin: Point) -> Result<(), CanvasError> {
		self.pen_up(pen)?;
		self.move_to(pen, origin)?;
		self.set_heading(pen, 0.0)?;
		self.sync_style(pen)
	}

	fn restore_initial(&mut self, pen: &mut PenState) -> Result<(), CanvasError> {
		pen.restore_initial();
		self.sync_style(pen)
	}

	fn sync_style(&mut self, pen: &PenState) -> Result<(), CanvasError> {
		self.canvas.apply(DrawOp::SetColor { color: pen.style.color })?;
		self.canvas.apply(DrawOp::SetStrokeWidth { width: pen.style.width })?;
		self.canvas.apply(DrawOp::SetStretch { stretch: pen.style.stretch, tilt: pen.style.tilt })
	}

	fn move_to(&mut self, pen: &mut PenState, target: Point) -> Result<(), CanvasError> {
		pen.position = target;
		self.canvas.apply(DrawOp::MoveTo { x: target.x, y: target.y })
	}

	fn set_heading(&mut self, pen: &mut PenState, degrees: f32) -> Result<(), CanvasError> {
		pen.heading = degrees;
		self.canvas.apply(DrawOp::SetHeading { degrees })
	}

	fn pen_up(&mut self, pen: &mut PenState) -> Result<(), CanvasError> {
		pen.pen_down = false;
		self.canvas.apply(DrawOp::PenUp)
	}

	fn pen_down(&mut self, pen: &mut PenState) -> Result<(), CanvasError> {
		pen.pen_down = true;
		self.canvas.apply(DrawOp::PenDown)
	}

	fn set_color(&mut self, pen: &mut PenState, color: Rgb) -> Result<(), CanvasError> {
		pen.style.color = color;
		self.canvas.apply(DrawOp::SetColor { color })
	}

	fn set_width(&mut self, pen: &mut PenState, width: f32) -> Result<(), CanvasError> {
		pen.style.width = width;
		self.canvas.apply(DrawOp::SetStrokeWidth { width })
	}

	fn set_stretch(&mut self, pen: &mut PenState, stretch: (f32, f32), tilt: f32) -> Result<(), CanvasError> {
		pen.style.stretch = stretch;
		pen.style.tilt = tilt;
		self.canvas.apply(DrawOp::SetStretch { stretch, tilt })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::render::canvas::RecordingCanvas;
	use crate::render::pen::PenStyle;

	fn layout() -> Layout {
		Layout {
			horizontal_step: 10.0,
			vertical_step: 10.0,
			font_size: 22.0,
			bounds: Bounds::centered(200.0, 100.0),
		}
	}

	fn start(canvas: &mut RecordingCanvas) -> PenState {
		let mut pen = PenState::new(PenStyle::default());
		let mut renderer = GlyphRenderer::new(canvas, layout());
		renderer.reset(&mut pen, layout().bounds.origin()).unwrap();
		pen.capture_initial();
		pen
	}

	#[test]
	fn test_letter_draws_colored_circle_then_advances() {
		let mut canvas = RecordingCanvas::new();
		let mut pen = start(&mut canvas);
		GlyphRenderer::new(&mut canvas, layout()).draw_char(&mut pen, 'b').unwrap();

		assert_eq!(pen.position, Point::new(-90.0, 50.0));
		assert_eq!(pen.style.color, Rgb(255, 0, 0));
		assert!(!pen.pen_down);

		let marks = canvas.marks();
		assert_eq!(marks.len(), 1);
		assert_eq!(marks[0].0, DrawOp::Circle { radius: 22.0 });
		assert_eq!(marks[0].1.position, Point::new(-100.0, 50.0));
		assert_eq!(marks[0].1.style.color, Rgb(255, 0, 0));
	}

	#[test]
	fn test_space_and_other_only_advance() {
		let mut canvas = RecordingCanvas::new();
		let mut pen = start(&mut canvas);
		let before = pen.style;
		let mut renderer = GlyphRenderer::new(&mut canvas, layout());
		renderer.draw_char(&mut pen, ' ').unwrap();
		renderer.draw_char(&mut pen, '#').unwrap();

		assert_eq!(pen.position, Point::new(-80.0, 50.0));
		assert_eq!(pen.style, before);
		assert!(canvas.marks().is_empty());
	}

	#[test]
	fn test_period_draws_dot_and_restores_style() {
		let mut canvas = RecordingCanvas::new();
		let mut pen = start(&mut canvas);
		let mut renderer = GlyphRenderer::new(&mut canvas, layout());
		for c in "a:7'.".chars() {
			renderer.draw_char(&mut pen, c).unwrap();
		}

		assert_eq!(pen.style, PenStyle::default());
		assert!(canvas.ops().contains(&DrawOp::Dot { radius: 19.0 }));
	}

	#[test]
	fn test_comma_draws_a_segment() {
		let mut canvas = RecordingCanvas::new();
		let mut pen = start(&mut canvas);
		GlyphRenderer::new(&mut canvas, layout()).draw_char(&mut pen, ',').unwrap();

		let mut replay = PenState::default();
		let segments: Vec<_> = canvas.ops().iter().filter_map(|op| replay.follow(op)).collect();
		assert_eq!(segments, vec![(Point::new(-100.0, 50.0), Point::new(-90.0, 50.0))]);
		// Comma step plus the regular advance
		assert_eq!(pen.position, Point::new(-80.0, 50.0));
	}

	#[test]
	fn test_style_modifiers() {
		let mut canvas = RecordingCanvas::new();
		let mut pen = start(&mut canvas);
		let mut renderer = GlyphRenderer::new(&mut canvas, layout());

		renderer.draw_char(&mut pen, '"').unwrap();
		assert_eq!((pen.style.stretch, pen.style.tilt), ((0.8, 0.2), 15.0));

		renderer.draw_char(&mut pen, ';').unwrap();
		assert_eq!(pen.style.width, 4.0);

		renderer.draw_char(&mut pen, '-').unwrap();
		assert_eq!((pen.style.width, pen.style.tilt), (5.0, 30.0));

		renderer.draw_char(&mut pen, '4').unwrap();
		assert_eq!(pen.style.stretch, (12.0, 4.0));
		assert!(canvas.marks().is_empty());
	}

	#[test]
	fn test_question_and_exclamation_stamp_and_reset() {
		let mut canvas = RecordingCanvas::new();
		let mut pen = start(&mut canvas);
		let mut renderer = GlyphRenderer::new(&mut canvas, layout());
		renderer.draw_char(&mut pen, '5').unwrap();
		renderer.draw_char(&mut pen, '?').unwrap();
		renderer.draw_char(&mut pen, '!').unwrap();

		let stamps: Vec<DrawOp> = canvas.marks().into_iter().map(|(op, _)| op).collect();
		assert_eq!(stamps, vec![
			DrawOp::Stamp { shape: Shape::Triangle, stretch: (0.5, 0.5), heading: 90.0 },
			DrawOp::Stamp { shape: Shape::Arrow, stretch: (0.5, 0.5), heading: 270.0 },
		]);
		assert_eq!(pen.style, PenStyle::default());
		assert_eq!(pen.heading, 0.0);
		assert_eq!(pen.position, Point::new(-70.0, 50.0));
	}

	#[test]
	fn test_newlines_move_down_one_step_each() {
		let mut canvas = RecordingCanvas::new();
		let mut pen = start(&mut canvas);
		let mut renderer = GlyphRenderer::new(&mut canvas, layout());
		renderer.draw_char(&mut pen, 'x').unwrap();
		renderer.draw_char(&mut pen, '\n').unwrap();
		let x = pen.position.x;
		let mut y = pen.position.y;
		assert_eq!(x, -90.0);
		assert_eq!(y, 40.0);

		for _ in 0..5 {
			renderer.draw_char(&mut pen, '\n').unwrap();
			assert_eq!(pen.position.x, x);
			assert_eq!(pen.position.y, y - 10.0);
			y = pen.position.y;
		}
		assert!(canvas.marks().len() == 1);
	}

	#[test]
	fn test_falling_below_bottom_returns_to_origin() {
		let mut canvas = RecordingCanvas::new();
		let mut pen = start(&mut canvas);
		let mut renderer = GlyphRenderer::new(&mut canvas, layout());
		// 50 -> -50 in ten newlines, the eleventh goes below the bottom margin
		for _ in 0..10 {
			renderer.draw_char(&mut pen, '\n').unwrap();
		}
		assert_eq!(pen.position, Point::new(-90.0, -50.0));
		renderer.draw_char(&mut pen, '\n').unwrap();
		assert_eq!(pen.position, Point::new(-100.0, 50.0));
	}
}
