use serde::{Deserialize, Serialize};

use crate::error::CanvasError;
use super::pen::{PenState, Point, Rgb, Shape};

/// A single turtle-style drawing command.
///
/// Commands are relative to the canvas's own pen: `Circle` is centered on the
/// last `MoveTo`, and a `MoveTo` issued while the pen is down draws a line.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
	MoveTo { x: f32, y: f32 },
	SetHeading { degrees: f32 },
	PenUp,
	PenDown,
	SetColor { color: Rgb },
	SetStrokeWidth { width: f32 },
	SetStretch { stretch: (f32, f32), tilt: f32 },
	/// Filled circle centered on the pen.
	Circle { radius: f32 },
	/// Filled dot centered on the pen.
	Dot { radius: f32 },
	/// Imprint of a shape at the pen position.
	Stamp { shape: Shape, stretch: (f32, f32), heading: f32 },
}

/// Drawing surface the glyph renderer emits commands to.
///
/// Implementations own the visible image; the renderer never reads anything
/// back from them.
pub trait Canvas {
	/// Applies one command.
	///
	/// # Errors
	/// Returns an error if the canvas cannot honor the command.
	fn apply(&mut self, op: DrawOp) -> Result<(), CanvasError>;

	/// Makes the final image visible (writes it out, presents it...).
	fn flush(&mut self) -> Result<(), CanvasError> {
		Ok(())
	}
}

/// Visible area of an origin-centered canvas.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub left: f32,
	pub right: f32,
	pub top: f32,
	pub bottom: f32,
}

impl Bounds {
	/// Bounds of a `width` x `height` window centered on the origin.
	pub fn centered(width: f32, height: f32) -> Self {
		Self {
			left: -width / 2.0,
			right: width / 2.0,
			top: height / 2.0,
			bottom: -height / 2.0,
		}
	}

	pub fn width(&self) -> f32 {
		self.right - self.left
	}

	pub fn height(&self) -> f32 {
		self.top - self.bottom
	}

	/// Top-left corner, where rendering starts.
	pub fn origin(&self) -> Point {
		Point::new(self.left, self.top)
	}

	/// Brings an advanced cursor back inside the bounds.
	///
	/// Below the bottom margin the cursor goes back to the origin, drawing over
	/// what is already there. Past the right margin it moves to the start of
	/// the next line, or to the origin when there is no next line.
	pub fn wrap(&self, position: Point, line_step: f32) -> Point {
		if position.y < self.bottom {
			return self.origin();
		}
		if position.x > self.right {
			let next_line = Point::new(self.left, position.y - line_step);
			if next_line.y < self.bottom {
				return self.origin();
			}
			return next_line;
		}
		position
	}
}

/// Canvas that only remembers the commands it received.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
	ops: Vec<DrawOp>,
	flushed: bool,
}

impl RecordingCanvas {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn ops(&self) -> &[DrawOp] {
		&self.ops
	}

	pub fn into_ops(self) -> Vec<DrawOp> {
		self.ops
	}

	pub fn is_flushed(&self) -> bool {
		self.flushed
	}

	/// Replays the recorded commands and returns every mark (circle, dot or
	/// stamp) together with the pen it was drawn with.
	pub fn marks(&self) -> Vec<(DrawOp, PenState)> {
		let mut pen = PenState::default();
		let mut marks = Vec::new();
		for op in &self.ops {
			pen.follow(op);
			if matches!(op, DrawOp::Circle { .. } | DrawOp::Dot { .. } | DrawOp::Stamp { .. }) {
				marks.push((op.clone(), pen.clone()));
			}
		}
		marks
	}
}

impl Canvas for RecordingCanvas {
	fn apply(&mut self, op: DrawOp) -> Result<(), CanvasError> {
		self.ops.push(op);
		Ok(())
	}

	fn flush(&mut self) -> Result<(), CanvasError> {
		self.flushed = true;
		Ok(())
	}
}

impl PenState {
	/// Tracks the effect of a command on a canvas-side pen.
	///
	/// Returns the segment drawn when the command is a `MoveTo` with the pen
	/// down.
	pub fn follow(&mut self, op: &DrawOp) -> Option<(Point, Point)> {
		match *op {
			DrawOp::MoveTo { x, y } => {
				let from = self.position;
				self.position = Point::new(x, y);
				if self.pen_down {
					return Some((from, self.position));
				}
			}
			DrawOp::SetHeading { degrees } => self.heading = degrees,
			DrawOp::PenUp => self.pen_down = false,
			DrawOp::PenDown => self.pen_down = true,
			DrawOp::SetColor { color } => self.style.color = color,
			DrawOp::SetStrokeWidth { width } => self.style.width = width,
			DrawOp::SetStretch { stretch, tilt } => {
				self.style.stretch = stretch;
				self.style.tilt = tilt;
			}
			DrawOp::Stamp { shape, .. } => self.style.shape = shape,
			DrawOp::Circle { .. } | DrawOp::Dot { .. } => (),
		}
		None
	}
}

impl Shape {
	/// Outline of the shape facing East at unit stretch, around (0, 0).
	pub fn outline(&self) -> Vec<Point> {
		let points: &[(f32, f32)] = match self {
			Self::Classic => &[(0.0, 0.0), (-9.0, 5.0), (-7.0, 0.0), (-9.0, -5.0)],
			Self::Arrow => &[(10.0, 0.0), (0.0, -10.0), (0.0, 10.0)],
			Self::Triangle => &[(11.55, 0.0), (-5.77, 10.0), (-5.77, -10.0)],
			Self::Square => &[(10.0, 10.0), (-10.0, 10.0), (-10.0, -10.0), (10.0, -10.0)],
			Self::Turtle => &[
				(16.0, 0.0), (10.0, 4.0), (6.0, 6.0), (-6.0, 6.0), (-10.0, 3.0),
				(-10.0, -3.0), (-6.0, -6.0), (6.0, -6.0), (10.0, -4.0),
			],
			Self::Circle => {
				return (0..12)
					.map(|i| {
						let angle = (i as f32 * 30.0).to_radians();
						Point::new(10.0 * angle.cos(), 10.0 * angle.sin())
					})
					.collect();
			}
		};
		points.iter().map(|&(x, y)| Point::new(x, y)).collect()
	}

	/// Outline placed at `position`, scaled by `stretch` and rotated to
	/// `heading` (degrees) plus `tilt`.
	pub fn placed(&self, position: Point, stretch: (f32, f32), heading: f32, tilt: f32) -> Vec<Point> {
		let (sin, cos) = (heading + tilt).to_radians().sin_cos();
		self.outline()
			.into_iter()
			.map(|p| {
				let along = p.x * stretch.1;
				let across = p.y * stretch.0;
				Point::new(
					position.x + along * cos - across * sin,
					position.y + along * sin + across * cos,
				)
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_wrap_right_margin_moves_one_line_down() {
		let bounds = Bounds::centered(100.0, 60.0);
		assert_eq!(bounds.wrap(Point::new(51.0, 10.0), 10.0), Point::new(-50.0, 0.0));
		assert_eq!(bounds.wrap(Point::new(50.0, 10.0), 10.0), Point::new(50.0, 10.0));
	}

	#[test]
	fn test_wrap_bottom_goes_back_to_origin() {
		let bounds = Bounds::centered(100.0, 60.0);
		// Bottom check wins over the right margin
		assert_eq!(bounds.wrap(Point::new(80.0, -31.0), 10.0), Point::new(-50.0, 30.0));
		// Last line is full
		assert_eq!(bounds.wrap(Point::new(51.0, -25.0), 10.0), Point::new(-50.0, 30.0));
	}

	#[test]
	fn test_follow_reports_pen_down_segments() {
		let mut pen = PenState::default();
		assert_eq!(pen.follow(&DrawOp::MoveTo { x: 5.0, y: 0.0 }), None);
		pen.follow(&DrawOp::PenDown);
		assert_eq!(
			pen.follow(&DrawOp::MoveTo { x: 15.0, y: 0.0 }),
			Some((Point::new(5.0, 0.0), Point::new(15.0, 0.0)))
		);
	}

	#[test]
	fn test_placed_rotates_to_heading() {
		let tip = Shape::Arrow.placed(Point::new(1.0, 1.0), (0.5, 0.5), 270.0, 0.0)[0];
		assert!((tip.x - 1.0).abs() < 1e-4);
		assert!((tip.y + 4.0).abs() < 1e-4);
	}

	#[test]
	fn test_ops_serialize_with_a_tag() {
		let json = serde_json::to_string(&DrawOp::Circle { radius: 2.0 }).unwrap();
		assert_eq!(json, r#"{"op":"circle","radius":2.0}"#);
	}
}
