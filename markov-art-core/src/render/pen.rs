use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CanvasError;

/// An 8-bit RGB color triple.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A position in origin-centered canvas coordinates (y grows upward).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
	pub x: f32,
	pub y: f32,
}

impl Point {
	pub fn new(x: f32, y: f32) -> Self {
		Self { x, y }
	}
}

/// Shapes a canvas can stamp at the pen position.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
	#[default]
	Classic,
	Arrow,
	Triangle,
	Circle,
	Square,
	Turtle,
}

impl Shape {
	/// Name used in settings and over the wire.
	pub fn name(&self) -> &'static str {
		match self {
			Self::Classic => "classic",
			Self::Arrow => "arrow",
			Self::Triangle => "triangle",
			Self::Circle => "circle",
			Self::Square => "square",
			Self::Turtle => "turtle",
		}
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Shape {
	type Err = CanvasError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"classic" => Ok(Self::Classic),
			"arrow" => Ok(Self::Arrow),
			"triangle" => Ok(Self::Triangle),
			"circle" => Ok(Self::Circle),
			"square" => Ok(Self::Square),
			"turtle" => Ok(Self::Turtle),
			_ => Err(CanvasError::UnknownShape(s.to_owned())),
		}
	}
}

/// The drawing style part of the pen: everything a `.`, `?` or `!`
/// resets back to its initial value.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PenStyle {
	pub color: Rgb,
	pub width: f32,
	pub shape: Shape,
	/// Shape stretch factor (perpendicular, parallel to the heading).
	pub stretch: (f32, f32),
	/// Shape tilt in degrees, relative to the heading.
	pub tilt: f32,
}

impl Default for PenStyle {
	fn default() -> Self {
		Self {
			color: Rgb(0, 0, 0),
			width: 1.0,
			shape: Shape::Classic,
			stretch: (1.0, 1.0),
			tilt: 0.0,
		}
	}
}

/// Values captured before a character is processed, so a branch can
/// restore or offset from them afterward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PenSnapshot {
	pub position: Point,
	pub width: f32,
	pub stretch: (f32, f32),
}

/// Mutable drawing cursor threaded through the glyph renderer.
///
/// # Invariants
/// - `initial` is captured once before rendering starts and never changes
///   while a text is being rendered
/// - after each character, `position` lies within the canvas bounds
///   (see `Bounds::wrap`)
#[derive(Clone, Debug, PartialEq)]
pub struct PenState {
	pub position: Point,
	/// Heading in degrees, 0 = East, 90 = North.
	pub heading: f32,
	pub pen_down: bool,
	pub style: PenStyle,
	initial: PenStyle,
}

impl PenState {
	/// Creates a raised pen at the origin, facing East.
	pub fn new(style: PenStyle) -> Self {
		Self {
			position: Point::default(),
			heading: 0.0,
			pen_down: false,
			style,
			initial: style,
		}
	}

	/// Saves the current style as the one `restore_initial` goes back to.
	pub fn capture_initial(&mut self) {
		self.initial = self.style;
	}

	/// Resets color, width, shape, stretch and tilt to the captured style.
	pub fn restore_initial(&mut self) {
		self.style = self.initial;
	}

	pub fn initial(&self) -> &PenStyle {
		&self.initial
	}

	pub fn snapshot(&self) -> PenSnapshot {
		PenSnapshot {
			position: self.position,
			width: self.style.width,
			stretch: self.style.stretch,
		}
	}

	/// Point reached by moving `distance` along the current heading.
	pub fn ahead(&self, distance: f32) -> Point {
		let radians = self.heading.to_radians();
		Point::new(
			self.position.x + distance * radians.cos(),
			self.position.y + distance * radians.sin(),
		)
	}
}

impl Default for PenState {
	fn default() -> Self {
		Self::new(PenStyle::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_shape_names_parse_back() {
		for shape in [Shape::Classic, Shape::Arrow, Shape::Triangle, Shape::Circle, Shape::Square, Shape::Turtle] {
			assert_eq!(shape.name().parse::<Shape>().unwrap(), shape);
		}
		assert_eq!(
			"blob".parse::<Shape>(),
			Err(CanvasError::UnknownShape("blob".to_owned()))
		);
	}

	#[test]
	fn test_restore_initial_keeps_position() {
		let mut pen = PenState::default();
		pen.position = Point::new(3.0, 4.0);
		pen.capture_initial();

		pen.style.width = 9.0;
		pen.style.tilt = 15.0;
		pen.style.color = Rgb(1, 2, 3);
		pen.restore_initial();

		assert_eq!(pen.style, PenStyle::default());
		assert_eq!(pen.position, Point::new(3.0, 4.0));
	}

	#[test]
	fn test_ahead_follows_heading() {
		let mut pen = PenState::default();
		let east = pen.ahead(10.0);
		assert!((east.x - 10.0).abs() < 1e-4 && east.y.abs() < 1e-4);

		pen.heading = 90.0;
		let north = pen.ahead(10.0);
		assert!(north.x.abs() < 1e-4 && (north.y - 10.0).abs() < 1e-4);
	}
}
