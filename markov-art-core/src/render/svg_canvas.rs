use std::path::{Path, PathBuf};

use log::info;
use svg::node::element::{Circle, Line, Polygon, Rectangle};
use svg::{Document, Node};

use crate::error::CanvasError;
use super::canvas::{Bounds, Canvas, DrawOp};
use super::pen::{PenState, Point, Rgb};

/// Canvas drawing into an SVG document.
///
/// Canvas coordinates are origin-centered with y pointing up; they are
/// translated so that the top-left corner of `bounds` is the SVG origin.
pub struct SvgCanvas {
	document: Document,
	bounds: Bounds,
	pen: PenState,
	output: Option<PathBuf>,
}

impl SvgCanvas {
	/// Creates an empty image covering `bounds`, filled with `background`
	/// (any SVG color: `"black"`, `"#102030"`...).
	pub fn new(bounds: Bounds, background: &str) -> Self {
		let (width, height) = (bounds.width(), bounds.height());
		let background = Rectangle::new()
			.set("x", 0)
			.set("y", 0)
			.set("width", width)
			.set("height", height)
			.set("fill", background);

		let document = Document::new()
			.set("viewBox", (0, 0, width, height))
			.set("width", format!("{width}px"))
			.set("height", format!("{height}px"))
			.add(background);

		Self { document, bounds, pen: PenState::default(), output: None }
	}

	/// Makes `flush` write the document to `path`, replacing any existing file.
	pub fn with_output<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.output = Some(path.as_ref().to_path_buf());
		self
	}

	pub fn document(&self) -> &Document {
		&self.document
	}

	fn to_svg(&self, p: Point) -> (f32, f32) {
		(p.x - self.bounds.left, self.bounds.top - p.y)
	}

	fn fill_circle(&mut self, radius: f32) {
		let (cx, cy) = self.to_svg(self.pen.position);
		self.document.append(
			Circle::new()
				.set("cx", cx)
				.set("cy", cy)
				.set("r", radius.max(0.0))
				.set("fill", css(self.pen.style.color)),
		);
	}
}

fn css(color: Rgb) -> String {
	format!("rgb({},{},{})", color.0, color.1, color.2)
}

impl Canvas for SvgCanvas {
	fn apply(&mut self, op: DrawOp) -> Result<(), CanvasError> {
		match &op {
			DrawOp::Circle { radius } | DrawOp::Dot { radius } => self.fill_circle(*radius),
			DrawOp::Stamp { shape, stretch, heading } => {
				let outline = shape.placed(self.pen.position, *stretch, *heading, self.pen.style.tilt);
				let points = outline
					.into_iter()
					.map(|p| {
						let (x, y) = self.to_svg(p);
						format!("{x},{y}")
					})
					.collect::<Vec<_>>()
					.join(" ");
				self.document.append(
					Polygon::new()
						.set("points", points)
						.set("fill", css(self.pen.style.color))
						.set("stroke", css(self.pen.style.color))
						.set("stroke-width", self.pen.style.width),
				);
			}
			_ => (),
		}

		if let Some((from, to)) = self.pen.follow(&op) {
			let (x1, y1) = self.to_svg(from);
			let (x2, y2) = self.to_svg(to);
			self.document.append(
				Line::new()
					.set("x1", x1)
					.set("y1", y1)
					.set("x2", x2)
					.set("y2", y2)
					.set("stroke", css(self.pen.style.color))
					.set("stroke-width", self.pen.style.width)
					.set("stroke-linecap", "round"),
			);
		}
		Ok(())
	}

	fn flush(&mut self) -> Result<(), CanvasError> {
		if let Some(path) = &self.output {
			svg::save(path, &self.document).map_err(|e| CanvasError::Write(e.to_string()))?;
			info!("Wrote {}", path.display());
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::render::pen::Shape;

	#[test]
	fn test_marks_become_svg_elements() {
		let mut canvas = SvgCanvas::new(Bounds::centered(100.0, 50.0), "black");
		canvas.apply(DrawOp::SetColor { color: Rgb(255, 0, 0) }).unwrap();
		canvas.apply(DrawOp::MoveTo { x: -50.0, y: 25.0 }).unwrap();
		canvas.apply(DrawOp::Circle { radius: 4.0 }).unwrap();
		canvas.apply(DrawOp::PenDown).unwrap();
		canvas.apply(DrawOp::MoveTo { x: -40.0, y: 25.0 }).unwrap();
		canvas.apply(DrawOp::Stamp { shape: Shape::Square, stretch: (0.5, 0.5), heading: 0.0 }).unwrap();

		let text = canvas.document().to_string();
		assert!(text.contains("fill=\"black\""));
		assert!(text.contains("<circle"));
		assert!(text.contains("cx=\"0\"") && text.contains("cy=\"0\""));
		assert!(text.contains("fill=\"rgb(255,0,0)\""));
		assert!(text.contains("<line"));
		assert!(text.contains("<polygon"));
	}

	#[test]
	fn test_flush_writes_the_file() {
		let path = std::env::temp_dir().join(format!("markov-art-{}.svg", std::process::id()));
		let mut canvas = SvgCanvas::new(Bounds::centered(10.0, 10.0), "white").with_output(&path);
		canvas.apply(DrawOp::Dot { radius: 1.0 }).unwrap();
		canvas.flush().unwrap();

		let written = std::fs::read_to_string(&path).unwrap();
		std::fs::remove_file(&path).unwrap();
		assert!(written.contains("<svg"));
	}
}
