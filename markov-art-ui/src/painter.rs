use egui::{Color32, Pos2, Rect, Shape, Stroke};

use markov_art_core::error::CanvasError;
use markov_art_core::render::canvas::{Bounds, Canvas, DrawOp};
use markov_art_core::render::pen::{PenState, Point, Rgb};

/// Canvas collecting egui shapes, scaled so that `bounds` fits in `rect`.
pub struct PainterCanvas {
    pen: PenState,
    bounds: Bounds,
    rect: Rect,
    scale: f32,
    shapes: Vec<Shape>,
}

impl PainterCanvas {
    pub fn new(bounds: Bounds, rect: Rect) -> Self {
        let scale = (rect.width() / bounds.width()).min(rect.height() / bounds.height());
        Self { pen: PenState::default(), bounds, rect, scale, shapes: Vec::new() }
    }

    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }

    fn to_screen(&self, p: Point) -> Pos2 {
        let center = self.rect.center();
        let cx = (self.bounds.left + self.bounds.right) / 2.0;
        let cy = (self.bounds.top + self.bounds.bottom) / 2.0;
        Pos2::new(center.x + (p.x - cx) * self.scale, center.y - (p.y - cy) * self.scale)
    }

    fn color(&self) -> Color32 {
        color32(self.pen.style.color)
    }
}

fn color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.0, color.1, color.2)
}

impl Canvas for PainterCanvas {
    fn apply(&mut self, op: DrawOp) -> Result<(), CanvasError> {
        match &op {
            DrawOp::Circle { radius } | DrawOp::Dot { radius } => {
                let center = self.to_screen(self.pen.position);
                self.shapes.push(Shape::circle_filled(center, radius.max(0.0) * self.scale, self.color()));
            }
            DrawOp::Stamp { shape, stretch, heading } => {
                let points = shape
                    .placed(self.pen.position, *stretch, *heading, self.pen.style.tilt)
                    .into_iter()
                    .map(|p| self.to_screen(p))
                    .collect::<Vec<_>>();
                self.shapes.push(Shape::convex_polygon(points, self.color(), Stroke::NONE));
            }
            _ => (),
        }

        if let Some((from, to)) = self.pen.follow(&op) {
            let stroke = Stroke::new(self.pen.style.width * self.scale, self.color());
            self.shapes.push(Shape::line_segment([self.to_screen(from), self.to_screen(to)], stroke));
        }
        Ok(())
    }
}

/// Parses the background names the server accepts; unknown names are black.
pub fn background_color(name: &str) -> Color32 {
    match name.trim().to_ascii_lowercase().as_str() {
        "white" => Color32::WHITE,
        "gray" | "grey" => Color32::GRAY,
        "darkgray" | "darkgrey" => Color32::DARK_GRAY,
        "lightgray" | "lightgrey" => Color32::LIGHT_GRAY,
        hex if hex.starts_with('#') => Color32::from_hex(hex).unwrap_or(Color32::BLACK),
        _ => Color32::BLACK,
    }
}
