//! Character-driven turtle rendering.
//!
//! Every character of a text is turned into pen mutations and marks
//! (circles, dots, stamped shapes, line segments) on a `Canvas`:
//! - `CharClass` decides which effect a character has
//! - `PenState` is the cursor and style mutated along the way
//! - `GlyphRenderer` applies one character
//! - `ArtGenerator` folds a whole text over one pen and one canvas

/// Text-wide rendering driver.
pub mod art;

/// Drawing commands, the `Canvas` trait and the wrap rule.
pub mod canvas;

/// Character classes and letter colors.
pub mod glyph;

/// Pen position, heading and style.
pub mod pen;

/// Per-character state machine.
pub mod renderer;

/// SVG output.
pub mod svg_canvas;

/// Recorded renders exchanged between server and viewer.
pub mod scene;
