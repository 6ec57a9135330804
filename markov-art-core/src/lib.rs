//! Markov text art library.
//!
//! This crate learns a character transition model from text, generates new
//! text with it and renders that text as turtle-style vector art:
//! - Order-1 character model and seeded text generation
//! - Character-driven pen state machine with line wrapping
//! - Canvas abstraction with recording and SVG back-ends
//! - Settings, errors and file helpers shared by the front-ends

/// Error types shared by every module.
pub mod error;

/// Character transition model and text generation.
///
/// Randomness is always passed in by the caller, so a seeded generator
/// reproduces the same text.
pub mod model;

/// Rendering of text into drawing commands.
pub mod render;

/// Run configuration.
pub mod settings;

/// I/O utilities (text loading, accent folding, path helpers).
pub mod io;
