//! Character transition model and text synthesis.
//!
//! - `TransitionModel` accumulates predecessor counts from training text
//! - `TextSynthesizer` walks the model to produce new text
//! - `TransitionMatrix` exposes the counts as probabilities

/// Text generation from a trained model.
///
/// Takes the random source as a parameter, so a seeded generator gives
/// reproducible output.
pub mod synthesizer;

/// Order-1 character model.
///
/// Handles text ingestion, predecessor counting, weighted sampling and
/// model merging.
pub mod transition_model;

/// Normalized view of the counts.
pub mod transition_matrix;

/// Counts recorded for a single character.
pub mod predecessors;
