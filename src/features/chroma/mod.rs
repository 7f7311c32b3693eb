//! Chroma input modules
//!
//! Chroma features arrive ready-made from an external extractor:
//! - Matrix validation (12 x N, finite, non-negative)
//! - Unit-norm normalization

pub mod matrix;
pub mod normalization;

pub use matrix::{ChromaMatrix, N_PITCH_CLASSES};
pub use normalization::unit_normalize;
