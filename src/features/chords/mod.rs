//! Chord recognition modules
//!
//! Decode a chord sequence from chroma using:
//! - Binary triad templates (24 chords)
//! - Cosine-similarity emissions
//! - Uniform stay/switch transitions
//! - Viterbi decoding
//! - Run-length compression of the decoded path

pub mod emission;
pub mod estimator;
pub mod sequence;
pub mod templates;
pub mod transition;
pub mod viterbi;

pub use emission::{compute_emissions, EmissionMatrix};
pub use estimator::ChordEstimator;
pub use sequence::{compress, count_changes, segments};
pub use templates::ChordTemplates;
pub use transition::TransitionMatrix;
pub use viterbi::decode;
