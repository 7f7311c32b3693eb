//! Feature modules
//!
//! - Chroma input validation and normalization
//! - Chord recognition (templates, emissions, transitions, Viterbi, compression)

pub mod chords;
pub mod chroma;
