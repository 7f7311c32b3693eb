//! Result types
//!
//! - Chord labels
//! - Decoded segments
//! - Estimate metadata

pub mod result;
