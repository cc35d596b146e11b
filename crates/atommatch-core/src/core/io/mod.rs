//! Binary encoding of matcher configurations.
//!
//! Every encoded matcher starts with its type tag and a format version, so
//! stored configurations stay readable as the formats evolve. [`stream`]
//! holds the byte-level primitives and [`codec`] the per-matcher layouts.

pub mod codec;
pub mod stream;
