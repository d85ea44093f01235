//! # Wire format
//!
//! Following pseudocode depicts the byte representation of one encoded
//! record. In-memory representations are distinct from this.
//!
//! ```text
//! struct EncodedRecord {
//!     field_0: EncodedField,
//!     field_1: EncodedField,
//!     ...
//!     // No magic, no version, no count, no terminator. Decoding stops
//!     // when the input is exhausted; framing belongs to the caller.
//! }
//! ```
//!
//! Each field opens with its one-byte schema key. Scalar kinds have fixed
//! payload widths, which are not encoded. The other kinds carry a two-byte
//! big-endian length, counting payload bytes only.
//!
//! ```text
//! struct EncodedField::Bool or ::Byte {
//!     schema_key:     u8,
//!     payload:        [u8; 1],
//! }
//!
//! struct EncodedField::Short / ::Int / ::Float / ::Long / ::Double {
//!     schema_key:     u8,
//!     payload:        [u8; 2 / 4 / 4 / 8 / 8],    // big-endian
//! }
//!
//! struct EncodedField::Str or ::Raw {
//!     schema_key:     u8,
//!     payload_len:    u16,                        // big-endian
//!     payload:        [u8; payload_len],          // UTF-8 for Str
//! }
//!
//! struct EncodedField::Struct {
//!     schema_key:     u8,
//!     payload_len:    u16,
//!     payload:        EncodedRecord,              // recursively encoded
//! }
//! ```
//!
//! Integer payloads are raw big-endian bit patterns; signed interpretation
//! is a caller convention. Both endpoints must hold the same schema, since
//! the wire carries no type or tag metadata.

mod lengths;
mod processor;
mod read_stream;
mod write_stream;

#[cfg(test)]
mod codec_test;

pub use lengths::*;
pub use processor::*;

/// Scratch buffers grow by whole multiples of this many bytes.
pub(crate) const EXPANSION_INCREMENT: usize = 4096;
