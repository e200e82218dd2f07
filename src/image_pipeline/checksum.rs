//! Checksum engine module
//!
//! A streaming accumulator over canonical bytes and the digest it produces.

mod digest;
mod engine;

pub use digest::{Digest, DigestParseError, DIGEST_LEN};
pub use engine::{ChecksumEngine, DEFAULT_SEED};
