use xxhash_rust::xxh3::Xxh3;

use crate::image_pipeline::canonical::{CanonicalBuffer, CanonicalSink};
use crate::image_pipeline::checksum::digest::Digest;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0x696D_6773_756D_0001;

/// Streaming checksum accumulator.
///
/// Wraps XXH3-128, which reads its input with explicit little-endian loads, so
/// the digest does not depend on the host's byte order. Memory use is bounded
/// by the hasher's internal block buffer whatever the input length.
pub struct ChecksumEngine {
    hasher: Xxh3,
}

impl ChecksumEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            hasher: Xxh3::with_seed(seed),
        }
    }

    /// Starts an image checksum: the dimensions frame the canonical pixel stream.
    pub fn for_image(seed: u64, width: u32, height: u32) -> Self {
        let mut engine = Self::new(seed);
        engine.update(&width.to_le_bytes());
        engine.update(&height.to_le_bytes());
        engine
    }

    /// Checksums an already materialized canonical buffer.
    pub fn digest_canonical(seed: u64, buffer: &CanonicalBuffer) -> Digest {
        let mut engine = Self::for_image(seed, buffer.width, buffer.height);
        engine.update(&buffer.pixel_data);
        engine.finalize()
    }

    pub fn update(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    pub fn finalize(self) -> Digest {
        Digest::from_bytes(self.hasher.digest128().to_be_bytes())
    }

    /// One-shot checksum of a byte sequence with the default seed.
    pub fn hash(bytes: &[u8]) -> Digest {
        let mut engine = Self::new(DEFAULT_SEED);
        engine.update(bytes);
        engine.finalize()
    }
}

impl CanonicalSink for ChecksumEngine {
    fn write_row(&mut self, row: &[u8]) {
        self.update(row);
    }
}
