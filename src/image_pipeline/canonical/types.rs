/// Number of bytes per canonical pixel (R, G, B, A).
pub const CANONICAL_CHANNELS: usize = 4;

/// A raster in canonical form: RGBA, 8 bits per channel, row-major, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalBuffer {
    pub width: u32,
    pub height: u32,
    pub pixel_data: Vec<u8>,
}

impl CanonicalBuffer {
    pub fn row_len(&self) -> usize {
        self.width as usize * CANONICAL_CHANNELS
    }

    /// Iterates display rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixel_data.chunks_exact(self.row_len())
    }
}
