//! Container format detection from leading magic bytes.

use std::fmt;

/// Supported container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatTag {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SIGNATURE: &[u8] = b"\xFF\xD8\xFF";
const GIF87_SIGNATURE: &[u8] = b"GIF87a";
const GIF89_SIGNATURE: &[u8] = b"GIF89a";
const BMP_SIGNATURE: &[u8] = b"BM";
const TIFF_LE_SIGNATURE: &[u8] = b"II*\0";
const TIFF_BE_SIGNATURE: &[u8] = b"MM\0*";
const BIGTIFF_LE_SIGNATURE: &[u8] = b"II+\0";
const BIGTIFF_BE_SIGNATURE: &[u8] = b"MM\0+";

/// Signatures in match priority order. The first prefix match wins.
const SIGNATURES: &[(&[u8], FormatTag)] = &[
    (PNG_SIGNATURE, FormatTag::Png),
    (JPEG_SIGNATURE, FormatTag::Jpeg),
    (GIF87_SIGNATURE, FormatTag::Gif),
    (GIF89_SIGNATURE, FormatTag::Gif),
    (BMP_SIGNATURE, FormatTag::Bmp),
    (TIFF_LE_SIGNATURE, FormatTag::Tiff),
    (TIFF_BE_SIGNATURE, FormatTag::Tiff),
    (BIGTIFF_LE_SIGNATURE, FormatTag::Tiff),
    (BIGTIFF_BE_SIGNATURE, FormatTag::Tiff),
];

impl FormatTag {
    /// Identifies the container format of `data`, or `None` when no signature matches.
    pub fn detect(data: &[u8]) -> Option<FormatTag> {
        SIGNATURES
            .iter()
            .find(|(signature, _)| data.starts_with(signature))
            .map(|&(_, tag)| tag)
    }

    pub fn name(self) -> &'static str {
        match self {
            FormatTag::Png => "PNG",
            FormatTag::Jpeg => "JPEG",
            FormatTag::Gif => "GIF",
            FormatTag::Bmp => "BMP",
            FormatTag::Tiff => "TIFF",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
