//! GIF decoding via the `gif` crate, with first-frame compositing.
//!
//! The crate hands back color indices; the first frame is drawn here onto a
//! canvas the size of the logical screen, initialized fully transparent. The
//! remaining frames are walked to the trailer without being composited.

use std::io::Cursor;

use tracing::debug;

use crate::image_pipeline::common::{DecodeError, Limits};
use crate::image_pipeline::raw::{ChannelLayout, RasterDecoder, RawImage, RowOrder};

pub struct GifDecoder {
    limits: Limits,
}

impl GifDecoder {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }
}

/// Placement and color lookup of one decoded frame.
struct FramePlacement<'a> {
    left: usize,
    top: usize,
    width: usize,
    transparent: Option<u8>,
    palette: &'a [u8],
}

/// Draws frame indices onto an RGBA canvas, clipped to the canvas.
fn composite(canvas: &mut [u8], canvas_width: usize, frame: &FramePlacement, indices: &[u8]) {
    let canvas_height = canvas.len() / 4 / canvas_width.max(1);
    for (dy, row) in indices.chunks_exact(frame.width.max(1)).enumerate() {
        let y = frame.top + dy;
        if y >= canvas_height {
            break;
        }
        for (dx, &color) in row.iter().enumerate() {
            let x = frame.left + dx;
            if x >= canvas_width {
                break;
            }
            if frame.transparent == Some(color) {
                continue;
            }
            // An index past the end of the table renders opaque black.
            let entry = usize::from(color) * 3;
            let rgb = frame.palette.get(entry..entry + 3).unwrap_or(&[0, 0, 0]);
            let offset = (y * canvas_width + x) * 4;
            canvas[offset..offset + 3].copy_from_slice(rgb);
            canvas[offset + 3] = 255;
        }
    }
}

impl RasterDecoder for GifDecoder {
    fn decode(&self, data: &[u8]) -> Result<RawImage, DecodeError> {
        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::Indexed);
        let mut decoder = options.read_info(Cursor::new(data))?;

        let screen_width = decoder.width();
        let screen_height = decoder.height();
        debug!("GIF logical screen: {}x{}", screen_width, screen_height);
        self.limits.check(screen_width.into(), screen_height.into())?;
        let global_palette = decoder.global_palette().map(<[u8]>::to_vec);

        let (left, top, frame_width, frame_height, transparent, local_palette) = match decoder.next_frame_info()? {
            Some(frame) => (
                frame.left,
                frame.top,
                frame.width,
                frame.height,
                frame.transparent,
                frame.palette.clone(),
            ),
            None => return Err(DecodeError::malformed("no image descriptor before trailer")),
        };
        debug!(
            "GIF frame: {}x{} at ({}, {}), transparent={:?}",
            frame_width, frame_height, left, top, transparent
        );
        self.limits.check(frame_width.into(), frame_height.into())?;

        let mut indices = vec![0u8; decoder.buffer_size()];
        decoder.read_into_buffer(&mut indices)?;

        let palette = local_palette
            .or(global_palette)
            .ok_or_else(|| DecodeError::malformed("image has no color table"))?;

        // Later frames are never shown, but a cut file must still fail.
        let mut trailing_frames = 0usize;
        while decoder.next_frame_info()?.is_some() {
            trailing_frames += 1;
        }
        if trailing_frames > 0 {
            debug!("GIF: skipped {} trailing frames", trailing_frames);
        }

        let canvas_width = usize::from(screen_width);
        let mut canvas = vec![0u8; canvas_width * usize::from(screen_height) * 4];
        let placement = FramePlacement {
            left: left.into(),
            top: top.into(),
            width: frame_width.into(),
            transparent,
            palette: &palette,
        };
        composite(&mut canvas, canvas_width, &placement, &indices);

        RawImage::new(
            screen_width.into(),
            screen_height.into(),
            ChannelLayout::Rgba,
            8,
            RowOrder::TopDown,
            canvas,
        )
    }
}
