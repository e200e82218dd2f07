//! In-memory fixture encoders shared by the unit tests.

use std::borrow::Cow;
use std::io::Cursor;

/// Parameters for a PNG fixture.
pub struct PngFixture {
    width: u32,
    height: u32,
    color: png::ColorType,
    depth: png::BitDepth,
    palette: Option<Vec<u8>>,
    trns: Option<Vec<u8>>,
    text: Vec<(String, String)>,
    trailing_text: Vec<(String, String)>,
    compression: png::Compression,
    filter: png::FilterType,
}

impl PngFixture {
    pub fn new(width: u32, height: u32, color: png::ColorType, depth: png::BitDepth) -> Self {
        Self {
            width,
            height,
            color,
            depth,
            palette: None,
            trns: None,
            text: Vec::new(),
            trailing_text: Vec::new(),
            compression: png::Compression::Default,
            filter: png::FilterType::Sub,
        }
    }

    pub fn palette(mut self, palette: Vec<u8>) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn trns(mut self, trns: Vec<u8>) -> Self {
        self.trns = Some(trns);
        self
    }

    pub fn text(mut self, keyword: &str, text: &str) -> Self {
        self.text.push((keyword.to_string(), text.to_string()));
        self
    }

    /// Adds a `tEXt` chunk written after the image data.
    pub fn trailing_text(mut self, keyword: &str, text: &str) -> Self {
        self.trailing_text.push((keyword.to_string(), text.to_string()));
        self
    }

    pub fn compression(mut self, compression: png::Compression, filter: png::FilterType) -> Self {
        self.compression = compression;
        self.filter = filter;
        self
    }
}

/// Encodes packed scanline data (no filter bytes) as a PNG file.
pub fn encode_png(fixture: &PngFixture, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, fixture.width, fixture.height);
        encoder.set_color(fixture.color);
        encoder.set_depth(fixture.depth);
        encoder.set_compression(fixture.compression);
        encoder.set_filter(fixture.filter);
        if let Some(palette) = &fixture.palette {
            encoder.set_palette(palette.clone());
        }
        if let Some(trns) = &fixture.trns {
            encoder.set_trns(trns.clone());
        }
        for (keyword, text) in &fixture.text {
            encoder.add_text_chunk(keyword.clone(), text.clone()).unwrap();
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        for (keyword, text) in &fixture.trailing_text {
            let mut chunk = keyword.as_bytes().to_vec();
            chunk.push(0);
            chunk.extend_from_slice(text.as_bytes());
            writer.write_chunk(png::chunk::tEXt, &chunk).unwrap();
        }
        writer.finish().unwrap();
    }
    out
}

/// Encodes interleaved 8-bit RGB as an 8-bit RGB PNG.
pub fn encode_png_rgb(width: u32, height: u32, rgb: &[u8]) -> Vec<u8> {
    encode_png(&PngFixture::new(width, height, png::ColorType::Rgb, png::BitDepth::Eight), rgb)
}

/// Encodes a baseline JPEG. CMYK input uses the no-ink = 0 convention.
pub fn encode_jpeg(width: u16, height: u16, color: jpeg_encoder::ColorType, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    jpeg_encoder::Encoder::new(&mut out, 90)
        .encode(data, width, height, color)
        .unwrap();
    out
}

pub fn encode_tiff<C>(width: u32, height: u32, data: &[C::Inner]) -> Vec<u8>
where
    C: tiff::encoder::colortype::ColorType,
    [C::Inner]: tiff::encoder::TiffValue,
{
    let mut out = Vec::new();
    {
        let mut encoder = tiff::encoder::TiffEncoder::new(Cursor::new(&mut out)).unwrap();
        encoder.write_image::<C>(width, height, data).unwrap();
    }
    out
}

/// Encodes interleaved 8-bit gray and alpha as a two-sample BlackIsZero TIFF.
pub fn encode_tiff_gray_alpha(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = tiff::encoder::TiffEncoder::new(Cursor::new(&mut out)).unwrap();
        // A gray row twice as wide has the same strip layout.
        let mut page = encoder.new_image::<tiff::encoder::colortype::Gray8>(width * 2, height).unwrap();
        let directory = page.encoder();
        directory.write_tag(tiff::tags::Tag::ImageWidth, width).unwrap();
        directory.write_tag(tiff::tags::Tag::SamplesPerPixel, 2u16).unwrap();
        directory.write_tag(tiff::tags::Tag::BitsPerSample, &[8u16, 8][..]).unwrap();
        directory.write_tag(tiff::tags::Tag::SampleFormat, &[1u16, 1][..]).unwrap();
        directory.write_tag(tiff::tags::Tag::ExtraSamples, &[2u16][..]).unwrap();
        page.write_data(data).unwrap();
    }
    out
}

/// Encodes 8-bit indices as an `RGBPalette` TIFF with a gray ramp color map.
pub fn encode_tiff_palette(width: u32, height: u32, indices: &[u8]) -> Vec<u8> {
    let ramp: Vec<u16> = (0..256u32).map(|i| (i * 257) as u16).collect();
    let color_map: Vec<u16> = ramp.iter().chain(&ramp).chain(&ramp).copied().collect();
    let mut out = Vec::new();
    {
        let mut encoder = tiff::encoder::TiffEncoder::new(Cursor::new(&mut out)).unwrap();
        let mut page = encoder.new_image::<tiff::encoder::colortype::Gray8>(width, height).unwrap();
        let directory = page.encoder();
        directory.write_tag(tiff::tags::Tag::PhotometricInterpretation, 3u16).unwrap();
        directory.write_tag(tiff::tags::Tag::ColorMap, &color_map[..]).unwrap();
        page.write_data(indices).unwrap();
    }
    out
}

/// DIB header variants by their size field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BmpHeader {
    Core = 12,
    Info = 40,
    V4 = 108,
    V5 = 124,
}

/// Parameters for a BMP fixture holding 24-bit or 32-bit pixels.
pub struct BmpFixture {
    width: u32,
    height: u32,
    header: BmpHeader,
    bits_per_pixel: u16,
    bitfields: bool,
    top_down: bool,
}

const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;
const RGB_MASKS: [u32; 3] = [0x00FF_0000, 0x0000_FF00, 0x0000_00FF];

impl BmpFixture {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            header: BmpHeader::Info,
            bits_per_pixel: 24,
            bitfields: false,
            top_down: false,
        }
    }

    pub fn header(mut self, header: BmpHeader) -> Self {
        self.header = header;
        self
    }

    /// 32 bits per pixel, with the fourth byte set to 0xFF.
    pub fn thirty_two_bit(mut self) -> Self {
        self.bits_per_pixel = 32;
        self
    }

    /// BI_BITFIELDS with 8-bit R, G and B masks. Implies 32 bits per pixel.
    pub fn bitfields(mut self) -> Self {
        self.bits_per_pixel = 32;
        self.bitfields = true;
        self
    }

    pub fn top_down(mut self) -> Self {
        self.top_down = true;
        self
    }
}

/// Encodes top-down interleaved RGB as a BMP file.
pub fn encode_bmp(fixture: &BmpFixture, rgb: &[u8]) -> Vec<u8> {
    let bytes_per_pixel = usize::from(fixture.bits_per_pixel / 8);
    let row_len = fixture.width as usize * bytes_per_pixel;
    let stride = row_len.div_ceil(4) * 4;
    let image_len = stride * fixture.height as usize;

    let mut dib = Vec::new();
    dib.extend_from_slice(&(fixture.header as u32).to_le_bytes());
    if fixture.header == BmpHeader::Core {
        dib.extend_from_slice(&(fixture.width as u16).to_le_bytes());
        dib.extend_from_slice(&(fixture.height as u16).to_le_bytes());
        dib.extend_from_slice(&1u16.to_le_bytes());
        dib.extend_from_slice(&fixture.bits_per_pixel.to_le_bytes());
    } else {
        let height = if fixture.top_down {
            -(fixture.height as i32)
        } else {
            fixture.height as i32
        };
        dib.extend_from_slice(&(fixture.width as i32).to_le_bytes());
        dib.extend_from_slice(&height.to_le_bytes());
        dib.extend_from_slice(&1u16.to_le_bytes());
        dib.extend_from_slice(&fixture.bits_per_pixel.to_le_bytes());
        let compression = if fixture.bitfields { BI_BITFIELDS } else { BI_RGB };
        dib.extend_from_slice(&compression.to_le_bytes());
        dib.extend_from_slice(&(image_len as u32).to_le_bytes());
        dib.extend_from_slice(&2835u32.to_le_bytes());
        dib.extend_from_slice(&2835u32.to_le_bytes());
        dib.extend_from_slice(&[0; 8]);
        if fixture.header != BmpHeader::Info {
            // V4 and later carry the masks inside the header, alpha mask last.
            let masks = if fixture.bitfields { RGB_MASKS } else { [0; 3] };
            for mask in masks {
                dib.extend_from_slice(&mask.to_le_bytes());
            }
            dib.extend_from_slice(&0u32.to_le_bytes());
            dib.extend_from_slice(b"BGRs");
            dib.resize(fixture.header as usize, 0);
        }
    }
    if fixture.bitfields && fixture.header == BmpHeader::Info {
        for mask in RGB_MASKS {
            dib.extend_from_slice(&mask.to_le_bytes());
        }
    }

    let pixel_offset = 14 + dib.len();
    let file_len = pixel_offset + image_len;
    let mut out = Vec::with_capacity(file_len);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_len as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&(pixel_offset as u32).to_le_bytes());
    out.extend_from_slice(&dib);

    let rows: Box<dyn Iterator<Item = &[u8]>> = if fixture.top_down {
        Box::new(rgb.chunks_exact(fixture.width as usize * 3))
    } else {
        Box::new(rgb.chunks_exact(fixture.width as usize * 3).rev())
    };
    for row in rows {
        for px in row.chunks_exact(3) {
            out.extend_from_slice(&[px[2], px[1], px[0]]);
            if bytes_per_pixel == 4 {
                out.push(0xFF);
            }
        }
        out.resize(out.len() + stride - row_len, 0);
    }
    out
}

/// Encodes top-down interleaved RGB as a bottom-up 24-bit BMP.
pub fn encode_bmp24(width: u32, height: u32, rgb: &[u8]) -> Vec<u8> {
    encode_bmp(&BmpFixture::new(width, height), rgb)
}

/// Parameters for a GIF fixture whose frames all share one index buffer.
pub struct GifFixture {
    width: u16,
    height: u16,
    palette: Vec<u8>,
    interlaced: bool,
    transparent: Option<u8>,
    comment: Option<Vec<u8>>,
    frames: usize,
}

impl GifFixture {
    pub fn new(width: u16, height: u16, palette: Vec<u8>) -> Self {
        Self {
            width,
            height,
            palette,
            interlaced: false,
            transparent: None,
            comment: None,
            frames: 1,
        }
    }

    /// Marks the frame interlaced. Indices are then given in file row order.
    pub fn interlaced(mut self) -> Self {
        self.interlaced = true;
        self
    }

    pub fn transparent(mut self, index: u8) -> Self {
        self.transparent = Some(index);
        self
    }

    pub fn comment(mut self, text: &[u8]) -> Self {
        self.comment = Some(text.to_vec());
        self
    }

    pub fn frames(mut self, count: usize) -> Self {
        self.frames = count;
        self
    }
}

/// Encodes color indices as a GIF89a file with a global color table.
pub fn encode_gif(fixture: &GifFixture, indices: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut out, fixture.width, fixture.height, &fixture.palette).unwrap();
        let frame = gif::Frame {
            width: fixture.width,
            height: fixture.height,
            interlaced: fixture.interlaced,
            transparent: fixture.transparent,
            buffer: Cow::Borrowed(indices),
            ..gif::Frame::default()
        };
        for _ in 0..fixture.frames {
            encoder.write_frame(&frame).unwrap();
        }
    }
    if let Some(comment) = &fixture.comment {
        // Comment extension just ahead of the trailer.
        let mut block = vec![0x21, 0xFE];
        for chunk in comment.chunks(255) {
            block.push(chunk.len() as u8);
            block.extend_from_slice(chunk);
        }
        block.push(0);
        let trailer = out.len() - 1;
        out.splice(trailer..trailer, block);
    }
    out
}
