//! Encoded image fixtures.

use colorize_common::RgbaBuffer;
use image::{ImageOutputFormat, RgbaImage};
use std::io::Cursor;

/// Bytes that no image decoder accepts.
pub const NOT_AN_IMAGE: &[u8] = b"this is definitely not a raster image";

/// A PNG signature followed by garbage.
pub const TRUNCATED_PNG: &[u8] = &[137, 80, 78, 71, 13, 10, 26, 10, 0, 0, 0, 13, b'I', b'H'];

fn to_rgba_image(buffer: &RgbaBuffer) -> RgbaImage {
    RgbaImage::from_raw(
        buffer.width() as u32,
        buffer.height() as u32,
        buffer.data().to_vec(),
    )
    .expect("buffer length matches its dimensions")
}

/// Encode `buffer` as PNG with the `image` crate.
pub fn png_fixture(buffer: &RgbaBuffer) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    to_rgba_image(buffer)
        .write_to(&mut out, ImageOutputFormat::Png)
        .expect("PNG encoding of an in-memory buffer");
    out.into_inner()
}

/// Encode `buffer` as a high-quality JPEG. Alpha is dropped.
pub fn jpeg_fixture(buffer: &RgbaBuffer) -> Vec<u8> {
    let rgb = image::DynamicImage::ImageRgba8(to_rgba_image(buffer)).to_rgb8();
    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, ImageOutputFormat::Jpeg(95))
        .expect("JPEG encoding of an in-memory buffer");
    out.into_inner()
}

/// Decode PNG bytes back into a buffer, independently of the pipeline.
pub fn decode_fixture(bytes: &[u8]) -> RgbaBuffer {
    let img = image::load_from_memory(bytes)
        .expect("fixture bytes decode")
        .to_rgba8();
    let (w, h) = img.dimensions();
    RgbaBuffer::from_raw(w as usize, h as usize, img.into_raw()).expect("decoded dimensions are valid")
}
