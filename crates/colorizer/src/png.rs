//! Lossless PNG encoding for RGBA buffers.
//!
//! Output is always truecolor with alpha (color type 6, 8 bits per channel).
//! Each scanline uses the Sub filter, which suits the smooth horizontal
//! gradients the pipeline produces.

use colorize_common::{ColorizeError, ColorizeResult, RgbaBuffer};
use std::io::Write;

/// PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

const COLOR_TYPE_RGBA: u8 = 6;
const FILTER_SUB: u8 = 1;

/// Encode `buffer` as an RGBA PNG.
pub fn create_png(buffer: &RgbaBuffer) -> ColorizeResult<Vec<u8>> {
    let (width, height) = buffer.dimensions();
    let width_be = u32::try_from(width)
        .map_err(|_| ColorizeError::EncodeFailure(format!("width {} too large for PNG", width)))?;
    let height_be = u32::try_from(height)
        .map_err(|_| ColorizeError::EncodeFailure(format!("height {} too large for PNG", height)))?;

    let mut png = Vec::with_capacity(buffer.data().len() / 2 + 64);
    png.extend_from_slice(&PNG_SIGNATURE);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&width_be.to_be_bytes());
    ihdr_data.extend_from_slice(&height_be.to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(COLOR_TYPE_RGBA);
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    let idat_data = deflate_scanlines(buffer)
        .map_err(|e| ColorizeError::EncodeFailure(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a length-prefixed, CRC-suffixed chunk.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Sub-filter every scanline and zlib-compress the result.
fn deflate_scanlines(buffer: &RgbaBuffer) -> std::io::Result<Vec<u8>> {
    let stride = buffer.stride();
    let mut filtered = Vec::with_capacity(buffer.height() * (1 + stride));

    for row in buffer.data().chunks_exact(stride) {
        filtered.push(FILTER_SUB);
        filtered.extend_from_slice(&row[..4]);
        for i in 4..stride {
            filtered.push(row[i].wrapping_sub(row[i - 4]));
        }
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&filtered)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_layout() {
        let mut out = Vec::new();
        write_chunk(&mut out, b"IEND", &[]);
        assert_eq!(&out[0..4], &[0, 0, 0, 0]);
        assert_eq!(&out[4..8], b"IEND");
        // Well-known CRC of an empty IEND chunk
        assert_eq!(&out[8..12], &[0xAE, 0x42, 0x60, 0x82]);
    }

    #[test]
    fn test_sub_filter_row() {
        let buffer = RgbaBuffer::from_raw(2, 1, vec![10, 20, 30, 255, 15, 18, 40, 255]).unwrap();
        let compressed = deflate_scanlines(&buffer).unwrap();

        let mut decoder = flate2::read::ZlibDecoder::new(&compressed[..]);
        let mut raw = Vec::new();
        std::io::Read::read_to_end(&mut decoder, &mut raw).unwrap();

        assert_eq!(raw, vec![FILTER_SUB, 10, 20, 30, 255, 5, 254, 10, 0]);
    }
}
