//! Synthetic grayscale images.
//!
//! These generators create predictable, verifiable pixel patterns so tests
//! can reason about which region each pixel should land in.

use colorize_common::RgbaBuffer;

/// Opaque image where every pixel is `level` on all three channels.
///
/// # Example
///
/// ```
/// use test_utils::uniform_gray;
///
/// let img = uniform_gray(4, 4, 128);
/// assert_eq!(img.pixel(3, 3), [128, 128, 128, 255]);
/// ```
pub fn uniform_gray(width: usize, height: usize, level: u8) -> RgbaBuffer {
    solid(width, height, [level, level, level, 255])
}

/// Image where every pixel equals `pixel`.
pub fn solid(width: usize, height: usize, pixel: [u8; 4]) -> RgbaBuffer {
    RgbaBuffer::filled(width, height, pixel).expect("generator dimensions must be non-zero")
}

/// Opaque gray ramp from white at the top row to black at the bottom row.
pub fn vertical_ramp(width: usize, height: usize) -> RgbaBuffer {
    let mut data = Vec::with_capacity(width * height * 4);
    for row in 0..height {
        let level = if height > 1 {
            255 - (row * 255 / (height - 1)) as u8
        } else {
            255
        };
        for _ in 0..width {
            data.extend_from_slice(&[level, level, level, 255]);
        }
    }
    RgbaBuffer::from_raw(width, height, data).expect("generator dimensions must be non-zero")
}

/// Opaque gray ramp from black at the left column to white at the right.
pub fn horizontal_ramp(width: usize, height: usize) -> RgbaBuffer {
    let mut data = Vec::with_capacity(width * height * 4);
    for _ in 0..height {
        for col in 0..width {
            let level = if width > 1 {
                (col * 255 / (width - 1)) as u8
            } else {
                0
            };
            data.extend_from_slice(&[level, level, level, 255]);
        }
    }
    RgbaBuffer::from_raw(width, height, data).expect("generator dimensions must be non-zero")
}

/// A rough outdoor portrait that exercises every region:
///
/// - bright sky band across the top
/// - mid-gray subject disk in the middle
/// - light highlight patches on the sides
/// - dark ground band at the bottom
/// - deep shadow pockets in the middle band corners
/// - mid-gray background elsewhere
pub fn portrait_scene(width: usize, height: usize) -> RgbaBuffer {
    let mut data = Vec::with_capacity(width * height * 4);
    for row in 0..height {
        for col in 0..width {
            let nx = col as f64 / width as f64;
            let ny = row as f64 / height as f64;
            let d = ((nx - 0.5).powi(2) + (ny - 0.5).powi(2)).sqrt();

            let level: u8 = if ny < 0.25 {
                230 // sky
            } else if d < 0.2 {
                150 // subject
            } else if ny > 0.8 {
                60 // ground
            } else if nx < 0.1 {
                40 // shadow
            } else if nx > 0.9 {
                200 // highlight
            } else {
                130 // background
            };
            data.extend_from_slice(&[level, level, level, 255]);
        }
    }
    RgbaBuffer::from_raw(width, height, data).expect("generator dimensions must be non-zero")
}

/// Copy of `image` with every alpha value replaced by `alpha`.
pub fn with_alpha(image: &RgbaBuffer, alpha: u8) -> RgbaBuffer {
    let mut out = image.clone();
    for px in out.data_mut().chunks_exact_mut(4) {
        px[3] = alpha;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_ramp_endpoints() {
        let img = vertical_ramp(3, 5);
        assert_eq!(img.pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(img.pixel(2, 4), [0, 0, 0, 255]);
    }

    #[test]
    fn test_horizontal_ramp_endpoints() {
        let img = horizontal_ramp(5, 2);
        assert_eq!(img.pixel(0, 1), [0, 0, 0, 255]);
        assert_eq!(img.pixel(4, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_with_alpha() {
        let img = with_alpha(&uniform_gray(2, 2, 9), 128);
        assert!(img.alpha().all(|a| a == 128));
        assert_eq!(img.pixel(1, 1), [9, 9, 9, 128]);
    }
}
