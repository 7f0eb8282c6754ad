//! Blend the smoothed, colorized buffer back over the original.

use colorize_common::RgbaBuffer;

/// 85% colorized, 15% original.
pub const DEFAULT_BLEND_FACTOR: f64 = 0.85;

#[inline]
fn mix(processed: u8, original: u8, factor: f64) -> u8 {
    (processed as f64 * factor + original as f64 * (1.0 - factor))
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Write `factor * smoothed + (1 - factor) * canvas` into `canvas`.
///
/// `canvas` holds the original pixels on entry. Only RGB is rewritten; the
/// alpha channel keeps the original value.
pub fn blend_into(canvas: &mut RgbaBuffer, smoothed: &RgbaBuffer, factor: f64) {
    debug_assert_eq!(canvas.dimensions(), smoothed.dimensions());

    for (dst, src) in canvas
        .data_mut()
        .chunks_exact_mut(4)
        .zip(smoothed.data().chunks_exact(4))
    {
        for c in 0..3 {
            dst[c] = mix(src[c], dst[c], factor);
        }
    }
}

/// Overwrite the alpha channel of `dst` with the alpha channel of `src`.
pub fn copy_alpha(dst: &mut RgbaBuffer, src: &RgbaBuffer) {
    debug_assert_eq!(dst.dimensions(), src.dimensions());

    for (d, s) in dst.data_mut().chunks_exact_mut(4).zip(src.data().chunks_exact(4)) {
        d[3] = s[3];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_rgb_only() {
        let mut canvas = RgbaBuffer::filled(1, 1, [100, 100, 100, 77]).unwrap();
        let smoothed = RgbaBuffer::filled(1, 1, [200, 0, 255, 255]).unwrap();

        blend_into(&mut canvas, &smoothed, DEFAULT_BLEND_FACTOR);

        assert_eq!(canvas.pixel(0, 0), [185, 15, 232, 77]);
    }

    #[test]
    fn test_factor_extremes() {
        assert_eq!(mix(200, 10, 1.0), 200);
        assert_eq!(mix(200, 10, 0.0), 10);
    }

    #[test]
    fn test_copy_alpha() {
        let mut dst = RgbaBuffer::filled(2, 1, [1, 2, 3, 255]).unwrap();
        let src = RgbaBuffer::filled(2, 1, [9, 9, 9, 40]).unwrap();

        copy_alpha(&mut dst, &src);

        assert_eq!(dst.pixel(1, 0), [1, 2, 3, 40]);
    }
}
