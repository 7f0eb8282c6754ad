//! Palette synthesis.
//!
//! Maps (region, luminance, position) to an RGB triple. Each channel of each
//! region is an affine function of luminance plus a low-frequency positional
//! perturbation:
//!
//! ```text
//! channel = clamp(L * scale + offset + variation * weight, 0, 255)
//! variation = (sin(0.01 x) + cos(0.01 y)) * 0.1
//! ```

use colorize_common::RgbaBuffer;
use rayon::prelude::*;

use crate::region::{luminance, Region, RegionMap};

/// Minimum pixels before rows are synthesized in parallel.
pub const PARALLEL_THRESHOLD: usize = 4096; // 64x64 or larger

/// Coefficients for one output channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelFormula {
    pub scale: f64,
    pub offset: f64,
    pub weight: f64,
}

impl ChannelFormula {
    pub const fn new(scale: f64, offset: f64, weight: f64) -> Self {
        Self {
            scale,
            offset,
            weight,
        }
    }

    /// Unclamped channel value.
    #[inline]
    pub fn evaluate(&self, luminance: f64, variation: f64) -> f64 {
        luminance * self.scale + self.offset + variation * self.weight
    }
}

/// Formulas for the red, green and blue channels of one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionPalette {
    pub red: ChannelFormula,
    pub green: ChannelFormula,
    pub blue: ChannelFormula,
}

const fn palette(red: ChannelFormula, green: ChannelFormula, blue: ChannelFormula) -> RegionPalette {
    RegionPalette { red, green, blue }
}

/// Indexed by [`Region::index`].
pub const PALETTE_TABLE: [RegionPalette; 6] = [
    // Sky: cool blue lift
    palette(
        ChannelFormula::new(0.6, 80.0, 20.0),
        ChannelFormula::new(0.8, 60.0, 15.0),
        ChannelFormula::new(1.0, 40.0, 10.0),
    ),
    // Subject: warm skin tones
    palette(
        ChannelFormula::new(1.1, 0.0, 25.0),
        ChannelFormula::new(0.95, 0.0, 20.0),
        ChannelFormula::new(0.8, 0.0, 15.0),
    ),
    // Highlight
    palette(
        ChannelFormula::new(1.05, 0.0, 15.0),
        ChannelFormula::new(1.0, 0.0, 12.0),
        ChannelFormula::new(0.9, 0.0, 10.0),
    ),
    // Ground: earth tones
    palette(
        ChannelFormula::new(0.95, 30.0, 20.0),
        ChannelFormula::new(0.85, 20.0, 15.0),
        ChannelFormula::new(0.7, 10.0, 10.0),
    ),
    // Shadow: blue-leaning
    palette(
        ChannelFormula::new(0.9, 0.0, 10.0),
        ChannelFormula::new(0.95, 0.0, 8.0),
        ChannelFormula::new(1.1, 15.0, 12.0),
    ),
    // Background
    palette(
        ChannelFormula::new(0.98, 0.0, 18.0),
        ChannelFormula::new(1.02, 0.0, 15.0),
        ChannelFormula::new(0.95, 0.0, 20.0),
    ),
];

impl Region {
    pub fn palette(self) -> &'static RegionPalette {
        &PALETTE_TABLE[self.index()]
    }
}

/// Positional perturbation, bounded to `[-0.2, 0.2]`.
#[inline]
pub fn variation(x: usize, y: usize) -> f64 {
    ((x as f64 * 0.01).sin() + (y as f64 * 0.01).cos()) * 0.1
}

/// Clamp to the byte range, then round half away from zero.
#[inline]
fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// Synthesized RGB for one pixel.
pub fn synthesize_pixel(region: Region, luminance: f64, x: usize, y: usize) -> [u8; 3] {
    let v = variation(x, y);
    let p = region.palette();
    [
        to_channel(p.red.evaluate(luminance, v)),
        to_channel(p.green.evaluate(luminance, v)),
        to_channel(p.blue.evaluate(luminance, v)),
    ]
}

/// Build the working buffer: a copy of `original` whose RGB channels are
/// replaced by the synthesized palette. Alpha is carried over untouched.
pub fn synthesize(original: &RgbaBuffer, regions: &RegionMap) -> RgbaBuffer {
    debug_assert_eq!(original.dimensions(), (regions.width(), regions.height()));

    let mut working = original.clone();
    let stride = working.stride();

    let paint_row = |(y, row): (usize, &mut [u8])| {
        let labels = regions.row(y);
        for (x, (px, &region)) in row.chunks_exact_mut(4).zip(labels).enumerate() {
            let l = luminance(px[0], px[1], px[2]);
            let [r, g, b] = synthesize_pixel(region, l, x, y);
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
    };

    if working.pixel_count() >= PARALLEL_THRESHOLD {
        working
            .data_mut()
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(paint_row);
    } else {
        working
            .data_mut()
            .chunks_mut(stride)
            .enumerate()
            .for_each(paint_row);
    }

    working
}
