//! Horizontal Gaussian smoothing.
//!
//! Only rows are convolved; there is no vertical pass. Columns outside the
//! image are clamped to the nearest edge column. All four channels, alpha
//! included, go through the same kernel.

use colorize_common::RgbaBuffer;
use rayon::prelude::*;

use crate::palette::PARALLEL_THRESHOLD;

pub const DEFAULT_BLUR_RADIUS: usize = 1;

/// Normalized 1-D convolution weights of length `2 * radius + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    radius: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Gaussian kernel with `sigma = radius / 3`.
    ///
    /// A radius of zero gives the identity kernel.
    pub fn gaussian(radius: usize) -> Self {
        if radius == 0 {
            return Self {
                radius,
                weights: vec![1.0],
            };
        }

        let sigma = radius as f64 / 3.0;
        let norm = 1.0 / ((2.0 * std::f64::consts::PI).sqrt() * sigma);
        let r = radius as isize;

        let mut weights: Vec<f64> = (-r..=r)
            .map(|i| norm * (-0.5 * (i as f64 / sigma).powi(2)).exp())
            .collect();

        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Self { radius, weights }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Convolve one row of RGBA pixels into `dst`.
fn convolve_row(src: &[u8], dst: &mut [u8], kernel: &Kernel) {
    let width = src.len() / 4;
    let last = width as isize - 1;
    let radius = kernel.radius() as isize;

    for x in 0..width {
        let mut acc = [0.0f64; 4];
        for (k, &weight) in kernel.weights().iter().enumerate() {
            let sx = (x as isize + k as isize - radius).clamp(0, last) as usize;
            let px = &src[sx * 4..sx * 4 + 4];
            for c in 0..4 {
                acc[c] += px[c] as f64 * weight;
            }
        }

        let out = &mut dst[x * 4..x * 4 + 4];
        for c in 0..4 {
            // Byte-array store semantics: clamp, then round half to even.
            out[c] = acc[c].clamp(0.0, 255.0).round_ties_even() as u8;
        }
    }
}

/// Smooth `src` along rows, producing a new buffer of the same size.
pub fn smooth_horizontal(src: &RgbaBuffer, kernel: &Kernel) -> RgbaBuffer {
    let mut dst = src.clone();
    let stride = src.stride();

    if src.pixel_count() >= PARALLEL_THRESHOLD {
        dst.data_mut()
            .par_chunks_mut(stride)
            .zip(src.data().par_chunks(stride))
            .for_each(|(out, row)| convolve_row(row, out, kernel));
    } else {
        for (out, row) in dst.data_mut().chunks_mut(stride).zip(src.data().chunks(stride)) {
            convolve_row(row, out, kernel);
        }
    }

    dst
}
