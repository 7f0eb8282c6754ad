//! Region classification.
//!
//! Every pixel is assigned one of six scene roles from its luminance and its
//! position in the frame. Rules live in [`REGION_RULES`] and are evaluated in
//! order; the first match wins and unmatched pixels fall back to
//! [`Region::Background`].

use colorize_common::RgbaBuffer;
use serde::{Deserialize, Serialize};

/// Scene role inferred for a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Sky,
    Subject,
    Highlight,
    Ground,
    Shadow,
    Background,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Sky,
        Region::Subject,
        Region::Highlight,
        Region::Ground,
        Region::Shadow,
        Region::Background,
    ];

    /// Position in [`Region::ALL`]; used to index per-region tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Rec. 601 luma.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Inputs a classification rule can look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelContext {
    pub luminance: f64,
    /// `x / width`
    pub nx: f64,
    /// `y / height`
    pub ny: f64,
}

impl PixelContext {
    pub fn new(x: usize, y: usize, width: usize, height: usize, luminance: f64) -> Self {
        Self {
            luminance,
            nx: x as f64 / width as f64,
            ny: y as f64 / height as f64,
        }
    }

    /// Euclidean distance from the image center in normalized coordinates.
    pub fn center_distance(&self) -> f64 {
        ((self.nx - 0.5).powi(2) + (self.ny - 0.5).powi(2)).sqrt()
    }
}

/// A predicate paired with the label it assigns.
#[derive(Clone, Copy)]
pub struct RegionRule {
    pub region: Region,
    pub matches: fn(&PixelContext) -> bool,
}

fn is_sky(p: &PixelContext) -> bool {
    p.ny < 0.3 && p.luminance > 180.0
}

fn is_subject(p: &PixelContext) -> bool {
    p.center_distance() < 0.3 && p.luminance > 100.0 && p.luminance < 220.0
}

fn is_highlight(p: &PixelContext) -> bool {
    p.luminance > 160.0 && p.luminance < 240.0
}

fn is_ground(p: &PixelContext) -> bool {
    p.ny > 0.7 && p.luminance < 120.0
}

fn is_shadow(p: &PixelContext) -> bool {
    p.luminance < 80.0
}

/// Classification rules in priority order.
pub const REGION_RULES: [RegionRule; 5] = [
    RegionRule { region: Region::Sky, matches: is_sky },
    RegionRule { region: Region::Subject, matches: is_subject },
    RegionRule { region: Region::Highlight, matches: is_highlight },
    RegionRule { region: Region::Ground, matches: is_ground },
    RegionRule { region: Region::Shadow, matches: is_shadow },
];

/// Label a single pixel.
pub fn classify_pixel(pixel: &PixelContext) -> Region {
    REGION_RULES
        .iter()
        .find(|rule| (rule.matches)(pixel))
        .map(|rule| rule.region)
        .unwrap_or(Region::Background)
}

/// Per-pixel region labels, indexed like the source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMap {
    width: usize,
    height: usize,
    labels: Vec<Region>,
}

impl RegionMap {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Region {
        self.labels[y * self.width + x]
    }

    pub fn labels(&self) -> &[Region] {
        &self.labels
    }

    /// Row `y` of labels.
    pub fn row(&self, y: usize) -> &[Region] {
        &self.labels[y * self.width..(y + 1) * self.width]
    }

    /// Number of pixels carrying `region`.
    pub fn count(&self, region: Region) -> usize {
        self.labels.iter().filter(|&&r| r == region).count()
    }
}

/// Classify every pixel of `image`.
pub fn classify(image: &RgbaBuffer) -> RegionMap {
    let (width, height) = image.dimensions();
    let labels = image
        .data()
        .chunks_exact(4)
        .enumerate()
        .map(|(i, px)| {
            let context = PixelContext::new(
                i % width,
                i / width,
                width,
                height,
                luminance(px[0], px[1], px[2]),
            );
            classify_pixel(&context)
        })
        .collect();

    RegionMap {
        width,
        height,
        labels,
    }
}
