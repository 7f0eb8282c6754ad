//! Grading overlays.
//!
//! Two full-frame radial gradients are painted over the blended image: a warm
//! soft-light wash near the upper middle, then a cool multiply tint from the
//! upper right. Order is significant.

use colorize_common::{ColorizeError, ColorizeResult};
use tiny_skia::{BlendMode, Color, GradientStop, Point, RadialGradient, SpreadMode, Transform};

use crate::surface::DrawingSurface;

/// Compositing mode for an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMode {
    SoftLight,
    Multiply,
}

impl OverlayMode {
    pub fn blend_mode(self) -> BlendMode {
        match self {
            OverlayMode::SoftLight => BlendMode::SoftLight,
            OverlayMode::Multiply => BlendMode::Multiply,
        }
    }
}

/// One gradient color stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStop {
    /// Position along the radius, 0..=1.
    pub offset: f32,
    pub color: [u8; 3],
    pub alpha: f32,
}

impl OverlayStop {
    const fn new(offset: f32, color: [u8; 3], alpha: f32) -> Self {
        Self {
            offset,
            color,
            alpha,
        }
    }

    fn gradient_stop(&self) -> GradientStop {
        let [r, g, b] = self.color;
        let a = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        GradientStop::new(self.offset, Color::from_rgba8(r, g, b, a))
    }

    /// Interpolate toward `next` in premultiplied space, returned as a
    /// straight-alpha stop.
    fn lerp_premultiplied(&self, next: &OverlayStop, t: f32) -> OverlayStop {
        let alpha = self.alpha + (next.alpha - self.alpha) * t;
        let mut color = [0u8; 3];
        for (c, out) in color.iter_mut().enumerate() {
            let from = self.color[c] as f32;
            let to = next.color[c] as f32;
            let value = if alpha > 0.0 {
                (from * self.alpha + (to * next.alpha - from * self.alpha) * t) / alpha
            } else {
                from + (to - from) * t
            };
            *out = value.round().clamp(0.0, 255.0) as u8;
        }
        OverlayStop::new(self.offset + (next.offset - self.offset) * t, color, alpha)
    }
}

/// Sub-stops inserted per segment by [`premultiplied_ramp`].
pub const STOP_SUBDIVISIONS: usize = 8;

/// Resample `stops` so tiny-skia's straight-alpha interpolation tracks the
/// premultiplied interpolation of an HTML canvas gradient.
pub fn premultiplied_ramp(stops: &[OverlayStop]) -> Vec<OverlayStop> {
    let mut ramp = Vec::with_capacity(stops.len() * STOP_SUBDIVISIONS + 1);
    for pair in stops.windows(2) {
        for step in 0..STOP_SUBDIVISIONS {
            let t = step as f32 / STOP_SUBDIVISIONS as f32;
            ramp.push(pair[0].lerp_premultiplied(&pair[1], t));
        }
    }
    if let Some(last) = stops.last() {
        ramp.push(*last);
    }
    ramp
}

/// Declarative radial gradient overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientOverlay {
    pub name: &'static str,
    /// Center as a fraction of (width, height).
    pub center: (f32, f32),
    /// Radius as a fraction of `max(width, height)`.
    pub radius: f32,
    pub stops: &'static [OverlayStop],
    pub mode: OverlayMode,
    /// Global alpha for the fill.
    pub opacity: f32,
}

pub const WARM: GradientOverlay = GradientOverlay {
    name: "warm",
    center: (0.5, 0.4),
    radius: 0.6,
    stops: &[
        OverlayStop::new(0.0, [255, 240, 220], 0.8),
        OverlayStop::new(0.7, [255, 245, 235], 0.2),
        OverlayStop::new(1.0, [255, 250, 245], 0.0),
    ],
    mode: OverlayMode::SoftLight,
    opacity: 0.08,
};

pub const COOL: GradientOverlay = GradientOverlay {
    name: "cool",
    center: (0.8, 0.2),
    radius: 0.9,
    stops: &[
        OverlayStop::new(0.0, [200, 220, 255], 0.6),
        OverlayStop::new(0.5, [220, 235, 255], 0.3),
        OverlayStop::new(1.0, [240, 245, 255], 0.0),
    ],
    mode: OverlayMode::Multiply,
    opacity: 0.05,
};

/// Overlays in the order they are painted.
pub const GRADING_PASS: [GradientOverlay; 2] = [WARM, COOL];

/// Paint one overlay across the whole surface.
pub fn paint_overlay(surface: &mut DrawingSurface, overlay: &GradientOverlay) -> ColorizeResult<()> {
    let width = surface.width() as f32;
    let height = surface.height() as f32;
    let center = Point::from_xy(width * overlay.center.0, height * overlay.center.1);
    let radius = width.max(height) * overlay.radius;
    let stops = premultiplied_ramp(overlay.stops)
        .iter()
        .map(OverlayStop::gradient_stop)
        .collect();

    let shader = RadialGradient::new(
        center,
        center,
        radius,
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    )
    .ok_or_else(|| ColorizeError::RenderFailure(format!("invalid {} gradient", overlay.name)))?;

    let mut scope = surface.with_composite(overlay.mode.blend_mode(), overlay.opacity)?;
    scope.fill(shader)
}

/// Paint `overlays` in order. The surface is back in its default
/// compositing state afterwards, whether or not painting succeeded.
pub fn apply_grading(surface: &mut DrawingSurface, overlays: &[GradientOverlay]) -> ColorizeResult<()> {
    for overlay in overlays {
        paint_overlay(surface, overlay)?;
        tracing::trace!(overlay = overlay.name, "Painted grading overlay");
    }
    Ok(())
}
