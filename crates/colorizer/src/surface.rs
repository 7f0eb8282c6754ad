//! Drawing surface with scoped compositing state.
//!
//! Compositing mode and global alpha are only changed through a
//! [`CompositeScope`]. The scope restores the previous state when dropped,
//! including when a draw call inside it returns early with an error.

use std::ops::{Deref, DerefMut};

use colorize_common::{ColorizeError, ColorizeResult, RgbaBuffer};
use tiny_skia::{BlendMode, ColorU8, Paint, Pixmap, Rect, Shader, Transform};

/// Compositing mode plus global alpha applied to every fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeState {
    pub mode: BlendMode,
    pub alpha: f32,
}

impl Default for CompositeState {
    fn default() -> Self {
        Self {
            mode: BlendMode::SourceOver,
            alpha: 1.0,
        }
    }
}

/// Raster surface backed by a premultiplied tiny-skia pixmap.
pub struct DrawingSurface {
    pixmap: Pixmap,
    state: CompositeState,
}

impl DrawingSurface {
    /// Upload straight-alpha RGBA pixels.
    pub fn from_buffer(buffer: &RgbaBuffer) -> ColorizeResult<Self> {
        let width = u32::try_from(buffer.width())
            .map_err(|_| ColorizeError::RenderFailure("surface width overflow".to_string()))?;
        let height = u32::try_from(buffer.height())
            .map_err(|_| ColorizeError::RenderFailure("surface height overflow".to_string()))?;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ColorizeError::RenderFailure(format!("cannot allocate {}x{} surface", width, height))
        })?;

        for (dst, px) in pixmap
            .pixels_mut()
            .iter_mut()
            .zip(buffer.data().chunks_exact(4))
        {
            *dst = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
        }

        Ok(Self {
            pixmap,
            state: CompositeState::default(),
        })
    }

    /// Read back straight-alpha RGBA pixels.
    pub fn to_buffer(&self) -> ColorizeResult<RgbaBuffer> {
        let data = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RgbaBuffer::from_raw(self.pixmap.width() as usize, self.pixmap.height() as usize, data)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Current compositing state.
    pub fn composite(&self) -> CompositeState {
        self.state
    }

    /// Switch to `mode` at `alpha` until the returned scope is dropped.
    ///
    /// `alpha` is clamped to `[0, 1]`; NaN and infinities are rejected.
    pub fn with_composite(&mut self, mode: BlendMode, alpha: f32) -> ColorizeResult<CompositeScope<'_>> {
        if !alpha.is_finite() {
            return Err(ColorizeError::RenderFailure(format!(
                "composite alpha must be finite, got {}",
                alpha
            )));
        }

        let previous = self.state;
        self.state = CompositeState {
            mode,
            alpha: alpha.clamp(0.0, 1.0),
        };
        Ok(CompositeScope {
            surface: self,
            previous,
        })
    }

    /// Fill the whole surface with `shader` under the current state.
    pub fn fill(&mut self, mut shader: Shader<'_>) -> ColorizeResult<()> {
        let rect = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32)
            .ok_or_else(|| ColorizeError::RenderFailure("empty surface".to_string()))?;

        if self.state.alpha < 1.0 {
            shader.apply_opacity(self.state.alpha);
        }

        let mut paint = Paint::default();
        paint.shader = shader;
        paint.blend_mode = self.state.mode;
        paint.anti_alias = false;

        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        Ok(())
    }
}

/// Guard returned by [`DrawingSurface::with_composite`].
pub struct CompositeScope<'a> {
    surface: &'a mut DrawingSurface,
    previous: CompositeState,
}

impl Deref for CompositeScope<'_> {
    type Target = DrawingSurface;

    fn deref(&self) -> &DrawingSurface {
        self.surface
    }
}

impl DerefMut for CompositeScope<'_> {
    fn deref_mut(&mut self) -> &mut DrawingSurface {
        self.surface
    }
}

impl Drop for CompositeScope<'_> {
    fn drop(&mut self) {
        self.surface.state = self.previous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_opaque_pixels() {
        let mut buffer = RgbaBuffer::filled(3, 2, [12, 200, 99, 255]).unwrap();
        buffer.set_pixel(1, 1, [0, 0, 0, 255]);

        let surface = DrawingSurface::from_buffer(&buffer).unwrap();
        assert_eq!(surface.to_buffer().unwrap(), buffer);
    }

    #[test]
    fn test_nested_scopes_restore_in_order() {
        let buffer = RgbaBuffer::filled(2, 2, [128, 128, 128, 255]).unwrap();
        let mut surface = DrawingSurface::from_buffer(&buffer).unwrap();

        {
            let mut outer = surface.with_composite(BlendMode::Multiply, 0.5).unwrap();
            {
                let inner = outer.with_composite(BlendMode::SoftLight, 0.1).unwrap();
                assert_eq!(inner.composite().mode, BlendMode::SoftLight);
            }
            assert_eq!(outer.composite().mode, BlendMode::Multiply);
            assert_eq!(outer.composite().alpha, 0.5);
        }

        assert_eq!(surface.composite(), CompositeState::default());
    }

    #[test]
    fn test_non_finite_alpha_rejected() {
        let buffer = RgbaBuffer::filled(1, 1, [0, 0, 0, 255]).unwrap();
        let mut surface = DrawingSurface::from_buffer(&buffer).unwrap();

        assert!(surface.with_composite(BlendMode::Multiply, f32::NAN).is_err());
        assert!(surface.with_composite(BlendMode::Multiply, f32::INFINITY).is_err());
        assert_eq!(surface.composite(), CompositeState::default());
    }
}
