use std::sync::Arc;

use crate::{
    assets::store::PreparedImage,
    foundation::{
        core::{Rgba8Premul, Viewport},
        error::{ParallaxError, ParallaxResult},
    },
    host::collaborators::{Renderer, draw_frame},
    render::composite::{over_row, unpremultiply},
    stage::parallax::CompositeFrame,
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// A frame filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgba8Premul) -> Self {
        let px = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            data: color.to_array().repeat(px),
            premultiplied: true,
        }
    }

    /// A fully transparent frame the size of `viewport`.
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self::filled(viewport.width, viewport.height, Rgba8Premul::transparent())
    }

    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy of the pixel data with straight (non-premultiplied) alpha.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&unpremultiply([px[0], px[1], px[2], px[3]]));
        }
        out
    }
}

/// Software [`Renderer`] compositing [`PreparedImage`] textures onto [`FrameRGBA`] surfaces.
#[derive(Clone, Debug, Default)]
pub struct CpuRenderer {
    blits: u64,
}

impl CpuRenderer {
    /// Fresh renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blits that touched at least one surface pixel.
    pub fn blits(&self) -> u64 {
        self.blits
    }

    /// Rasterize `frame` onto a new surface cleared to `background`.
    pub fn render(
        &mut self,
        frame: &CompositeFrame<Arc<PreparedImage>>,
        background: Rgba8Premul,
    ) -> ParallaxResult<FrameRGBA> {
        let mut surface =
            FrameRGBA::filled(frame.viewport.width, frame.viewport.height, background);
        draw_frame(self, &mut surface, frame)?;
        Ok(surface)
    }
}

impl Renderer for CpuRenderer {
    type Texture = Arc<PreparedImage>;
    type Surface = FrameRGBA;

    fn blit(
        &mut self,
        surface: &mut FrameRGBA,
        texture: &Arc<PreparedImage>,
        x: i64,
        y: i64,
    ) -> ParallaxResult<()> {
        if !surface.premultiplied {
            return Err(ParallaxError::Other(anyhow::anyhow!(
                "cpu blit expects a premultiplied surface"
            )));
        }
        if surface.data.len() != (surface.width as usize) * (surface.height as usize) * 4 {
            return Err(ParallaxError::Other(anyhow::anyhow!(
                "surface buffer does not match {}x{}",
                surface.width,
                surface.height
            )));
        }
        let expected = (texture.width as usize) * (texture.height as usize) * 4;
        if texture.rgba8_premul.len() != expected {
            return Err(ParallaxError::Other(anyhow::anyhow!(
                "texture buffer is {} bytes, expected {expected} for {}x{}",
                texture.rgba8_premul.len(),
                texture.width,
                texture.height
            )));
        }

        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(texture.width)).min(i64::from(surface.width));
        let y1 = (y + i64::from(texture.height)).min(i64::from(surface.height));
        if x0 >= x1 || y0 >= y1 {
            return Ok(());
        }

        let span = ((x1 - x0) as usize) * 4;
        let src_stride = (texture.width as usize) * 4;
        let dst_stride = (surface.width as usize) * 4;
        for row in y0..y1 {
            let src_start = ((row - y) as usize) * src_stride + ((x0 - x) as usize) * 4;
            let dst_start = (row as usize) * dst_stride + (x0 as usize) * 4;
            over_row(
                &mut surface.data[dst_start..dst_start + span],
                &texture.rgba8_premul[src_start..src_start + span],
            );
        }
        self.blits += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
