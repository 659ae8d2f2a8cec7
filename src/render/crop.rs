use crate::{
    foundation::{
        core::{Rect, Viewport},
        error::{ParallaxError, ParallaxResult},
    },
    stage::parallax::CompositeFrame,
};

/// A draw command clipped to a crop window.
///
/// `src` is in texture pixels; `dst` is relative to the crop window's top-left corner. Hosts
/// that cannot clip on their own copy `src` from the texture into `dst`.
#[derive(Clone, Debug, PartialEq)]
pub struct CroppedDraw<T> {
    /// Index of the source layer.
    pub layer: usize,
    /// Texture to copy from.
    pub texture: T,
    /// Visible part of the texture.
    pub src: Rect,
    /// Where the visible part lands inside the crop window.
    pub dst: Rect,
}

/// Rectangular window that frame output is restricted to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropWindow {
    rect: Rect,
}

impl CropWindow {
    /// Window over `rect`; it must be finite with positive width and height.
    pub fn new(rect: Rect) -> ParallaxResult<Self> {
        let finite = [rect.x0, rect.y0, rect.x1, rect.y1]
            .iter()
            .all(|v| v.is_finite());
        if !finite || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(ParallaxError::configuration(format!(
                "crop window must be finite with positive size (got {rect:?})"
            )));
        }
        Ok(Self { rect })
    }

    /// Window covering exactly `viewport`.
    pub fn from_viewport(viewport: Viewport) -> Self {
        Self {
            rect: viewport.to_rect(),
        }
    }

    /// Window rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Clip every command of `frame`, dropping those that fall entirely outside the window.
    pub fn crop<T: Clone>(&self, frame: &CompositeFrame<T>) -> Vec<CroppedDraw<T>> {
        let mut out = Vec::with_capacity(frame.commands.len());
        for cmd in &frame.commands {
            let tile = Rect::from_origin_size(
                cmd.origin(),
                (f64::from(cmd.width), f64::from(cmd.height)),
            );
            let visible = tile.intersect(self.rect);
            if visible.width() <= 0.0 || visible.height() <= 0.0 {
                continue;
            }
            out.push(CroppedDraw {
                layer: cmd.layer,
                texture: cmd.texture.clone(),
                src: visible - tile.origin().to_vec2(),
                dst: visible - self.rect.origin().to_vec2(),
            });
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/crop.rs"]
mod tests;
