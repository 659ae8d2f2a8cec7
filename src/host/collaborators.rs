use crate::{
    config::spec::ImageRef,
    foundation::error::ParallaxResult,
    stage::parallax::CompositeFrame,
};

/// A texture handle together with its pixel size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedImage<T> {
    /// Host texture handle; cloned into every draw command.
    pub texture: T,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Turns an [`ImageRef`] into a drawable texture.
///
/// Stages call this at most once per layer. Implementations should report a missing reference
/// with [`crate::ParallaxError::ImageNotFound`].
pub trait ImageResolver {
    /// Shared handle type; cheap to clone.
    type Texture: Clone;

    /// Locate and size the image behind `reference`.
    fn resolve(&mut self, reference: &ImageRef) -> ParallaxResult<ResolvedImage<Self::Texture>>;
}

impl<R: ImageResolver + ?Sized> ImageResolver for &mut R {
    type Texture = R::Texture;

    fn resolve(&mut self, reference: &ImageRef) -> ParallaxResult<ResolvedImage<Self::Texture>> {
        (**self).resolve(reference)
    }
}

/// Draw primitive: copy a whole texture onto a surface with its top-left corner at `(x, y)`.
pub trait Renderer {
    /// Texture handle type accepted by [`Renderer::blit`].
    type Texture;
    /// Target surface type.
    type Surface;

    /// Composite `texture` over `surface`; parts outside the surface are discarded.
    fn blit(
        &mut self,
        surface: &mut Self::Surface,
        texture: &Self::Texture,
        x: i64,
        y: i64,
    ) -> ParallaxResult<()>;
}

/// Host hook asking for another `update` call.
///
/// Repeated requests before the next frame coalesce.
pub trait Scheduler {
    /// Ask for the next update `after_secs` seconds from now.
    fn request_redraw(&mut self, after_secs: f64);
}

/// Blit every command of `frame` in paint order.
pub fn draw_frame<R: Renderer + ?Sized>(
    renderer: &mut R,
    surface: &mut R::Surface,
    frame: &CompositeFrame<R::Texture>,
) -> ParallaxResult<()> {
    for cmd in &frame.commands {
        renderer.blit(surface, &cmd.texture, cmd.x, cmd.y)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/host/collaborators.rs"]
mod tests;
