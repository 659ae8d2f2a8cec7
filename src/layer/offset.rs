use crate::{
    config::spec::{ImageRef, LayerSpec},
    foundation::{
        core::Direction,
        error::{ParallaxError, ParallaxResult},
        math::{step_fraction, wrap_offset},
    },
    host::collaborators::{ImageResolver, ResolvedImage},
    layer::tiles::TilePositions,
};

/// Outcome of a failed resolution, kept so the resolver is never asked twice.
#[derive(Clone, Debug, PartialEq, Eq)]
enum LayerFault {
    Degenerate { width: u32, height: u32 },
    NotFound(String),
    Other(String),
}

#[derive(Clone, Debug)]
enum Resolution<T> {
    Pending,
    Ready(ResolvedImage<T>),
    Failed(LayerFault),
}

/// One repeating image scrolling at its own speed.
///
/// The texture size is resolved on first use and memoized. The offset is kept in the canonical
/// band for the layer's direction: `(-width, 0]` for `LeftToRight`, `[0, width)` for
/// `RightToLeft`.
#[derive(Clone, Debug)]
pub struct Layer<T> {
    image: ImageRef,
    speed: f64,
    direction: Direction,
    offset: f64,
    last_timestamp: f64,
    resolution: Resolution<T>,
}

impl<T: Clone> Layer<T> {
    /// Build an unresolved layer at offset 0 and timestamp 0.
    pub fn new(spec: LayerSpec, direction: Direction) -> Self {
        Self {
            image: spec.image,
            speed: spec.speed,
            direction,
            offset: 0.0,
            last_timestamp: 0.0,
            resolution: Resolution::Pending,
        }
    }

    /// Image reference this layer draws.
    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    /// Fraction of the layer width scrolled per second.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Scroll direction inherited from the stage.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current horizontal displacement of the tile origin.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Timestamp of the last [`Layer::advance`] call.
    pub fn last_timestamp(&self) -> f64 {
        self.last_timestamp
    }

    /// Resolved texture and size, if resolution already succeeded.
    pub fn resolved(&self) -> Option<&ResolvedImage<T>> {
        match &self.resolution {
            Resolution::Ready(img) => Some(img),
            _ => None,
        }
    }

    /// Resolved `(width, height)`, if known.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.resolved().map(|img| (img.width, img.height))
    }

    /// Move the layer to animation time `at` (seconds).
    ///
    /// Motion per call is bounded to one layer width, and a timestamp earlier than the previous
    /// one (the host clock restarts when the stage is shown again) produces no motion.
    pub fn advance<R>(&mut self, at: f64, resolver: &mut R) -> ParallaxResult<()>
    where
        R: ImageResolver<Texture = T> + ?Sized,
    {
        let percent = if at.is_finite() {
            let delta = at - self.last_timestamp;
            self.last_timestamp = at;
            step_fraction(delta, self.speed)
        } else {
            tracing::warn!(image = %self.image, at, "ignoring non-finite timestamp");
            0.0
        };
        if percent >= 1.0 {
            tracing::debug!(image = %self.image, at, "time step capped at one layer width");
        }

        let width = f64::from(self.ensure_resolved(resolver)?.width);
        let displaced = self.offset + self.direction.sign() * width * percent;
        self.offset = wrap_offset(displaced, width, self.direction);
        Ok(())
    }

    /// Positions needed to cover `viewport_width` pixels, resolving the image if needed.
    pub fn tile_positions<R>(
        &mut self,
        viewport_width: u32,
        resolver: &mut R,
    ) -> ParallaxResult<TilePositions>
    where
        R: ImageResolver<Texture = T> + ?Sized,
    {
        let width = self.ensure_resolved(resolver)?.width;
        Ok(TilePositions::new(
            self.direction,
            self.offset,
            width,
            viewport_width,
        ))
    }

    /// Resolve the image once; later calls return the memoized result or failure.
    pub(crate) fn ensure_resolved<R>(
        &mut self,
        resolver: &mut R,
    ) -> ParallaxResult<&ResolvedImage<T>>
    where
        R: ImageResolver<Texture = T> + ?Sized,
    {
        if let Resolution::Pending = self.resolution {
            let (resolution, err) = match resolver.resolve(&self.image) {
                Ok(img) if img.width == 0 || img.height == 0 => {
                    tracing::warn!(
                        image = %self.image,
                        width = img.width,
                        height = img.height,
                        "layer image is degenerate"
                    );
                    let fault = LayerFault::Degenerate {
                        width: img.width,
                        height: img.height,
                    };
                    (Resolution::Failed(fault), None)
                }
                Ok(img) => {
                    tracing::debug!(
                        image = %self.image,
                        width = img.width,
                        height = img.height,
                        "resolved layer image"
                    );
                    (Resolution::Ready(img), None)
                }
                Err(err) => {
                    tracing::warn!(image = %self.image, error = %err, "layer image resolution failed");
                    let fault = match &err {
                        ParallaxError::ImageNotFound(msg) => LayerFault::NotFound(msg.clone()),
                        other => LayerFault::Other(other.to_string()),
                    };
                    (Resolution::Failed(fault), Some(err))
                }
            };
            self.resolution = resolution;
            if let Some(err) = err {
                return Err(err);
            }
        }

        match &self.resolution {
            Resolution::Ready(img) => Ok(img),
            Resolution::Failed(fault) => Err(self.fault_error(fault)),
            Resolution::Pending => Err(ParallaxError::Other(anyhow::anyhow!(
                "image '{}' is still unresolved",
                self.image
            ))),
        }
    }

    fn fault_error(&self, fault: &LayerFault) -> ParallaxError {
        match fault {
            LayerFault::Degenerate { width, height } => {
                ParallaxError::degenerate_image(self.image.as_str(), *width, *height)
            }
            LayerFault::NotFound(msg) => ParallaxError::image_not_found(msg.clone()),
            LayerFault::Other(msg) => ParallaxError::Other(anyhow::anyhow!(
                "image '{}' failed to resolve earlier: {msg}",
                self.image
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/offset.rs"]
mod tests;
