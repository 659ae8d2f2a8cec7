use crate::{
    config::spec::{LayerSpec, SpeedPolicy, StageOptions, StageSpec, validate_stage},
    foundation::{
        core::{Direction, Point, Viewport},
        error::ParallaxResult,
    },
    host::collaborators::{ImageResolver, Scheduler},
    layer::offset::Layer,
};

/// One texture placement in a composite frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand<T> {
    /// Index of the source layer (0 = furthest back).
    pub layer: usize,
    /// Texture to draw.
    pub texture: T,
    /// Left edge in viewport pixels.
    pub x: i64,
    /// Top edge in viewport pixels; always 0 for horizontal parallax.
    pub y: i64,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
}

impl<T> DrawCommand<T> {
    /// Top-left corner as a point.
    pub fn origin(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// Everything drawn for one tick, in paint order (back to front).
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeFrame<T> {
    /// Animation time the frame was produced for.
    pub at: f64,
    /// Area the commands cover.
    pub viewport: Viewport,
    /// Draw commands in paint order.
    pub commands: Vec<DrawCommand<T>>,
}

impl<T> CompositeFrame<T> {
    /// Commands belonging to layer `layer`.
    pub fn layer_commands(&self, layer: usize) -> impl Iterator<Item = &DrawCommand<T>> {
        self.commands.iter().filter(move |c| c.layer == layer)
    }

    /// X positions drawn for layer `layer`, in emission order.
    pub fn layer_positions(&self, layer: usize) -> Vec<i64> {
        self.layer_commands(layer).map(|c| c.x).collect()
    }
}

/// An ordered stack of parallax layers sharing a viewport and direction.
///
/// Layers are painted in the order given, so later layers occlude earlier ones. The stage owns
/// its resolver; textures are resolved lazily on the first [`ParallaxStage::update`].
pub struct ParallaxStage<R: ImageResolver> {
    viewport: Viewport,
    options: StageOptions,
    layers: Vec<Layer<R::Texture>>,
    resolver: R,
}

impl<R: ImageResolver> std::fmt::Debug for ParallaxStage<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallaxStage")
            .field("viewport", &self.viewport)
            .field("options", &self.options)
            .field("layers_len", &self.layers.len())
            .finish_non_exhaustive()
    }
}

impl<R: ImageResolver> ParallaxStage<R> {
    /// Validate the arguments and build a stage; nothing is built when validation fails.
    #[tracing::instrument(skip(layers, resolver), fields(layers = layers.len()))]
    pub fn new(
        viewport: Viewport,
        options: StageOptions,
        layers: Vec<LayerSpec>,
        resolver: R,
    ) -> ParallaxResult<Self> {
        validate_stage(viewport, &options, &layers)?;

        let layers = layers
            .into_iter()
            .map(|spec| Layer::new(spec, options.direction))
            .collect();

        Ok(Self {
            viewport,
            options,
            layers,
            resolver,
        })
    }

    /// Build a stage from a parsed [`StageSpec`].
    pub fn from_spec(spec: StageSpec, resolver: R) -> ParallaxResult<Self> {
        Self::new(spec.viewport, spec.options, spec.layers, resolver)
    }

    /// Advance every layer to `at` and lay out its tiles, then ask `scheduler` for the next tick.
    ///
    /// `at` is the stage's animation clock in seconds; it restarts from 0 whenever the stage is
    /// shown again.
    #[tracing::instrument(level = "trace", skip(self, scheduler))]
    pub fn update<S: Scheduler + ?Sized>(
        &mut self,
        at: f64,
        scheduler: &mut S,
    ) -> ParallaxResult<CompositeFrame<R::Texture>> {
        let viewport_width = self.viewport.width;
        let mut commands = Vec::new();

        for (idx, layer) in self.layers.iter_mut().enumerate() {
            layer.advance(at, &mut self.resolver)?;
            let tiles = layer.tile_positions(viewport_width, &mut self.resolver)?;
            let img = layer.ensure_resolved(&mut self.resolver)?;
            commands.reserve(tiles.len());
            for x in tiles {
                commands.push(DrawCommand {
                    layer: idx,
                    texture: img.texture.clone(),
                    x,
                    y: 0,
                    width: img.width,
                    height: img.height,
                });
            }
        }

        scheduler.request_redraw(self.options.redraw_interval);

        Ok(CompositeFrame {
            at,
            viewport: self.viewport,
            commands,
        })
    }

    /// Area covered by the stage.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Scroll direction shared by all layers.
    pub fn direction(&self) -> Direction {
        self.options.direction
    }

    /// Delay requested from the scheduler after each frame.
    pub fn redraw_interval(&self) -> f64 {
        self.options.redraw_interval
    }

    /// Speed range the stage was validated against.
    pub fn speed_policy(&self) -> SpeedPolicy {
        self.options.speed_policy
    }

    /// Layers, furthest back first.
    pub fn layers(&self) -> &[Layer<R::Texture>] {
        &self.layers
    }

    /// Resolver owned by the stage.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/parallax.rs"]
mod tests;
