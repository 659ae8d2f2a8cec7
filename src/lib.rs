//! Parallax computes time-driven horizontal parallax backdrops.
//!
//! A [`ParallaxStage`] owns an ordered stack of layers (furthest back first). Each layer repeats
//! one image across the viewport and scrolls at its own speed, expressed as the fraction of the
//! image width traversed per second. On every tick the stage:
//!
//! 1. **Advances** each layer to the given animation time, wrapping its offset into a bounded band
//! 2. **Tiles** each layer, producing the fewest draw positions that cover the viewport
//! 3. **Emits** a [`CompositeFrame`] of draw commands in paint order
//! 4. **Reschedules** itself through the host's [`Scheduler`]
//!
//! The core is host-agnostic: images come from an [`ImageResolver`], pixels are produced by a
//! [`Renderer`], and redraws are requested from a [`Scheduler`]. [`ImageStore`], [`CpuRenderer`]
//! and [`RedrawQueue`] are ready-made implementations; [`CropWindow`] adapts frames for hosts
//! that need explicit clipping.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: motion depends only on the timestamps passed in, never on frame count or
//!   a hidden clock.
//! - **Bounded steps**: a single tick moves a layer at most one image width.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod host;
mod layer;
mod render;
mod stage;

pub use assets::decode::{decode_image, from_rgba_image};
pub use assets::store::{ImageStore, PreparedImage, normalize_rel_path};
pub use config::spec::{
    DEFAULT_REDRAW_INTERVAL, ImageRef, LayerSpec, SpeedPolicy, StageOptions, StageSpec,
    validate_stage,
};
pub use foundation::core::{Direction, Point, Rect, Rgba8Premul, Viewport};
pub use foundation::error::{ParallaxError, ParallaxResult};
pub use host::collaborators::{ImageResolver, Renderer, ResolvedImage, Scheduler, draw_frame};
pub use layer::offset::Layer;
pub use layer::tiles::TilePositions;
pub use render::composite::{PremulRgba8, over, unpremultiply};
pub use render::cpu::{CpuRenderer, FrameRGBA};
pub use render::crop::{CropWindow, CroppedDraw};
pub use render::schedule::RedrawQueue;
pub use stage::parallax::{CompositeFrame, DrawCommand, ParallaxStage};
pub use stage::playback::{MAX_PLAYBACK_TICKS, play_frames, play_until};
