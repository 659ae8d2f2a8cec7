use std::{fmt, fs::File, io::BufReader, path::Path};

use crate::foundation::{
    core::{Direction, Viewport},
    error::{ParallaxError, ParallaxResult},
};

/// Redraw cadence used when a stage does not configure one.
pub const DEFAULT_REDRAW_INTERVAL: f64 = 0.01;

/// Opaque reference to a layer image, typically a name or a path relative to an asset root.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wrap a name or path.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Borrow the raw reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Range accepted for layer speeds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SpeedPolicy {
    /// Any finite speed `>= 0`.
    #[default]
    UnboundedNonNegative,
    /// Finite speeds in `[0, 1]`: at most one layer width per second.
    BoundedUnitInterval,
}

impl SpeedPolicy {
    /// Describe why `speed` is rejected, or `None` when it is acceptable.
    pub fn violation(self, speed: f64) -> Option<String> {
        if !speed.is_finite() {
            return Some(format!("speed must be a finite number (got {speed})"));
        }
        if speed < 0.0 {
            return Some(format!("speed must be >= 0.0 (got {speed})"));
        }
        if self == Self::BoundedUnitInterval && speed > 1.0 {
            return Some(format!(
                "speed must be <= 1.0 under the bounded_unit_interval policy (got {speed})"
            ));
        }
        None
    }
}

/// One layer of a stage, listed back to front.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerSpec {
    /// Image drawn (and repeated) by this layer.
    pub image: ImageRef,
    /// Fraction of the image width scrolled per second.
    pub speed: f64,
}

impl LayerSpec {
    /// Convenience constructor.
    pub fn new(image: impl Into<ImageRef>, speed: f64) -> Self {
        Self {
            image: image.into(),
            speed,
        }
    }
}

/// Stage-wide options recognized at construction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageOptions {
    /// Scroll direction for every layer.
    pub direction: Direction,
    /// Delay in seconds requested from the scheduler after each frame.
    pub redraw_interval: f64,
    /// Range accepted for layer speeds.
    pub speed_policy: SpeedPolicy,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            redraw_interval: DEFAULT_REDRAW_INTERVAL,
            speed_policy: SpeedPolicy::default(),
        }
    }
}

impl StageOptions {
    /// Check option values independent of any layer.
    pub fn validate(&self) -> ParallaxResult<()> {
        if !self.redraw_interval.is_finite() || self.redraw_interval < 0.0 {
            return Err(ParallaxError::configuration(format!(
                "redraw_interval must be a finite number >= 0.0 (got {})",
                self.redraw_interval
            )));
        }
        Ok(())
    }
}

/// Validate everything a stage needs before any runtime state is built.
///
/// Layer indices in messages are 1-based.
pub fn validate_stage(
    viewport: Viewport,
    options: &StageOptions,
    layers: &[LayerSpec],
) -> ParallaxResult<()> {
    viewport.validate()?;
    options.validate()?;

    if layers.is_empty() {
        return Err(ParallaxError::configuration(
            "a stage needs one or more layers",
        ));
    }

    for (idx, layer) in layers.iter().enumerate() {
        let n = idx + 1;
        if layer.image.as_str().trim().is_empty() {
            return Err(ParallaxError::configuration(format!(
                "layer {n}: image reference must be non-empty"
            )));
        }
        if let Some(why) = options.speed_policy.violation(layer.speed) {
            return Err(ParallaxError::configuration(format!("layer {n}: {why}")));
        }
    }

    Ok(())
}

/// JSON-facing description of a complete stage.
///
/// ```json
/// {
///   "viewport": { "width": 800, "height": 600 },
///   "options": { "direction": "left_to_right", "redraw_interval": 0.01 },
///   "layers": [
///     { "image": "sky.png", "speed": 0.02 },
///     { "image": "hills.png", "speed": 0.1 }
///   ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageSpec {
    /// Area covered by the stage.
    pub viewport: Viewport,
    /// Stage-wide options; every field has a default.
    #[serde(default)]
    pub options: StageOptions,
    /// Layers, furthest back first.
    pub layers: Vec<LayerSpec>,
}

impl StageSpec {
    /// Parse a stage description from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ParallaxResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ParallaxError::configuration(format!("parse stage JSON: {e}")))
    }

    /// Parse a stage description from a JSON string.
    pub fn from_json(s: &str) -> ParallaxResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ParallaxError::configuration(format!("parse stage JSON: {e}")))
    }

    /// Parse a stage description from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ParallaxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ParallaxError::configuration(format!("open stage JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize back to pretty JSON.
    pub fn to_json_pretty(&self) -> ParallaxResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ParallaxError::serde(e.to_string()))
    }

    /// Validate the description without building a stage.
    pub fn validate(&self) -> ParallaxResult<()> {
        validate_stage(self.viewport, &self.options, &self.layers)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/spec.rs"]
mod tests;
