use crate::foundation::error::{ParallaxError, ParallaxResult};

pub use kurbo::{Point, Rect};

/// Pixel dimensions of the area a stage must cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Build a viewport, rejecting zero-sized dimensions.
    pub fn new(width: u32, height: u32) -> ParallaxResult<Self> {
        let vp = Self { width, height };
        vp.validate()?;
        Ok(vp)
    }

    /// Check that both dimensions are positive.
    pub fn validate(self) -> ParallaxResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ParallaxError::configuration(format!(
                "viewport width/height must be > 0 (got {}x{})",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// The viewport as a rectangle anchored at the origin.
    pub fn to_rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Scroll direction shared by every layer of a stage.
///
/// `LeftToRight` lays tiles out from the left edge and decreases the offset over time, so the
/// backdrop drifts toward the left. `RightToLeft` is its mirror image.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Tiles start at the left edge; offsets decrease.
    #[default]
    #[serde(alias = "left")]
    LeftToRight,
    /// Tiles start at the right edge; offsets increase.
    #[serde(alias = "right")]
    RightToLeft,
}

impl Direction {
    /// Sign applied to a layer's displacement on each tick.
    pub fn sign(self) -> f64 {
        match self {
            Self::LeftToRight => -1.0,
            Self::RightToLeft => 1.0,
        }
    }

    /// The opposite direction.
    pub fn mirrored(self) -> Self {
        match self {
            Self::LeftToRight => Self::RightToLeft,
            Self::RightToLeft => Self::LeftToRight,
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply a straight-alpha color.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Parse `RRGGBB` or `RRGGBBAA` (optionally prefixed with `#`) as straight alpha.
    pub fn from_hex(s: &str) -> ParallaxResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(ParallaxError::configuration(format!(
                "color '{s}' must be RRGGBB or RRGGBBAA"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| {
                ParallaxError::configuration(format!("color '{s}' has a non-hex digit"))
            })
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::from_straight_rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Channels in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
