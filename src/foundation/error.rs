/// Convenience result type used across the crate.
pub type ParallaxResult<T> = Result<T, ParallaxError>;

/// Top-level error taxonomy for stage construction, image resolution and rendering.
#[derive(thiserror::Error, Debug)]
pub enum ParallaxError {
    /// Invalid construction arguments (viewport, layer list, speeds, options).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A layer image resolved to a zero width and/or height.
    #[error("degenerate image: '{reference}' resolved to {width}x{height}")]
    DegenerateImage {
        /// Image reference the layer was built from.
        reference: String,
        /// Resolved width in pixels.
        width: u32,
        /// Resolved height in pixels.
        height: u32,
    },

    /// The image resolver could not locate a reference.
    #[error("image not found: {0}")]
    ImageNotFound(String),

    /// Errors when serializing or deserializing stage descriptions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ParallaxError {
    /// Build a [`ParallaxError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ParallaxError::DegenerateImage`] value.
    pub fn degenerate_image(reference: impl Into<String>, width: u32, height: u32) -> Self {
        Self::DegenerateImage {
            reference: reference.into(),
            width,
            height,
        }
    }

    /// Build a [`ParallaxError::ImageNotFound`] value.
    pub fn image_not_found(msg: impl Into<String>) -> Self {
        Self::ImageNotFound(msg.into())
    }

    /// Build a [`ParallaxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
