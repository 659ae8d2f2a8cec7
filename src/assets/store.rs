use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::decode::decode_image,
    config::spec::ImageRef,
    foundation::{
        core::Rgba8Premul,
        error::{ParallaxError, ParallaxResult},
    },
    host::collaborators::{ImageResolver, ResolvedImage},
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// A `width` x `height` image filled with one color.
    pub fn solid(width: u32, height: u32, color: Rgba8Premul) -> Self {
        let px = (width as usize).saturating_mul(height as usize);
        let rgba8_premul = color.to_array().repeat(px);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        }
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.rgba8_premul.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Normalize and validate root-relative image paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> ParallaxResult<String> {
    let s = source.trim().replace('\\', "/");
    if s.is_empty() {
        return Err(ParallaxError::image_not_found("image path must be non-empty"));
    }
    if s.starts_with('/') {
        return Err(ParallaxError::image_not_found(format!(
            "image path '{source}' must be relative"
        )));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ParallaxError::image_not_found(format!(
                "image path '{source}' must not contain '..'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ParallaxError::image_not_found(format!(
            "image path '{source}' must contain a file name"
        )));
    }

    Ok(out.join("/"))
}

/// Image cache that resolves [`ImageRef`]s against a root directory.
///
/// Decoded images are shared through `Arc`, so several stages (or unrelated scenery) can draw the
/// same texture. Images registered with [`ImageStore::insert`] take precedence over files.
#[derive(Clone, Debug)]
pub struct ImageStore {
    root: PathBuf,
    images: HashMap<String, Arc<PreparedImage>>,
}

impl ImageStore {
    /// Store resolving file references relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: HashMap::new(),
        }
    }

    /// Directory file references are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register an already decoded image under `name`.
    pub fn insert(
        &mut self,
        name: &str,
        image: PreparedImage,
    ) -> ParallaxResult<Arc<PreparedImage>> {
        let key = normalize_rel_path(name)?;
        let image = Arc::new(image);
        self.images.insert(key, Arc::clone(&image));
        Ok(image)
    }

    /// Cached image for `name`, without touching the filesystem.
    pub fn get(&self, name: &str) -> Option<Arc<PreparedImage>> {
        let key = normalize_rel_path(name).ok()?;
        self.images.get(&key).cloned()
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Return the cached image for `name`, loading and decoding it on first use.
    pub fn load(&mut self, name: &str) -> ParallaxResult<Arc<PreparedImage>> {
        let key = normalize_rel_path(name)?;
        if let Some(img) = self.images.get(&key) {
            return Ok(Arc::clone(img));
        }

        let path = self.root.join(&key);
        if !path.is_file() {
            return Err(ParallaxError::image_not_found(format!(
                "'{name}' (looked for '{}')",
                path.display()
            )));
        }
        let bytes =
            std::fs::read(&path).with_context(|| format!("read image '{}'", path.display()))?;
        let img = Arc::new(decode_image(&bytes)?);
        tracing::debug!(
            path = %path.display(),
            width = img.width,
            height = img.height,
            "decoded image"
        );
        self.images.insert(key, Arc::clone(&img));
        Ok(img)
    }
}

impl ImageResolver for ImageStore {
    type Texture = Arc<PreparedImage>;

    fn resolve(&mut self, reference: &ImageRef) -> ParallaxResult<ResolvedImage<Self::Texture>> {
        let texture = self.load(reference.as_str())?;
        Ok(ResolvedImage {
            width: texture.width,
            height: texture.height,
            texture,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
