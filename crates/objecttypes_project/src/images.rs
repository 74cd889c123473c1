//! Loading object type images from the project directory

use image::DynamicImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Only PNG images are looked up
pub const IMAGE_EXTENSION: &str = "png";

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Image file '{}' is not found", .0.display())]
    NotFound(PathBuf),
    #[error("Cannot read image '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Resolve `<directory>/<name>.png`
pub fn image_path(directory: &Path, name: &str) -> PathBuf {
    directory.join(format!("{name}.{IMAGE_EXTENSION}"))
}

/// Read and decode one image from disk
pub(crate) fn load_image(path: &Path) -> Result<DynamicImage, ImageLoadError> {
    if !path.is_file() {
        return Err(ImageLoadError::NotFound(path.to_path_buf()));
    }

    tracing::debug!("Loading image from: {:?}", path);

    let image = image::open(path).map_err(|source| ImageLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "Loaded image {}x{} from {:?}",
        image.width(),
        image.height(),
        path
    );

    Ok(image)
}

/// Decoded images keyed by resolved path.
///
/// Failed loads are not remembered, so an image added to the directory later
/// is picked up on the next request.
#[derive(Debug, Default)]
pub struct ImageCache {
    images: HashMap<PathBuf, DynamicImage>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached image for `name`, loading it on first use
    pub fn get_or_load(&mut self, directory: &Path, name: &str) -> Option<&DynamicImage> {
        let path = image_path(directory, name);

        if !self.images.contains_key(&path) {
            match load_image(&path) {
                Ok(image) => {
                    self.images.insert(path.clone(), image);
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    return None;
                }
            }
        }

        self.images.get(&path)
    }

    /// Drop the cached image for `name`, returning whether one was cached
    pub fn invalidate(&mut self, directory: &Path, name: &str) -> bool {
        self.images.remove(&image_path(directory, name)).is_some()
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
