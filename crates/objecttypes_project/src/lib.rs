//! Object type repository for the map editor
//!
//! `EntityRepository` owns the object types of one `objecttypes.xml` file:
//! it loads them, keeps them in order in memory, lets callers add, remove and
//! edit them, and writes them back. Images named after an object type are
//! loaded from the same directory as the XML file.
//!
//! # Example
//!
//! ```rust,ignore
//! use objecttypes_project::EntityRepository;
//! use objecttypes_core::EntityType;
//!
//! let mut repo = EntityRepository::new();
//! repo.load_from("res/", "objecttypes.xml")?;
//! repo.add_entity(EntityType::new("Chest").with_class("Container"))?;
//! repo.save()?;
//!
//! for entity in &repo {
//!     let image = repo.load_image_by_name(&entity.name);
//! }
//! ```

mod config;
mod images;
mod repository;

pub use config::{ConfigError, ProjectConfig, DEFAULT_DIRECTORY, DEFAULT_FILE_NAME};
pub use images::{image_path, ImageCache, ImageLoadError, IMAGE_EXTENSION};
pub use repository::EntityRepository;

pub use image::DynamicImage;
pub use objecttypes_core::{DocumentError, EntityType, Property};

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by `EntityRepository`
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("No object types loaded, call load() first")]
    NotLoaded,
    #[error("No object type named '{0}'")]
    NotFound(String),
    #[error("Index {index} is out of bounds ({len} object types)")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("An object type named '{0}' already exists")]
    DuplicateName(String),
}
