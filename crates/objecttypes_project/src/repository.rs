//! The object type repository

use crate::images::{image_path, load_image, ImageLoadError};
use crate::{ProjectConfig, RepositoryError};
use image::DynamicImage;
use objecttypes_core::{parse_document, write_document, EntityType};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Object types of one `objecttypes.xml` file.
///
/// The in-memory list is the only copy of the data; `save()` builds the
/// document from it. Until a successful `load()` (or `create_empty()`) the
/// repository is unloaded and every operation that changes or writes the list
/// fails with `RepositoryError::NotLoaded`.
#[derive(Debug, Clone, Default)]
pub struct EntityRepository {
    config: ProjectConfig,
    entities: Vec<EntityType>,
    loaded: bool,
    dirty: bool,
}

impl EntityRepository {
    /// Create an unloaded repository pointing at the default location
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unloaded repository for the given location
    pub fn with_config(config: ProjectConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Set the directory holding the XML file and the images
    pub fn set_directory(&mut self, path: impl Into<PathBuf>) {
        self.config.directory = path.into();
    }

    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    /// Set the name of the XML file inside the directory
    pub fn set_file_name(&mut self, name: impl Into<String>) {
        self.config.file_name = name.into();
    }

    pub fn file_name(&self) -> &str {
        &self.config.file_name
    }

    /// Full path of the backing XML file
    pub fn file_path(&self) -> PathBuf {
        self.config.file_path()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Check if there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Point the repository at a new file and load it
    pub fn load_from(
        &mut self,
        directory: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> Result<(), RepositoryError> {
        self.set_directory(directory);
        self.set_file_name(file_name);
        self.load()
    }

    /// Replace the in-memory list with the contents of the backing file.
    ///
    /// On failure the list is empty and the repository is unloaded. A file that
    /// names two object types the same is rejected with `DuplicateName`.
    pub fn load(&mut self) -> Result<(), RepositoryError> {
        self.entities.clear();
        self.loaded = false;
        self.dirty = false;

        let path = self.file_path();
        let content = std::fs::read_to_string(&path).map_err(|source| RepositoryError::Io {
            path: path.clone(),
            source,
        })?;
        let entities = parse_document(&content)?;

        let mut names = HashSet::new();
        if let Some(duplicate) = entities.iter().find(|e| !names.insert(e.name.as_str())) {
            return Err(RepositoryError::DuplicateName(duplicate.name.clone()));
        }

        self.entities = entities;
        self.loaded = true;

        tracing::info!(
            "Loaded {} object types from {}",
            self.entities.len(),
            path.display()
        );
        Ok(())
    }

    /// Start a new, empty list that will be written to the configured file
    pub fn create_empty(&mut self) {
        self.entities.clear();
        self.loaded = true;
        self.dirty = true;
    }

    /// Write the list to `directory/file_name`, creating the directory if needed.
    ///
    /// The document goes to a temporary file in the same directory first and
    /// replaces the backing file only once it is complete.
    pub fn save(&mut self) -> Result<(), RepositoryError> {
        self.ensure_loaded()?;

        let xml = write_document(&self.entities)?;

        let directory = match self.directory() {
            dir if dir.as_os_str().is_empty() => PathBuf::from("."),
            dir => dir.to_path_buf(),
        };
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| RepositoryError::Io { path, source }
        };

        if !directory.exists() {
            std::fs::create_dir_all(&directory).map_err(io_error(&directory))?;
        }

        let path = self.file_path();
        let mut temp =
            tempfile::NamedTempFile::new_in(&directory).map_err(io_error(&directory))?;
        temp.write_all(xml.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(io_error(temp.path()))?;
        temp.persist(&path).map_err(|e| RepositoryError::Io {
            path: path.clone(),
            source: e.error,
        })?;
        self.dirty = false;

        tracing::info!(
            "Saved {} object types to {}",
            self.entities.len(),
            path.display()
        );
        Ok(())
    }

    /// Append an object type. Names must be unique.
    pub fn add_entity(&mut self, entity: EntityType) -> Result<(), RepositoryError> {
        self.ensure_loaded()?;
        if self.contains(&entity.name) {
            return Err(RepositoryError::DuplicateName(entity.name));
        }

        tracing::debug!("Adding object type '{}'", entity.name);
        self.entities.push(entity);
        self.dirty = true;
        Ok(())
    }

    /// Remove the first object type equal to `entity`
    pub fn remove_entity(&mut self, entity: &EntityType) -> Result<EntityType, RepositoryError> {
        self.ensure_loaded()?;
        let pos = self
            .entities
            .iter()
            .position(|e| e == entity)
            .ok_or_else(|| RepositoryError::NotFound(entity.name.clone()))?;

        self.dirty = true;
        Ok(self.entities.remove(pos))
    }

    /// Remove the object type with the given name
    pub fn remove_entity_by_name(&mut self, name: &str) -> Result<EntityType, RepositoryError> {
        self.ensure_loaded()?;
        let pos = self
            .position(name)
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))?;

        self.dirty = true;
        Ok(self.entities.remove(pos))
    }

    /// Get an object type by position
    pub fn get_entity(&self, index: usize) -> Result<&EntityType, RepositoryError> {
        self.entities
            .get(index)
            .ok_or(RepositoryError::IndexOutOfBounds {
                index,
                len: self.entities.len(),
            })
    }

    /// Get the first object type with the given name
    pub fn get_entity_by_name(&self, name: &str) -> Result<&EntityType, RepositoryError> {
        self.entities
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))
    }

    /// Get a mutable object type by name.
    ///
    /// Renaming through this reference bypasses the uniqueness check, use
    /// `rename_entity` for that.
    pub fn get_entity_by_name_mut(
        &mut self,
        name: &str,
    ) -> Result<&mut EntityType, RepositoryError> {
        self.ensure_loaded()?;
        let entity = self
            .entities
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))?;

        self.dirty = true;
        Ok(entity)
    }

    /// Rename an object type, keeping names unique
    pub fn rename_entity(&mut self, old_name: &str, new_name: &str) -> Result<(), RepositoryError> {
        self.ensure_loaded()?;
        if old_name == new_name {
            return self.get_entity_by_name(old_name).map(|_| ());
        }
        if self.contains(new_name) {
            return Err(RepositoryError::DuplicateName(new_name.to_string()));
        }

        let entity = self.get_entity_by_name_mut(old_name)?;
        entity.name = new_name.to_string();
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All object types in order
    pub fn entities(&self) -> &[EntityType] {
        &self.entities
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityType> {
        self.entities.iter()
    }

    /// Load `<directory>/<name>.png`, logging and returning `None` on failure.
    ///
    /// Every call reads the file again; see `ImageCache` for reuse.
    pub fn load_image_by_name(&self, name: &str) -> Option<DynamicImage> {
        match self.try_load_image_by_name(name) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }

    /// Load `<directory>/<name>.png`, returning why it failed
    pub fn try_load_image_by_name(&self, name: &str) -> Result<DynamicImage, ImageLoadError> {
        load_image(&image_path(self.directory(), name))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entities.iter().position(|e| e.name == name)
    }

    fn ensure_loaded(&self) -> Result<(), RepositoryError> {
        if self.loaded {
            Ok(())
        } else {
            Err(RepositoryError::NotLoaded)
        }
    }
}

impl<'a> IntoIterator for &'a EntityRepository {
    type Item = &'a EntityType;
    type IntoIter = std::slice::Iter<'a, EntityType>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
