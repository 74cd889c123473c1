//! Core data structures for the object type editor
//!
//! This crate provides:
//! - `EntityType` - A named object template (drawbox, hitbox, class)
//! - `Property` - A property element that is carried through untouched
//! - `parse_document` / `write_document` - The `objecttypes.xml` format used by Tiled
//!
//! # Example
//!
//! ```rust
//! use objecttypes_core::{parse_document, write_document, EntityType};
//!
//! let types = vec![EntityType::new("Wall").with_class("StaticWall")];
//! let xml = write_document(&types).unwrap();
//! assert_eq!(parse_document(&xml).unwrap(), types);
//! ```

pub mod document;
mod entity;

pub use document::{parse_document, write_document};
pub use entity::{EntityType, Property, CLASS, DEFAULT_COLOR, DRAWBOX, HITBOX, STRING_TYPE};

use thiserror::Error;

/// Errors that can occur when reading or writing an objecttypes document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("Document has no root element")]
    MissingRoot,
    #[error("Document ended before all elements were closed")]
    UnexpectedEof,
    #[error("Second top-level element <{0}> after the root")]
    MultipleRoots(String),
    #[error("Expected root element <objecttypes>, found <{0}>")]
    UnexpectedRoot(String),
    #[error("<{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("Failed to write XML: {0}")]
    Io(#[from] std::io::Error),
    #[error("Document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
