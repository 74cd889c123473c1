//! Object type definitions

use serde::{Deserialize, Serialize};

/// Property name holding the default drawing bounds
pub const DRAWBOX: &str = "drawbox";
/// Property name holding the default collision bounds
pub const HITBOX: &str = "hitbox";
/// Property name holding the class tag
pub const CLASS: &str = "class";

/// Color written for object types created in this editor (read by Tiled)
pub const DEFAULT_COLOR: &str = "000000";

/// Property type written for the known properties
pub const STRING_TYPE: &str = "string";

/// A `property` element of an object type that is not one of the known ones.
///
/// Kept so that properties written by other tools survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    /// Value of the `type` attribute (e.g. "string", "int", "bool")
    #[serde(rename = "type")]
    pub prop_type: String,
    pub default: String,
}

impl Property {
    pub fn new(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prop_type: STRING_TYPE.to_string(),
            default: default.into(),
        }
    }
}

/// A named template for a placeable object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityType {
    /// Unique name, used as the lookup key
    pub name: String,
    /// Default drawing bounds (e.g. "0,0,32,32")
    #[serde(default)]
    pub drawbox: String,
    /// Default collision bounds
    #[serde(default)]
    pub hitbox: String,
    /// Category tag
    #[serde(default)]
    pub class: String,
    /// Hex color shown by Tiled
    #[serde(default = "default_color")]
    pub color: String,
    /// Unknown properties in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_properties: Vec<Property>,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl EntityType {
    /// Create an object type with empty bounds and class
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            drawbox: String::new(),
            hitbox: String::new(),
            class: String::new(),
            color: default_color(),
            extra_properties: Vec::new(),
        }
    }

    pub fn with_drawbox(mut self, drawbox: impl Into<String>) -> Self {
        self.drawbox = drawbox.into();
        self
    }

    pub fn with_hitbox(mut self, hitbox: impl Into<String>) -> Self {
        self.hitbox = hitbox.into();
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Get a property value by name, known or extra
    pub fn property(&self, key: &str) -> Option<&str> {
        match key {
            DRAWBOX => Some(&self.drawbox),
            HITBOX => Some(&self.hitbox),
            CLASS => Some(&self.class),
            _ => self
                .extra_properties
                .iter()
                .find(|p| p.name == key)
                .map(|p| p.default.as_str()),
        }
    }

    /// Set a property value by name.
    ///
    /// Known names write the matching field, anything else updates or appends
    /// an extra string property. An empty key is ignored, the document format
    /// has no way to keep a nameless property.
    pub fn set_property(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match key {
            DRAWBOX => self.drawbox = value,
            HITBOX => self.hitbox = value,
            CLASS => self.class = value,
            "" => {}
            _ => match self.extra_properties.iter_mut().find(|p| p.name == key) {
                Some(prop) => prop.default = value,
                None => self.extra_properties.push(Property::new(key, value)),
            },
        }
    }

    /// Remove an extra property, returning it if present
    pub fn remove_property(&mut self, key: &str) -> Option<Property> {
        let pos = self.extra_properties.iter().position(|p| p.name == key)?;
        Some(self.extra_properties.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let wall = EntityType::new("Wall")
            .with_drawbox("0,0,32,32")
            .with_hitbox("0,0,32,16")
            .with_class("StaticWall");

        assert_eq!(wall.name, "Wall");
        assert_eq!(wall.property(DRAWBOX), Some("0,0,32,32"));
        assert_eq!(wall.property(HITBOX), Some("0,0,32,16"));
        assert_eq!(wall.property(CLASS), Some("StaticWall"));
        assert_eq!(wall.color, DEFAULT_COLOR);
        assert_eq!(wall.property("layer"), None);
    }

    #[test]
    fn test_set_property() {
        let mut door = EntityType::new("Door");
        door.set_property(CLASS, "Door");
        door.set_property("locked", "true");
        door.set_property("locked", "false");

        assert_eq!(door.class, "Door");
        assert_eq!(door.extra_properties.len(), 1);
        assert_eq!(door.property("locked"), Some("false"));

        door.set_property("", "lost");
        assert_eq!(door.extra_properties.len(), 1);

        let removed = door.remove_property("locked").unwrap();
        assert_eq!(removed.default, "false");
        assert!(door.remove_property("locked").is_none());
    }

    #[test]
    fn test_json_defaults() {
        let entity: EntityType = serde_json::from_str(r#"{ "name": "Crate" }"#).unwrap();
        assert_eq!(entity, EntityType::new("Crate"));
    }
}
