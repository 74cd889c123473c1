//! Reading and writing `objecttypes.xml` documents
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <objecttypes>
//!   <objecttype name="Wall" color="000000">
//!     <property name="drawbox" type="string" default="0,0,32,32"/>
//!     <property name="hitbox" type="string" default="0,0,32,32"/>
//!     <property name="class" type="string" default="StaticWall"/>
//!   </objecttype>
//! </objecttypes>
//! ```

use crate::entity::{CLASS, DEFAULT_COLOR, DRAWBOX, HITBOX, STRING_TYPE};
use crate::{DocumentError, EntityType, Property};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

pub const ROOT_TAG: &str = "objecttypes";
pub const OBJECT_TYPE_TAG: &str = "objecttype";
pub const PROPERTY_TAG: &str = "property";

/// An `objecttype` element that has been opened but not closed yet
struct PendingType {
    slot: usize,
    name: String,
    color: Option<String>,
    drawbox: String,
    hitbox: String,
    class: String,
    extra_properties: Vec<Property>,
    property_count: usize,
}

impl PendingType {
    fn open(slot: usize, element: &BytesStart) -> Result<Self, DocumentError> {
        let name = attribute(element, "name")?.ok_or(DocumentError::MissingAttribute {
            element: OBJECT_TYPE_TAG,
            attribute: "name",
        })?;

        Ok(Self {
            slot,
            name,
            color: attribute(element, "color")?,
            drawbox: String::new(),
            hitbox: String::new(),
            class: String::new(),
            extra_properties: Vec::new(),
            property_count: 0,
        })
    }

    fn add_property(&mut self, element: &BytesStart) -> Result<(), DocumentError> {
        self.property_count += 1;

        let name = attribute(element, "name")?.unwrap_or_default();
        let default = attribute(element, "default")?.unwrap_or_default();

        // Later properties overwrite earlier ones with the same name
        match name.as_str() {
            DRAWBOX => self.drawbox = default,
            HITBOX => self.hitbox = default,
            CLASS => self.class = default,
            "" => {}
            _ => {
                let prop_type =
                    attribute(element, "type")?.unwrap_or_else(|| STRING_TYPE.to_string());
                self.extra_properties.push(Property {
                    name,
                    prop_type,
                    default,
                });
            }
        }

        Ok(())
    }

    /// Object types without any `property` element produce no record
    fn finish(self) -> Option<EntityType> {
        if self.property_count == 0 {
            return None;
        }

        Some(EntityType {
            name: self.name,
            drawbox: self.drawbox,
            hitbox: self.hitbox,
            class: self.class,
            color: self.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            extra_properties: self.extra_properties,
        })
    }
}

fn attribute(element: &BytesStart, key: &str) -> Result<Option<String>, DocumentError> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Parse an `objecttypes` document into object types, in document order.
///
/// Every `objecttype` below the root is decoded, and every `property` below an
/// `objecttype` counts towards it.
pub fn parse_document(xml: &str) -> Result<Vec<EntityType>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut slots: Vec<Option<EntityType>> = Vec::new();
    let mut open: Vec<(usize, PendingType)> = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let (element, is_empty) = match reader.read_event()? {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if e.name().as_ref() == OBJECT_TYPE_TAG.as_bytes()
                    && open.last().is_some_and(|(d, _)| *d == depth)
                {
                    if let Some((_, pending)) = open.pop() {
                        let slot = pending.slot;
                        slots[slot] = pending.finish();
                    }
                }
                continue;
            }
            Event::Eof if depth > 0 => return Err(DocumentError::UnexpectedEof),
            Event::Eof => break,
            _ => continue,
        };

        if depth == 0 {
            let name = element.name();
            if seen_root {
                return Err(DocumentError::MultipleRoots(
                    String::from_utf8_lossy(name.as_ref()).into_owned(),
                ));
            }
            if name.as_ref() != ROOT_TAG.as_bytes() {
                return Err(DocumentError::UnexpectedRoot(
                    String::from_utf8_lossy(name.as_ref()).into_owned(),
                ));
            }
            seen_root = true;
            if !is_empty {
                depth += 1;
            }
            continue;
        }

        match element.name().as_ref() {
            tag if tag == OBJECT_TYPE_TAG.as_bytes() => {
                let slot = slots.len();
                slots.push(None);
                let pending = PendingType::open(slot, &element)?;
                if is_empty {
                    slots[slot] = pending.finish();
                } else {
                    open.push((depth, pending));
                }
            }
            tag if tag == PROPERTY_TAG.as_bytes() => {
                for (_, pending) in open.iter_mut() {
                    pending.add_property(&element)?;
                }
            }
            _ => {}
        }

        if !is_empty {
            depth += 1;
        }
    }

    if !seen_root {
        return Err(DocumentError::MissingRoot);
    }

    Ok(slots.into_iter().flatten().collect())
}

/// Serialize object types into an `objecttypes` document.
///
/// The three known properties are always written so that every object type
/// is read back on the next load.
pub fn write_document(entities: &[EntityType]) -> Result<String, DocumentError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;

    for entity in entities {
        let mut object_type = BytesStart::new(OBJECT_TYPE_TAG);
        object_type.push_attribute(("name", entity.name.as_str()));
        object_type.push_attribute(("color", entity.color.as_str()));
        writer.write_event(Event::Start(object_type))?;

        let known = [
            (DRAWBOX, entity.drawbox.as_str()),
            (HITBOX, entity.hitbox.as_str()),
            (CLASS, entity.class.as_str()),
        ];
        for (name, default) in known {
            writer.write_event(Event::Empty(property_element(name, STRING_TYPE, default)))?;
        }
        for prop in entity.extra_properties.iter().filter(|p| !p.name.is_empty()) {
            writer.write_event(Event::Empty(property_element(
                &prop.name,
                &prop.prop_type,
                &prop.default,
            )))?;
        }

        writer.write_event(Event::End(BytesEnd::new(OBJECT_TYPE_TAG)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;

    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

fn property_element<'a>(name: &'a str, prop_type: &'a str, default: &'a str) -> BytesStart<'a> {
    let mut property = BytesStart::new(PROPERTY_TAG);
    property.push_attribute(("name", name));
    property.push_attribute(("type", prop_type));
    property.push_attribute(("default", default));
    property
}
