use std::collections::HashMap;

use super::error::RegistryError;
use super::field::{FieldDef, MAX_FIELD_WIDTH, Tag};

/// Validated, read-only tag table for one device family.
///
/// # Examples
/// ```
/// use uplink_core::registry::{Extract, FieldDef, Registry, Tag, ValueKind};
///
/// static FIELDS: &[FieldDef] = &[FieldDef {
///     tag: Tag::Field(20),
///     name: "Battery Voltage",
///     width: 2,
///     values: &[Extract::new("battery_voltage", 0, ValueKind::U16Le)],
///     sentinel: None,
/// }];
///
/// let registry = Registry::new("demo", FIELDS).unwrap();
/// assert_eq!(registry.lookup(Tag::Field(20)).unwrap().width, 2);
/// assert!(registry.lookup(Tag::Field(21)).is_none());
/// ```
#[derive(Debug)]
pub struct Registry {
    family: &'static str,
    fields: &'static [FieldDef],
    index: HashMap<Tag, usize>,
}

impl Registry {
    /// Build a registry, rejecting duplicate tags and definitions whose
    /// extractions do not fit inside the declared width.
    pub fn new(family: &'static str, fields: &'static [FieldDef]) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(fields.len());
        let layout = fields.first().map(|field| field.tag.width());

        for (position, field) in fields.iter().enumerate() {
            validate_field(field)?;
            if layout != Some(field.tag.width()) {
                return Err(RegistryError::MixedTagLayout {
                    field: field.name,
                    tag: field.tag,
                });
            }
            if let Some(existing) = index.insert(field.tag, position) {
                return Err(RegistryError::DuplicateTag {
                    tag: field.tag,
                    first: fields[existing].name,
                    second: field.name,
                });
            }
        }

        Ok(Self {
            family,
            fields,
            index,
        })
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn lookup(&self, tag: Tag) -> Option<&FieldDef> {
        self.index.get(&tag).map(|&position| &self.fields[position])
    }

    /// Definitions in table order.
    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn validate_field(field: &FieldDef) -> Result<(), RegistryError> {
    if field.width == 0 || field.width > MAX_FIELD_WIDTH {
        return Err(RegistryError::InvalidWidth {
            field: field.name,
            width: field.width,
            max: MAX_FIELD_WIDTH,
        });
    }

    for value in field.values {
        let end = value.offset + value.kind.width();
        if end > field.width {
            return Err(RegistryError::ExtractOutOfBounds {
                field: field.name,
                key: value.key,
                start: value.offset,
                end,
                width: field.width,
            });
        }
        if value.transform.is_some() && !value.kind.is_numeric() {
            return Err(RegistryError::TransformOnText {
                field: field.name,
                key: value.key,
            });
        }
    }

    if let Some(sentinel) = field.sentinel {
        if sentinel.pattern.is_empty() || sentinel.offset + sentinel.pattern.len() > field.width {
            return Err(RegistryError::SentinelOutOfBounds {
                field: field.name,
                width: field.width,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Registry;
    use crate::registry::error::RegistryError;
    use crate::registry::field::{Extract, FieldDef, Sentinel, Tag, Transform, ValueKind};

    const BATTERY: FieldDef = FieldDef {
        tag: Tag::Channel { id: 0x01, kind: 0x75 },
        name: "Battery",
        width: 1,
        values: &[Extract::new("battery", 0, ValueKind::U8)],
        sentinel: None,
    };

    const TEMPERATURE: FieldDef = FieldDef {
        tag: Tag::Channel { id: 0x03, kind: 0x67 },
        name: "Temperature",
        width: 2,
        values: &[Extract::new("temperature", 0, ValueKind::I16Le).scaled(Transform::divide(10.0))],
        sentinel: None,
    };

    #[test]
    fn lookup_by_tag() {
        static FIELDS: &[FieldDef] = &[BATTERY, TEMPERATURE];
        let registry = Registry::new("test", FIELDS).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.family(), "test");
        assert_eq!(
            registry.lookup(Tag::Channel { id: 0x03, kind: 0x67 }).unwrap().name,
            "Temperature"
        );
        assert!(registry.lookup(Tag::Channel { id: 0x99, kind: 0x99 }).is_none());
    }

    #[test]
    fn fields_keep_table_order() {
        static FIELDS: &[FieldDef] = &[TEMPERATURE, BATTERY];
        let registry = Registry::new("test", FIELDS).unwrap();
        let names: Vec<_> = registry.fields().iter().map(|field| field.name).collect();
        assert_eq!(names, vec!["Temperature", "Battery"]);
    }

    #[test]
    fn rejects_duplicate_tags() {
        static FIELDS: &[FieldDef] = &[
            BATTERY,
            FieldDef {
                name: "Battery again",
                ..BATTERY
            },
        ];
        let err = Registry::new("test", FIELDS).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateTag {
                first: "Battery",
                second: "Battery again",
                ..
            }
        ));
    }

    #[test]
    fn rejects_extract_outside_width() {
        static FIELDS: &[FieldDef] = &[FieldDef {
            width: 1,
            ..TEMPERATURE
        }];
        let err = Registry::new("test", FIELDS).unwrap_err();
        assert!(matches!(err, RegistryError::ExtractOutOfBounds { end: 2, .. }));
    }

    #[test]
    fn rejects_invalid_width() {
        static FIELDS: &[FieldDef] = &[FieldDef {
            width: 9,
            values: &[],
            ..BATTERY
        }];
        let err = Registry::new("test", FIELDS).unwrap_err();
        assert!(err.to_string().contains("width 9"));
    }

    #[test]
    fn rejects_transform_on_text() {
        static FIELDS: &[FieldDef] = &[FieldDef {
            tag: Tag::Field(1),
            name: "Serial",
            width: 2,
            values: &[Extract::new("sn", 0, ValueKind::Hex(2)).scaled(Transform::divide(2.0))],
            sentinel: None,
        }];
        let err = Registry::new("test", FIELDS).unwrap_err();
        assert!(matches!(err, RegistryError::TransformOnText { key: "sn", .. }));
    }

    #[test]
    fn rejects_sentinel_outside_width() {
        static FIELDS: &[FieldDef] = &[FieldDef {
            sentinel: Some(Sentinel {
                offset: 1,
                pattern: &[0xFF],
                warning: "unavailable",
            }),
            ..BATTERY
        }];
        let err = Registry::new("test", FIELDS).unwrap_err();
        assert!(matches!(err, RegistryError::SentinelOutOfBounds { .. }));
    }

    #[test]
    fn rejects_mixed_tag_layouts() {
        static FIELDS: &[FieldDef] = &[
            BATTERY,
            FieldDef {
                tag: Tag::Field(20),
                ..BATTERY
            },
        ];
        let err = Registry::new("test", FIELDS).unwrap_err();
        assert!(matches!(err, RegistryError::MixedTagLayout { .. }));
    }

    #[test]
    fn empty_table_is_valid() {
        let registry = Registry::new("empty", &[]).unwrap();
        assert!(registry.is_empty());
    }
}
