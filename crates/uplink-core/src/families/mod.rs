//! Built-in device families.
//!
//! Each family pairs a [`Grammar`] with a static field table. Tables are
//! validated into a [`Registry`] the first time a family is used and shared
//! process-wide afterwards.

pub mod milesight;
pub mod sensor_node;

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::Grammar;
use crate::registry::{FieldDef, Registry, RegistryError};

/// Device family selector.
///
/// # Examples
/// ```
/// use uplink_core::families::Family;
///
/// let family: Family = "sensor-node".parse().unwrap();
/// assert_eq!(family, Family::SensorNode);
/// assert_eq!(Family::Ws301.to_string(), "ws301");
/// assert!("em310".parse::<Family>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// Digital Matter sensor node (field-stream grammar).
    SensorNode,
    /// Milesight universal decoder (EM500, EM300, AM10x).
    Milesight,
    Ws202,
    Ws301,
}

/// Family name that matches no built-in family.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown device family `{name}` (expected one of: {expected})")]
pub struct UnknownFamily {
    pub name: String,
    pub expected: String,
}

impl Family {
    pub const ALL: [Family; 4] = [
        Family::SensorNode,
        Family::Milesight,
        Family::Ws202,
        Family::Ws301,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Family::SensorNode => "sensor-node",
            Family::Milesight => "milesight",
            Family::Ws202 => "ws202",
            Family::Ws301 => "ws301",
        }
    }

    pub const fn grammar(self) -> Grammar {
        match self {
            Family::SensorNode => sensor_node::GRAMMAR,
            Family::Milesight => milesight::GRAMMAR,
            Family::Ws202 => milesight::ws202::GRAMMAR,
            Family::Ws301 => milesight::ws301::GRAMMAR,
        }
    }

    /// Static field table backing this family's registry.
    pub fn fields(self) -> &'static [FieldDef] {
        match self {
            Family::SensorNode => sensor_node::FIELDS,
            Family::Milesight => milesight::FIELDS,
            Family::Ws202 => milesight::ws202::FIELDS,
            Family::Ws301 => milesight::ws301::FIELDS,
        }
    }

    /// Validated registry, built on first use.
    pub fn registry(self) -> Result<&'static Registry, RegistryError> {
        static SENSOR_NODE: OnceLock<Result<Registry, RegistryError>> = OnceLock::new();
        static MILESIGHT: OnceLock<Result<Registry, RegistryError>> = OnceLock::new();
        static WS202: OnceLock<Result<Registry, RegistryError>> = OnceLock::new();
        static WS301: OnceLock<Result<Registry, RegistryError>> = OnceLock::new();

        let cell = match self {
            Family::SensorNode => &SENSOR_NODE,
            Family::Milesight => &MILESIGHT,
            Family::Ws202 => &WS202,
            Family::Ws301 => &WS301,
        };
        cell.get_or_init(|| build_registry(self.name(), &self.grammar(), self.fields()))
            .as_ref()
            .map_err(Clone::clone)
    }
}

/// Validate `fields` and check every tag has the width `grammar` reads.
fn build_registry(
    name: &'static str,
    grammar: &Grammar,
    fields: &'static [FieldDef],
) -> Result<Registry, RegistryError> {
    let registry = Registry::new(name, fields)?;
    let expected = grammar.tag_layout.width();
    if let Some(field) = registry.fields().iter().find(|field| field.tag.width() != expected) {
        return Err(RegistryError::GrammarMismatch {
            field: field.name,
            tag: field.tag,
            grammar: grammar.name,
        });
    }
    Ok(registry)
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Family::ALL
            .into_iter()
            .find(|family| family.name() == wanted)
            .ok_or_else(|| UnknownFamily {
                name: s.to_string(),
                expected: Family::ALL.map(Family::name).join(", "),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{Family, build_registry};
    use crate::engine::{Grammar, ShortReadPolicy, UnknownTagPolicy};
    use crate::registry::{Extract, FieldDef, RegistryError, Tag, ValueKind};

    static CHANNEL_BATTERY: &[FieldDef] = &[FieldDef {
        tag: Tag::Channel { id: 0x01, kind: 0x75 },
        name: "Battery",
        width: 1,
        values: &[Extract::new("battery", 0, ValueKind::U8)],
        sentinel: None,
    }];

    #[test]
    fn every_registry_builds() {
        for family in Family::ALL {
            let registry = family.registry().unwrap_or_else(|err| panic!("{family}: {err}"));
            assert_eq!(registry.family(), family.name());
            assert_eq!(registry.len(), family.fields().len());
        }
    }

    #[test]
    fn table_must_match_grammar_tag_layout() {
        let err = build_registry("mismatch", &Grammar::FIELD_STREAM, CHANNEL_BATTERY).unwrap_err();
        assert_eq!(
            err,
            RegistryError::GrammarMismatch {
                field: "Battery",
                tag: Tag::Channel { id: 0x01, kind: 0x75 },
                grammar: Grammar::FIELD_STREAM.name,
            }
        );
        assert!(build_registry("channel", &Grammar::CHANNEL_TYPE, CHANNEL_BATTERY).is_ok());
    }

    #[test]
    fn every_table_matches_its_grammar() {
        for family in Family::ALL {
            let width = family.grammar().tag_layout.width();
            assert!(family.fields().iter().all(|field| field.tag.width() == width), "{family}");
        }
    }

    #[test]
    fn registry_is_shared() {
        let first = Family::Ws301.registry().unwrap();
        let second = Family::Ws301.registry().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn grammar_policies() {
        assert_eq!(Family::SensorNode.grammar().short_read, ShortReadPolicy::Strict);
        assert_eq!(Family::SensorNode.grammar().unknown_tag, UnknownTagPolicy::Skip);
        for family in [Family::Milesight, Family::Ws202, Family::Ws301] {
            assert_eq!(family.grammar().short_read, ShortReadPolicy::ZeroFill);
            assert_eq!(family.grammar().unknown_tag, UnknownTagPolicy::Stop);
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for family in Family::ALL {
            assert_eq!(family.name().parse::<Family>().unwrap(), family);
        }
        assert_eq!(" WS202 ".parse::<Family>().unwrap(), Family::Ws202);
    }

    #[test]
    fn unknown_family_lists_choices() {
        let err = "em310".parse::<Family>().unwrap_err();
        assert!(err.to_string().contains("sensor-node, milesight, ws202, ws301"));
    }

    #[test]
    fn serde_uses_kebab_names() {
        let json = serde_json::to_string(&Family::SensorNode).unwrap();
        assert_eq!(json, "\"sensor-node\"");
        let family: Family = serde_json::from_str("\"ws301\"").unwrap();
        assert_eq!(family, Family::Ws301);
    }
}
