//! Per-family field tables.
//!
//! A registry maps a tag to a static [`FieldDef`]: payload width, the values
//! extracted from it, optional fixed-point transforms, and an optional
//! "unavailable" sentinel. Tables are validated once when a family's registry
//! is first built; decoding only ever performs lookups.

pub mod error;
pub mod field;
pub mod table;

pub use error::RegistryError;
pub use field::{Extract, FieldDef, MAX_FIELD_WIDTH, Scale, Sentinel, Tag, Transform, ValueKind};
pub use table::Registry;
