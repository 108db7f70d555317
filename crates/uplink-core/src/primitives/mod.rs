//! Byte-level primitives shared by every device family.
//!
//! - `reader`: bounds-checked little-endian integer and float extraction
//! - `format`: string renderings (hex serial numbers, version strings)
//! - `error`: explicit, actionable read errors
//!
//! Readers never index past the slice they were given; a short slice is an
//! error, and the decode engine decides whether that error is fatal or
//! zero-filled for the active grammar.

pub mod error;
pub mod format;
pub mod reader;

pub use error::ReadError;
pub use format::{VersionFormat, format_version, hex_serial};
pub use reader::{PayloadReader, sign_extend};
