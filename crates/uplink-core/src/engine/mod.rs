//! Tag-dispatch decode engine.
//!
//! The engine is family-agnostic: a [`Grammar`] says how tags are laid out
//! and which short-read and unknown-tag policies apply, a
//! [`Registry`](crate::registry::Registry) says what each tag means.
//!
//! - `grammar`: tag layout and per-family policies
//! - `step`: one pure dispatch step over `(cursor, accumulator)`
//! - `driver`: the loop that runs steps to a terminal state
//! - `error`: terminal decode errors

pub mod driver;
pub mod error;
pub mod grammar;
pub mod step;

pub use driver::{run, run_from};
pub use error::DecodeError;
pub use grammar::{Grammar, InitialTag, ShortReadPolicy, TagLayout, UnknownTagPolicy};
pub use step::{Accumulator, Control, Step, dispatch, step};
