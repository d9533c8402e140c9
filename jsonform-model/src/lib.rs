//! Schema model for jsonform.
//!
//! Defines the declarative grammar that describes the shape of editable data:
//! - [`Schema`]: leaf type names, expanded `$type` records, objects and arrays
//! - [`Expanded`]: a `$type` record with an optional `$label` and `$computedProps`
//! - [`ArrayTag`]: opaque identity token selecting a custom whole-array editor
//!
//! Schemas are built with constructors in Rust or parsed from the JSON subset
//! of the grammar via [`Schema::from_json`]. They are read-only once built.

mod error;
mod parse;
mod schema;
mod tag;

pub use error::{Result, SchemaError};
pub use schema::{ComputedProps, Expanded, Schema, SchemaKind};
pub use tag::ArrayTag;
