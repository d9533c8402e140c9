//! Reading schemas from JSON.
//!
//! JSON covers every form of the grammar except custom array types (their tag
//! is an identity token with no textual spelling) and `$computedProps`
//! callbacks. Schemas needing either are built in Rust.

use crate::{Expanded, Result, Schema, SchemaError};
use indexmap::IndexMap;
use jsonform_types::{KeyChain, Seg, TYPE_SEGMENT};
use serde_json::Value as Json;

const LABEL_KEY: &str = "$label";

impl Schema {
    /// Parses a schema from its JSON form.
    ///
    /// ```
    /// use jsonform_model::Schema;
    /// use jsonform_types::Seg;
    /// use serde_json::json;
    ///
    /// let schema = Schema::from_json(&json!({ "options": [{ "text": "input" }] })).unwrap();
    /// assert!(schema.at(&[Seg::key("options"), Seg::index(0)]).is_some());
    /// ```
    pub fn from_json(json: &Json) -> Result<Self> {
        parse_node(json, &KeyChain::root())
    }

    /// Parses a schema from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let json: Json = serde_json::from_str(text)?;
        Self::from_json(&json)
    }
}

impl TryFrom<&Json> for Schema {
    type Error = SchemaError;

    fn try_from(json: &Json) -> Result<Self> {
        Schema::from_json(json)
    }
}

fn parse_node(json: &Json, path: &KeyChain) -> Result<Schema> {
    match json {
        Json::String(name) => Ok(Schema::Type(name.clone())),
        Json::Array(items) => match items.as_slice() {
            [item] => Ok(Schema::array(parse_node(item, &path.with(Seg::index(0)))?)),
            _ => Err(SchemaError::InvalidArray {
                path: path.clone(),
                len: items.len(),
            }),
        },
        Json::Object(fields) => match fields.get(TYPE_SEGMENT) {
            Some(ty) => parse_expanded(ty, fields, path),
            None => fields
                .iter()
                .map(|(key, child)| -> Result<(String, Schema)> {
                    Ok((key.clone(), parse_node(child, &path.with(Seg::key(key)))?))
                })
                .collect::<Result<IndexMap<_, _>>>()
                .map(Schema::Object),
        },
        Json::Null => Err(invalid_type(path, "null")),
        Json::Bool(_) => Err(invalid_type(path, "boolean")),
        Json::Number(_) => Err(invalid_type(path, "number")),
    }
}

fn parse_expanded(
    ty: &Json,
    fields: &serde_json::Map<String, Json>,
    path: &KeyChain,
) -> Result<Schema> {
    let mut expanded = Expanded::new(parse_node(ty, &path.with(Seg::type_marker()))?);

    for (key, value) in fields {
        match key.as_str() {
            TYPE_SEGMENT => {}
            LABEL_KEY => match value {
                Json::String(label) => expanded = expanded.label(label.clone()),
                _ => return Err(SchemaError::InvalidLabel { path: path.clone() }),
            },
            other => {
                return Err(SchemaError::UnknownDirective {
                    path: path.clone(),
                    key: other.to_owned(),
                });
            }
        }
    }

    Ok(expanded.into())
}

fn invalid_type(path: &KeyChain, kind: &'static str) -> SchemaError {
    SchemaError::InvalidType {
        path: path.clone(),
        kind,
    }
}
