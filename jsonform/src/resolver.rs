//! Schema resolution.
//!
//! For one position in the schema, works out which editor owns it, which
//! value it shows, what it is called and which positions sit below it. Schema
//! and value key chains are threaded side by side: the schema chain carries
//! `$type` markers and item slots, the value chain only field names and
//! element indices.

use crate::label::{Inflector, decamelize_and_capitalize, item_label};
use crate::registry::{ARRAY_TYPE, Editor, EditorEntry, EditorRegistry, OBJECT_TYPE};
use crate::{FormError, Result};
use jsonform_model::{ArrayTag, Schema};
use jsonform_tree::access;
use jsonform_types::{
    ArrayFactory, KeyChain, Map, Seg, Value, extend_schema_path, extend_value_path, item_slot,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Editor type a node resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    /// `$object`
    Object,
    /// `$array`, plain or custom
    Array,
    /// A registered leaf type name.
    Leaf(String),
}

impl TypeName {
    pub fn as_str(&self) -> &str {
        match self {
            TypeName::Object => OBJECT_TYPE,
            TypeName::Array => ARRAY_TYPE,
            TypeName::Leaf(name) => name,
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything an editor needs to render one position of the form.
#[derive(Debug, Clone)]
pub struct ResolvedNode {
    /// Identity among siblings: the field name for object children,
    /// `"{index}/{len}"` for array items.
    pub key: String,
    pub schema_path: KeyChain,
    pub value_path: KeyChain,
    pub type_name: TypeName,
    /// Whether the schema node is a `$type` record.
    pub is_expanded: bool,
    /// Tag of a custom array type.
    pub custom_tag: Option<ArrayTag>,
    pub editor: Arc<dyn Editor>,
    /// The node's value after coercion to its declared kind.
    pub value: Value,
    pub label: String,
    /// Output of `$computedProps`, empty when the schema has none.
    pub computed_props: Map,
    pub children: Vec<ResolvedNode>,
}

impl ResolvedNode {
    pub fn is_custom_array(&self) -> bool {
        self.custom_tag.is_some()
    }

    /// Props handed to the editor: `label` and `value`, then computed props,
    /// which win on collision.
    pub fn props(&self) -> Map {
        let mut props = Map::new();
        props.insert("label".into(), Value::from(self.label.as_str()));
        props.insert("value".into(), self.value.clone());
        props.extend(
            self.computed_props
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        props
    }

    /// Direct child with the given identity key.
    pub fn child(&self, key: &str) -> Option<&ResolvedNode> {
        self.children.iter().find(|child| child.key == key)
    }

    /// This node or the descendant whose value key chain is `value_path`.
    pub fn find(&self, value_path: &[Seg]) -> Option<&ResolvedNode> {
        if self.value_path.segments() == value_path {
            return Some(self);
        }
        self.children
            .iter()
            .find(|child| value_path.starts_with(&child.value_path))
            .and_then(|child| child.find(value_path))
    }
}

/// One resolution pass over a schema and a value tree.
pub(crate) struct Resolver<'a> {
    pub schema: &'a Schema,
    pub root: &'a Value,
    pub registry: &'a EditorRegistry,
    pub create_array: &'a ArrayFactory,
    pub inflector: &'a dyn Inflector,
    pub rest: &'a [Value],
}

impl Resolver<'_> {
    /// Resolves the node at `schema_path` / `value_path` and, recursively,
    /// everything below it.
    pub fn resolve(
        &self,
        key: String,
        schema_path: KeyChain,
        value_path: KeyChain,
    ) -> Result<ResolvedNode> {
        trace!(schema = %schema_path, value = %value_path, "resolving");

        let Some(full_type) = self.schema.at(&schema_path) else {
            return Err(FormError::MissingType {
                path: schema_path,
                schema: self.schema.to_string(),
            });
        };

        let is_expanded = full_type.is_expanded();
        let type_name = match full_type.payload() {
            Schema::Object(_) => TypeName::Object,
            Schema::Array(_) | Schema::CustomArray(..) => TypeName::Array,
            Schema::Type(name) => TypeName::Leaf(name.clone()),
            Schema::Expanded(_) => {
                return Err(FormError::InvalidType {
                    path: schema_path,
                    kind: "$type record nested in $type".into(),
                });
            }
        };
        let custom_tag = full_type.tag().cloned();
        let entry = self.editor_for(&type_name, custom_tag.as_ref())?;

        let value = self.coerce(&type_name, entry, &value_path);
        let children = self.children(
            full_type,
            is_expanded,
            custom_tag.is_some(),
            &value,
            &schema_path,
            &value_path,
        )?;
        let label = self.label(full_type, &schema_path, &value_path);
        let computed_props = full_type
            .computed_props()
            .map(|compute| compute(self.root, self.rest))
            .unwrap_or_default();

        Ok(ResolvedNode {
            key,
            schema_path,
            value_path,
            type_name,
            is_expanded,
            custom_tag,
            editor: Arc::clone(&entry.editor),
            value,
            label,
            computed_props,
            children,
        })
    }

    fn editor_for(&self, type_name: &TypeName, tag: Option<&ArrayTag>) -> Result<&EditorEntry> {
        match tag {
            Some(tag) => self
                .registry
                .by_tag(tag)
                .ok_or_else(|| FormError::MissingCustomArrayEditor(tag.to_string())),
            None => self
                .registry
                .by_name(type_name.as_str())
                .ok_or_else(|| FormError::UnknownType(type_name.to_string())),
        }
    }

    /// The stored value if it has the declared kind, otherwise a fresh
    /// container or the editor's default.
    fn coerce(&self, type_name: &TypeName, entry: &EditorEntry, value_path: &KeyChain) -> Value {
        let found = access(self.root, value_path);
        match (type_name, found) {
            (TypeName::Object, Some(value @ Value::Object(_)))
            | (TypeName::Array, Some(value @ Value::Array(_)))
            | (TypeName::Leaf(_), Some(value)) => value.clone(),
            (TypeName::Object, other) => {
                log_coercion(value_path, "object", other);
                Value::empty_object()
            }
            (TypeName::Array, other) => {
                log_coercion(value_path, "array", other);
                Value::Array((self.create_array)())
            }
            (TypeName::Leaf(_), None) => entry.default_value.clone().unwrap_or_default(),
        }
    }

    fn children(
        &self,
        full_type: &Schema,
        is_expanded: bool,
        is_custom: bool,
        value: &Value,
        schema_path: &KeyChain,
        value_path: &KeyChain,
    ) -> Result<Vec<ResolvedNode>> {
        match full_type.payload() {
            Schema::Object(fields) => fields
                .keys()
                .map(|field| {
                    self.resolve(
                        field.clone(),
                        extend_schema_path(schema_path, Seg::key(field.as_str()), is_expanded),
                        extend_value_path(value_path, Seg::key(field.as_str())),
                    )
                })
                .collect(),
            Schema::Array(_) | Schema::CustomArray(..) => {
                let len = value.as_array().map_or(0, |items| items.len());
                let slot = Seg::index(item_slot(is_custom));
                (0..len)
                    .map(|index| {
                        self.resolve(
                            format!("{index}/{len}"),
                            extend_schema_path(schema_path, slot.clone(), is_expanded),
                            extend_value_path(value_path, Seg::index(index)),
                        )
                    })
                    .collect()
            }
            _ => Ok(Vec::new()),
        }
    }

    fn label(&self, full_type: &Schema, schema_path: &KeyChain, value_path: &KeyChain) -> String {
        if let Some(label) = self.item_label(schema_path, value_path) {
            return label;
        }
        if let Some(label) = full_type.label() {
            return label.to_owned();
        }
        schema_path
            .last()
            .map(|seg| decamelize_and_capitalize(&seg.to_string()))
            .unwrap_or_default()
    }

    /// `Option 1` style label for a node whose parent schema is an array.
    fn item_label(&self, schema_path: &KeyChain, value_path: &KeyChain) -> Option<String> {
        let parent = schema_path.parent()?;
        if !self.schema.at(&parent)?.is_array_like() {
            return None;
        }
        let index = value_path.last()?.numeric()?;
        let field = parent
            .iter()
            .rev()
            .find_map(|seg| match seg {
                Seg::Key(key) if !seg.is_type_marker() && seg.numeric().is_none() => {
                    Some(key.as_str())
                }
                _ => None,
            })
            .unwrap_or("item");
        Some(item_label(self.inflector, field, index))
    }
}

fn log_coercion(path: &KeyChain, expected: &str, found: Option<&Value>) {
    if let Some(found) = found {
        debug!(path = %path, expected, found = found.kind(), "coercing value to declared kind");
    }
}
