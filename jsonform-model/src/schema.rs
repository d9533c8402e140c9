//! The schema tree and navigation along schema key chains.

use crate::ArrayTag;
use indexmap::IndexMap;
use jsonform_types::{ITEM_SLOT, ITEM_SLOT_CUSTOM, Map, Seg, Value};
use std::fmt;
use std::sync::Arc;

/// `$computedProps` callback: receives the whole current value tree and the
/// caller-supplied rest arguments, returns props merged into the editor's.
pub type ComputedProps = Arc<dyn Fn(&Value, &[Value]) -> Map + Send + Sync>;

/// A position in the schema tree.
#[derive(Clone)]
pub enum Schema {
    /// Name of a registered leaf editor, e.g. `"string"`.
    Type(String),
    /// `{ $type, $label?, $computedProps? }` record.
    Expanded(Expanded),
    /// Field name to schema; field order is child order.
    Object(IndexMap<String, Schema>),
    /// Sequence of items sharing one schema.
    Array(Box<Schema>),
    /// Sequence edited by the editor registered under the tag.
    CustomArray(ArrayTag, Box<Schema>),
}

/// Structural classification of a schema payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Leaf,
    Object,
    Array,
}

impl Schema {
    /// Leaf type reference.
    pub fn ty(name: impl Into<String>) -> Self {
        Schema::Type(name.into())
    }

    /// Object schema from `(field, schema)` pairs, in order.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Schema)>) -> Self {
        Schema::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Array schema with one item schema.
    pub fn array(item: Schema) -> Self {
        Schema::Array(Box::new(item))
    }

    /// Custom array type edited by the editor registered under `tag`.
    pub fn custom_array(tag: ArrayTag, item: Schema) -> Self {
        Schema::CustomArray(tag, Box::new(item))
    }

    /// Wraps this schema in a `$type` record carrying `label`.
    #[must_use]
    pub fn with_label(self, label: impl Into<String>) -> Self {
        Expanded::new(self).label(label).into()
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, Schema::Expanded(_))
    }

    /// The `$type` payload of an expanded node, or the node itself.
    pub fn payload(&self) -> &Schema {
        match self {
            Schema::Expanded(expanded) => &expanded.ty,
            other => other,
        }
    }

    /// Structural kind of this node as written, without unwrapping `$type`.
    pub fn kind(&self) -> SchemaKind {
        match self {
            Schema::Object(_) => SchemaKind::Object,
            Schema::Array(_) | Schema::CustomArray(..) => SchemaKind::Array,
            Schema::Type(_) | Schema::Expanded(_) => SchemaKind::Leaf,
        }
    }

    /// Returns true for plain and custom array schemas.
    pub fn is_array_like(&self) -> bool {
        self.kind() == SchemaKind::Array
    }

    /// Explicit `$label`, if this is an expanded node carrying one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Schema::Expanded(expanded) => expanded.label.as_deref(),
            _ => None,
        }
    }

    /// `$computedProps` callback, if this is an expanded node carrying one.
    pub fn computed_props(&self) -> Option<&ComputedProps> {
        match self {
            Schema::Expanded(expanded) => expanded.computed_props.as_ref(),
            _ => None,
        }
    }

    /// Item schema of an array node, looking through `$type`.
    pub fn item(&self) -> Option<&Schema> {
        match self.payload() {
            Schema::Array(item) | Schema::CustomArray(_, item) => Some(item),
            _ => None,
        }
    }

    /// Tag of a custom array node, looking through `$type`.
    pub fn tag(&self) -> Option<&ArrayTag> {
        match self.payload() {
            Schema::CustomArray(tag, _) => Some(tag),
            _ => None,
        }
    }

    /// Child reached by one schema key chain segment.
    ///
    /// The tag slot of a custom array holds a token, not a schema, so it
    /// yields `None`.
    pub fn child(&self, seg: &Seg) -> Option<&Schema> {
        match self {
            Schema::Type(_) => None,
            Schema::Expanded(expanded) => seg.is_type_marker().then_some(&*expanded.ty),
            Schema::Object(fields) => fields.get(seg.field_name().as_str()),
            Schema::Array(item) => (seg.numeric() == Some(ITEM_SLOT)).then_some(&**item),
            Schema::CustomArray(_, item) => {
                (seg.numeric() == Some(ITEM_SLOT_CUSTOM)).then_some(&**item)
            }
        }
    }

    /// Node at the end of a schema key chain, or `None` if the chain leaves
    /// the schema.
    pub fn at(&self, path: &[Seg]) -> Option<&Schema> {
        path.iter().try_fold(self, |node, seg| node.child(seg))
    }

    /// Plain JSON rendering for diagnostics. Callbacks and tags are shown by
    /// description.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Schema::Type(name) => serde_json::Value::String(name.clone()),
            Schema::Expanded(expanded) => {
                let mut out = serde_json::Map::new();
                out.insert("$type".into(), expanded.ty.to_json());
                if let Some(label) = &expanded.label {
                    out.insert("$label".into(), serde_json::Value::String(label.clone()));
                }
                if expanded.computed_props.is_some() {
                    out.insert("$computedProps".into(), "[function]".into());
                }
                serde_json::Value::Object(out)
            }
            Schema::Object(fields) => serde_json::Value::Object(
                fields.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Schema::Array(item) => serde_json::Value::Array(vec![item.to_json()]),
            Schema::CustomArray(tag, item) => {
                serde_json::Value::Array(vec![tag.to_string().into(), item.to_json()])
            }
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Type(name) => f.debug_tuple("Type").field(name).finish(),
            Schema::Expanded(expanded) => f.debug_tuple("Expanded").field(expanded).finish(),
            Schema::Object(fields) => f.debug_tuple("Object").field(fields).finish(),
            Schema::Array(item) => f.debug_tuple("Array").field(item).finish(),
            Schema::CustomArray(tag, item) => {
                f.debug_tuple("CustomArray").field(tag).field(item).finish()
            }
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<&str> for Schema {
    fn from(name: &str) -> Self {
        Schema::Type(name.to_owned())
    }
}

/// A `$type` record.
#[derive(Clone)]
pub struct Expanded {
    pub ty: Box<Schema>,
    pub label: Option<String>,
    pub computed_props: Option<ComputedProps>,
}

impl Expanded {
    pub fn new(ty: impl Into<Schema>) -> Self {
        Self {
            ty: Box::new(ty.into()),
            label: None,
            computed_props: None,
        }
    }

    /// Sets `$label`.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets `$computedProps`.
    #[must_use]
    pub fn computed_props<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Map + Send + Sync + 'static,
    {
        self.computed_props = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for Expanded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expanded")
            .field("ty", &self.ty)
            .field("label", &self.label)
            .field("computed_props", &self.computed_props.is_some())
            .finish()
    }
}

impl From<Expanded> for Schema {
    fn from(expanded: Expanded) -> Self {
        Schema::Expanded(expanded)
    }
}
