//! Immutable deep update.
//!
//! One key is consumed per level. At each level the container kind comes
//! from the schema at the matching depth of the schema key chain; the value
//! found in the tree only decides whether it can be shallow-cloned or has to
//! be thrown away and rebuilt.

use crate::{Result, TreeError};
use jsonform_model::{Schema, SchemaKind};
use jsonform_types::{
    ArrayFactory, ArrayLike, KeyChain, Map, Seg, Value, default_array_factory,
};
use std::sync::Arc;
use tracing::{debug, trace};

/// Schema information used to pick container kinds during a write.
#[derive(Debug, Clone, Copy)]
pub struct SchemaContext<'a> {
    /// The form's root schema.
    pub schema: &'a Schema,
    /// Schema key chain of the node being written.
    pub path: &'a [Seg],
}

impl<'a> SchemaContext<'a> {
    pub fn new(schema: &'a Schema, path: &'a [Seg]) -> Self {
        Self { schema, path }
    }
}

/// Returns a copy of `root` with `leaf` stored at `value_path`.
///
/// Every container strictly on `value_path` is rebuilt; everything else is
/// shared with `root`. With a [`SchemaContext`], each container is coerced to
/// the kind the schema declares at that depth. Without one, or where the
/// schema chain runs out, numeric segments (indices or all-digit keys) imply
/// arrays and named segments imply objects.
///
/// Arrays grow by at most one element per write: the index may address an
/// existing element or the slot right after the last one.
///
/// # Errors
///
/// Returns [`TreeError::InvalidSegment`] when the schema declares an array
/// but the value key chain holds a non-numeric key at that depth, and
/// [`TreeError::IndexOutOfRange`] when the index lies past the end of the
/// array.
pub fn deep_set(
    root: &Value,
    value_path: &[Seg],
    leaf: Value,
    schema: Option<SchemaContext<'_>>,
    create_array: &ArrayFactory,
) -> Result<Value> {
    trace!(path = %KeyChain::from(value_path.to_vec()), "deep_set");

    let updater = Updater {
        full_path: value_path,
        create_array,
    };
    updater.set_in(0, Some(root), leaf, Cursor::start(schema))
}

/// [`deep_set`] without schema information, using [`VecArray`] for new
/// arrays.
///
/// [`VecArray`]: jsonform_types::VecArray
pub fn deep_set_untyped(root: &Value, value_path: &[Seg], leaf: Value) -> Result<Value> {
    deep_set(root, value_path, leaf, None, &default_array_factory())
}

struct Updater<'a> {
    full_path: &'a [Seg],
    create_array: &'a ArrayFactory,
}

impl Updater<'_> {
    fn set_in(
        &self,
        depth: usize,
        current: Option<&Value>,
        leaf: Value,
        cursor: Cursor<'_>,
    ) -> Result<Value> {
        let Some(seg) = self.full_path.get(depth) else {
            return Ok(leaf);
        };

        let (declared, next) = cursor.descend();
        let kind = match declared {
            Some(SchemaKind::Object) => SchemaKind::Object,
            Some(SchemaKind::Array) => SchemaKind::Array,
            Some(SchemaKind::Leaf) | None => guess_kind(seg),
        };

        match kind {
            SchemaKind::Array => self.set_in_array(depth, seg, current, leaf, next),
            _ => self.set_in_object(depth, seg, current, leaf, next),
        }
    }

    fn set_in_object(
        &self,
        depth: usize,
        seg: &Seg,
        current: Option<&Value>,
        leaf: Value,
        next: Cursor<'_>,
    ) -> Result<Value> {
        let mut map = match current {
            Some(Value::Object(map)) => Map::clone(map),
            other => {
                self.log_discard(depth, "object", other);
                Map::new()
            }
        };

        let key = seg.field_name();
        let child = self.set_in(depth + 1, map.get(&key), leaf, next)?;
        map.insert(key, child);
        Ok(Value::object(map))
    }

    fn set_in_array(
        &self,
        depth: usize,
        seg: &Seg,
        current: Option<&Value>,
        leaf: Value,
        next: Cursor<'_>,
    ) -> Result<Value> {
        let Some(index) = seg.numeric() else {
            return Err(TreeError::InvalidSegment {
                path: KeyChain::from(self.full_path[..depth].to_vec()),
                segment: seg.clone(),
            });
        };

        let mut items: Box<dyn ArrayLike> = match current {
            Some(Value::Array(items)) => items.shallow_clone(),
            other => {
                self.log_discard(depth, "array", other);
                (self.create_array)().shallow_clone()
            }
        };

        let len = items.len();
        if index > len {
            return Err(TreeError::IndexOutOfRange {
                path: KeyChain::from(self.full_path[..depth].to_vec()),
                index,
                len,
            });
        }

        let child = self.set_in(depth + 1, items.get(index), leaf, next)?;
        if index < len {
            items.set(index, child);
        } else {
            items.push(child);
        }
        Ok(Value::Array(Arc::from(items)))
    }

    fn log_discard(&self, depth: usize, expected: &str, found: Option<&Value>) {
        if let Some(found) = found {
            debug!(
                path = %KeyChain::from(self.full_path[..depth].to_vec()),
                expected,
                found = found.kind(),
                "discarding mismatched container"
            );
        }
    }
}

fn guess_kind(seg: &Seg) -> SchemaKind {
    match seg.numeric() {
        Some(_) => SchemaKind::Array,
        None => SchemaKind::Object,
    }
}

/// Walks the schema in step with the value key chain.
#[derive(Clone, Copy)]
struct Cursor<'a> {
    node: Option<&'a Schema>,
    rest: &'a [Seg],
}

impl<'a> Cursor<'a> {
    fn start(context: Option<SchemaContext<'a>>) -> Self {
        match context {
            Some(context) => Self {
                node: Some(context.schema),
                rest: context.path,
            },
            None => Self {
                node: None,
                rest: &[],
            },
        }
    }

    /// Kind declared for the container at this depth, and the cursor for the
    /// next depth. Expanded nodes consume their `$type` segment first.
    fn descend(self) -> (Option<SchemaKind>, Cursor<'a>) {
        let Some(mut node) = self.node else {
            return (None, self);
        };
        let mut rest = self.rest;

        if let Schema::Expanded(expanded) = node {
            node = &expanded.ty;
            if rest.first().is_some_and(Seg::is_type_marker) {
                rest = &rest[1..];
            }
        }

        let next = match rest.split_first() {
            Some((seg, tail)) => Cursor {
                node: node.child(seg),
                rest: tail,
            },
            None => Cursor {
                node: None,
                rest: &[],
            },
        };
        (Some(node.kind()), next)
    }
}
