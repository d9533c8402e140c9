//! Read-only lookup along a key chain.

use jsonform_types::{Seg, Value};

/// Reads the value at `path` below `root`.
///
/// Returns `None` as soon as the walk reaches a leaf, a null, a missing field
/// or an element past the end. Never panics.
///
/// ```
/// use jsonform_tree::access;
/// use jsonform_types::{key_chain, Value};
///
/// let root = Value::parse(r#"{"options": [{"text": "foo"}]}"#).unwrap();
/// assert_eq!(access(&root, &key_chain!["options", 0, "text"]), Some(&Value::from("foo")));
/// assert_eq!(access(&root, &key_chain!["options", 3, "text"]), None);
/// ```
pub fn access<'a>(root: &'a Value, path: &[Seg]) -> Option<&'a Value> {
    path.iter().try_fold(root, step)
}

fn step<'a>(node: &'a Value, seg: &Seg) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(seg.field_name().as_str()),
        Value::Array(items) => match seg.numeric() {
            Some(index) => items.get(index),
            None => seg.as_key().and_then(|key| items.property(key)),
        },
        _ => None,
    }
}
