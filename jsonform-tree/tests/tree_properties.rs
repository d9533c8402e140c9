//! Property-based tests for access and deep_set.
//!
//! - access is total: any chain over any tree returns without panicking
//! - round trip: access(deep_set(root, path, leaf), path) == leaf
//! - writes past the end of an array fail instead of padding
//! - structural sharing: every branch off the written path keeps its identity

use jsonform_tree::{TreeError, access, deep_set_untyped};
use jsonform_types::{KeyChain, Seg, Value};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "title", "0"]).prop_map(String::from)
}

fn seg_strategy() -> impl Strategy<Value = Seg> {
    prop_oneof![
        key_strategy().prop_map(Seg::Key),
        (0usize..4).prop_map(Seg::Index),
    ]
}

fn chain_strategy() -> impl Strategy<Value = KeyChain> {
    prop::collection::vec(seg_strategy(), 0..5).prop_map(KeyChain::from)
}

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::list),
            prop::collection::vec((key_strategy(), inner), 0..4)
                .prop_map(|fields| Value::object(fields.into_iter().collect())),
        ]
    })
}

/// Writes untyped, treating a gap past the end of an array as an expected
/// rejection.
fn write(root: &Value, path: &[Seg], leaf: Value) -> Result<Option<Value>, TestCaseError> {
    match deep_set_untyped(root, path, leaf) {
        Ok(updated) => Ok(Some(updated)),
        Err(TreeError::IndexOutOfRange { index, len, .. }) => {
            prop_assert!(index > len);
            Ok(None)
        }
        Err(other) => Err(TestCaseError::fail(format!("unexpected error: {other}"))),
    }
}

/// Asserts that every child of every container along `path` that is not
/// itself on the path is reference-identical between `before` and `after`.
fn assert_shared_off_path(before: &Value, after: &Value, path: &[Seg]) -> Result<(), TestCaseError> {
    for depth in 0..path.len() {
        let prefix = &path[..depth];
        let (Some(old), Some(new)) = (access(before, prefix), access(after, prefix)) else {
            break;
        };
        match (old, new) {
            (Value::Object(old_map), Value::Object(new_map)) => {
                let on_path = path[depth].field_name();
                for (key, old_child) in old_map.iter() {
                    if *key == on_path {
                        continue;
                    }
                    let new_child = new_map.get(key);
                    prop_assert!(new_child.is_some_and(|c| c.is_identical(old_child)));
                }
            }
            (Value::Array(old_items), Value::Array(new_items)) => {
                let on_path = path[depth].numeric();
                for index in 0..old_items.len() {
                    if Some(index) == on_path {
                        continue;
                    }
                    let (Some(old_child), Some(new_child)) =
                        (old_items.get(index), new_items.get(index))
                    else {
                        return Err(TestCaseError::fail(format!("element {index} disappeared")));
                    };
                    prop_assert!(new_child.is_identical(old_child));
                }
            }
            // The container was coerced; nothing below it is shared.
            _ => break,
        }
    }
    Ok(())
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    /// access never panics and a missing path is simply None
    #[test]
    fn access_is_total(root in value_strategy(), path in chain_strategy()) {
        let _ = access(&root, &path);
    }

    /// Whatever was written can be read back at the same path
    #[test]
    fn deep_set_round_trip(
        root in value_strategy(),
        path in chain_strategy(),
        leaf in leaf_strategy(),
    ) {
        if let Some(updated) = write(&root, &path, leaf.clone())? {
            prop_assert_eq!(access(&updated, &path), Some(&leaf));
        }
    }

    /// Writes never grow an array by more than one element
    #[test]
    fn deep_set_never_pads(
        root in value_strategy(),
        path in chain_strategy(),
        leaf in leaf_strategy(),
    ) {
        if let Some(updated) = write(&root, &path, leaf)? {
            for depth in 0..path.len() {
                let prefix = &path[..depth];
                if let (Some(Value::Array(old)), Some(Value::Array(new))) =
                    (access(&root, prefix), access(&updated, prefix))
                {
                    prop_assert!(new.len() <= old.len() + 1);
                }
            }
        }
    }

    /// deep_set leaves its input untouched
    #[test]
    fn deep_set_does_not_mutate_input(
        root in value_strategy(),
        path in chain_strategy(),
        leaf in leaf_strategy(),
    ) {
        let before = root.to_json();
        let _ = write(&root, &path, leaf)?;
        prop_assert_eq!(root.to_json(), before);
    }

    /// Branches off the written path keep their identity
    #[test]
    fn deep_set_shares_untouched_branches(
        root in value_strategy(),
        path in chain_strategy(),
        leaf in leaf_strategy(),
    ) {
        if let Some(updated) = write(&root, &path, leaf)? {
            assert_shared_off_path(&root, &updated, &path)?;
        }
    }
}
