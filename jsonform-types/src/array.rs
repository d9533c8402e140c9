//! The array-like capability.
//!
//! Any sequence that can report its length, read by position, append and
//! concatenate qualifies as an array value. The built-in [`VecArray`] is the
//! default; callers may plug in persistent-list types through an
//! [`ArrayFactory`].

use crate::Value;
use std::fmt;
use std::sync::Arc;

/// A shared, immutable handle to an array-like value.
pub type SharedArray = Arc<dyn ArrayLike>;

/// Produces empty array-like values for coercion and `add`.
pub type ArrayFactory = Arc<dyn Fn() -> SharedArray + Send + Sync>;

/// Capability interface for sequence values.
///
/// Implementations are held behind [`SharedArray`] and never mutated while
/// shared: writers call [`ArrayLike::shallow_clone`], mutate the fresh copy
/// and wrap it in a new `Arc`.
pub trait ArrayLike: fmt::Debug + Send + Sync {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Returns true if the sequence has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, if present.
    fn get(&self, index: usize) -> Option<&Value>;

    /// Appends an element in place.
    fn push(&mut self, item: Value);

    /// Overwrites the element at `index`. Returns false if `index` is out of
    /// bounds, leaving the sequence untouched.
    fn set(&mut self, index: usize, item: Value) -> bool;

    /// Returns a new sequence of the same kind with `item` appended.
    fn concat(&self, item: Value) -> SharedArray;

    /// Copies the sequence. Elements are shared, not deep-copied.
    fn shallow_clone(&self) -> Box<dyn ArrayLike>;

    /// Named member carried alongside the elements. Plain sequences have none.
    fn property(&self, key: &str) -> Option<&Value> {
        let _ = key;
        None
    }
}

impl<'a> dyn ArrayLike + 'a {
    /// Iterates over the present elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

/// The default array-like value, backed by a `Vec`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VecArray(Vec<Value>);

impl VecArray {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The elements as a slice.
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

impl ArrayLike for VecArray {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    fn push(&mut self, item: Value) {
        self.0.push(item);
    }

    fn set(&mut self, index: usize, item: Value) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    fn concat(&self, item: Value) -> SharedArray {
        let mut items = Vec::with_capacity(self.0.len() + 1);
        items.extend_from_slice(&self.0);
        items.push(item);
        Arc::new(Self(items))
    }

    fn shallow_clone(&self) -> Box<dyn ArrayLike> {
        Box::new(self.clone())
    }
}

impl From<Vec<Value>> for VecArray {
    fn from(items: Vec<Value>) -> Self {
        Self(items)
    }
}

impl FromIterator<Value> for VecArray {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Factory producing empty [`VecArray`] values.
#[must_use]
pub fn default_array_factory() -> ArrayFactory {
    Arc::new(|| Arc::new(VecArray::new()) as SharedArray)
}
