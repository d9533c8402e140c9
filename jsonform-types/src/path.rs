//! Key chains for addressing schema and value trees.
//!
//! The same segment vocabulary walks both trees, with one divergence: an
//! expanded schema node (`{ $type, ... }`) adds a literal `$type` segment to
//! the schema chain that the value chain never has. Array items are reached
//! through a fixed slot index on the schema side and the element index on the
//! value side.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Segment inserted into schema key chains when descending through an
/// expanded node.
pub const TYPE_SEGMENT: &str = "$type";

/// Schema slot holding the opaque tag of a custom array type.
pub const TAG_SLOT: usize = 0;

/// Schema slot holding the item schema of a plain array.
pub const ITEM_SLOT: usize = 0;

/// Schema slot holding the item schema of a custom array type.
pub const ITEM_SLOT_CUSTOM: usize = 1;

/// A single segment in a key chain.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seg {
    /// Field name: `{"key": value}`
    Key(String),
    /// Element position: `[index]`
    Index(usize),
}

impl Seg {
    /// Create a key segment.
    #[inline]
    pub fn key(k: impl Into<String>) -> Self {
        Seg::Key(k.into())
    }

    /// Create an index segment.
    #[inline]
    pub fn index(i: usize) -> Self {
        Seg::Index(i)
    }

    /// The literal `$type` segment.
    #[inline]
    pub fn type_marker() -> Self {
        Seg::Key(TYPE_SEGMENT.to_owned())
    }

    /// Returns true if this is the literal `$type` segment.
    #[inline]
    pub fn is_type_marker(&self) -> bool {
        matches!(self, Seg::Key(k) if k == TYPE_SEGMENT)
    }

    /// Get the key if this is a key segment.
    #[inline]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Seg::Key(k) => Some(k),
            Seg::Index(_) => None,
        }
    }

    /// Get the index if this is an index segment.
    #[inline]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Seg::Key(_) => None,
            Seg::Index(i) => Some(*i),
        }
    }

    /// Position this segment addresses inside a sequence: the index itself,
    /// or a key consisting only of ASCII digits.
    pub fn numeric(&self) -> Option<usize> {
        match self {
            Seg::Index(i) => Some(*i),
            Seg::Key(k) if !k.is_empty() && k.bytes().all(|b| b.is_ascii_digit()) => {
                k.parse().ok()
            }
            Seg::Key(_) => None,
        }
    }

    /// Name this segment addresses inside a mapping. Indices become their
    /// decimal representation.
    pub fn field_name(&self) -> String {
        match self {
            Seg::Key(k) => k.clone(),
            Seg::Index(i) => i.to_string(),
        }
    }
}

impl fmt::Display for Seg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seg::Key(k) => f.write_str(k),
            Seg::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<String> for Seg {
    fn from(s: String) -> Self {
        Seg::Key(s)
    }
}

impl From<&str> for Seg {
    fn from(s: &str) -> Self {
        Seg::Key(s.to_owned())
    }
}

impl From<usize> for Seg {
    fn from(i: usize) -> Self {
        Seg::Index(i)
    }
}

/// An ordered path into a schema or value tree.
///
/// Chains are cheap to clone and are extended by building new chains, so a
/// parent's chain is never disturbed by its children.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyChain(Vec<Seg>);

impl KeyChain {
    /// Create an empty chain (the root).
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Create a chain from a vector of segments.
    #[inline]
    pub fn from_segments(segments: Vec<Seg>) -> Self {
        Self(segments)
    }

    /// Append a key segment and return self (builder pattern).
    #[inline]
    #[must_use]
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(Seg::Key(k.into()));
        self
    }

    /// Append an index segment and return self (builder pattern).
    #[inline]
    #[must_use]
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Seg::Index(i));
        self
    }

    /// Returns a new chain with `seg` appended.
    #[must_use]
    pub fn with(&self, seg: Seg) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(seg);
        Self(segments)
    }

    /// The chain without its last segment, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// The segments as a slice.
    #[inline]
    pub fn segments(&self) -> &[Seg] {
        &self.0
    }

    /// Consumes the chain, returning its segments.
    #[inline]
    pub fn into_segments(self) -> Vec<Seg> {
        self.0
    }
}

impl Deref for KeyChain {
    type Target = [Seg];

    fn deref(&self) -> &[Seg] {
        &self.0
    }
}

impl fmt::Display for KeyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

impl From<Vec<Seg>> for KeyChain {
    fn from(segments: Vec<Seg>) -> Self {
        Self(segments)
    }
}

impl FromIterator<Seg> for KeyChain {
    fn from_iter<I: IntoIterator<Item = Seg>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a KeyChain {
    type Item = &'a Seg;
    type IntoIter = std::slice::Iter<'a, Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Extends a schema key chain by one child segment. Children of an expanded
/// node are reached through its `$type` payload, so the marker goes first.
#[must_use]
pub fn extend_schema_path(path: &KeyChain, segment: Seg, is_expanded: bool) -> KeyChain {
    let mut segments = Vec::with_capacity(path.len() + 2);
    segments.extend_from_slice(path);
    if is_expanded {
        segments.push(Seg::type_marker());
    }
    segments.push(segment);
    KeyChain(segments)
}

/// Extends a value key chain by one child segment.
#[must_use]
pub fn extend_value_path(path: &KeyChain, segment: Seg) -> KeyChain {
    path.with(segment)
}

/// Schema slot of the item schema for an array node.
#[inline]
pub fn item_slot(is_custom: bool) -> usize {
    if is_custom { ITEM_SLOT_CUSTOM } else { ITEM_SLOT }
}
