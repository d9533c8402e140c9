//! Identity tokens for custom array types.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Opaque token naming a custom whole-array editor.
///
/// Two tags are equal only if one is a clone of the other: creating a second
/// tag with the same description yields a distinct key. The description is
/// for diagnostics only.
#[derive(Clone)]
pub struct ArrayTag(Arc<str>);

impl ArrayTag {
    /// Creates a fresh tag.
    #[must_use]
    pub fn new(description: impl AsRef<str>) -> Self {
        Self(Arc::from(description.as_ref()))
    }

    pub fn description(&self) -> &str {
        &self.0
    }
}

impl PartialEq for ArrayTag {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ArrayTag {}

impl Hash for ArrayTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).cast::<u8>().hash(state);
    }
}

impl fmt::Debug for ArrayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArrayTag({})", self.0)
    }
}

impl fmt::Display for ArrayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.0)
    }
}
