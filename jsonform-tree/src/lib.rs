//! Reading and writing jsonform value trees.
//!
//! - [`access`]: total, side-effect free lookup along a key chain
//! - [`deep_set`]: immutable write that rebuilds only the spine of the tree,
//!   coercing each container on the way to the kind the schema declares
//!
//! Value trees are never mutated in place. Every write returns a new root
//! that shares every untouched branch with the old one.

mod access;
mod deep_set;

pub use access::access;
pub use deep_set::{SchemaContext, deep_set, deep_set_untyped};

use jsonform_types::{KeyChain, Seg};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors that can occur while writing into a value tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The schema declares an array here but the key chain names a field.
    #[error("Cannot write named key \"{segment}\" into the array at \"{path}\"")]
    InvalidSegment { path: KeyChain, segment: Seg },

    /// Writes may overwrite an element or append one, never leave a gap.
    #[error("Index {index} is out of range for the array of length {len} at \"{path}\"")]
    IndexOutOfRange {
        path: KeyChain,
        index: usize,
        len: usize,
    },
}
