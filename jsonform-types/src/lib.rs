//! Core type definitions for jsonform.
//!
//! This crate defines the plumbing shared by every other jsonform crate:
//! - [`Seg`] and [`KeyChain`]: ordered paths addressing both schema and value trees
//! - [`Value`]: the editable value tree, with containers shared by reference
//! - [`ArrayLike`]: the capability any sequence value must provide
//!
//! Nothing here knows about schemas or editors; those live in
//! `jsonform-model` and `jsonform`.

mod array;
mod path;
mod value;

pub use array::{ArrayFactory, ArrayLike, SharedArray, VecArray, default_array_factory};
pub use path::{
    ITEM_SLOT, ITEM_SLOT_CUSTOM, KeyChain, Seg, TAG_SLOT, TYPE_SEGMENT, extend_schema_path,
    extend_value_path, item_slot,
};
pub use value::{Map, Value};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Builds a [`KeyChain`] from a list of field names and indices.
///
/// ```
/// use jsonform_types::{key_chain, Seg};
///
/// let chain = key_chain!["options", 0, "text"];
/// assert_eq!(chain.last(), Some(&Seg::key("text")));
/// ```
#[macro_export]
macro_rules! key_chain {
    () => {
        $crate::KeyChain::root()
    };
    ($($seg:expr),+ $(,)?) => {
        $crate::KeyChain::from_segments(vec![$($crate::Seg::from($seg)),+])
    };
}
