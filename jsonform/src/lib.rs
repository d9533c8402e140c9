//! Schema-driven form resolution for jsonform.
//!
//! Given a [`Schema`] and the current [`Value`] tree, [`JsonForm::resolve`]
//! produces one [`ResolvedNode`] per top-level field: its kind, the editor
//! registered for it, its coerced value, label, computed props and children.
//! Edits flow back through [`JsonForm::change`] and [`JsonForm::add`], which
//! build a new root with [`deep_set`] and hand it to the caller.
//!
//! Rendering is left to the caller: editors registered in an
//! [`EditorRegistry`] are descriptors, and the resolved tree says which one
//! to use where.
//!
//! ```
//! use jsonform::{EditorRegistry, FormOptions, FormProps, JsonForm, Schema, Value, ValueEditor};
//!
//! let form = JsonForm::new(
//!     FormOptions::new().types(EditorRegistry::new().with("input", ValueEditor::with_default("".into()))),
//! )
//! .unwrap();
//!
//! let schema = Schema::object([("title", Schema::ty("input"))]);
//! let value = Value::empty_object();
//! let nodes = form.resolve(&FormProps::new(&schema, &value)).unwrap();
//! assert_eq!(nodes[0].label, "Title");
//! ```

mod form;
mod label;
mod registry;
mod resolver;

pub use form::{FormOptions, FormProps, JsonForm};
pub use label::{EnglishInflector, Inflector, decamelize_and_capitalize};
pub use registry::{
    ARRAY_TYPE, ArrayEditor, Editor, EditorEntry, EditorKey, EditorRegistry, OBJECT_TYPE,
    ObjectEditor, ValueEditor,
};
pub use resolver::{ResolvedNode, TypeName};

pub use jsonform_model::{ArrayTag, ComputedProps, Expanded, Schema, SchemaError, SchemaKind};
pub use jsonform_tree::{SchemaContext, TreeError, access, deep_set, deep_set_untyped};
pub use jsonform_types::{
    ArrayFactory, ArrayLike, KeyChain, Map, Seg, SharedArray, Value, VecArray,
    default_array_factory, key_chain,
};

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors raised while configuring a form, resolving a schema or routing an
/// edit. All of them point at a misconfiguration and abort the operation.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("\"types\" is a required option")]
    MissingTypes,

    #[error("Invalid type found at \"{path}\": undefined\n\n  schema: {schema}")]
    MissingType { path: KeyChain, schema: String },

    #[error("Invalid type at \"{path}\": {kind}")]
    InvalidType { path: KeyChain, kind: String },

    #[error("The root schema must be an object of fields, found {0}")]
    RootNotObject(String),

    #[error("No type with the name \"{0}\" has been registered")]
    UnknownType(String),

    #[error("Missing custom array editor for {0}")]
    MissingCustomArrayEditor(String),

    #[error("add() can only be called from array editors (called at \"{path}\")")]
    AddOnNonArray { path: KeyChain },

    #[error("Changing a value requires an onChange function to be passed to the form")]
    MissingOnChange,

    #[error(transparent)]
    Tree(#[from] TreeError),
}
