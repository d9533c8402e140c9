//! Editor descriptors and the name/tag registry that selects them.

use jsonform_model::ArrayTag;
use jsonform_types::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Reserved name of the container editor for object schemas.
pub const OBJECT_TYPE: &str = "$object";
/// Reserved name of the container editor for array schemas.
pub const ARRAY_TYPE: &str = "$array";

/// Descriptor for something that can edit one kind of node.
///
/// Rendering lives with the caller. The only thing resolution needs from an
/// editor is the canonical value to use when the tree has none.
pub trait Editor: Send + Sync + fmt::Debug {
    /// Value substituted when the node's value is missing.
    fn default_value(&self) -> Option<Value> {
        None
    }
}

/// Leaf editor with an optional default.
#[derive(Debug, Clone, Default)]
pub struct ValueEditor {
    default_value: Option<Value>,
}

impl ValueEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(default_value: Value) -> Self {
        Self {
            default_value: Some(default_value),
        }
    }
}

impl Editor for ValueEditor {
    fn default_value(&self) -> Option<Value> {
        self.default_value.clone()
    }
}

/// Built-in `$object` editor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectEditor;

impl Editor for ObjectEditor {}

/// Built-in `$array` editor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayEditor;

impl Editor for ArrayEditor {}

/// How an editor is looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditorKey {
    Name(String),
    Tag(ArrayTag),
}

impl fmt::Display for EditorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorKey::Name(name) => f.write_str(name),
            EditorKey::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

/// A registered editor and the default value resolution will use for it.
///
/// The default is captured once at registration so container defaults can be
/// overridden per form without touching the editor itself.
#[derive(Debug, Clone)]
pub struct EditorEntry {
    pub editor: Arc<dyn Editor>,
    pub default_value: Option<Value>,
}

impl EditorEntry {
    pub fn new(editor: Arc<dyn Editor>) -> Self {
        let default_value = editor.default_value();
        Self {
            editor,
            default_value,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default_value: Value) -> Self {
        self.default_value = Some(default_value);
        self
    }
}

/// Type name or tag to editor.
#[derive(Debug, Clone, Default)]
pub struct EditorRegistry {
    entries: HashMap<EditorKey, EditorEntry>,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `editor` under a type name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, editor: impl Editor + 'static) -> Self {
        self.register(EditorKey::Name(name.into()), EditorEntry::new(Arc::new(editor)));
        self
    }

    /// Registers `editor` for the custom array type identified by `tag`.
    #[must_use]
    pub fn with_tag(mut self, tag: &ArrayTag, editor: impl Editor + 'static) -> Self {
        self.register(EditorKey::Tag(tag.clone()), EditorEntry::new(Arc::new(editor)));
        self
    }

    /// Inserts or replaces an entry, returning the previous one.
    pub fn register(&mut self, key: EditorKey, entry: EditorEntry) -> Option<EditorEntry> {
        self.entries.insert(key, entry)
    }

    pub fn by_name(&self, name: &str) -> Option<&EditorEntry> {
        self.entries.get(&EditorKey::Name(name.to_owned()))
    }

    pub fn by_tag(&self, tag: &ArrayTag) -> Option<&EditorEntry> {
        self.entries.get(&EditorKey::Tag(tag.clone()))
    }

    pub fn contains(&self, key: &EditorKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
