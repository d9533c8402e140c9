//! Form configuration and the entry points that resolve a schema and route
//! edits back into a new value tree.

use crate::label::{EnglishInflector, Inflector};
use crate::registry::{
    ARRAY_TYPE, ArrayEditor, EditorEntry, EditorKey, EditorRegistry, OBJECT_TYPE, ObjectEditor,
};
use crate::resolver::{ResolvedNode, Resolver, TypeName};
use crate::{FormError, Result};
use jsonform_model::Schema;
use jsonform_tree::{SchemaContext, access, deep_set};
use jsonform_types::{ArrayFactory, KeyChain, Seg, SharedArray, Value, default_array_factory};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Options accepted by [`JsonForm::new`].
#[derive(Clone, Default)]
pub struct FormOptions {
    types: Option<EditorRegistry>,
    create_array: Option<ArrayFactory>,
    inflector: Option<Arc<dyn Inflector>>,
}

impl FormOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editors by type name and custom array tag. Required.
    #[must_use]
    pub fn types(mut self, types: EditorRegistry) -> Self {
        self.types = Some(types);
        self
    }

    /// Factory for new empty arrays. Defaults to [`VecArray`].
    ///
    /// [`VecArray`]: jsonform_types::VecArray
    #[must_use]
    pub fn create_array<F>(mut self, create_array: F) -> Self
    where
        F: Fn() -> SharedArray + Send + Sync + 'static,
    {
        self.create_array = Some(Arc::new(create_array));
        self
    }

    /// Singularization used for array item labels. Defaults to
    /// [`EnglishInflector`].
    #[must_use]
    pub fn inflector(mut self, inflector: impl Inflector + 'static) -> Self {
        self.inflector = Some(Arc::new(inflector));
        self
    }
}

impl fmt::Debug for FormOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormOptions")
            .field("types", &self.types)
            .field("create_array", &self.create_array.is_some())
            .field("inflector", &self.inflector.is_some())
            .finish()
    }
}

/// Per-render input: the schema, the current value tree and the handler
/// that receives every new root.
#[derive(Clone, Copy)]
pub struct FormProps<'a> {
    pub schema: &'a Schema,
    pub value: &'a Value,
    on_change: Option<&'a dyn Fn(Value)>,
    computed_props_rest: &'a [Value],
}

impl<'a> FormProps<'a> {
    pub fn new(schema: &'a Schema, value: &'a Value) -> Self {
        Self {
            schema,
            value,
            on_change: None,
            computed_props_rest: &[],
        }
    }

    #[must_use]
    pub fn on_change(mut self, on_change: &'a dyn Fn(Value)) -> Self {
        self.on_change = Some(on_change);
        self
    }

    /// Extra arguments passed to every `$computedProps` after the value.
    #[must_use]
    pub fn computed_props_rest(mut self, rest: &'a [Value]) -> Self {
        self.computed_props_rest = rest;
        self
    }
}

/// A configured form.
///
/// Owns its own copy of the editor registry with `$object` and `$array`
/// always present, so configuring one form never affects another.
pub struct JsonForm {
    registry: EditorRegistry,
    create_array: ArrayFactory,
    inflector: Arc<dyn Inflector>,
}

impl JsonForm {
    /// Validates `options` and fills in the container defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingTypes`] when no editor registry is given.
    pub fn new(options: FormOptions) -> Result<Self> {
        let mut registry = options.types.ok_or(FormError::MissingTypes)?;
        let create_array = options.create_array.unwrap_or_else(default_array_factory);
        let inflector = options
            .inflector
            .unwrap_or_else(|| Arc::new(EnglishInflector) as Arc<dyn Inflector>);

        install_default(&mut registry, ARRAY_TYPE, Arc::new(ArrayEditor), || {
            Value::Array(create_array())
        });
        install_default(&mut registry, OBJECT_TYPE, Arc::new(ObjectEditor), Value::empty_object);

        Ok(Self {
            registry,
            create_array,
            inflector,
        })
    }

    pub fn registry(&self) -> &EditorRegistry {
        &self.registry
    }

    /// An empty array from the configured factory.
    pub fn create_array(&self) -> SharedArray {
        (self.create_array)()
    }

    /// Resolves one node per top-level schema field.
    ///
    /// # Errors
    ///
    /// Fails when the root schema is not an object or when any node below it
    /// cannot be resolved.
    pub fn resolve(&self, props: &FormProps<'_>) -> Result<Vec<ResolvedNode>> {
        let Schema::Object(fields) = props.schema else {
            return Err(FormError::RootNotObject(props.schema.to_string()));
        };
        let resolver = self.resolver(props);
        fields
            .keys()
            .map(|field| {
                let path = KeyChain::root().key(field.as_str());
                resolver.resolve(field.clone(), path.clone(), path)
            })
            .collect()
    }

    /// Resolves the single node at a schema / value key chain pair.
    ///
    /// The node's key matches what [`JsonForm::resolve`] gives the same node,
    /// so array items are keyed `index/len`.
    pub fn resolve_node(
        &self,
        props: &FormProps<'_>,
        schema_path: &KeyChain,
        value_path: &KeyChain,
    ) -> Result<ResolvedNode> {
        let key = node_key(props, schema_path, value_path);
        self.resolver(props)
            .resolve(key, schema_path.clone(), value_path.clone())
    }

    /// Writes `leaf` at `node` and hands the new root to the change handler.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingOnChange`] without a handler, or a tree
    /// error when the write does not fit the schema.
    pub fn change(&self, props: &FormProps<'_>, node: &ResolvedNode, leaf: Value) -> Result<Value> {
        self.change_at(props, &node.value_path, &node.schema_path, leaf)
    }

    /// [`JsonForm::change`] addressed by key chains.
    pub fn change_at(
        &self,
        props: &FormProps<'_>,
        value_path: &[Seg],
        schema_path: &[Seg],
        leaf: Value,
    ) -> Result<Value> {
        let on_change = props.on_change.ok_or(FormError::MissingOnChange)?;
        let next = deep_set(
            props.value,
            value_path,
            leaf,
            Some(SchemaContext::new(props.schema, schema_path)),
            &self.create_array,
        )?;
        debug!(path = %KeyChain::from(value_path.to_vec()), "value changed");
        on_change(next.clone());
        Ok(next)
    }

    /// Appends one `null` item to the array at `node`, creating the array
    /// when the tree has none.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::AddOnNonArray`] unless `node` is an array node.
    pub fn add(&self, props: &FormProps<'_>, node: &ResolvedNode) -> Result<Value> {
        if node.type_name != TypeName::Array {
            warn!(path = %node.value_path, type_name = %node.type_name, "add on non-array node");
            return Err(FormError::AddOnNonArray {
                path: node.value_path.clone(),
            });
        }
        let appended = match access(props.value, &node.value_path) {
            Some(Value::Array(items)) => items.concat(Value::Null),
            _ => self.create_array().concat(Value::Null),
        };
        self.change_at(
            props,
            &node.value_path,
            &node.schema_path,
            Value::Array(appended),
        )
    }

    fn resolver<'a>(&'a self, props: &FormProps<'a>) -> Resolver<'a> {
        Resolver {
            schema: props.schema,
            root: props.value,
            registry: &self.registry,
            create_array: &self.create_array,
            inflector: self.inflector.as_ref(),
            rest: props.computed_props_rest,
        }
    }
}

impl fmt::Debug for JsonForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonForm")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Key of the node at `value_path`: `index/len` under an array schema,
/// otherwise the last segment.
fn node_key(props: &FormProps<'_>, schema_path: &KeyChain, value_path: &KeyChain) -> String {
    let Some(last) = value_path.last() else {
        return String::new();
    };
    let in_array = schema_path
        .parent()
        .and_then(|parent| props.schema.at(&parent))
        .is_some_and(Schema::is_array_like);
    let len = value_path
        .parent()
        .and_then(|parent| access(props.value, &parent))
        .and_then(Value::as_array)
        .map(|items| items.len());
    match (in_array, last.numeric(), len) {
        (true, Some(index), Some(len)) => format!("{index}/{len}"),
        _ => last.to_string(),
    }
}

/// Ensures a container editor is registered under `name` and that it has a
/// non-null default.
fn install_default(
    registry: &mut EditorRegistry,
    name: &str,
    fallback: Arc<dyn crate::Editor>,
    default_value: impl FnOnce() -> Value,
) {
    let mut entry = registry
        .by_name(name)
        .cloned()
        .unwrap_or_else(|| EditorEntry::new(fallback));
    if entry.default_value.as_ref().is_none_or(Value::is_null) {
        entry = entry.with_default(default_value());
    }
    registry.register(EditorKey::Name(name.to_owned()), entry);
}
