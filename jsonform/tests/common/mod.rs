//! Shared test helpers for form tests.

#![allow(dead_code)]

use jsonform::{EditorRegistry, FormOptions, JsonForm, Value, ValueEditor};
use std::cell::RefCell;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; `RUST_LOG=jsonform=debug` shows
/// coercion and change events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_test_writer()
        .compact()
        .try_init();
}

/// `input` and `string` default to `""`; `number` has no default.
pub fn leaf_types() -> EditorRegistry {
    EditorRegistry::new()
        .with("input", ValueEditor::with_default(Value::from("")))
        .with("string", ValueEditor::with_default(Value::from("")))
        .with("number", ValueEditor::new())
}

pub fn form() -> JsonForm {
    init_tracing();
    JsonForm::new(FormOptions::new().types(leaf_types())).unwrap()
}

pub fn json(value: serde_json::Value) -> Value {
    Value::from(value)
}

/// Collects every root handed to the change handler.
#[derive(Default)]
pub struct Changes(RefCell<Vec<Value>>);

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler(&self) -> impl Fn(Value) + '_ {
        move |value| self.0.borrow_mut().push(value)
    }

    pub fn count(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn last(&self) -> Option<Value> {
        self.0.borrow().last().cloned()
    }
}
