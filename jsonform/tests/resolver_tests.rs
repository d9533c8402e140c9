mod common;

use common::{Changes, form, json, leaf_types};
use jsonform::{
    ArrayEditor, ArrayTag, Expanded, FormError, FormOptions, FormProps, Inflector, JsonForm,
    KeyChain, Map, Schema, TypeName, Value, key_chain,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── Labels ────────────────────────────────────────────────────────

#[test]
fn keys_are_decamelized_into_labels() {
    let form = form();
    let schema = Schema::object([("someTitle", Schema::ty("string"))]);
    let value = Value::empty_object();
    let nodes = form.resolve(&FormProps::new(&schema, &value)).unwrap();
    assert_eq!(nodes[0].label, "Some title");
}

#[test]
fn explicit_label_wins_but_writes_use_the_key() {
    let form = form();
    let schema = Schema::object([("someTitle", Schema::ty("string").with_label("My title"))]);
    let value = Value::Null;
    let changes = Changes::new();
    let handler = changes.handler();
    let props = FormProps::new(&schema, &value).on_change(&handler);

    let nodes = form.resolve(&props).unwrap();
    assert_eq!(nodes[0].label, "My title");
    assert!(nodes[0].is_expanded);
    assert_eq!(nodes[0].type_name, TypeName::Leaf("string".into()));

    let next = form.change(&props, &nodes[0], Value::from("Hello world")).unwrap();
    assert_eq!(next.to_json(), json!({ "someTitle": "Hello world" }));
}

#[test]
fn array_items_are_numbered_from_one() {
    let form = form();
    let schema = Schema::object([(
        "options",
        Schema::array(Schema::object([("text", Schema::ty("input"))])),
    )]);
    let value = json(json!({ "options": [{}, {}] }));
    let nodes = form.resolve(&FormProps::new(&schema, &value)).unwrap();

    let labels: Vec<&str> = nodes[0].children.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Option 1", "Option 2"]);
    assert_eq!(nodes[0].children[0].children[0].label, "Text");
}

#[test]
fn item_label_ignores_its_own_label() {
    let form = form();
    let schema = Schema::object([(
        "categories",
        Schema::array(Schema::ty("string").with_label("ignored")),
    )]);
    let value = json(json!({ "categories": ["a"] }));
    let nodes = form.resolve(&FormProps::new(&schema, &value)).unwrap();
    assert_eq!(nodes[0].children[0].label, "Category 1");
}

#[test]
fn expanded_array_items_use_the_field_name() {
    let form = form();
    let schema = Schema::object([(
        "myEntries",
        Schema::array(Schema::ty("string")).with_label("Entries"),
    )]);
    let value = json(json!({ "myEntries": ["a", "b"] }));
    let nodes = form.resolve(&FormProps::new(&schema, &value)).unwrap();
    assert_eq!(nodes[0].label, "Entries");
    assert_eq!(nodes[0].children[1].label, "My entry 2");
}

#[test]
fn custom_inflector_is_used_for_items() {
    struct Keep;

    impl Inflector for Keep {
        fn singular(&self, word: &str) -> String {
            word.to_owned()
        }
    }

    let form = JsonForm::new(FormOptions::new().types(leaf_types()).inflector(Keep)).unwrap();
    let schema = Schema::object([("news", Schema::array(Schema::ty("string")))]);
    let value = json(json!({ "news": ["x"] }));
    let nodes = form.resolve(&FormProps::new(&schema, &value)).unwrap();
    assert_eq!(nodes[0].children[0].label, "News 1");
}

// ── Computed props ────────────────────────────────────────────────

#[test]
fn computed_props_without_arguments() {
    let form = form();
    let schema = Schema::object([(
        "title",
        Expanded::new("input")
            .computed_props(|_, _| {
                let mut props = Map::new();
                props.insert("maxLength".into(), Value::from(3));
                props
            })
            .into(),
    )]);
    let value = Value::empty_object();
    let nodes = form.resolve(&FormProps::new(&schema, &value)).unwrap();

    let props = nodes[0].props();
    assert_eq!(props.get("maxLength"), Some(&Value::from(3)));
    assert_eq!(props.get("label"), Some(&Value::from("Title")));
    assert_eq!(props.get("value"), Some(&Value::from("")));
}

#[test]
fn computed_props_read_the_whole_value() {
    let form = form();
    let schema = Schema::object([
        ("maxLength", Schema::ty("number")),
        (
            "title",
            Expanded::new("input")
                .computed_props(|root, _| {
                    let max = root
                        .as_object()
                        .and_then(|map| map.get("maxLength"))
                        .cloned()
                        .unwrap_or_default();
                    Map::from_iter([("maxLength".to_owned(), max)])
                })
                .into(),
        ),
    ]);
    let value = json(json!({ "maxLength": 5 }));
    let nodes = form.resolve(&FormProps::new(&schema, &value)).unwrap();
    assert_eq!(nodes[1].computed_props.get("maxLength"), Some(&Value::from(5)));
}

#[test]
fn computed_props_receive_rest_arguments() {
    let form = form();
    let schema = Schema::object([(
        "title",
        Expanded::new("input")
            .computed_props(|_, rest| {
                Map::from_iter([("maxLength".to_owned(), rest.first().cloned().unwrap_or_default())])
            })
            .into(),
    )]);
    let value = Value::empty_object();
    let rest = [Value::from(3)];
    let nodes = form
        .resolve(&FormProps::new(&schema, &value).computed_props_rest(&rest))
        .unwrap();
    assert_eq!(nodes[0].computed_props.get("maxLength"), Some(&Value::from(3)));
}

#[test]
fn computed_props_override_defaults() {
    let form = form();
    let schema = Schema::object([(
        "title",
        Expanded::new("input")
            .label("Title")
            .computed_props(|_, _| Map::from_iter([("label".to_owned(), Value::from("Computed"))]))
            .into(),
    )]);
    let value = Value::empty_object();
    let nodes = form.resolve(&FormProps::new(&schema, &value)).unwrap();
    assert_eq!(nodes[0].label, "Title");
    assert_eq!(nodes[0].props().get("label"), Some(&Value::from("Computed")));
}

#[test]
fn nodes_without_computed_props_get_none() {
    let form = form();
    let schema = Schema::object([("title", Schema::ty("input"))]);
    let value = Value::empty_object();
    let nodes = form.resolve(&FormProps::new(&schema, &value)).unwrap();
    assert!(nodes[0].computed_props.is_empty());
    assert_eq!(nodes[0].props().len(), 2);
}

// ── Custom arrays ─────────────────────────────────────────────────

#[test]
fn custom_array_editor_is_found_by_tag() {
    let sortable = ArrayTag::new("sortable");
    let form = JsonForm::new(
        FormOptions::new().types(leaf_types().with_tag(&sortable, ArrayEditor)),
    )
    .unwrap();
    let schema = Schema::object([(
        "list",
        Schema::custom_array(sortable.clone(), Schema::object([("name", Schema::ty("string"))])),
    )]);
    let value = json(json!({ "list": [{ "name": "a" }] }));
    let changes = Changes::new();
    let handler = changes.handler();
    let props = FormProps::new(&schema, &value).on_change(&handler);

    let nodes = form.resolve(&props).unwrap();
    let list = &nodes[0];
    assert!(list.is_custom_array());
    assert_eq!(list.custom_tag.as_ref(), Some(&sortable));
    assert_eq!(list.type_name, TypeName::Array);

    let item = &list.children[0];
    assert_eq!(item.schema_path, key_chain!["list", 1]);
    assert_eq!(item.value_path, key_chain!["list", 0]);
    assert_eq!(item.label, "List 1");

    let name = item.child("name").unwrap();
    let next = form.change(&props, name, Value::from("b")).unwrap();
    assert_eq!(next.to_json(), json!({ "list": [{ "name": "b" }] }));
}

#[test]
fn tags_match_by_identity_not_description() {
    let registered = ArrayTag::new("sortable");
    let lookalike = ArrayTag::new("sortable");
    let form = JsonForm::new(
        FormOptions::new().types(leaf_types().with_tag(&registered, ArrayEditor)),
    )
    .unwrap();
    let schema = Schema::object([("list", Schema::custom_array(lookalike, Schema::ty("string")))]);
    let value = Value::Null;

    let err = form.resolve(&FormProps::new(&schema, &value)).unwrap_err();
    assert!(matches!(err, FormError::MissingCustomArrayEditor(_)));
    assert!(err.to_string().contains("Missing custom array editor for Tag(sortable)"));
}

// ── Resolution errors ─────────────────────────────────────────────

#[test]
fn missing_schema_path_is_an_error() {
    let form = form();
    let schema = Schema::object([("title", Schema::ty("input"))]);
    let value = Value::Null;
    let props = FormProps::new(&schema, &value);

    let err = form
        .resolve_node(&props, &key_chain!["nope"], &key_chain!["nope"])
        .unwrap_err();
    match err {
        FormError::MissingType { path, schema } => {
            assert_eq!(path, key_chain!["nope"]);
            assert!(schema.contains("title"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn nested_type_record_is_an_error() {
    let form = form();
    let schema = Schema::object([(
        "title",
        Expanded::new(Schema::ty("input").with_label("inner")).into(),
    )]);
    let value = Value::Null;
    let err = form.resolve(&FormProps::new(&schema, &value)).unwrap_err();
    assert!(matches!(err, FormError::InvalidType { .. }));
}

#[test]
fn error_below_the_root_aborts_resolution() {
    let form = form();
    let schema = Schema::object([(
        "general",
        Schema::object([("when", Schema::ty("date"))]),
    )]);
    let value = Value::Null;
    assert!(matches!(
        form.resolve(&FormProps::new(&schema, &value)).unwrap_err(),
        FormError::UnknownType(name) if name == "date"
    ));
}

// ── Single nodes ──────────────────────────────────────────────────

#[test]
fn resolves_a_nested_node_directly() {
    let form = form();
    let schema = Schema::object([(
        "general",
        Schema::object([("title", Schema::ty("input"))]).with_label("General"),
    )]);
    let value = json(json!({ "general": { "title": "Hi" } }));
    let props = FormProps::new(&schema, &value);

    let node = form
        .resolve_node(
            &props,
            &key_chain!["general", "$type", "title"],
            &key_chain!["general", "title"],
        )
        .unwrap();
    assert_eq!(node.key, "title");
    assert_eq!(node.value, Value::from("Hi"));

    let nodes = form.resolve(&props).unwrap();
    assert_eq!(nodes[0].label, "General");
    assert_eq!(nodes[0].children[0].schema_path, node.schema_path);
}

#[test]
fn array_item_resolved_directly_keeps_its_position_key() {
    let form = form();
    let schema = Schema::object([
        (
            "options",
            Schema::array(Schema::object([("text", Schema::ty("input"))])),
        ),
        ("tags", Expanded::new(Schema::array(Schema::ty("string"))).into()),
    ]);
    let value = json(json!({ "options": [{ "text": "a" }, { "text": "b" }], "tags": ["x"] }));
    let props = FormProps::new(&schema, &value);
    let nodes = form.resolve(&props).unwrap();

    let item = form
        .resolve_node(&props, &key_chain!["options", 0], &key_chain!["options", 1])
        .unwrap();
    assert_eq!(item.key, "1/2");
    assert_eq!(item.key, nodes[0].children[1].key);

    let tag = form
        .resolve_node(&props, &key_chain!["tags", "$type", 0], &key_chain!["tags", 0])
        .unwrap();
    assert_eq!(tag.key, "0/1");
    assert_eq!(tag.key, nodes[1].children[0].key);

    let text = form
        .resolve_node(
            &props,
            &key_chain!["options", 0, "text"],
            &key_chain!["options", 1, "text"],
        )
        .unwrap();
    assert_eq!(text.key, "text");
}

#[test]
fn find_returns_none_off_the_tree() {
    let form = form();
    let schema = Schema::object([("title", Schema::ty("input"))]);
    let value = Value::Null;
    let nodes = form.resolve(&FormProps::new(&schema, &value)).unwrap();
    assert!(nodes[0].find(&KeyChain::root().key("other")).is_none());
    assert!(nodes[0].find(&key_chain!["title"]).is_some());
}

#[test]
fn schemas_parsed_from_json_resolve() {
    let form = form();
    let schema = Schema::from_json(&json!({
        "general": { "$type": { "title": "input" }, "$label": "About" },
        "tags": ["string"]
    }))
    .unwrap();
    let value = json(json!({ "tags": ["x"] }));
    let nodes = form.resolve(&FormProps::new(&schema, &value)).unwrap();

    assert_eq!(nodes[0].label, "About");
    assert_eq!(nodes[0].children[0].schema_path, key_chain!["general", "$type", "title"]);
    assert_eq!(nodes[1].children[0].label, "Tag 1");
}
