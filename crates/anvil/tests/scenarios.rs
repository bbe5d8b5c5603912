//! Acceptance tests for the six concrete scenarios in the module lookup
//! and error-handling design, exercised end to end through the public API
//! rather than any internal parser function.

use anvil::{parse, ErrorCode, Lookup, SourceId};

#[test]
fn scenario_scalars() {
    let module = parse(
        "name := \"Badkraft\"\nage := 42\nadmin := true\nhealth := 20.0\nid := badkraft\n",
        SourceId::Sentinel,
    )
    .unwrap();

    assert_eq!(module.keys(), vec!["name", "age", "admin", "health", "id"]);
    assert_eq!(module.get_string("name").unwrap(), "Badkraft");
    assert_eq!(module.get_long("age").unwrap(), 42);
    assert_eq!(module.get_boolean("admin").unwrap(), true);
    assert_eq!(module.get_double("health").unwrap(), 20.0);
    assert!(module.get("id").unwrap().is_bare());
    assert_eq!(module.get("id").unwrap().as_bare().unwrap(), "badkraft");
    assert!(module.get_string("id").is_err());
}

#[test]
fn scenario_nested_object_tuple_array() {
    let module = parse(
        "player := { name := \"Grok\", pos := (10, 64, -300), inventory := [ \"a\", \"b\" ] }",
        SourceId::Sentinel,
    )
    .unwrap();

    let player = module.get_object("player").unwrap();
    assert_eq!(player.get_string("name").unwrap(), "Grok");
    let pos = player.get_tuple("pos").unwrap();
    assert_eq!(pos[2].as_long().unwrap(), -300);
    assert_eq!(player.get_array("inventory").unwrap().len(), 2);
}

#[test]
fn scenario_module_attributes_merge_in_order() {
    let module = parse(
        "@[version=\"1.0.0\", mc_version=\"1.21.10\"]\n\
         @[source=\"x\", debug=true, experimental]\n\
         x := 1\n",
        SourceId::Sentinel,
    )
    .unwrap();

    let keys: Vec<&str> = module.attributes().iter().map(|a| a.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["version", "mc_version", "source", "debug", "experimental"]
    );
    assert!(module.attributes().last().unwrap().value.is_none());
    let debug_attr = module.attributes().iter().find(|a| a.key == "debug").unwrap();
    assert_eq!(debug_attr.value.as_ref().unwrap().as_boolean().unwrap(), true);
}

#[test]
fn scenario_duplicate_top_level_key_fails_the_parse() {
    let outcome = parse("a := 1\na := 2\n", SourceId::Sentinel).unwrap_err();
    assert!(outcome.errors.iter().any(|e| e.code == ErrorCode::DuplicateTopLevelKey));
}

#[test]
fn scenario_tuple_arity() {
    let outcome = parse("x := (1)\n", SourceId::Sentinel).unwrap_err();
    assert!(outcome.errors.iter().any(|e| e.code == ErrorCode::TupleTooShort));

    let outcome = parse("x := ()\n", SourceId::Sentinel).unwrap_err();
    assert!(outcome.errors.iter().any(|e| e.code == ErrorCode::EmptyTupleElement));
}

#[test]
fn scenario_attribute_literal_restriction() {
    let outcome = parse("x @[meta=[1,2]] := 1\n", SourceId::Sentinel).unwrap_err();
    assert!(outcome
        .errors
        .iter()
        .any(|e| e.code == ErrorCode::InvalidValueInAttribute));
}

#[test]
fn parsing_is_deterministic() {
    let source = "player := { name := \"Grok\", pos := (10, 64, -300) }\ncount := 3\n";
    let first = parse(source, SourceId::Sentinel).unwrap();
    let second = parse(source, SourceId::Sentinel).unwrap();
    assert!(first.statements_equal(&second));
}

#[test]
fn keys_and_try_get_agree() {
    let module = parse("a := 1\nb := 2\n", SourceId::Sentinel).unwrap();
    for key in module.keys() {
        assert!(module.try_get(key).is_some());
    }
    assert!(module.try_get("missing").is_none());
}

#[test]
fn lenient_accessors_never_fail_even_on_missing_keys() {
    let module = parse("a := 1\n", SourceId::Sentinel).unwrap();
    assert_eq!(module.try_get("missing"), None);
    assert_eq!(module.get("a").unwrap().as_string_or("fallback"), "fallback");
}

#[test]
fn formatted_string_reparses_to_a_structurally_equal_module() {
    let module = parse(
        "player := { name := \"Grok\", pos := (10, 64, -300) }\ncount := 3\n",
        SourceId::Sentinel,
    )
    .unwrap();
    let text = module.as_formatted_string();
    let reparsed = parse(&text, SourceId::Sentinel).unwrap();
    assert!(module.statements_equal(&reparsed));
}

#[test]
fn error_budget_caps_at_twenty_five_but_total_count_keeps_growing() {
    let mut source = String::new();
    for i in 0..40 {
        source.push_str(&format!("k{i} := (1)\n"));
    }
    let outcome = parse(&source, SourceId::Sentinel).unwrap_err();
    assert_eq!(outcome.errors.len(), 25);
    assert_eq!(outcome.total_error_count, 40);
}
