// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde_json::{Map, Value};

// One row's worth of field -> value data. Insertion order is preserved
// (serde_json "preserve_order"), which column derivation depends on.
pub type Record = Map<String, Value>;

// Scalar display form: what a cell or option shows for a JSON value.
// Null renders empty; non-scalar values fall back to compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::display_value;
    use serde_json::{Value, json};

    #[test]
    fn strings_render_without_quotes() {
        assert_eq!(display_value(&json!("plumbing")), "plumbing");
    }

    #[test]
    fn numbers_and_bools_render_canonically() {
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&json!(2.5)), "2.5");
        assert_eq!(display_value(&json!(true)), "true");
    }

    #[test]
    fn null_renders_empty() {
        assert_eq!(display_value(&Value::Null), "");
    }

    #[test]
    fn non_scalars_fall_back_to_json() {
        assert_eq!(display_value(&json!(["a", "b"])), "[\"a\",\"b\"]");
    }

    #[test]
    fn record_preserves_field_order() {
        let record: super::Record =
            serde_json::from_str("{\"zeta\":1,\"alpha\":2,\"mid\":3}").expect("valid record");
        let keys: Vec<&String> = record.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }
}
