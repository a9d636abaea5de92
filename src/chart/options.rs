//! Chart option composition
//!
//! Every chart starts from the same baseline presentation settings and layers
//! its own overrides on top with [`merge`].

use serde_json::{Map, Value, json};

/// Deep merge of two configuration trees.
///
/// Objects in `overrides` are merged key by key into the matching object in
/// `base`; any other value (arrays and null included) replaces the base value
/// outright. Keys that only exist in `base` are kept. Neither input is touched.
pub fn merge(base: &Value, overrides: &Value) -> Value {
    let mut result = match base {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    if let Value::Object(over) = overrides {
        for (key, value) in over {
            let merged = match value {
                Value::Object(_) => {
                    let current = result.get(key).cloned().unwrap_or(Value::Null);
                    merge(&current, value)
                }
                other => other.clone(),
            };
            result.insert(key.clone(), merged);
        }
    }

    Value::Object(result)
}

/// Baseline settings shared by every chart on the dashboard.
pub fn base_options() -> Value {
    json!({
        "chart": {
            "fontFamily": "Inter, sans-serif",
            "toolbar": { "show": false },
            "background": "transparent",
            "animations": {
                "enabled": true,
                "easing": "easeinout",
                "speed": 800
            }
        },
        "colors": ["#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6"],
        "grid": {
            "borderColor": "#E5E7EB",
            "strokeDashArray": 3
        },
        "tooltip": {
            "theme": "light",
            "style": {
                "fontSize": "12px",
                "fontFamily": "Inter, sans-serif"
            }
        },
        "responsive": [{
            "breakpoint": 768,
            "options": {
                "chart": { "height": 250 },
                "legend": { "position": "bottom" }
            }
        }]
    })
}

/// Holds the baseline tree and layers chart-specific overrides on it.
#[derive(Debug, Clone)]
pub struct OptionComposer {
    base: Value,
}

impl OptionComposer {
    pub fn new(base: Value) -> Self {
        Self { base }
    }

    pub fn compose(&self, specific: &Value) -> Value {
        merge(&self.base, specific)
    }
}

impl Default for OptionComposer {
    fn default() -> Self {
        Self::new(base_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_nested_objects_are_merged() {
        let base = json!({"chart": {"toolbar": {"show": false}, "height": 200}});
        let overrides = json!({"chart": {"height": 300, "type": "area"}});

        let merged = merge(&base, &overrides);
        assert_eq!(
            merged,
            json!({"chart": {"toolbar": {"show": false}, "height": 300, "type": "area"}})
        );
    }

    #[test]
    fn test_arrays_are_replaced_wholesale() {
        let base = json!({"colors": ["#000", "#111", "#222"]});
        let overrides = json!({"colors": ["#fff"]});

        assert_eq!(merge(&base, &overrides), json!({"colors": ["#fff"]}));
    }

    #[test]
    fn test_object_replaces_scalar_and_null_replaces_object() {
        let base = json!({"legend": "hidden", "grid": {"show": true}});
        let overrides = json!({"legend": {"position": "top"}, "grid": null});

        assert_eq!(
            merge(&base, &overrides),
            json!({"legend": {"position": "top"}, "grid": null})
        );
    }

    #[test]
    fn test_non_object_inputs_are_treated_as_empty() {
        assert_eq!(merge(&Value::Null, &json!({"a": 1})), json!({"a": 1}));
        assert_eq!(merge(&json!({"a": 1}), &Value::Null), json!({"a": 1}));
        assert_eq!(merge(&json!([1, 2]), &json!("x")), json!({}));
    }

    #[test]
    fn test_inputs_are_left_untouched() {
        let base = base_options();
        let overrides = json!({"chart": {"type": "area"}, "colors": ["#fff"]});
        let base_before = base.clone();
        let overrides_before = overrides.clone();

        let _ = merge(&base, &overrides);
        assert_eq!(base, base_before);
        assert_eq!(overrides, overrides_before);
    }

    #[test]
    fn test_composer_keeps_base_settings() {
        let composer = OptionComposer::default();
        let composed = composer.compose(&json!({"chart": {"type": "area"}}));

        assert_eq!(composed["chart"]["type"], "area");
        assert_eq!(composed["chart"]["fontFamily"], "Inter, sans-serif");
        assert_eq!(composed["colors"][0], "#3B82F6");
        assert_eq!(composed["responsive"][0]["breakpoint"], 768);
    }

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i32>().prop_map(Value::from),
            "[a-z]{0,6}".prop_map(Value::from),
            prop::collection::vec(any::<i32>().prop_map(Value::from), 0..4).prop_map(Value::from),
        ]
    }

    fn tree() -> impl Strategy<Value = Value> {
        leaf().prop_recursive(3, 24, 4, |inner| {
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect()))
        })
    }

    fn object_tree() -> impl Strategy<Value = Value> {
        prop::collection::btree_map("[a-d]", tree(), 0..4)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    }

    /// Every override leaf shows up unchanged in the result.
    fn assert_override_leaves(result: &Value, overrides: &Value) {
        if let Value::Object(map) = overrides {
            for (key, value) in map {
                match value {
                    Value::Object(_) => assert_override_leaves(&result[key], value),
                    other => assert_eq!(&result[key], other),
                }
            }
        }
    }

    proptest! {
        #[test]
        fn prop_base_only_keys_are_preserved(base in object_tree(), overrides in object_tree()) {
            let merged = merge(&base, &overrides);
            for (key, value) in base.as_object().unwrap() {
                if overrides.get(key).is_none() {
                    prop_assert_eq!(&merged[key], value);
                }
            }
        }

        #[test]
        fn prop_override_leaves_win(base in object_tree(), overrides in object_tree()) {
            let merged = merge(&base, &overrides);
            assert_override_leaves(&merged, &overrides);
        }

        #[test]
        fn prop_merge_does_not_mutate(base in object_tree(), overrides in object_tree()) {
            let (b, o) = (base.clone(), overrides.clone());
            let _ = merge(&base, &overrides);
            prop_assert_eq!(base, b);
            prop_assert_eq!(overrides, o);
        }
    }
}
