//! Deep merge of layered YAML configuration.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Sequences are replaced entirely (`ignore_patterns` in a user config
//!   replaces the default list)
//! - Null values in the overlay delete the key from the base
//! - Scalars in the overlay replace scalars in the base

use serde_yaml::Value;

/// Merge `overlay` on top of `base`.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, value) in overlay_map {
                if value.is_null() {
                    merged.remove(key);
                    continue;
                }
                let next = match base_map.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Mapping(merged)
        }
        // An empty file parses to null: keep what we have.
        (base, Value::Null) => base.clone(),
        (_, overlay) => overlay.clone(),
    }
}

/// Merge layers in order; later layers win.
pub fn merge_layers(layers: &[Value]) -> Value {
    layers
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn overlay_replaces_only_conflicting_keys() {
        let base = yaml(
            r#"
render:
  default_tex_name: main
  project_data_folder: .texproject
"#,
        );
        let overlay = yaml(
            r#"
render:
  default_tex_name: paper
"#,
        );

        let merged = deep_merge(&base, &overlay);

        assert_eq!(merged["render"]["default_tex_name"], "paper");
        assert_eq!(merged["render"]["project_data_folder"], ".texproject");
    }

    #[test]
    fn sequences_are_replaced() {
        let base = yaml("process:\n  ignore_patterns: ['*.aux', '*.log']");
        let overlay = yaml("process:\n  ignore_patterns: ['*.pdf']");

        let merged = deep_merge(&base, &overlay);
        let patterns = merged["process"]["ignore_patterns"].as_sequence().unwrap();

        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0], "*.pdf");
    }

    #[test]
    fn null_deletes_inherited_key() {
        let base = yaml("github:\n  org: acme\n  archive: papers");
        let overlay = yaml("github:\n  org: null");

        let merged = deep_merge(&base, &overlay);

        assert!(merged["github"].get("org").is_none());
        assert_eq!(merged["github"]["archive"], "papers");
    }

    #[test]
    fn empty_layer_keeps_base() {
        let base = yaml("user:\n  name: Ada");
        let merged = deep_merge(&base, &Value::Null);
        assert_eq!(merged["user"]["name"], "Ada");
    }

    #[test]
    fn layers_merge_in_order() {
        let merged = merge_layers(&[yaml("a: 1\nb: 2"), yaml("b: 3\nc: 4"), yaml("c: 5")]);

        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 3);
        assert_eq!(merged["c"], 5);
    }
}
