use std::collections::HashMap;

use serde_json::Value;

use crate::types::{ActionDescriptor, KNOWN_ACTION_KINDS};

/// Deduplicated, ordered list of group-level actions plus the editable input
/// document attached to each.
///
/// Built once per group transition; later edits to the input text are
/// user-owned state, independent of the originating descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionCatalog {
    entries: Vec<ActionDescriptor>,
    inputs: HashMap<String, String>,
}

impl ActionCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ordered entries, in the order the descriptors were advertised.
    pub fn entries(&self) -> &[ActionDescriptor] {
        &self.entries
    }

    pub fn lookup(&self, name: &str) -> Option<&ActionDescriptor> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Current input document text for an action, if the action exists.
    pub fn input(&self, name: &str) -> Option<&str> {
        self.inputs.get(name).map(String::as_str)
    }

    /// Replaces the input document for a known action. Edits for unknown
    /// names are dropped.
    pub fn set_input(&mut self, name: &str, text: String) -> bool {
        match self.inputs.get_mut(name) {
            Some(input) => {
                *input = text;
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derives the action catalog for a freshly activated group.
///
/// Pure: returns `None` when the group id has not changed, leaving the
/// caller's existing catalog (and any user edits) untouched. Otherwise
/// filters to context-free descriptors of a known kind, keeps the first
/// descriptor seen per distinct name (later duplicates, e.g. older action
/// versions, are shadowed), and synthesizes a default input document from
/// each kept descriptor's schema.
pub fn derive_catalog(
    previous_group_id: &str,
    group_id: &str,
    actions: &[ActionDescriptor],
) -> Option<ActionCatalog> {
    if previous_group_id == group_id {
        return None;
    }

    let mut catalog = ActionCatalog::empty();
    for action in actions {
        if !KNOWN_ACTION_KINDS.contains(&action.kind.as_str()) {
            continue;
        }
        if !action.context.is_empty() {
            continue;
        }
        if catalog.entries.iter().any(|kept| kept.name == action.name) {
            continue;
        }
        catalog.inputs.insert(
            action.name.clone(),
            default_input_document(action.schema.as_ref()),
        );
        catalog.entries.push(action.clone());
    }
    Some(catalog)
}

/// Renders the default input document for a schema as editable YAML text.
/// A missing or malformed schema falls back to an empty document.
pub fn default_input_document(schema: Option<&Value>) -> String {
    let defaults = schema.map(schema_defaults).unwrap_or(Value::Null);
    let document = match defaults {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other,
    };
    serde_yaml::to_string(&document).unwrap_or_else(|_| "{}\n".to_string())
}

/// Populates a JSON schema's declared defaults: an explicit `default` wins,
/// otherwise object schemas are walked property by property. Properties with
/// no resolvable default are omitted.
fn schema_defaults(schema: &Value) -> Value {
    if let Some(default) = schema.get("default") {
        return default.clone();
    }
    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        let mut defaults = serde_json::Map::new();
        for (key, sub_schema) in properties {
            match schema_defaults(sub_schema) {
                Value::Null => {}
                value => {
                    defaults.insert(key.clone(), value);
                }
            }
        }
        return Value::Object(defaults);
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_walk_nested_properties() {
        let schema = json!({
            "type": "object",
            "properties": {
                "force": { "type": "boolean", "default": false },
                "limits": {
                    "type": "object",
                    "properties": {
                        "retries": { "type": "integer", "default": 3 },
                        "comment": { "type": "string" }
                    }
                }
            }
        });

        assert_eq!(
            schema_defaults(&schema),
            json!({ "force": false, "limits": { "retries": 3 } })
        );
    }

    #[test]
    fn missing_schema_yields_empty_document() {
        assert_eq!(default_input_document(None), "{}\n");
    }
}
