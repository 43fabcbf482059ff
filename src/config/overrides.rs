use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Settings given on the command line; unset values leave lower layers alone
#[derive(Debug, Clone, Default, Serialize)]
pub struct CliOverrides {
    pub markup_sources: Vec<PathBuf>,
    pub data_sources: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub single_match: Option<bool>,
    pub follow_symlinks: Option<bool>,
}

impl CliOverrides {
    /// Serialized form with every unset value removed
    pub fn to_value(&self) -> Value {
        prune_unset(self)
    }
}

/// Drop nulls and empty arrays from any serializable structure
pub fn prune_unset<T: Serialize>(input: T) -> Value {
    let mut value = serde_json::to_value(input).unwrap_or(Value::Null);
    prune_recursive(&mut value);
    value
}

fn prune_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| match v {
                Value::Null => false,
                Value::Array(items) => !items.is_empty(),
                _ => true,
            });
            for (_, v) in map.iter_mut() {
                prune_recursive(v);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                prune_recursive(item);
            }
        }
        _ => {}
    }
}
