//! The three places settings come from: YAML files, `.env` files and the
//! process environment. Each one writes flat `section.key` strings into the
//! same map, later sources overwriting earlier ones.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;

use super::ConfigError;

pub(super) type Values = BTreeMap<String, String>;

pub(super) fn yaml_file(path: &Path, values: &mut Values) -> Result<(), ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ConfigError::Load(format!("{}: {e}", path.display()))),
    };
    yaml_str(&text, values).map_err(|e| match e {
        ConfigError::Load(msg) => ConfigError::Load(format!("{}: {msg}", path.display())),
        other => other,
    })?;
    tracing::debug!(file = %path.display(), "configuration file applied");
    Ok(())
}

pub(super) fn yaml_str(text: &str, values: &mut Values) -> Result<(), ConfigError> {
    let root: Value = serde_yaml::from_str(text).map_err(|e| ConfigError::Load(e.to_string()))?;
    match root {
        Value::Null => Ok(()),
        Value::Mapping(_) => collect_scalars(None, root, values),
        _ => Err(ConfigError::Load("top level must be a mapping".into())),
    }
}

/// Walk nested mappings, recording each scalar under its dotted path.
/// Nulls mean "unset" and are skipped; lists have no flat form.
fn collect_scalars(path: Option<&str>, node: Value, values: &mut Values) -> Result<(), ConfigError> {
    let scalar = match node {
        Value::Mapping(entries) => {
            for (name, child) in entries {
                let name = match name {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return Err(ConfigError::Load("mapping keys must be scalars".into())),
                };
                let child_path = match path {
                    Some(parent) => format!("{parent}.{name}"),
                    None => name,
                };
                collect_scalars(Some(&child_path), child, values)?;
            }
            return Ok(());
        }
        Value::Null => return Ok(()),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Sequence(_) | Value::Tagged(_) => {
            return Err(ConfigError::Load(format!(
                "'{}' must be a scalar or a mapping",
                path.unwrap_or_default()
            )))
        }
    };
    if let Some(path) = path {
        values.insert(path.to_owned(), scalar);
    }
    Ok(())
}

/// Export a `.env` file into the process environment. Variables that are
/// already set keep their value; a missing file is skipped.
pub(super) fn dotenv_file(path: &Path) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(file = %path.display(), "environment file applied");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::Load(format!("{}: {e}", path.display()))),
    }
}

/// `DATABASE_URL=...` lands on `database.url`.
pub(super) fn environment(values: &mut Values) {
    values.extend(
        std::env::vars().map(|(name, value)| (name.to_ascii_lowercase().replace('_', "."), value)),
    );
}
