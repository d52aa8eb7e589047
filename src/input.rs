//! Binding input from command-line pairs and JSON files

use crate::error::{BindError, Result};
use crate::query::value::is_array_label;
use crate::query::{BindValue, Binding, BindingRegistry};
use std::path::Path;
use tracing::{debug, info};

/// Parse `LABEL=VALUE`; array labels split VALUE on `separator`.
///
/// `:u[]=a,b` becomes a two-element list, `:id=42` a scalar and `:u[]=` an
/// empty list.
pub fn parse_bind_arg(arg: &str, separator: &str) -> Result<Binding> {
    let (label, raw) = arg
        .split_once('=')
        .ok_or_else(|| BindError::InvalidBinding(format!("expected LABEL=VALUE, got {:?}", arg)))?;

    if label.is_empty() {
        return Err(BindError::InvalidBinding(format!("empty label in {:?}", arg)));
    }

    let value = if is_array_label(label) {
        if raw.is_empty() {
            BindValue::List(Vec::new())
        } else if separator.is_empty() {
            BindValue::List(vec![raw.to_string()])
        } else {
            BindValue::List(raw.split(separator).map(str::to_string).collect())
        }
    } else {
        BindValue::Scalar(raw.to_string())
    };

    Ok(Binding {
        label: label.to_string(),
        value,
    })
}

/// Read a JSON array of `{"label": ..., "value": ...}` entries, in file order
pub fn load_bindings_file(path: &Path) -> Result<Vec<Binding>> {
    let content = std::fs::read_to_string(path)?;
    let bindings: Vec<Binding> = serde_json::from_str(&content)?;
    info!("Loaded {} bindings from {}", bindings.len(), path.display());
    Ok(bindings)
}

/// Register each binding in order, stopping at the first shape mismatch
pub fn register_all<I>(registry: &mut BindingRegistry, bindings: I) -> Result<()>
where
    I: IntoIterator<Item = Binding>,
{
    for binding in bindings {
        registry.register(binding.label, binding.value)?;
    }
    Ok(())
}

/// Registry for the command line: file entries first, then `--bind` pairs
pub fn build_registry<S: AsRef<str>>(
    bindings_file: Option<&Path>,
    binds: &[S],
    separator: &str,
) -> Result<BindingRegistry> {
    let mut registry = BindingRegistry::new();

    if let Some(path) = bindings_file {
        register_all(&mut registry, load_bindings_file(path)?)?;
    }

    for arg in binds {
        let binding = parse_bind_arg(arg.as_ref(), separator)?;
        debug!(label = %binding.label, "Binding from command line");
        registry.register(binding.label, binding.value)?;
    }

    Ok(registry)
}
