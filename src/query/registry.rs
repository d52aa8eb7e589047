//! Caller-owned collection of label registrations

use super::value::{is_array_label, BindValue, Binding, ARRAY_MARKER, PLACEHOLDER_MARKER};
use crate::error::{BindError, Result};
use tracing::trace;

/// Ordered, append-only list of bindings consulted by `QueryBuilder::finalize`
#[derive(Debug, Clone, Default)]
pub struct BindingRegistry {
    bindings: Vec<Binding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a label and value after checking that their shapes agree.
    ///
    /// Array labels (`:name[]`) need a list, every other label a scalar.
    pub fn register(&mut self, label: impl Into<String>, value: impl Into<BindValue>) -> Result<()> {
        let label = label.into();
        let value = value.into();

        match (is_array_label(&label), value.is_list()) {
            (true, false) => {
                return Err(BindError::ShapeMismatch {
                    label,
                    expected: "a list",
                })
            }
            (false, true) => {
                return Err(BindError::ShapeMismatch {
                    label,
                    expected: "a scalar",
                })
            }
            _ => {}
        }

        trace!(label = %label, "Registered binding");
        self.bindings.push(Binding { label, value });
        Ok(())
    }

    /// Register `:name` bound to a single value.
    ///
    /// A `name` ending in `[]` would form an array label, which needs a list.
    pub fn register_scalar(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.register(
            format!("{}{}", PLACEHOLDER_MARKER, name),
            BindValue::Scalar(value.into()),
        )
    }

    /// Register `:name[]` bound to an ordered list
    pub fn register_list<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bindings.push(Binding {
            label: format!("{}{}{}", PLACEHOLDER_MARKER, name, ARRAY_MARKER),
            value: BindValue::List(values.into_iter().map(Into::into).collect()),
        });
    }

    /// Drop every registration, e.g. at a request boundary
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.bindings.iter()
    }
}

impl<'a> IntoIterator for &'a BindingRegistry {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_well_shaped() {
        let mut registry = BindingRegistry::new();
        registry.register(":tags[]", vec!["a", "b"]).unwrap();
        registry.register(":name", "alice").unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_array_label_rejects_scalar() {
        let mut registry = BindingRegistry::new();
        let err = registry.register(":tags[]", "a").unwrap_err();
        assert!(matches!(
            err,
            BindError::ShapeMismatch { ref label, expected: "a list" } if label == ":tags[]"
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_scalar_label_rejects_list() {
        let mut registry = BindingRegistry::new();
        let err = registry.register(":name", vec!["a"]).unwrap_err();
        assert!(matches!(err, BindError::ShapeMismatch { expected: "a scalar", .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_typed_registration_builds_labels() {
        let mut registry = BindingRegistry::new();
        registry.register_list("u", ["admin1", "admin2"]);
        registry.register_scalar("id", "42").unwrap();

        let labels: Vec<&str> = registry.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec![":u[]", ":id"]);
        assert_eq!(
            registry.iter().next().map(|b| &b.value),
            Some(&BindValue::from(vec!["admin1", "admin2"]))
        );
    }

    #[test]
    fn test_scalar_name_with_array_marker_is_rejected() {
        let mut registry = BindingRegistry::new();
        let err = registry.register_scalar("tags[]", "x").unwrap_err();
        assert!(matches!(
            err,
            BindError::ShapeMismatch { ref label, expected: "a list" } if label == ":tags[]"
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_finalize_skips_mis_shaped_entry() {
        let mut registry = BindingRegistry::new();
        registry.bindings.push(Binding {
            label: ":tags[]".to_string(),
            value: BindValue::from("x"),
        });
        registry.bindings.push(Binding {
            label: ":id".to_string(),
            value: BindValue::from(vec!["1", "2"]),
        });

        let template = "SELECT * FROM t WHERE tag IN (:tags[]) AND id = :id";
        let mut builder = crate::query::QueryBuilder::new(template, &registry);
        builder.finalize().unwrap();

        assert_eq!(builder.query(), template);
        assert!(builder.params().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut registry = BindingRegistry::new();
        registry.register_scalar("id", "1").unwrap();
        registry.clear();
        assert!(registry.is_empty());
    }
}
