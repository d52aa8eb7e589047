//! Expansion of one array binding into numbered scalar placeholders

use super::value::{BindParams, PLACEHOLDER_MARKER};

/// Generates the placeholder list and bind map for an array binding.
///
/// For prefix `pre` and values `["foo", "bar"]` this yields the placeholder
/// list `:pre0, :pre1` and the bindings `{pre0: foo, pre1: bar}`.
#[derive(Debug, Clone)]
pub struct ArrayExpander {
    placeholders: String,
    bindings: BindParams,
}

impl ArrayExpander {
    pub fn new<S: AsRef<str>>(prefix: &str, values: &[S]) -> Self {
        let mut placeholders = String::with_capacity(values.len() * (prefix.len() + 4));
        let mut bindings = BindParams::with_capacity(values.len());

        for (i, value) in values.iter().enumerate() {
            let name = format!("{}{}", prefix, i);
            if i > 0 {
                placeholders.push_str(", ");
            }
            placeholders.push(PLACEHOLDER_MARKER);
            placeholders.push_str(&name);
            bindings.insert(name, value.as_ref());
        }

        Self {
            placeholders,
            bindings,
        }
    }

    /// Comma-separated placeholders, e.g. `:pre0, :pre1`
    pub fn placeholder_list(&self) -> &str {
        &self.placeholders
    }

    /// Generated name to value, in input order
    pub fn bindings(&self) -> &BindParams {
        &self.bindings
    }

    pub fn into_parts(self) -> (String, BindParams) {
        (self.placeholders, self.bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_values() {
        let expander = ArrayExpander::new("pre", &["foo", "bar", "baz"]);

        assert_eq!(expander.placeholder_list(), ":pre0, :pre1, :pre2");

        let bindings: Vec<_> = expander.bindings().iter().collect();
        assert_eq!(
            bindings,
            vec![("pre0", "foo"), ("pre1", "bar"), ("pre2", "baz")]
        );
    }

    #[test]
    fn test_expand_single_value() {
        let expander = ArrayExpander::new("u", &["admin".to_string()]);
        assert_eq!(expander.placeholder_list(), ":u0");
        assert_eq!(expander.bindings().get("u0"), Some("admin"));
        assert_eq!(expander.bindings().len(), 1);
    }

    #[test]
    fn test_expand_empty() {
        let values: [&str; 0] = [];
        let expander = ArrayExpander::new("pre", &values);
        assert_eq!(expander.placeholder_list(), "");
        assert!(expander.bindings().is_empty());
    }

    #[test]
    fn test_token_count_matches_values() {
        let values: Vec<String> = (0..12).map(|i| format!("v{}", i)).collect();
        let (placeholders, bindings) = ArrayExpander::new("p", &values).into_parts();

        let tokens: Vec<&str> = placeholders.split(", ").collect();
        assert_eq!(tokens.len(), 12);
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(*token, format!(":p{}", i));
            assert_eq!(bindings.get(&format!("p{}", i)), Some(values[i].as_str()));
        }
    }
}
