//! Query template finalization

use super::expander::ArrayExpander;
use super::matching::{LabelMatcher, MatchMode};
use super::registry::BindingRegistry;
use super::value::{is_array_label, label_prefix, BindParams, BindValue};
use crate::error::Result;
use tracing::{debug, trace, warn};

/// Rewrites `:name[]` labels in a template and collects the bind map.
///
/// Labels come from a [`BindingRegistry`]; labels missing from the template
/// are skipped, so one registry can serve several queries.
pub struct QueryBuilder<'r> {
    query: String,
    params: BindParams,
    registry: &'r BindingRegistry,
    match_mode: MatchMode,
}

impl<'r> QueryBuilder<'r> {
    pub fn new(template: impl Into<String>, registry: &'r BindingRegistry) -> Self {
        Self {
            query: template.into(),
            params: BindParams::new(),
            registry,
            match_mode: MatchMode::default(),
        }
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Expand array labels and record scalar bindings, in registration order.
    ///
    /// Only fails when a boundary pattern cannot be compiled.
    pub fn finalize(&mut self) -> Result<()> {
        for binding in self.registry {
            let matcher = LabelMatcher::new(&binding.label, self.match_mode)?;
            if !matcher.is_match(&self.query) {
                trace!(label = %binding.label, "Label not present in query, skipping");
                continue;
            }

            let prefix = label_prefix(&binding.label);

            match (is_array_label(&binding.label), &binding.value) {
                (true, BindValue::List(values)) => {
                    let (placeholders, bindings) =
                        ArrayExpander::new(prefix, values.as_slice()).into_parts();
                    self.query = matcher.replace_all(&self.query, &placeholders);
                    debug!(
                        label = %binding.label,
                        count = values.len(),
                        "Expanded array label"
                    );
                    self.params.extend(bindings);
                }
                (false, BindValue::Scalar(value)) => {
                    debug!(label = %binding.label, "Bound scalar label");
                    self.params.insert(prefix, value.as_str());
                }
                _ => {
                    warn!(label = %binding.label, "Label and value shapes differ, skipping");
                }
            }
        }

        debug!(params = self.params.len(), "Query finalized");
        Ok(())
    }

    /// Current query text; the unmodified template before `finalize`
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current bind map; empty before `finalize`
    pub fn params(&self) -> &BindParams {
        &self.params
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    pub fn into_parts(self) -> (String, BindParams) {
        (self.query, self.params)
    }
}
