//! Rendering a finalized query for the command line

use crate::error::Result;
use crate::query::{BindParams, QueryBuilder};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Query on the first line, then one `name = value` line per param
    Text,
    /// `{"query": ..., "params": {...}}`, params in binding order
    Json,
}

#[derive(Serialize)]
struct Finalized<'a> {
    query: &'a str,
    params: &'a BindParams,
}

pub fn render(builder: &QueryBuilder<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::from(builder.query());
            for (name, value) in builder.params().iter() {
                out.push('\n');
                out.push_str(name);
                out.push_str(" = ");
                out.push_str(value);
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let output = Finalized {
                query: builder.query(),
                params: builder.params(),
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}
