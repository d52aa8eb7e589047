pub mod params;

pub use params::{named_params, query_column, NamedParams};
