pub mod builder;
pub mod expander;
pub mod matching;
pub mod registry;
pub mod value;

pub use builder::QueryBuilder;
pub use expander::ArrayExpander;
pub use matching::MatchMode;
pub use registry::BindingRegistry;
pub use value::{BindParams, BindValue, Binding};
