//! Array placeholder expansion for named-parameter SQL.
//!
//! Prepared statements bind one value per placeholder, so a template like
//! `SELECT * FROM users WHERE user IN (:users[])` cannot be bound to a list
//! directly. Register the list under `:users[]`, finalize, and the query becomes
//! `... IN (:users0, :users1)` with a matching bind map.
//!
//! ```ignore
//! let mut registry = BindingRegistry::new();
//! registry.register(":u[]", vec!["admin1", "admin2"])?;
//!
//! let mut builder = QueryBuilder::new("SELECT * FROM users WHERE user IN (:u[])", &registry);
//! builder.finalize()?;
//! assert_eq!(builder.query(), "SELECT * FROM users WHERE user IN (:u0, :u1)");
//! ```

pub mod db;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod query;

pub use error::{BindError, Result};
pub use query::{
    ArrayExpander, BindParams, BindValue, Binding, BindingRegistry, MatchMode, QueryBuilder,
};
