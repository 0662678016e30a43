//! Routing module
//!
//! Provides the declarative route table and the path pattern matcher
//! behind it. Patterns support `:name` parameter segments.

mod matcher;
mod table;

pub use matcher::PathParams;
pub use table::{HandlerFn, RouteTable};
