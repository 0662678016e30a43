//! Request handler module
//!
//! Dispatch plus the user resource handlers behind the route table.

pub mod router;
pub mod users;

pub use router::handle_request;
