//! HTTP protocol layer module
//!
//! Response construction shared by the dispatcher and the handlers.

pub mod response;

pub use response::{
    build_404_response, build_413_response, build_health_response, build_options_response,
    build_text_response,
};
