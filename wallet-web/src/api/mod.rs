//! Request and response bodies of the HTTP API.

mod types;

pub use types::*;
