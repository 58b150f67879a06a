//! Custom extractors.

mod json;

pub use json::{JsonBody, JsonBodyRejection};
