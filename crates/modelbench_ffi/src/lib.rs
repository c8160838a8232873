//! FFI bridge crate for the ModelBench UI host.

pub mod api;
