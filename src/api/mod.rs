//! HTTP API surface

pub mod endpoints;
