//! Core application primitives (HTTP surface, analysis gateway)

pub mod gateway;
pub mod http;

pub use gateway::*;
pub use http::*;
