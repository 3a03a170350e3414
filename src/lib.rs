//! AI-assisted forex signal gateway.
//!
//! Accepts candle data from trading agents, delegates analysis to an external
//! provider and normalizes whatever comes back into a fixed signal shape.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
