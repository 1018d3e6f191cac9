//! Core library for the credit approval service.
//!
//! The `lending` module carries the domain: intake validation, the pure
//! eligibility evaluator, the repository abstraction, the service facade, and
//! the HTTP router. `config`, `error`, and `telemetry` provide the runtime
//! scaffolding shared with the api service crate.

pub mod config;
pub mod error;
pub mod lending;
pub mod telemetry;
