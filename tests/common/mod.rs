//! Shared test utilities for sendy integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Gateways built here are deterministic; the fake SDK
//! answers on spawned tasks and honours `tokio::time::pause()`.

pub mod assertions;
pub mod builders;
pub mod fake_sdk;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fake_sdk::*;
pub use fixtures::*;
