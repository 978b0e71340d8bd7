//! # gangplank-nomad
//!
//! Thin synchronous-feeling wrapper over the Nomad HTTP API: job lookup by
//! name, job registration, and evaluation status. This is the sole network
//! boundary of the deploy/release engine.
//!
//! ## Design Principles
//!
//! - Connection parameters are an explicit [`NomadConfig`] injected at
//!   construction, never implicit global state, so callers can point the
//!   client at a fake server in tests.
//! - "Job not found" is a typed error variant ([`NomadError::JobNotFound`]),
//!   classified in exactly one place from the response, so callers choose
//!   create-vs-reuse behavior without string matching.
//! - No retries at this layer; every other error propagates with the
//!   scheduler's own message intact.

mod client;
mod config;
mod error;
mod evaluation;
mod job;

pub use client::NomadClient;
pub use config::NomadConfig;
pub use error::NomadError;
pub use evaluation::{EvalStatus, Evaluation};
pub use job::{Job, Service, Task, TaskGroup};
