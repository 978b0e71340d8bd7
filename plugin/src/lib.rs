//! # gangplank-plugin
//!
//! Job reconciliation and rollout engine for deploying containerized
//! applications onto a Nomad cluster and cutting traffic over to them
//! through Traefik routing tags.
//!
//! Two capabilities, exposed as traits in [`component`]:
//!
//! - **Deploy** ([`NomadPlatform`]): synthesize a job definition from the
//!   configured jobspec template (or adopt the job already registered under
//!   the derived name), stamp it with a fresh deployment identity and nonce,
//!   register it, and monitor the resulting evaluation to a terminal state.
//! - **Release** ([`TraefikReleaser`]): fetch the deployed job fresh, find
//!   services carrying the `waypoint.release-router=<name>` sentinel tag,
//!   upsert a `traefik.http.routers.<name>.rule=Host(...)` tag bound to the
//!   target domain, and re-register the job.
//!
//! The engine owns no durable state; job definitions and evaluation history
//! live in the scheduler. Every operation is one sequential async call whose
//! only suspension point is the evaluation poll loop, which is cancelled by
//! dropping the future (e.g. via `tokio::time::timeout`).

pub mod component;
pub mod config;
pub mod env;
pub mod error;
pub mod monitor;
pub mod status;
pub mod template;

mod deploy;
mod release;

pub use component::{Deployment, Platform, Release, ReleaseManager, Source};
pub use config::{DeployConfig, ReleaseConfig};
pub use deploy::{NomadPlatform, META_ID, META_NONCE};
pub use error::{DeployError, ReleaseError, RolloutError};
pub use monitor::EvalMonitor;
pub use release::{TraefikReleaser, RELEASE_ROUTER_TAG_PREFIX};
pub use status::StatusReporter;
