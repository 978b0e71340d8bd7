//! # gangplank-id
//!
//! Stable identity types for deploy and release records.
//!
//! ## Design Principles
//!
//! - Identities are system-generated and opaque; job names are derived labels
//! - Every ID has a canonical string representation with strict parsing
//! - IDs support roundtrip serialization (parse → format → parse)
//! - IDs are typed so a deployment identity cannot be confused with anything else
//!
//! ## ID Format
//!
//! IDs use a prefixed format: `{prefix}_{ulid}`, for example
//! `dep_01HV4Z2WQXKJNM8GPQY6VBKC3D`.
//!
//! The ULID payload makes successive deploy identities time-ordered, which is
//! what lets the stamped job metadata double as a staleness marker: a fresh
//! deploy of the same application always sorts after the previous one.

mod error;
mod macros;
mod types;

pub use error::IdError;
pub use types::*;

/// Re-export ulid for consumers that need raw ULID operations
pub use ulid::Ulid;
