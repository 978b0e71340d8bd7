//! Typed ID definitions.
//!
//! Each ID type has a unique prefix that identifies the resource type.
//! IDs are ULID-based for sortability and uniqueness.

use crate::define_id;

// A deployment identity is minted once per deploy attempt and never reused.
// The derived job name (`<app>-<id>`, lower-cased) and the stamped job
// metadata both carry it.
define_id!(DeploymentId, "dep");
