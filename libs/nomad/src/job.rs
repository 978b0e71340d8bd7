//! Serde model of the Nomad job object.
//!
//! Only the fields this engine reads or rewrites are typed; everything else
//! a fetched job carries is captured in a flattened `extra` map so that a
//! re-registered job round-trips the scheduler's copy unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Nomad job: one or more task groups plus job-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "Region", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(rename = "Namespace", default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(rename = "Datacenters", default, skip_serializing_if = "Vec::is_empty")]
    pub datacenters: Vec<String>,

    /// Opaque job metadata. The deploy identity and nonce are stamped here.
    #[serde(rename = "Meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<BTreeMap<String, String>>,

    #[serde(rename = "TaskGroups", default, skip_serializing_if = "Vec::is_empty")]
    pub task_groups: Vec<TaskGroup>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    /// Set a metadata entry, creating the map if the job has none.
    /// Additive: existing keys other than `key` are untouched.
    pub fn set_meta(&mut self, key: &str, value: impl Into<String>) {
        self.meta
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.into());
    }

    /// Read a metadata entry.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.as_ref()?.get(key).map(String::as_str)
    }
}

/// A set of co-located tasks plus their service and network declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskGroup {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "Count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,

    #[serde(rename = "Services", default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,

    #[serde(rename = "Tasks", default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A service declaration inside a task group. Tags are where the release
/// router sentinel and the injected routing rules live.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "PortLabel", default, skip_serializing_if = "Option::is_none")]
    pub port_label: Option<String>,

    #[serde(rename = "Tags", default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A task. The engine never rewrites tasks; the type exists so a fetched
/// job round-trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
