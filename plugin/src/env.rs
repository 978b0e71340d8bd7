//! Variable environment builder.
//!
//! Two separate namespaces come out of here:
//!
//! - the *application environment* (`PORT`, static config, caller runtime
//!   env) that the deployed task sees, and
//! - the *template variables* (`NOMAD_VAR_*` plus caller `job_vars`) that
//!   the jobspec synthesizer substitutes.
//!
//! Pure functions of their inputs. `BTreeMap` keeps both deterministic.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::config::DeployConfig;

/// Service port used when the config leaves `service_port` unset.
pub const DEFAULT_SERVICE_PORT: u32 = 3000;

/// A template variable value encoding failed.
#[derive(Debug, Error)]
#[error("failed to encode template variable '{key}': {reason}")]
pub struct EnvError {
    pub key: String,
    pub reason: String,
}

/// Build the application environment by layering, in increasing priority:
/// `PORT` derived from the service port, the static environment from
/// configuration, then the caller-supplied runtime environment.
pub fn app_env(
    service_port: u32,
    static_env: &BTreeMap<String, String>,
    runtime_env: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    env.insert("PORT".to_string(), service_port.to_string());

    for (k, v) in static_env {
        env.insert(k.clone(), v.clone());
    }
    for (k, v) in runtime_env {
        env.insert(k.clone(), v.clone());
    }

    env
}

/// Build the template substitution variables.
///
/// Plain string values pass through verbatim; structured values (the app
/// environment map, the numeric service port) are embedded as canonical
/// JSON. An encoding failure fails the whole deploy rather than dropping
/// the key.
pub fn template_vars(
    config: &DeployConfig,
    image: &str,
    job_name: &str,
    app_env: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, EnvError> {
    let service_port = config.service_port.unwrap_or(DEFAULT_SERVICE_PORT);

    let mut raw: Vec<(String, Value)> = vec![
        (
            "NOMAD_VAR_waypoint_env".to_string(),
            serde_json::to_value(app_env).map_err(|e| EnvError {
                key: "NOMAD_VAR_waypoint_env".to_string(),
                reason: e.to_string(),
            })?,
        ),
        (
            "NOMAD_VAR_waypoint_image".to_string(),
            Value::String(image.to_string()),
        ),
        (
            "NOMAD_VAR_waypoint_job_name".to_string(),
            Value::String(job_name.to_string()),
        ),
        (
            "NOMAD_VAR_waypoint_service_port".to_string(),
            Value::from(service_port),
        ),
    ];
    for (k, v) in &config.job_vars {
        raw.push((k.clone(), Value::String(v.clone())));
    }

    let mut vars = BTreeMap::new();
    for (key, value) in raw {
        let encoded = encode_value(&key, &value)?;
        vars.insert(key, encoded);
    }
    Ok(vars)
}

/// Render variables as `KEY=VALUE` lines for debug logging.
pub fn to_env_strings(vars: &BTreeMap<String, String>) -> Vec<String> {
    vars.iter().map(|(k, v)| format!("{k}={v}")).collect()
}

fn encode_value(key: &str, value: &Value) -> Result<String, EnvError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => serde_json::to_string(other).map_err(|e| EnvError {
            key: key.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config(service_port: Option<u32>) -> DeployConfig {
        let mut config: DeployConfig = toml::from_str(r#"jobspec = "{}""#).unwrap();
        config.service_port = service_port;
        config
    }

    #[rstest]
    #[case(None, "3000")]
    #[case(Some(3000), "3000")]
    #[case(Some(8080), "8080")]
    fn port_follows_service_port_with_default(
        #[case] service_port: Option<u32>,
        #[case] expected: &str,
    ) {
        let env = app_env(
            service_port.unwrap_or(DEFAULT_SERVICE_PORT),
            &BTreeMap::new(),
            &BTreeMap::new(),
        );
        assert_eq!(env.get("PORT").map(String::as_str), Some(expected));
    }

    #[test]
    fn runtime_env_wins_over_static_env() {
        let static_env = BTreeMap::from([
            ("LOG_LEVEL".to_string(), "debug".to_string()),
            ("MODE".to_string(), "worker".to_string()),
        ]);
        let runtime_env = BTreeMap::from([("MODE".to_string(), "web".to_string())]);

        let env = app_env(3000, &static_env, &runtime_env);
        assert_eq!(env.get("MODE").map(String::as_str), Some("web"));
        assert_eq!(env.get("LOG_LEVEL").map(String::as_str), Some("debug"));
    }

    #[test]
    fn static_env_may_override_port() {
        let static_env = BTreeMap::from([("PORT".to_string(), "9999".to_string())]);
        let env = app_env(3000, &static_env, &BTreeMap::new());
        assert_eq!(env.get("PORT").map(String::as_str), Some("9999"));
    }

    #[test]
    fn template_vars_carry_builtins_and_job_vars() {
        let mut config = config(Some(8080));
        config
            .job_vars
            .insert("extra_var".to_string(), "plain".to_string());

        let app_env = app_env(8080, &BTreeMap::new(), &BTreeMap::new());
        let vars = template_vars(&config, "registry/web:1", "web-dep_abc", &app_env).unwrap();

        assert_eq!(
            vars.get("NOMAD_VAR_waypoint_image").map(String::as_str),
            Some("registry/web:1")
        );
        assert_eq!(
            vars.get("NOMAD_VAR_waypoint_job_name").map(String::as_str),
            Some("web-dep_abc")
        );
        assert_eq!(
            vars.get("NOMAD_VAR_waypoint_service_port")
                .map(String::as_str),
            Some("8080")
        );
        assert_eq!(vars.get("extra_var").map(String::as_str), Some("plain"));
    }

    #[test]
    fn structured_env_value_is_canonical_json() {
        let app_env = BTreeMap::from([
            ("PORT".to_string(), "3000".to_string()),
            ("A".to_string(), "1".to_string()),
        ]);
        let vars = template_vars(&config(None), "img", "job", &app_env).unwrap();
        // BTreeMap ordering makes the encoding deterministic
        assert_eq!(
            vars.get("NOMAD_VAR_waypoint_env").map(String::as_str),
            Some(r#"{"A":"1","PORT":"3000"}"#)
        );
    }

    #[test]
    fn env_strings_are_key_value_lines() {
        let vars = BTreeMap::from([("K".to_string(), "V".to_string())]);
        assert_eq!(to_env_strings(&vars), vec!["K=V"]);
    }
}
