//! Release capability: rewrite router-rule tags on a running job's services
//! and re-register it.

use async_trait::async_trait;
use gangplank_nomad::{Job, NomadClient, NomadError};
use validator::Validate;

use crate::component::{Deployment, Release, ReleaseManager};
use crate::config::ReleaseConfig;
use crate::error::ReleaseError;
use crate::monitor::EvalMonitor;
use crate::status::StatusReporter;

/// Sentinel tag marking the service that should receive a routing rule.
pub const RELEASE_ROUTER_TAG_PREFIX: &str = "waypoint.release-router=";

/// The release capability: binds router-tagged services to a public domain
/// through Traefik tags.
pub struct TraefikReleaser {
    config: ReleaseConfig,
    client: NomadClient,
}

impl TraefikReleaser {
    /// Validate the configuration and bind it to a scheduler client.
    pub fn new(config: ReleaseConfig, client: NomadClient) -> Result<Self, ReleaseError> {
        config
            .validate()
            .map_err(|e| ReleaseError::Config(e.to_string()))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl ReleaseManager for TraefikReleaser {
    async fn release(
        &self,
        target: &Deployment,
        status: &dyn StatusReporter,
    ) -> Result<Release, ReleaseError> {
        status.update(&format!("Looking up job \"{}\"", target.name));

        // Always operate on the scheduler's current copy, not the
        // deploy-time one, so unrelated changes are preserved.
        let mut job = match self.client.job(&target.name).await {
            Ok(job) => job,
            Err(NomadError::JobNotFound) => {
                return Err(ReleaseError::TargetJobNotFound(target.name.clone()))
            }
            Err(e) => return Err(e.into()),
        };

        let matched = rewrite_router_tags(&mut job, &self.config)?;
        if matched == 0 {
            // A job may legitimately have no router-tagged services.
            status.warn("No release-router tagged services found; routing rules unchanged");
        } else {
            tracing::debug!(services = matched, domain = %self.config.domain, "rewrote routing rules");
        }

        status.update("Updating job...");
        let eval_id = self.client.register(&job).await?;
        status.ok("Job update submitted");

        if self.config.monitor {
            status.update(&format!("Monitoring evaluation \"{eval_id}\""));
            EvalMonitor::new(&self.client).monitor(&eval_id, status).await?;
        }
        status.ok(&format!(
            "Release of {} to {} rolled out",
            target.name, self.config.domain
        ));

        Ok(Release {
            id: target.id,
            name: target.name.clone(),
            url: format!("https://{}", self.config.domain),
        })
    }
}

/// Rewrite routing-rule tags on every router-bound service.
///
/// A service is router-bound when it carries exactly one sentinel tag
/// (`waypoint.release-router=<name>`), or, by convention, when it has no
/// sentinel tag but its port label matches `service_port_label` (then the
/// service name is the router name). More than one sentinel tag on a single
/// service is rejected as ambiguous.
///
/// The routing rule is upserted by router name: an existing
/// `traefik.http.routers.<name>.rule=` tag is replaced in place, otherwise
/// the rule is appended. Re-running a release with the same domain is
/// therefore idempotent and never accumulates duplicate rules.
///
/// Returns the number of services that received a rule.
fn rewrite_router_tags(job: &mut Job, config: &ReleaseConfig) -> Result<usize, ReleaseError> {
    let mut matched = 0;

    if job.datacenters.is_empty() {
        job.datacenters = vec![config.datacenter.clone()];
    }

    for group in &mut job.task_groups {
        let mut group_matched = false;

        for service in &mut group.services {
            let sentinels: Vec<&str> = service
                .tags
                .iter()
                .filter_map(|tag| tag.strip_prefix(RELEASE_ROUTER_TAG_PREFIX))
                .collect();

            let router = match sentinels.as_slice() {
                [] => service
                    .port_label
                    .as_deref()
                    .filter(|label| *label == config.service_port_label)
                    .and(service.name.clone()),
                [router] => Some(router.to_string()),
                many => {
                    return Err(ReleaseError::AmbiguousRouterTag {
                        service: service.name.clone().unwrap_or_else(|| "unnamed".to_string()),
                        count: many.len(),
                    })
                }
            };
            let Some(router) = router else { continue };

            let rule_prefix = format!("traefik.http.routers.{router}.rule=");
            let rule = format!("{rule_prefix}Host(`{}`)", config.domain);
            if let Some(existing) = service
                .tags
                .iter_mut()
                .find(|tag| tag.starts_with(&rule_prefix))
            {
                *existing = rule;
            } else {
                service.tags.push(rule);
            }

            for extra in &config.service_tags {
                if !service.tags.contains(extra) {
                    service.tags.push(extra.clone());
                }
            }

            matched += 1;
            group_matched = true;
        }

        if group_matched {
            if let Some(replicas) = config.replicas {
                group.count = Some(i64::from(replicas));
            }
        }
    }

    Ok(matched)
}
