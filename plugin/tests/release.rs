//! End-to-end release tests against a mock Nomad API.

use gangplank_id::DeploymentId;
use gangplank_nomad::{NomadClient, NomadConfig};
use gangplank_plugin::status::{RecordingReporter, StatusKind};
use gangplank_plugin::{Deployment, ReleaseConfig, ReleaseError, ReleaseManager, TraefikReleaser};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> NomadClient {
    NomadClient::new(NomadConfig {
        address: server.uri(),
        ..Default::default()
    })
    .unwrap()
}

fn release_config(domain: &str, monitor: bool) -> ReleaseConfig {
    ReleaseConfig {
        domain: domain.to_string(),
        datacenter: "dc1".to_string(),
        replicas: None,
        service_port_label: "waypoint".to_string(),
        service_tags: Vec::new(),
        monitor,
    }
}

fn target() -> Deployment {
    Deployment {
        id: DeploymentId::new(),
        name: "web-dep_abc".to_string(),
    }
}

fn fetched_job(tags: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "ID": "web-dep_abc",
        "Name": "web-dep_abc",
        "Datacenters": ["dc1"],
        "Meta": {"waypoint.hashicorp.com/id": "dep_old"},
        "TaskGroups": [{
            "Name": "app",
            "Services": [{"Name": "web", "PortLabel": "http", "Tags": tags}]
        }]
    })
}

async fn registered_job(server: &MockServer) -> serde_json::Value {
    let requests = server.received_requests().await.unwrap();
    let register = requests
        .iter()
        .find(|r| r.method.as_str() == "POST" && r.url.path() == "/v1/jobs")
        .expect("no register request was made");
    let body: serde_json::Value = serde_json::from_slice(&register.body).unwrap();
    body["Job"].clone()
}

#[tokio::test]
async fn release_attaches_router_rule_and_produces_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/job/web-dep_abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fetched_job(serde_json::json!(["waypoint.release-router=api"]))),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"EvalID": "eval-1"})),
        )
        .mount(&server)
        .await;

    let releaser =
        TraefikReleaser::new(release_config("example.com", false), client_for(&server)).unwrap();
    let deployment = target();
    let release = releaser
        .release(&deployment, &RecordingReporter::new())
        .await
        .unwrap();

    assert_eq!(release.id, deployment.id);
    assert_eq!(release.name, "web-dep_abc");
    assert_eq!(release.url, "https://example.com");

    let job = registered_job(&server).await;
    assert_eq!(
        job["TaskGroups"][0]["Services"][0]["Tags"],
        serde_json::json!([
            "waypoint.release-router=api",
            "traefik.http.routers.api.rule=Host(`example.com`)",
        ])
    );
    // Everything else round-trips from the fetched copy.
    assert_eq!(job["Meta"]["waypoint.hashicorp.com/id"], "dep_old");
}

#[tokio::test]
async fn release_without_sentinel_warns_and_still_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/job/web-dep_abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fetched_job(serde_json::json!(["just-a-tag"]))),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"EvalID": "eval-1"})),
        )
        .mount(&server)
        .await;

    let releaser =
        TraefikReleaser::new(release_config("example.com", false), client_for(&server)).unwrap();
    let reporter = RecordingReporter::new();
    let release = releaser.release(&target(), &reporter).await.unwrap();

    assert_eq!(release.url, "https://example.com");
    assert!(!reporter.messages(StatusKind::Warn).is_empty());

    let job = registered_job(&server).await;
    assert_eq!(
        job["TaskGroups"][0]["Services"][0]["Tags"],
        serde_json::json!(["just-a-tag"])
    );
}

#[tokio::test]
async fn release_fails_when_target_job_is_gone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/job/web-dep_abc"))
        .respond_with(ResponseTemplate::new(404).set_body_string("job not found"))
        .mount(&server)
        .await;

    let releaser =
        TraefikReleaser::new(release_config("example.com", false), client_for(&server)).unwrap();
    let err = releaser
        .release(&target(), &RecordingReporter::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ReleaseError::TargetJobNotFound(ref name) if name == "web-dep_abc"
    ));
}

#[tokio::test]
async fn release_with_monitor_tracks_evaluation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/job/web-dep_abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fetched_job(serde_json::json!(["waypoint.release-router=api"]))),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"EvalID": "eval-7"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/evaluation/eval-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ID": "eval-7", "Status": "complete"
        })))
        .expect(1..)
        .mount(&server)
        .await;

    let releaser =
        TraefikReleaser::new(release_config("example.com", true), client_for(&server)).unwrap();
    releaser
        .release(&target(), &RecordingReporter::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn ambiguous_router_tags_abort_before_registration() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/job/web-dep_abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fetched_job(serde_json::json!([
            "waypoint.release-router=api",
            "waypoint.release-router=admin"
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let releaser =
        TraefikReleaser::new(release_config("example.com", false), client_for(&server)).unwrap();
    let err = releaser
        .release(&target(), &RecordingReporter::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ReleaseError::AmbiguousRouterTag { .. }));
}
