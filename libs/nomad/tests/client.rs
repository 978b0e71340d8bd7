//! HTTP-level tests for the Nomad client against a mock server.

use gangplank_nomad::{EvalStatus, NomadClient, NomadConfig, NomadError};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> NomadClient {
    NomadClient::new(NomadConfig {
        address: server.uri(),
        token: Some("secret-token".to_string()),
        region: Some("global".to_string()),
        namespace: None,
    })
    .unwrap()
}

#[tokio::test]
async fn job_lookup_returns_typed_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/job/web-dep_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("job not found"))
        .mount(&server)
        .await;

    let err = client_for(&server).job("web-dep_missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn job_lookup_permission_denied_is_not_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/job/web-dep_abc"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Permission denied"))
        .mount(&server)
        .await;

    let err = client_for(&server).job("web-dep_abc").await.unwrap_err();
    match err {
        NomadError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Permission denied");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn job_lookup_decodes_job_and_sends_scope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/job/web-dep_abc"))
        .and(query_param("region", "global"))
        .and(header("X-Nomad-Token", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ID": "web-dep_abc",
            "Name": "web-dep_abc",
            "TaskGroups": [{
                "Name": "app",
                "Services": [{"Name": "web", "Tags": ["waypoint.release-router=api"]}]
            }]
        })))
        .mount(&server)
        .await;

    let job = client_for(&server).job("web-dep_abc").await.unwrap();
    assert_eq!(job.name.as_deref(), Some("web-dep_abc"));
    assert_eq!(
        job.task_groups[0].services[0].tags,
        vec!["waypoint.release-router=api"]
    );
}

#[tokio::test]
async fn register_posts_wrapped_job_and_returns_eval_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .and(body_partial_json(serde_json::json!({
            "Job": {"ID": "web-dep_abc"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "EvalID": "eval-123",
            "EvalCreateIndex": 7,
            "JobModifyIndex": 8
        })))
        .mount(&server)
        .await;

    let job = gangplank_nomad::Job {
        id: Some("web-dep_abc".to_string()),
        name: Some("web-dep_abc".to_string()),
        ..Default::default()
    };
    let eval_id = client_for(&server).register(&job).await.unwrap();
    assert_eq!(eval_id, "eval-123");
}

#[tokio::test]
async fn register_surfaces_version_conflict_as_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("job modify index mismatch: expected 8, got 9"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .register(&gangplank_nomad::Job::default())
        .await
        .unwrap_err();
    match err {
        NomadError::Api { message, .. } => assert!(message.contains("modify index mismatch")),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn evaluation_decodes_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/evaluation/eval-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ID": "eval-123",
            "Status": "complete",
            "StatusDescription": ""
        })))
        .mount(&server)
        .await;

    let eval = client_for(&server).evaluation("eval-123").await.unwrap();
    assert_eq!(eval.status, EvalStatus::Complete);
    assert!(eval.status.is_terminal());
}
