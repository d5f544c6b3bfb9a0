//! Integration tests for the hazard service client against a scripted
//! responder.

use std::time::Duration;

use road_client::domain::ports::{HazardSubmissionError, HazardSubmissionGateway};
use road_client::domain::{Coordinate, HazardReport, HazardType, Severity};
use road_client::outbound::hazard_api::HttpHazardSubmissionGateway;
use rstest::{fixture, rstest};
use serde_json::json;

mod support;

use support::{ScriptedResponse, ScriptedServer, refused_url};

#[fixture]
fn report() -> HazardReport {
    HazardReport::new(
        HazardType::Accident,
        "Two cars blocking the left lane",
        Severity::High,
        Coordinate::new(40.7128, -74.006),
    )
    .expect("valid report")
}

fn gateway_for(server: &ScriptedServer) -> HttpHazardSubmissionGateway {
    HttpHazardSubmissionGateway::new(&server.base_url(), Duration::from_secs(5))
        .expect("client builds")
}

#[rstest]
#[tokio::test]
async fn posts_the_flat_json_report(report: HazardReport) {
    let server = ScriptedServer::start(vec![ScriptedResponse::json(
        201,
        r#"{"message": "Hazard reported successfully"}"#,
    )]);

    gateway_for(&server)
        .submit(&report)
        .await
        .expect("service accepts report");

    let requests = server.requests();
    let request = requests.first().expect("one request recorded");
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/api/hazards");
    assert!(
        request
            .header("content-type")
            .is_some_and(|value| value.starts_with("application/json")),
        "unexpected content type: {:?}",
        request.header("content-type"),
    );
    assert_eq!(
        request.json_body(),
        json!({
            "type": "accident",
            "description": "Two cars blocking the left lane",
            "severity": "high",
            "latitude": 40.7128,
            "longitude": -74.006,
        })
    );
}

#[rstest]
#[tokio::test]
async fn keeps_a_path_prefix_on_the_base_url(report: HazardReport) {
    let server = ScriptedServer::start(vec![ScriptedResponse::json(201, "{}")]);
    let gateway = HttpHazardSubmissionGateway::new(&server.url("v2"), Duration::from_secs(5))
        .expect("client builds");

    gateway.submit(&report).await.expect("service accepts report");

    let requests = server.requests();
    assert_eq!(
        requests.first().map(|request| request.path().to_owned()),
        Some("/v2/api/hazards".to_owned())
    );
}

#[rstest]
#[case::backend_error(
    ScriptedResponse::json(400, r#"{"error": "Missing required field: type"}"#),
    400,
    "Missing required field: type"
)]
#[case::blank_backend_error(ScriptedResponse::json(500, r#"{"error": ""}"#), 500, "")]
#[case::plain_text(
    ScriptedResponse::text(503, "maintenance"),
    503,
    "Hazard service responded with status 503: maintenance"
)]
#[case::no_body(
    ScriptedResponse::text(404, ""),
    404,
    "Hazard service responded with status 404"
)]
#[tokio::test]
async fn rejected_reports_carry_status_and_message(
    report: HazardReport,
    #[case] response: ScriptedResponse,
    #[case] expected_status: u16,
    #[case] expected_message: &str,
) {
    let server = ScriptedServer::start(vec![response]);

    let error = gateway_for(&server)
        .submit(&report)
        .await
        .expect_err("service rejects report");

    assert_eq!(
        error,
        HazardSubmissionError::rejected(expected_status, expected_message)
    );
}

#[rstest]
#[tokio::test]
async fn unreachable_service_is_a_transport_failure(report: HazardReport) {
    let gateway = HttpHazardSubmissionGateway::new(&refused_url(), Duration::from_secs(5))
        .expect("client builds");

    let error = gateway
        .submit(&report)
        .await
        .expect_err("nothing listens");

    let HazardSubmissionError::Transport { message } = error else {
        panic!("expected transport error, got {error:?}");
    };
    assert!(
        message.starts_with("Could not reach the hazard service"),
        "unexpected message: {message}"
    );
}
