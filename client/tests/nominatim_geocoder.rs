//! Integration tests for the Nominatim geocoder against a scripted responder.

use std::time::Duration;

use road_client::domain::SearchResult;
use road_client::domain::ports::{GeocodingError, GeocodingGateway};
use road_client::outbound::nominatim::{NominatimGeocoder, NominatimIdentity};
use rstest::rstest;

mod support;

use support::{ScriptedResponse, ScriptedServer, refused_url};

const PARIS: &str = r#"[
    {"place_id": 88066702, "lat": "48.8566", "lon": "2.3522", "display_name": "Paris, France"},
    {"place_id": 1, "lat": "33.6609", "lon": "-95.5555", "display_name": "Paris, Texas"}
]"#;

fn geocoder_for(server: &ScriptedServer) -> NominatimGeocoder {
    NominatimGeocoder::with_identity(
        server.url("search"),
        Duration::from_secs(5),
        NominatimIdentity {
            user_agent: "road-app-tests/1.0".to_owned(),
        },
    )
    .expect("client builds")
}

#[tokio::test]
async fn returns_the_top_candidate_and_sends_the_fixed_query_shape() {
    let server = ScriptedServer::start(vec![ScriptedResponse::json(200, PARIS)]);

    let result = geocoder_for(&server)
        .search("Paris")
        .await
        .expect("search succeeds");

    assert_eq!(
        result,
        SearchResult {
            latitude: 48.8566,
            longitude: 2.3522,
            display_name: "Paris, France".to_owned(),
        }
    );
    let requests = server.requests();
    let request = requests.first().expect("one request recorded");
    assert_eq!(request.method, "GET");
    assert_eq!(request.path(), "/search");
    assert_eq!(
        request.query_pairs(),
        vec![
            ("q".to_owned(), "Paris".to_owned()),
            ("format".to_owned(), "json".to_owned()),
            ("limit".to_owned(), "1".to_owned()),
        ]
    );
    assert_eq!(request.header("user-agent"), Some("road-app-tests/1.0"));
}

#[tokio::test]
async fn empty_candidate_list_is_no_results() {
    let server = ScriptedServer::start(vec![ScriptedResponse::json(200, "[]")]);

    let error = geocoder_for(&server)
        .search("zzzzqqq")
        .await
        .expect_err("nothing matches");

    assert_eq!(error, GeocodingError::NoResults);
}

#[rstest]
#[case::unavailable(ScriptedResponse::text(503, "busy"), "status 503: busy")]
#[case::empty_body(ScriptedResponse::text(500, ""), "status 500")]
#[tokio::test]
async fn error_statuses_are_transport_failures(
    #[case] response: ScriptedResponse,
    #[case] expected: &str,
) {
    let server = ScriptedServer::start(vec![response]);

    let error = geocoder_for(&server)
        .search("Paris")
        .await
        .expect_err("status is an error");

    let GeocodingError::Transport { message } = error else {
        panic!("expected transport error, got {error:?}");
    };
    assert_eq!(message, expected);
}

#[tokio::test]
async fn malformed_payload_is_a_decode_failure() {
    let server =
        ScriptedServer::start(vec![ScriptedResponse::json(200, r#"{"lat": "1"}"#)]);

    let error = geocoder_for(&server)
        .search("Paris")
        .await
        .expect_err("payload is not a list");

    assert!(
        matches!(error, GeocodingError::Decode { .. }),
        "expected decode error, got {error:?}"
    );
}

#[tokio::test]
async fn blank_query_is_rejected_without_a_request() {
    let server = ScriptedServer::start(Vec::new());

    let error = geocoder_for(&server)
        .search("   ")
        .await
        .expect_err("blank query");

    assert_eq!(error, GeocodingError::InvalidQuery);
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn unreachable_service_is_a_transport_failure() {
    let endpoint = refused_url().join("search").expect("URL joins");
    let geocoder =
        NominatimGeocoder::new(endpoint, Duration::from_secs(5)).expect("client builds");

    let error = geocoder.search("Paris").await.expect_err("nothing listens");

    assert!(
        matches!(error, GeocodingError::Transport { .. }),
        "expected transport error, got {error:?}"
    );
}

#[tokio::test]
async fn slow_service_times_out_as_a_transport_failure() {
    let server = ScriptedServer::start(vec![
        ScriptedResponse::json(200, PARIS).delayed(Duration::from_secs(5)),
    ]);
    let geocoder = NominatimGeocoder::new(server.url("search"), Duration::from_millis(200))
        .expect("client builds");

    let error = geocoder.search("Paris").await.expect_err("reply is too slow");

    assert!(
        matches!(error, GeocodingError::Transport { .. }),
        "expected transport error, got {error:?}"
    );
}
