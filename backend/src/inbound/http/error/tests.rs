//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn envelope_of(error: &Error) -> (StatusCode, Option<String>, ErrorEnvelope) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let envelope = serde_json::from_slice(&bytes).expect("envelope JSON");
    (status, header, envelope)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let (status, header, envelope) = envelope_of(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(
        envelope,
        ErrorEnvelope {
            success: false,
            code: ErrorCode::InternalError,
            error: "Internal server error".to_owned(),
            trace_id: Some(expected_trace_id),
            details: None,
        }
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(expected_trace_id: String) {
    let error = Error::invalid_request("Validation failed")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"fields": {"title": "Title is required"}}));

    let (status, _, envelope) = envelope_of(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!envelope.success);
    assert_eq!(envelope.error, "Validation failed");
    assert_eq!(
        envelope.details,
        Some(json!({"fields": {"title": "Title is required"}}))
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_header_and_field() {
    let error = Error::not_found("Post not found");

    let response = ResponseError::error_response(&error);
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let value: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(
        value,
        json!({"success": false, "code": "not_found", "error": "Post not found"})
    );
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[derive(Deserialize)]
struct Body {
    #[expect(dead_code, reason = "only the parse outcome matters")]
    title: String,
}

async fn echo(_body: web::Json<Body>) -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[rstest]
#[actix_web::test]
async fn malformed_json_becomes_invalid_request() {
    let app = actix_test::init_service(
        App::new()
            .app_data(json_config())
            .route("/echo", web::post().to(echo)),
    )
    .await;
    let req = actix_test::TestRequest::post()
        .uri("/echo")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["error"], "Invalid JSON body");
}

#[rstest]
#[actix_web::test]
async fn unknown_routes_name_the_path() {
    let app =
        actix_test::init_service(App::new().default_service(web::to(route_not_found))).await;
    let req = actix_test::TestRequest::get().uri("/api/nope?x=1").to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "Route /api/nope?x=1 not found");
}
