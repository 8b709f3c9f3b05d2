//! Tests for account HTTP handlers.

use super::*;
use crate::domain::{Error, IssuedToken, Session, UserId, UserName};
use crate::inbound::http::configure_api;
use crate::inbound::http::test_utils::{MockPorts, bearer, fixed_time, sample_user};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

async fn send(ports: MockPorts, req: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(ports.into_data())
            .configure(configure_api),
    )
    .await;
    let res = actix_test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let body: Value = actix_test::read_body_json(res).await;
    (status, body)
}

fn session_for(id: i64) -> Session {
    Session::new(sample_user(id), IssuedToken::new("signed.jwt.token", fixed_time()))
}

#[rstest]
#[actix_web::test]
async fn register_returns_created_session() {
    let mut ports = MockPorts::default();
    ports
        .accounts
        .expect_register()
        .withf(|reg| reg.email().as_ref() == "ada@example.com" && reg.name().as_ref() == "Ada")
        .times(1)
        .returning(|_| Ok(session_for(1)));

    let (status, body) = send(
        ports,
        actix_test::TestRequest::post().uri("/api/auth/register").set_json(json!({
            "email": "ADA@example.com",
            "name": "Ada",
            "password": "hunter22",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], REGISTERED);
    assert_eq!(body["data"]["token"], "signed.jwt.token");
    assert_eq!(body["data"]["user"]["id"], 1);
    assert!(body["data"]["user"].get("passwordHash").is_none());
}

#[rstest]
#[actix_web::test]
async fn register_reports_every_invalid_field_without_calling_the_service() {
    let mut ports = MockPorts::default();
    ports.accounts.expect_register().never();

    let (status, body) = send(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"email": "nope", "password": "short"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    let fields = &body["details"]["fields"];
    assert_eq!(fields["email"], "Please provide a valid email");
    assert_eq!(fields["password"], "Password must be at least 8 characters long");
    assert_eq!(fields["name"], "Name is required");
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_is_a_conflict() {
    let mut ports = MockPorts::default();
    ports
        .accounts
        .expect_register()
        .returning(|_| Err(Error::conflict("User already exists with this email")));

    let (status, body) = send(
        ports,
        actix_test::TestRequest::post().uri("/api/auth/register").set_json(json!({
            "email": "ada@example.com",
            "name": "Ada",
            "password": "hunter22",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[rstest]
#[case(Ok(()), StatusCode::OK)]
#[case(Err(()), StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn login_maps_service_outcome(#[case] outcome: Result<(), ()>, #[case] expected: StatusCode) {
    let mut ports = MockPorts::default();
    ports.accounts.expect_login().returning(move |_| match outcome {
        Ok(()) => Ok(session_for(3)),
        Err(()) => Err(Error::unauthorized("Invalid email or password")),
    });

    let (status, body) = send(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "ada@example.com", "password": "whatever"})),
    )
    .await;

    assert_eq!(status, expected);
    if expected == StatusCode::OK {
        assert_eq!(body["message"], LOGGED_IN);
        assert_eq!(body["data"]["user"]["id"], 3);
    } else {
        assert_eq!(body["error"], "Invalid email or password");
    }
}

#[rstest]
#[actix_web::test]
async fn profile_requires_a_token() {
    let mut ports = MockPorts::default();
    ports.profile.expect_fetch_profile().never();

    let (status, body) = send(
        ports,
        actix_test::TestRequest::get().uri("/api/auth/profile"),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Access denied. No token provided.");
}

#[rstest]
#[actix_web::test]
async fn profile_loads_the_callers_account() {
    let mut ports = MockPorts::signed_in_as(9);
    ports
        .profile
        .expect_fetch_profile()
        .with(eq(UserId::new(9).expect("valid id")))
        .returning(|id| Ok(sample_user(id.get())));

    let (status, body) = send(
        ports,
        actix_test::TestRequest::get()
            .uri("/api/auth/profile")
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], "user9@example.com");
    assert!(body.get("message").is_none());
}

#[rstest]
#[actix_web::test]
async fn profile_update_rejects_blank_name() {
    let mut ports = MockPorts::signed_in_as(9);
    ports.accounts.expect_update_profile().never();

    let (status, body) = send(
        ports,
        actix_test::TestRequest::put()
            .uri("/api/auth/profile")
            .insert_header(bearer())
            .set_json(json!({"name": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["fields"]["name"], "Name cannot be empty");
}

#[rstest]
#[actix_web::test]
async fn profile_update_passes_only_supplied_fields() {
    let mut ports = MockPorts::signed_in_as(9);
    ports
        .accounts
        .expect_update_profile()
        .withf(|id, changes| {
            id.get() == 9
                && changes.email.is_none()
                && changes.name == Some(UserName::parse("Ada L.").expect("valid name"))
        })
        .times(1)
        .returning(|id, _| Ok(sample_user(id.get())));

    let (status, body) = send(
        ports,
        actix_test::TestRequest::put()
            .uri("/api/auth/profile")
            .insert_header(bearer())
            .set_json(json!({"name": "Ada L."})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], PROFILE_UPDATED);
}
