//! Behavioural tests for registration, sign-in and the profile endpoint.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

#[expect(
    dead_code,
    reason = "Shared harness has helpers used by other integration suites."
)]
#[path = "api_harness/harness.rs"]
mod harness;
#[expect(
    dead_code,
    reason = "Shared harness has helpers used by other integration suites."
)]
#[path = "api_harness/http.rs"]
mod http;

use actix_web::http::Method;
use harness::WorldFixture;
use http::{JsonRequest, PASSWORD, login, perform, register};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;

const PROFILE_PATH: &str = "/api/auth/profile";

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

#[given("a running server")]
fn a_running_server(world: &WorldFixture) {
    let _ = world;
}

#[given("an account {label} who is signed in")]
fn an_account_who_is_signed_in(world: &WorldFixture, label: String) {
    let shared = world.world();
    register(&shared, &label);
    login(&shared, &label);
}

#[when("{label} fetches the profile")]
fn fetches_the_profile(world: &WorldFixture, label: String) {
    let shared = world.world();
    let token = shared.borrow().token(&label);
    perform(&shared, JsonRequest::new(Method::GET, PROFILE_PATH).bearer(token));
}

#[when("someone registers {label} again")]
fn someone_registers_again(world: &WorldFixture, label: String) {
    perform(
        &world.world(),
        JsonRequest::new(Method::POST, "/api/auth/register").json(json!({
            "email": format!("{label}@example.com"),
            "name": "Impostor",
            "password": PASSWORD,
        })),
    );
}

#[when("{label} signs in with the password \"{password}\"")]
fn signs_in_with_the_password(world: &WorldFixture, label: String, password: String) {
    perform(
        &world.world(),
        JsonRequest::new(Method::POST, "/api/auth/login").json(json!({
            "email": format!("{label}@example.com"),
            "password": password,
        })),
    );
}

#[when("a client presents the token \"{token}\" to the profile endpoint")]
fn a_client_presents_the_token(world: &WorldFixture, token: String) {
    perform(
        &world.world(),
        JsonRequest::new(Method::GET, PROFILE_PATH).bearer(token),
    );
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    assert_eq!(world.world().borrow().status(), status);
}

#[then("the profile email is \"{email}\"")]
fn the_profile_email_is(world: &WorldFixture, email: String) {
    let shared = world.world();
    let ctx = shared.borrow();
    let user = &ctx.body()["data"]["user"];
    assert_eq!(user["email"].as_str(), Some(email.as_str()));
    assert!(user.get("password").is_none(), "password must never be serialised");
}

#[then("the error code is {code}")]
fn the_error_code_is(world: &WorldFixture, code: String) {
    let shared = world.world();
    let ctx = shared.borrow();
    assert_eq!(ctx.body()["code"].as_str(), Some(code.as_str()));
}

#[then("the error message is \"{message}\"")]
fn the_error_message_is(world: &WorldFixture, message: String) {
    let shared = world.world();
    let ctx = shared.borrow();
    assert_eq!(ctx.body()["error"].as_str(), Some(message.as_str()));
}

#[scenario(
    path = "tests/features/account_session.feature",
    name = "A registered account reads its profile with the issued token"
)]
fn profile_with_issued_token(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/account_session.feature",
    name = "A second registration with the same email conflicts"
)]
fn duplicate_registration_conflicts(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/account_session.feature",
    name = "A wrong password is rejected without naming the cause"
)]
fn wrong_password_is_rejected(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/account_session.feature",
    name = "A forged token cannot read the profile"
)]
fn forged_token_is_rejected(world: WorldFixture) {
    drop(world);
}
