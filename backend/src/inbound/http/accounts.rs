//! Account HTTP handlers.
//!
//! ```text
//! POST /api/auth/register {"email":"ada@example.com","name":"Ada","password":"hunter22"}
//! POST /api/auth/login    {"email":"ada@example.com","password":"hunter22"}
//! GET  /api/auth/profile
//! PUT  /api/auth/profile  {"name":"Ada L."}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, ProfileChanges, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::schemas::{SessionResponseSchema, UserResponseSchema};
use crate::inbound::http::state::HttpState;

pub const REGISTERED: &str = "User registered successfully";
pub const LOGGED_IN: &str = "Login successful";
pub const PROFILE_UPDATED: &str = "Profile updated successfully";

/// Request body for `POST /api/auth/register`.
///
/// Missing members deserialise as empty strings so validation reports them
/// per field instead of failing the whole body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "hunter22", min_length = 8)]
    pub password: String,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "hunter22")]
    pub password: String,
}

/// Request body for `PUT /api/auth/profile`. Absent members stay unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
struct UserData {
    user: User,
}

/// Create an account and return a bearer token for it.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponseSchema),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 409, description = "Email already registered", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let registration = Registration::try_from_parts(&body.email, &body.name, &body.password)?;
    let session = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(ApiResponse::data(session).with_message(REGISTERED)))
}

/// Check credentials and return a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionResponseSchema),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 401, description = "Invalid email or password", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&body.email, &body.password)?;
    let session = state.accounts.login(credentials).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(session).with_message(LOGGED_IN)))
}

/// Return the caller's account.
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Current user", body = UserResponseSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "getProfile",
    security(("bearer" = []))
)]
#[get("/auth/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<HttpResponse> {
    let user = state.profile.fetch_profile(caller.user_id()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(UserData { user })))
}

/// Change the caller's name or email.
#[utoipa::path(
    put,
    path = "/api/auth/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponseSchema),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope),
        (status = 409, description = "Email owned by another account", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "updateProfile",
    security(("bearer" = []))
)]
#[put("/auth/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let changes = ProfileChanges::try_from_parts(body.name.as_deref(), body.email.as_deref())?;
    let user = state
        .accounts
        .update_profile(caller.user_id(), changes)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(UserData { user }).with_message(PROFILE_UPDATED)))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
