//! Bearer-token authentication gate.
//!
//! Protected handlers take an [`Authenticated`] parameter; extraction reads the
//! `Authorization` header, verifies the token through the
//! [`AccessTokens`](crate::domain::ports::AccessTokens) port held in
//! [`HttpState`] and rejects the request before the handler body runs.

use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::{AccessTokens, TokenError};
use crate::domain::{AuthContext, Error, NO_TOKEN, TraceId};
use crate::inbound::http::state::HttpState;

/// Message for a token that fails signature or structure checks.
pub const INVALID_TOKEN: &str = "Invalid token.";
/// Message for a correctly signed token past its expiry.
pub const EXPIRED_TOKEN: &str = "Token expired.";

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from a `Bearer <token>` header value.
///
/// The scheme is case-sensitive and the token must be non-empty.
///
/// # Examples
/// ```
/// use pressroom::inbound::http::auth::bearer_token;
///
/// assert_eq!(bearer_token(Some("Bearer abc")), Some("abc"));
/// assert_eq!(bearer_token(Some("bearer abc")), None);
/// assert_eq!(bearer_token(Some("Bearer ")), None);
/// assert_eq!(bearer_token(None), None);
/// ```
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
}

/// Verify the raw `Authorization` header value and build the request identity.
pub fn authenticate_header(
    tokens: &dyn AccessTokens,
    header: Option<&str>,
) -> Result<AuthContext, Error> {
    let token = bearer_token(header).ok_or_else(|| Error::unauthorized(NO_TOKEN))?;
    match tokens.verify(token) {
        Ok(user_id) => Ok(AuthContext::new(user_id)),
        Err(err) => {
            let trace_id = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
            debug!(%trace_id, reason = %err, "bearer token rejected");
            let message = match err {
                TokenError::Expired => EXPIRED_TOKEN,
                TokenError::Malformed { .. } | TokenError::Signing { .. } => INVALID_TOKEN,
            };
            Err(Error::unauthorized(message))
        }
    }
}

/// Identity of the caller, available only to handlers behind the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticated(pub AuthContext);

impl Deref for Authenticated {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<HttpState>>() else {
            return ready(Err(Error::internal("HTTP state is not configured")));
        };
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        ready(authenticate_header(state.tokens.as_ref(), header).map(Authenticated))
    }
}
