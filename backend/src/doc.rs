//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers from
//! [`crate::inbound::http::schemas`] and the bearer-token security scheme.
//!
//! The generated specification is served at `/api-docs/openapi.json`, backs
//! Swagger UI in debug builds and is exported by `cargo run --bin
//! openapi-dump`.

use crate::inbound::http::accounts::{LoginRequest, ProfileRequest, RegisterRequest};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::posts::PostRequest;
use crate::inbound::http::schemas::{
    AuthorSchema, ErrorCodeSchema, HealthStatusSchema, MessageResponseSchema, PaginationSchema,
    PostListResponseSchema, PostPageSchema, PostResponseSchema, PostSchema, PostStatusSchema,
    SessionDataSchema, SessionResponseSchema, UserDataSchema, UserResponseSchema, UserSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by protected paths.
pub const BEARER_SCHEME: &str = "bearer";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token returned by POST /api/auth/register or POST /api/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pressroom API",
        description = "Accounts, bearer tokens and author-owned blog posts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::get_profile,
        crate::inbound::http::accounts::update_profile,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::health::status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorEnvelope,
        ErrorCodeSchema,
        UserSchema,
        AuthorSchema,
        PostSchema,
        PostStatusSchema,
        PaginationSchema,
        SessionDataSchema,
        SessionResponseSchema,
        UserDataSchema,
        UserResponseSchema,
        PostResponseSchema,
        PostPageSchema,
        PostListResponseSchema,
        MessageResponseSchema,
        HealthStatusSchema,
        RegisterRequest,
        LoginRequest,
        ProfileRequest,
        PostRequest,
    )),
    tags(
        (name = "auth", description = "Registration, login and the caller's profile"),
        (name = "posts", description = "Public reads and owner-only writes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
