//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod auth;
pub mod envelope;
pub mod error;
pub mod health;
pub mod posts;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api` scope and the extractor configuration that routes
/// malformed bodies, paths and query strings through the error envelope.
///
/// Handlers expect `web::Data<HttpState>` to be registered on the app.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use pressroom::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::path_config())
        .app_data(error::query_config())
        .service(
            web::scope("/api")
                .service(accounts::register)
                .service(accounts::login)
                .service(accounts::get_profile)
                .service(accounts::update_profile)
                .service(posts::list_posts)
                .service(posts::create_post)
                .service(posts::get_post)
                .service(posts::update_post)
                .service(posts::delete_post),
        );
}
