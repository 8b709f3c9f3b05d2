//! Server harness and shared world for end-to-end API suites.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.
//!
//! Unlike the handler unit tests, the server here runs the real services over
//! the in-memory store, so tokens are genuine and ownership is enforced end to
//! end.

use std::cell::RefCell;
use std::collections::HashMap;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use pressroom::Trace;
use pressroom::domain::{AccountService, PostService};
use pressroom::inbound::http::configure_api;
use pressroom::inbound::http::error::route_not_found;
use pressroom::inbound::http::state::HttpState;
use pressroom::outbound::memory::InMemoryStore;
use pressroom::outbound::security::Argon2PasswordHasher;
use pressroom::outbound::token::{JwtAccessTokens, TokenSettings};
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

const TEST_SECRET: &str = "integration-secret-integration-secret";

pub(crate) struct ApiWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    /// Bearer tokens keyed by the label a scenario gave the account.
    pub(crate) tokens: HashMap<String, String>,
    /// Post identifiers keyed by the label a scenario gave the post.
    pub(crate) posts: HashMap<String, i64>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
}

impl ApiWorld {
    pub(crate) fn token(&self, label: &str) -> String {
        self.tokens
            .get(label)
            .cloned()
            .unwrap_or_else(|| panic!("no token stored for {label}"))
    }

    pub(crate) fn post_id(&self, label: &str) -> i64 {
        *self
            .posts
            .get(label)
            .unwrap_or_else(|| panic!("no post stored as {label}"))
    }

    pub(crate) fn status(&self) -> u16 {
        self.last_status.expect("a request has been made")
    }

    pub(crate) fn body(&self) -> &Value {
        self.last_body.as_ref().expect("a response body was captured")
    }
}

pub(crate) type SharedWorld = Rc<RefCell<ApiWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn build_state(clock: Arc<dyn Clock>) -> HttpState {
    let store = Arc::new(InMemoryStore::new(clock.clone()));
    let tokens = Arc::new(JwtAccessTokens::new(
        &TokenSettings::new(TEST_SECRET, Duration::from_secs(3_600)),
        clock,
    ));
    let accounts = Arc::new(AccountService::new(
        store.clone(),
        Arc::new(Argon2PasswordHasher::new()),
        tokens.clone(),
    ));
    let posts = Arc::new(PostService::new(store));

    HttpState {
        accounts: accounts.clone(),
        profile: accounts,
        posts: posts.clone(),
        posts_command: posts,
        tokens,
    }
}

async fn spawn_api_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .configure(configure_api)
            .default_service(web::to(route_not_found))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

/// Start a server backed by a fresh in-memory store.
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let http_state = build_state(Arc::new(DefaultClock));

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_api_server(http_state).await })
        .expect("server should start");

    WorldFixture {
        world: Rc::new(RefCell::new(ApiWorld {
            runtime,
            local,
            base_url,
            server,
            tokens: HashMap::new(),
            posts: HashMap::new(),
            last_status: None,
            last_body: None,
            last_trace_id: None,
        })),
    }
}
