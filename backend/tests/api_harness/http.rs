//! JSON request helpers that record the response on the shared world.

use actix_web::http::{Method, header};
use awc::Client;
use pressroom::domain::TRACE_ID_HEADER;
use serde_json::{Value, json};

use crate::harness::{SharedWorld, with_world_async};

pub(crate) const PASSWORD: &str = "correct horse battery";

pub(crate) struct JsonRequest<'a> {
    pub(crate) method: Method,
    pub(crate) path: &'a str,
    pub(crate) token: Option<String>,
    pub(crate) payload: Option<Value>,
}

impl<'a> JsonRequest<'a> {
    pub(crate) fn new(method: Method, path: &'a str) -> Self {
        Self {
            method,
            path,
            token: None,
            payload: None,
        }
    }

    pub(crate) fn bearer(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    pub(crate) fn json(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Send a request and store status, body and trace id on the world.
pub(crate) fn perform(world: &SharedWorld, request: JsonRequest<'_>) {
    let JsonRequest {
        method,
        path,
        token,
        payload,
    } = request;
    let url_path = path.to_owned();

    let (status, trace_id, body) = with_world_async(world, |base_url| async move {
        let mut builder = Client::default().request(method, format!("{base_url}{url_path}"));
        if let Some(token) = token {
            builder = builder.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
        }
        let mut response = match payload {
            Some(payload) => builder.send_json(&payload).await,
            None => builder.send().await,
        }
        .expect("request completes");

        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.body().await.expect("response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, trace_id, body)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
}

/// Register `label@example.com` and keep the issued token under `label`.
pub(crate) fn register(world: &SharedWorld, label: &str) {
    perform(
        world,
        JsonRequest::new(Method::POST, "/api/auth/register").json(json!({
            "email": format!("{label}@example.com"),
            "name": label,
            "password": PASSWORD,
        })),
    );
    assert_eq!(world.borrow().status(), 201, "registration of {label}");
}

/// Sign in as `label` and replace its stored token with the fresh one.
pub(crate) fn login(world: &SharedWorld, label: &str) {
    perform(
        world,
        JsonRequest::new(Method::POST, "/api/auth/login").json(json!({
            "email": format!("{label}@example.com"),
            "password": PASSWORD,
        })),
    );
    let mut ctx = world.borrow_mut();
    assert_eq!(ctx.status(), 200, "login of {label}");
    let token = ctx.body()["data"]["token"]
        .as_str()
        .expect("token in login response")
        .to_owned();
    ctx.tokens.insert(label.to_owned(), token);
}

/// Create a post as `author` and remember its id under `label`.
pub(crate) fn create_post(world: &SharedWorld, author: &str, label: &str, payload: Value) {
    let token = world.borrow().token(author);
    perform(
        world,
        JsonRequest::new(Method::POST, "/api/posts")
            .bearer(token)
            .json(payload),
    );
    let mut ctx = world.borrow_mut();
    assert_eq!(ctx.status(), 201, "creating {label}");
    let id = ctx.body()["data"]["id"].as_i64().expect("post id");
    ctx.posts.insert(label.to_owned(), id);
}
