//! Request correlation middleware.
//!
//! Every request runs inside a task-local [`TraceId`] scope so that domain
//! errors raised anywhere in the handler carry the same identifier as the
//! access log line and the `trace-id` response header. A well-formed
//! `trace-id` sent by an upstream proxy is kept; anything else is replaced
//! with a fresh UUID.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{info, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware assigning each request a [`TraceId`] and echoing it in the
/// `trace-id` response header.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use pressroom::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceService { service }))
    }
}

#[doc(hidden)]
pub struct TraceService<S> {
    service: S,
}

/// Identifier supplied by the caller, if it parses as a trace id.
fn inbound_trace_id(req: &ServiceRequest) -> Option<TraceId> {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(TraceId::from_header)
}

fn stamp_header<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    // A hyphenated UUID is always a valid header value.
    if let Ok(value) = HeaderValue::from_str(&trace_id.to_string()) {
        res.response_mut()
            .headers_mut()
            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
    }
}

impl<S, B> Service<ServiceRequest> for TraceService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = inbound_trace_id(&req).unwrap_or_else(TraceId::generate);
        let method = req.method().clone();
        let path = req.path().to_owned();
        let started = Instant::now();
        let fut = self.service.call(req);

        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            let status = res.status();
            let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            if status.is_server_error() {
                warn!(
                    %trace_id,
                    %method,
                    %path,
                    status = status.as_u16(),
                    latency_ms,
                    "request failed"
                );
            } else {
                info!(
                    %trace_id,
                    %method,
                    %path,
                    status = status.as_u16(),
                    latency_ms,
                    "request completed"
                );
            }
            stamp_header(&mut res, trace_id);
            Ok(res)
        }))
    }
}
