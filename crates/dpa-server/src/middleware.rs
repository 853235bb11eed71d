use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header::RETRY_AFTER, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

/// Longest caller-supplied `x-request-id` echoed back.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[derive(Debug, Clone, Copy)]
struct ClientWindow {
    started_at: Instant,
    count: usize,
}

/// Fixed-window limiter with one window per client IP.
///
/// Requests without a known peer address (in-process tests, unusual
/// transports) share a single window.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    clients: Arc<Mutex<HashMap<Option<IpAddr>, ClientWindow>>>,
}

#[derive(Debug, PartialEq, Eq)]
enum Admission {
    Allowed,
    Limited { retry_after: Duration },
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    async fn admit(&self, client: Option<IpAddr>, now: Instant) -> Admission {
        let mut clients = self.clients.lock().await;
        clients.retain(|_, w| now.duration_since(w.started_at) < self.window);

        let window = clients.entry(client).or_insert(ClientWindow {
            started_at: now,
            count: 0,
        });
        if window.count >= self.max_requests {
            let elapsed = now.duration_since(window.started_at);
            return Admission::Limited {
                retry_after: self.window.saturating_sub(elapsed),
            };
        }
        window.count += 1;
        Admission::Allowed
    }
}

/// Whole seconds for `Retry-After`, rounded up and never zero.
fn retry_after_secs(remaining: Duration) -> u64 {
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    secs.max(1)
}

fn usable_request_id(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|b| b.is_ascii_graphic())
}

/// Axum middleware that extracts or generates a request ID.
///
/// A caller's `x-request-id` is reused when it is short printable ASCII;
/// otherwise a `UUIDv4` is generated. The ID goes into request extensions as
/// [`RequestId`] and back out on the `x-request-id` response header.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| usable_request_id(v))
        .map_or_else(|| Uuid::new_v4().to_string(), |v| v.trim().to_string());

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing the per-client request limit.
///
/// Rejections use the API error envelope with code `rate_limited` and a
/// `Retry-After` header for the rest of the client's window.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let client = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    match rate_limit.admit(client, Instant::now()).await {
        Admission::Allowed => next.run(req).await,
        Admission::Limited { retry_after } => {
            let secs = retry_after_secs(retry_after);
            let request_id = req
                .extensions()
                .get::<RequestId>()
                .map_or_else(String::new, |id| id.0.clone());
            tracing::warn!(
                client = ?client,
                max_requests = rate_limit.max_requests,
                retry_after_secs = secs,
                "rate limit exceeded"
            );

            let mut response = ApiError::new(
                request_id,
                "rate_limited",
                format!("rate limit exceeded; retry in {secs}s"),
            )
            .into_response();
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
            response
        }
    }
}
