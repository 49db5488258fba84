// ABOUTME: HTTP Basic authentication middleware for the relay's routes.
// ABOUTME: Rejects requests whose credentials are missing or wrong with a 401 challenge.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use relay_core::Credentials;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Challenge sent with every 401.
pub const WWW_AUTHENTICATE_VALUE: &str = "Basic realm=\"music-assistant-alexa-api\"";

/// A tower Layer that requires the configured Basic credentials on every route.
#[derive(Clone)]
pub struct BasicAuthLayer {
    credentials: Arc<Credentials>,
}

impl BasicAuthLayer {
    /// Create a new BasicAuthLayer checking against the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }
}

impl<S> Layer<S> for BasicAuthLayer {
    type Service = BasicAuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BasicAuthMiddleware {
            inner,
            credentials: Arc::clone(&self.credentials),
        }
    }
}

/// The middleware service that checks Basic credentials before the handler runs.
#[derive(Clone)]
pub struct BasicAuthMiddleware<S> {
    inner: S,
    credentials: Arc<Credentials>,
}

impl<S> Service<Request<Body>> for BasicAuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let authorized = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_basic)
            .is_some_and(|(user, pass)| self.credentials.matches(&user, &pass));

        if authorized {
            // Swap in the clone so the instance that was polled ready handles this request.
            let clone = self.inner.clone();
            let mut inner = std::mem::replace(&mut self.inner, clone);
            return Box::pin(async move { inner.call(req).await });
        }

        tracing::debug!(path = %req.uri().path(), "rejected request without valid credentials");
        Box::pin(async move { Ok(unauthorized()) })
    }
}

/// Decode an `Authorization` header value of the form `Basic <base64(user:pass)>`.
/// The password may itself contain colons; the username may not.
pub fn parse_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// The fixed 401 response with its Basic challenge.
pub fn unauthorized() -> Response<Body> {
    let mut resp = Response::new(Body::from("Access denied"));
    *resp.status_mut() = StatusCode::UNAUTHORIZED;
    let headers = resp.headers_mut();
    headers.insert(
        header::WWW_AUTHENTICATE,
        header::HeaderValue::from_static(WWW_AUTHENTICATE_VALUE),
    );
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    resp
}
