//! Middleware orchestration.
//!
//! # Responsibilities
//! - Hold the immutable spec list (shared via `Arc`)
//! - Run one reconciliation per spec per request
//! - Expose effective values to the wrapped application as an extension
//! - Append `Set-Cookie` headers for every write-back
//!
//! # Design Decisions
//! - The wrapped application's outcome passes through unmodified; this
//!   middleware never swallows or retries downstream failures
//! - Response status and body are untouched; headers are only appended to
//! - One timestamp per request, taken before the spec loop, so all expiries
//!   in one response agree

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, header},
    middleware::Next,
    response::Response,
};
use cookie::Cookie;
use cookie::time::OffsetDateTime;

use crate::config::normalize::{ParamCookieSpec, normalize};
use crate::config::schema::TrackedParamConfig;
use crate::http::params::{RequestCookies, RequestParams};
use crate::reconcile::{WriteBack, reconcile};

/// Shared middleware state: the normalized, immutable spec list.
///
/// Mount with [`axum::middleware::from_fn_with_state`]:
///
/// ```
/// use std::collections::HashMap;
/// use axum::{middleware, routing::get, Router};
/// use param_to_cookie::{param_to_cookie_middleware, ParamToCookie, TrackedParamConfig};
///
/// let state = ParamToCookie::new(HashMap::from([
///     ("ref".to_string(), TrackedParamConfig::default()),
/// ]));
/// let app: Router = Router::new()
///     .route("/", get(|| async { "hi" }))
///     .layer(middleware::from_fn_with_state(state, param_to_cookie_middleware));
/// ```
#[derive(Debug)]
pub struct ParamToCookie {
    specs: Vec<ParamCookieSpec>,
}

impl ParamToCookie {
    /// Build middleware state from a map of parameter name → options.
    pub fn new(param_cookies: HashMap<String, TrackedParamConfig>) -> Arc<Self> {
        Arc::new(Self {
            specs: normalize(param_cookies),
        })
    }

    /// The normalized specs, in no particular order.
    pub fn specs(&self) -> &[ParamCookieSpec] {
        &self.specs
    }
}

/// Values resolved for the wrapped application, keyed by `env_name`.
///
/// Attached to every request that passes through the middleware; read it
/// with `axum::Extension<TrackedValues>` or `Request::extensions()`.
#[derive(Debug, Clone, Default)]
pub struct TrackedValues(HashMap<String, String>);

impl TrackedValues {
    /// Resolved value under `env_name`, if any.
    pub fn get(&self, env_name: &str) -> Option<&str> {
        self.0.get(env_name).map(String::as_str)
    }

    /// True when no tracked parameter resolved to a value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All resolved (env_name, value) entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Reconcile tracked parameters with cookies around the wrapped application.
pub async fn param_to_cookie_middleware(
    State(state): State<Arc<ParamToCookie>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (mut req, params) = RequestParams::extract(req).await;
    let cookies = RequestCookies::extract(&req);
    let now = SystemTime::now();

    let mut values = HashMap::new();
    let mut write_backs = Vec::new();
    for spec in state.specs() {
        let outcome = reconcile(spec, &params, &cookies, now);
        if let Some(value) = outcome.effective {
            values.insert(spec.env_name.clone(), value);
        }
        if let Some(write_back) = outcome.write_back {
            tracing::debug!(
                param = %spec.param_name,
                cookie = %write_back.cookie_name,
                "parameter supplied this request; cookie will be rewritten"
            );
            write_backs.push(write_back);
        }
    }
    req.extensions_mut().insert(TrackedValues(values));

    let mut response = next.run(req).await;

    for write_back in &write_backs {
        match render_set_cookie(write_back) {
            Ok(header_value) => {
                response
                    .headers_mut()
                    .append(header::SET_COOKIE, header_value);
            }
            Err(err) => {
                tracing::warn!(
                    cookie = %write_back.cookie_name,
                    error = %err,
                    "dropping unrenderable Set-Cookie directive"
                );
            }
        }
    }

    response
}

/// Render a write-back as a `Set-Cookie` header value.
///
/// The computed value and expiry always win; configured attributes are
/// pass-through.
fn render_set_cookie(
    write_back: &WriteBack,
) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    let mut cookie = Cookie::new(write_back.cookie_name.clone(), write_back.value.clone());
    cookie.set_expires(OffsetDateTime::from(write_back.expires_at));

    let attrs = &write_back.attributes;
    if let Some(path) = &attrs.path {
        cookie.set_path(path.clone());
    }
    if let Some(domain) = &attrs.domain {
        cookie.set_domain(domain.clone());
    }
    if attrs.secure {
        cookie.set_secure(true);
    }
    if attrs.http_only {
        cookie.set_http_only(true);
    }
    if let Some(same_site) = attrs.same_site {
        cookie.set_same_site(cookie::SameSite::from(same_site));
    }

    HeaderValue::from_str(&cookie.encoded().to_string())
}
