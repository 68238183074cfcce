//! Inbound request boundary.
//!
//! Read-only parameter and cookie views over an incoming request. Parameter
//! read failures (unreadable body, undecodable headers) are folded into
//! absence here, so reconciliation never sees them; a request is never
//! failed because its parameter store could not be read.

use std::collections::HashMap;

use axum::body::{Body, to_bytes};
use axum::http::{Request, header};
use cookie::Cookie;
use thiserror::Error;
use url::form_urlencoded;

/// Largest form body this middleware will buffer for parameter extraction.
const MAX_FORM_BODY_BYTES: usize = 1024 * 1024;

/// Why part of the request's parameter store could not be read. Logged and
/// folded into absence at this boundary; never propagated.
#[derive(Debug, Error)]
enum ParamReadError {
    #[error("form body unreadable or over {MAX_FORM_BODY_BYTES} bytes: {0}")]
    FormBody(axum::Error),

    #[error("cookie header is not valid UTF-8: {0}")]
    CookieHeader(header::ToStrError),
}

/// Parameters visible to reconciliation: the query string plus a urlencoded
/// form body when one is present. Body entries win on duplicate keys.
#[derive(Debug, Default)]
pub struct RequestParams {
    values: HashMap<String, String>,
}

impl RequestParams {
    /// Extract parameters from the request.
    ///
    /// When the request carries a `application/x-www-form-urlencoded` body,
    /// the body is buffered, parsed, and restored so the wrapped application
    /// still receives it. Never fails: an unreadable body degrades to absent
    /// parameters and an empty downstream body.
    pub async fn extract(req: Request<Body>) -> (Request<Body>, Self) {
        let mut values = HashMap::new();

        if let Some(query) = req.uri().query() {
            for (key, value) in form_urlencoded::parse(query.as_bytes()) {
                values.insert(key.into_owned(), value.into_owned());
            }
        }

        let req = if is_urlencoded_form(&req) {
            let (parts, body) = req.into_parts();
            match to_bytes(body, MAX_FORM_BODY_BYTES).await {
                Ok(bytes) => {
                    for (key, value) in form_urlencoded::parse(&bytes) {
                        values.insert(key.into_owned(), value.into_owned());
                    }
                    Request::from_parts(parts, Body::from(bytes))
                }
                Err(err) => {
                    let err = ParamReadError::FormBody(err);
                    tracing::warn!(error = %err, "treating form parameters as absent");
                    Request::from_parts(parts, Body::empty())
                }
            }
        } else {
            req
        };

        (req, Self { values })
    }
}

impl crate::reconcile::ParamSource for RequestParams {
    fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Cookies attached to the request. First occurrence wins on duplicates.
#[derive(Debug, Default)]
pub struct RequestCookies {
    values: HashMap<String, String>,
}

impl RequestCookies {
    /// Parse all `Cookie` headers on the request.
    ///
    /// Undecodable headers and malformed pairs are skipped, not fatal.
    pub fn extract(req: &Request<Body>) -> Self {
        let mut values = HashMap::new();

        for header_value in req.headers().get_all(header::COOKIE) {
            let raw = match header_value.to_str() {
                Ok(raw) => raw,
                Err(err) => {
                    let err = ParamReadError::CookieHeader(err);
                    tracing::warn!(error = %err, "skipping cookie header");
                    continue;
                }
            };
            for cookie in Cookie::split_parse_encoded(raw).flatten() {
                let (name, value) = cookie.name_value();
                values
                    .entry(name.to_owned())
                    .or_insert_with(|| value.to_owned());
            }
        }

        Self { values }
    }
}

impl crate::reconcile::CookieSource for RequestCookies {
    fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

fn is_urlencoded_form(req: &Request<Body>) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|content_type| content_type.split(';').next())
        .is_some_and(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}
