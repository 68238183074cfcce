//! The per-request decision function.

use std::collections::HashMap;
use std::time::SystemTime;

use crate::config::normalize::ParamCookieSpec;
use crate::config::schema::CookieAttributes;

/// Read-only view of the request's parameters.
///
/// Lookups return `None` both for missing keys and for keys the store could
/// not read; the request boundary folds read failures into absence before
/// the decision logic runs.
pub trait ParamSource {
    /// Returns the parameter value, if present and readable.
    fn get(&self, name: &str) -> Option<&str>;
}

/// Read-only view of the request's cookies.
pub trait CookieSource {
    /// Returns the cookie value, if present.
    fn get(&self, name: &str) -> Option<&str>;
}

impl ParamSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<&str> {
        HashMap::get(self, name).map(String::as_str)
    }
}

impl CookieSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<&str> {
        HashMap::get(self, name).map(String::as_str)
    }
}

/// Cookie directive to apply to the outgoing response.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteBack {
    /// Cookie name.
    pub cookie_name: String,
    /// Cookie value: the value supplied by this request, post-indirection.
    pub value: String,
    /// Absolute expiry, computed as decision time plus the spec's ttl.
    pub expires_at: SystemTime,
    /// Pass-through attributes from the spec.
    pub attributes: CookieAttributes,
}

/// Outcome of reconciling one spec against one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Value to expose to the wrapped application, if any.
    pub effective: Option<String>,
    /// Cookie to set on the response, if the request supplied a new value.
    pub write_back: Option<WriteBack>,
}

/// Reconcile one spec against the current request state.
///
/// The effective value is the request parameter (after referral indirection)
/// when present, else the stored cookie. A write-back is emitted only when
/// the request itself supplied a value this turn; a value that came purely
/// from an existing cookie is left to persist in the client's store. A newly
/// supplied value identical to the stored one still triggers a rewrite.
pub fn reconcile(
    spec: &ParamCookieSpec,
    params: &dyn ParamSource,
    cookies: &dyn CookieSource,
    now: SystemTime,
) -> Reconciliation {
    let cookie_value = cookies.get(&spec.cookie_name);

    let mut param_value = params.get(&spec.param_name);
    if let (Some(value), Some(sentinel)) = (param_value, spec.referral_value.as_deref()) {
        if value == sentinel {
            // The sentinel says the real value lives in another parameter.
            param_value = spec
                .referral_saved
                .as_deref()
                .and_then(|saved| params.get(saved));
        }
    }

    let effective = param_value.or(cookie_value).map(str::to_owned);

    let write_back = param_value
        .filter(|value| spec.max_length.is_none_or(|max| value.len() <= max))
        .map(|value| WriteBack {
            cookie_name: spec.cookie_name.clone(),
            value: value.to_owned(),
            expires_at: now + spec.ttl,
            attributes: spec.attributes.clone(),
        });

    Reconciliation {
        effective,
        write_back,
    }
}
