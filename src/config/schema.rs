//! Configuration schema definitions.
//!
//! Caller-facing option types for the middleware. All types derive Serde
//! traits so they can be deserialized from a config file alongside the host
//! application's own configuration.

use serde::{Deserialize, Serialize};

/// Partial options for one tracked parameter.
///
/// Every field is optional; missing fields are filled during normalization
/// (see [`normalize`](crate::config::normalize::normalize)).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TrackedParamConfig {
    /// Cookie to read and write. Defaults to the parameter name.
    pub cookie_name: Option<String>,

    /// Key under which the resolved value is exposed to the wrapped
    /// application. Defaults to the parameter name.
    pub env_name: Option<String>,

    /// Cookie lifetime in seconds. Defaults to 30 days.
    pub ttl_secs: Option<u64>,

    /// Sentinel parameter value. When the incoming parameter equals this,
    /// the real value is read from the parameter named by `referral_saved`.
    pub referral_value: Option<String>,

    /// Parameter holding the real value when `referral_value` matches.
    pub referral_saved: Option<String>,

    /// Newly supplied values longer than this are not persisted as cookies.
    pub max_length: Option<usize>,

    /// Extra attributes applied to every cookie this parameter writes.
    pub cookie_attributes: CookieAttributes,
}

/// Pass-through cookie attributes.
///
/// `value` and `expires` are deliberately absent: they are computed per
/// request and cannot be overridden from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CookieAttributes {
    /// Cookie Path attribute.
    pub path: Option<String>,

    /// Cookie Domain attribute.
    pub domain: Option<String>,

    /// Secure attribute (HTTPS-only).
    pub secure: bool,

    /// HttpOnly attribute (prevents JavaScript access).
    pub http_only: bool,

    /// SameSite attribute (cross-site request policy).
    pub same_site: Option<SameSitePolicy>,
}

/// SameSite cookie attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    /// Cookie only sent on same-site requests.
    Strict,
    /// Cookie sent on same-site requests and top-level navigation.
    Lax,
    /// Cookie sent on all requests.
    None,
}

impl From<SameSitePolicy> for cookie::SameSite {
    fn from(policy: SameSitePolicy) -> Self {
        match policy {
            SameSitePolicy::Strict => cookie::SameSite::Strict,
            SameSitePolicy::Lax => cookie::SameSite::Lax,
            SameSitePolicy::None => cookie::SameSite::None,
        }
    }
}
