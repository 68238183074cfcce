//! Spec normalization.
//!
//! Turns the caller-supplied map of partial options into fully-populated,
//! immutable per-parameter specs. Runs once at middleware construction;
//! nothing here is touched again per request.

use std::collections::HashMap;
use std::time::Duration;

use crate::config::schema::{CookieAttributes, TrackedParamConfig};

/// Default cookie lifetime: 30 days.
pub const DEFAULT_TTL_SECS: u64 = 60 * 60 * 24 * 30;

/// Fully-populated configuration for one tracked parameter.
#[derive(Debug, Clone)]
pub struct ParamCookieSpec {
    /// Incoming request parameter to watch.
    pub param_name: String,

    /// Cookie to read and write.
    pub cookie_name: String,

    /// Key under which the resolved value is exposed to the wrapped
    /// application.
    pub env_name: String,

    /// Cookie lifetime.
    pub ttl: Duration,

    /// Sentinel value triggering referral indirection.
    pub referral_value: Option<String>,

    /// Parameter holding the real value when `referral_value` matches.
    pub referral_saved: Option<String>,

    /// Newly supplied values longer than this are not persisted.
    pub max_length: Option<usize>,

    /// Extra attributes applied to every cookie this spec writes.
    pub attributes: CookieAttributes,
}

/// Build one spec per map entry, applying defaults.
pub fn normalize(param_cookies: HashMap<String, TrackedParamConfig>) -> Vec<ParamCookieSpec> {
    param_cookies
        .into_iter()
        .map(|(param_name, options)| ParamCookieSpec {
            cookie_name: options.cookie_name.unwrap_or_else(|| param_name.clone()),
            env_name: options.env_name.unwrap_or_else(|| param_name.clone()),
            ttl: Duration::from_secs(options.ttl_secs.unwrap_or(DEFAULT_TTL_SECS)),
            referral_value: options.referral_value,
            referral_saved: options.referral_saved,
            max_length: options.max_length,
            attributes: options.cookie_attributes,
            param_name,
        })
        .collect()
}
