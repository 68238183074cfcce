//! Axum middleware that reconciles request parameters with cookies.
//!
//! A value supplied once as a query or form parameter (a referral code, an
//! affiliate tag) is written back as a cookie and exposed to the wrapped
//! application on every later request, without the client resending it.

pub mod config;
pub mod http;
pub mod reconcile;

pub use config::normalize::ParamCookieSpec;
pub use config::schema::{CookieAttributes, SameSitePolicy, TrackedParamConfig};
pub use http::middleware::{ParamToCookie, TrackedValues, param_to_cookie_middleware};
