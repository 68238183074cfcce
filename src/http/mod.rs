//! HTTP boundary for the middleware.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → params.rs (parameter + cookie views, read failures → absence)
//!     → reconcile (one pure decision per spec)
//!     → middleware.rs (TrackedValues extension, wrapped app via Next,
//!       Set-Cookie appended per write-back)
//!     → outgoing response
//! ```

pub mod middleware;
pub mod params;

pub use middleware::ParamToCookie;
pub use middleware::TrackedValues;
pub use middleware::param_to_cookie_middleware;
pub use params::RequestCookies;
pub use params::RequestParams;
