//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! caller-supplied map (param name → partial options)
//!     → schema.rs (serde types, all fields optional)
//!     → normalize.rs (defaults applied, one immutable spec per entry)
//!     → Vec<ParamCookieSpec> (shared via Arc for the middleware lifetime)
//! ```
//!
//! # Design Decisions
//! - Specs are immutable once built; there is no per-request configuration
//! - All option fields have defaults so a bare `{}` entry is valid
//! - The map key is the tracked parameter name, so parameter names are
//!   unique per middleware instance by construction

pub mod normalize;
pub mod schema;

pub use normalize::ParamCookieSpec;
pub use schema::CookieAttributes;
pub use schema::SameSitePolicy;
pub use schema::TrackedParamConfig;
