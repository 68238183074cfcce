//! Per-request reconciliation logic.
//!
//! # Responsibilities
//! - Decide the effective value for each tracked parameter
//! - Resolve referral indirection (sentinel → saved parameter)
//! - Decide whether a cookie write-back is due and compute its expiry
//!
//! # Design Decisions
//! - Pure computation: no I/O, no clock of its own, no mutation
//! - Lookup seams are traits so the logic tests against plain maps
//! - Specs are independent; each decision sees only its own spec

pub mod decision;

pub use decision::CookieSource;
pub use decision::ParamSource;
pub use decision::Reconciliation;
pub use decision::WriteBack;
pub use decision::reconcile;
