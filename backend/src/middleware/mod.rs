//! Actix middleware shared by every route.
//!
//! [`Trace`] opens the per-request correlation scope and writes the access
//! log line.

pub mod trace;

pub use trace::Trace;
