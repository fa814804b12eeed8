//! Freshness and shelf-life resolution.
//!
//! Everything in this crate is pure: no I/O, no clock. Callers pass the
//! current calendar date explicitly.

mod expiry;
mod freshness;
mod knowledge_base;

pub use expiry::*;
pub use freshness::*;
pub use knowledge_base::*;
