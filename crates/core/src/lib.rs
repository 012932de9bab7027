//! Domain types shared by the CSP Scout store and HTTP layers.
//!
//! Nothing in this crate talks to the document store or to HTTP; it defines
//! the report model, identifiers, the error taxonomy and the per-request
//! cancellation carrier that every layer threads through.

pub mod config;
pub mod context;
pub mod error;
pub mod report;
pub mod search;
pub mod types;
