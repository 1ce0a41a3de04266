//! Core value objects and the handler boundary for the Hermes dispatch
//! framework.
//!
//! Everything here is deliberately thin plumbing around the dispatch core:
//!
//! - [`Request`] / [`Response`] — the value objects middleware and handlers
//!   see. The transport adapter constructs the request inputs and flushes
//!   whatever the response records; no wire I/O happens in this crate.
//! - [`Handler`] — the synchronous invocation boundary, object safe and
//!   implemented for plain closures; stored in routes as [`SharedHandler`].
//! - [`HandlerResolver`] — the seam for loading callables lazily from a
//!   route's source locator; [`DirectResolver`] is the identity default.
//! - [`RequestContext`] — per-dispatch introspection handed to middleware
//!   once a route has matched.

#![forbid(unsafe_code)]

mod context;
mod error;
mod handler;
mod request;
mod resolve;
mod response;

pub use context::RequestContext;
pub use error::ResolveError;
pub use handler::{Handler, HandlerValue, SharedHandler};
pub use request::Request;
pub use resolve::{DirectResolver, HandlerResolver};
pub use response::Response;

// Re-exported so downstream crates take parameter types from one place.
pub use hermes_router::Params;
