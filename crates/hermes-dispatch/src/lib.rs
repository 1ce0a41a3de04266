//! Request dispatch orchestration for the Hermes framework.
//!
//! The [`Dispatcher`] ties the pieces together: it resolves an incoming
//! (method, URI) pair to a registered handler through the route table,
//! running the two-phase middleware protocol around the resolution.
//!
//! Per request the flow is fixed:
//!
//! ```text
//! preprocess (all middleware) → route lookup → template match
//!     → preroute (gated, abortable) → handler invocation
//! ```
//!
//! With no matching route, an OPTIONS request falls back to a
//! capability-discovery response announcing the framework's verb set; any
//! other method fails with [`DispatchError::InvalidPath`].
//!
//! Bootstrap builds a [`Registry`](hermes_middleware::Registry), freezes it
//! behind an `Arc`, and hands it to the dispatcher; from then on dispatch
//! is read-only and may run concurrently from any number of threads.

#![forbid(unsafe_code)]

mod config;
mod dispatcher;
mod error;
mod uri;

pub use config::{ConfigError, DispatchConfig};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::DispatchError;
