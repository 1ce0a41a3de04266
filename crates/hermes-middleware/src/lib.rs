//! Two-phase middleware chain for the Hermes dispatch framework.
//!
//! Middleware here follows a preprocess/preroute protocol:
//!
//! - [`Middleware::preprocess`] runs unconditionally for every attached
//!   instance on every dispatch attempt, before route lookup.
//! - [`Middleware::preroute`] runs only once a route has matched, gated per
//!   instance by [`Middleware::should_run`], and may return
//!   [`HookOutcome::Abort`] to stop the chain and veto the handler.
//!
//! [`MiddlewareChain`] holds instances in attachment order and a registry
//! of named factories for constructing middleware from configuration
//! payloads. [`Registry`] bundles the chain with a route table as the one
//! shared-state object a dispatcher serves from.

#![forbid(unsafe_code)]

mod chain;
mod error;
mod middleware;
mod registry;

pub use chain::{MiddlewareChain, MiddlewareFactory, SharedMiddleware};
pub use error::ChainError;
pub use middleware::{HookOutcome, HookPhase, Middleware};
pub use registry::Registry;
