//! # Hermes
//!
//! **Request routing and two-phase middleware dispatch for the Themis
//! Platform**
//!
//! Hermes resolves an incoming (method, URI) pair to a registered handler,
//! extracting path parameters from compiled templates, and runs an ordered
//! middleware chain around the resolution:
//!
//! - **Templates** — `{name}` tokens with optional per-token matching
//!   expressions, compiled once at registration.
//! - **Routes** — method-keyed, insertion-ordered; the first matching
//!   template wins, and re-registering a (method, path) pair silently
//!   replaces the handler.
//! - **Middleware** — an unconditional `preprocess` phase before lookup,
//!   and a gated, abortable `preroute` phase once a route has matched.
//! - **Dispatch** — one synchronous call chain per request; unmatched
//!   OPTIONS requests get a capability-discovery response, everything else
//!   unmatched fails with `InvalidPath`.
//!
//! ## Quick Start
//!
//! ```rust
//! use hermes::prelude::*;
//! use std::sync::Arc;
//!
//! let mut registry = Registry::new();
//! let handler: SharedHandler = Arc::new(|req: &Request, res: &mut Response| {
//!     res.send(http::StatusCode::OK);
//!     Some(serde_json::json!({ "user": req.param("id") }))
//! });
//! registry
//!     .add_route(RouteSpec::new("/users/{id}").pattern("id", "[0-9]+").get(handler))
//!     .unwrap();
//!
//! // Bootstrap is over: freeze the registry and serve.
//! let dispatcher = Dispatcher::new(Arc::new(registry));
//! let outcome = dispatcher.dispatch("GET", "/users/42").unwrap();
//! assert!(!outcome.is_aborted());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! bootstrap:  Registry ← routes + middleware (mutable, once)
//! serving:    Dispatcher → preprocess(all) → lookup → match
//!                        → preroute(gated, abortable) → handler
//! ```

#![doc(html_root_url = "https://docs.rs/hermes/0.1.0")]
#![forbid(unsafe_code)]

// Re-export core types
pub use hermes_core as core;

// Re-export router types
pub use hermes_router as router;

// Re-export middleware types
pub use hermes_middleware as middleware;

// Re-export dispatch types
pub use hermes_dispatch as dispatch;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use hermes_core::{
        DirectResolver, Handler, HandlerResolver, HandlerValue, Params, Request, RequestContext,
        Response, SharedHandler,
    };
    pub use hermes_dispatch::{
        ConfigError, DispatchConfig, DispatchError, DispatchOutcome, Dispatcher,
    };
    pub use hermes_middleware::{
        ChainError, HookOutcome, HookPhase, Middleware, MiddlewareChain, Registry,
    };
    pub use hermes_router::{
        ParamOverrides, PathTemplate, PatternError, Route, RouteSpec, RouteTable,
    };
}
