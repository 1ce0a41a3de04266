//! Path template matching and route tables for the Hermes dispatch
//! framework.
//!
//! This crate provides the pattern layer of request dispatch:
//!
//! - [`PathTemplate`] compiles a pattern with `{name}` tokens (each
//!   optionally bound to a custom matching expression) into an anchored
//!   matcher that extracts [`Params`] from a URI, or reports no match.
//! - [`RouteTable`] maps HTTP methods to insertion-ordered routes; lookup
//!   order is registration order and the first matching template wins.
//! - [`RouteSpec`] is the registration builder: one path, its token
//!   overrides, and a handler per method.
//!
//! The handler payload is generic; this crate knows nothing about
//! invocation. See `hermes-dispatch` for the orchestration layer.
//!
//! # Example
//!
//! ```rust
//! use hermes_router::{RouteSpec, RouteTable};
//! use http::Method;
//!
//! let mut table: RouteTable<&str> = RouteTable::new();
//! table
//!     .add_route(
//!         RouteSpec::new("/blog/{category}/{post}")
//!             .get("show_post"),
//!     )
//!     .unwrap();
//!
//! let (route, params) = table
//!     .find_match(&Method::GET, "/blog/rust/routers")
//!     .unwrap();
//! assert_eq!(*route.handler(), "show_post");
//! assert_eq!(params.get("category"), Some("rust"));
//! ```

#![forbid(unsafe_code)]

mod error;
mod params;
mod route;
mod table;
mod template;

pub use error::PatternError;
pub use params::Params;
pub use route::{Route, RouteSpec};
pub use table::{RouteTable, SUPPORTED_METHODS};
pub use template::{ParamOverrides, PathTemplate};
