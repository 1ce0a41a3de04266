//! The handler invocation boundary.

use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;

/// The opaque value a handler may hand back to the dispatcher's caller.
///
/// `None` means the handler produced no return value; dispatch propagates
/// whatever it gets without interpreting it.
pub type HandlerValue = Option<serde_json::Value>;

/// A request handler.
///
/// Handlers receive the request value and a mutable response value, and may
/// return an arbitrary payload which dispatch passes through untouched.
/// The trait is object safe; routes store handlers as [`SharedHandler`].
///
/// Implemented for plain closures:
///
/// ```rust
/// use hermes_core::{Handler, Request, Response, SharedHandler};
/// use std::sync::Arc;
///
/// let handler: SharedHandler = Arc::new(|req: &Request, _res: &mut Response| {
///     Some(serde_json::json!({ "path": req.path() }))
/// });
///
/// let request = Request::new(http::Method::GET, "/ping");
/// let mut response = Response::new();
/// let value = handler.invoke(&request, &mut response);
/// assert_eq!(value.unwrap()["path"], "/ping");
/// ```
pub trait Handler: Send + Sync {
    /// Handles one dispatched request.
    fn invoke(&self, request: &Request, response: &mut Response) -> HandlerValue;
}

impl<F> Handler for F
where
    F: Fn(&Request, &mut Response) -> HandlerValue + Send + Sync,
{
    fn invoke(&self, request: &Request, response: &mut Response) -> HandlerValue {
        self(request, response)
    }
}

/// A shared, type-erased handler reference as stored in route records.
pub type SharedHandler = Arc<dyn Handler>;
