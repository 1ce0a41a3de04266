//! The per-request dispatch state machine.

use std::sync::Arc;

use http::header::{HeaderValue, ALLOW};
use http::{Method, StatusCode};
use tracing::debug;

use hermes_core::{
    DirectResolver, HandlerResolver, HandlerValue, Request, RequestContext, Response,
    SharedHandler,
};
use hermes_middleware::{HookPhase, Middleware as _, Registry};
use hermes_router::{Params, Route, SUPPORTED_METHODS};

use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::uri::normalize_path;

/// Format marker set on capability-discovery responses.
const DISCOVERY_FORMAT: &str = "httpd/unix-directory";

/// The terminal result of one successful dispatch.
///
/// Every variant carries the [`Response`] value the transport should
/// flush. An abort is a success, not an error: some preroute hook decided
/// the request was handled (a redirect, a challenge) and vetoed the
/// handler.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// A route matched and its handler ran; `value` is whatever the
    /// handler returned, propagated untouched.
    Handled {
        /// The handler's opaque return value.
        value: HandlerValue,
        /// The response the handler (and middleware) built.
        response: Response,
    },

    /// A preroute hook aborted the dispatch; the handler never ran.
    Aborted {
        /// The response as the aborting middleware left it.
        response: Response,
    },

    /// No route matched an OPTIONS request; the capability-discovery
    /// response was produced instead.
    Options {
        /// The announced verb set, in its fixed order.
        allowed: Vec<Method>,
        /// The discovery response (format marker, Allow header, 200).
        response: Response,
    },
}

impl DispatchOutcome {
    /// Returns the response value to flush.
    #[must_use]
    pub fn response(&self) -> &Response {
        match self {
            Self::Handled { response, .. }
            | Self::Aborted { response }
            | Self::Options { response, .. } => response,
        }
    }

    /// Returns true if a preroute hook vetoed the handler.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}

/// Resolves requests to handlers and runs the middleware protocol around
/// the resolution.
///
/// One dispatch is one synchronous call chain: there is no internal
/// parallelism and no suspension. The dispatcher only reads from its
/// [`Registry`], so any number of dispatches may run on independent
/// threads once bootstrap is over.
///
/// # Example
///
/// ```rust
/// use hermes_core::{Request, Response, SharedHandler};
/// use hermes_dispatch::Dispatcher;
/// use hermes_middleware::Registry;
/// use hermes_router::RouteSpec;
/// use std::sync::Arc;
///
/// let mut registry = Registry::new();
/// let handler: SharedHandler = Arc::new(|req: &Request, _: &mut Response| {
///     Some(serde_json::json!({ "id": req.param("id") }))
/// });
/// registry
///     .add_route(RouteSpec::new("/users/{id}").pattern("id", "[0-9]+").get(handler))
///     .unwrap();
///
/// let dispatcher = Dispatcher::new(Arc::new(registry));
/// let outcome = dispatcher.dispatch("GET", "/users/42").unwrap();
/// assert!(!outcome.is_aborted());
/// ```
pub struct Dispatcher {
    registry: Arc<Registry>,
    resolver: Arc<dyn HandlerResolver>,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Creates a dispatcher over a frozen registry, with the identity
    /// handler resolver and default configuration.
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            resolver: Arc::new(DirectResolver),
            config: DispatchConfig::default(),
        }
    }

    /// Replaces the handler resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn HandlerResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the registry this dispatcher serves from.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Dispatches one request.
    ///
    /// `method` and `uri` come raw from the transport adapter. The flow:
    ///
    /// 1. Every middleware's `preprocess` runs, unconditionally, in
    ///    attachment order — before route lookup, on every attempt.
    /// 2. Routes registered for the method are tried in registration
    ///    order; the first matching template selects the route.
    /// 3. On a match, gated `preroute` hooks run in order. An abort stops
    ///    the chain and the handler, yielding
    ///    [`DispatchOutcome::Aborted`]. Otherwise the handler is resolved
    ///    and invoked, and its return value propagates in
    ///    [`DispatchOutcome::Handled`].
    /// 4. With no match, an OPTIONS request (method compared
    ///    case-insensitively) produces the capability-discovery response:
    ///    gated preroute hooks run with their outcomes ignored (this path
    ///    cannot be aborted), then the full compiled-in verb set is
    ///    announced uppercased in an `Allow` header with status 200. The
    ///    announced set is the framework's static set, **not** the verbs
    ///    registered for the path — longstanding behavior, kept as is;
    ///    adapters wanting per-path accuracy can consult the registry.
    ///
    /// # Errors
    ///
    /// [`DispatchError::InvalidPath`] when nothing matched and the method
    /// is not OPTIONS; [`DispatchError::Resolve`] when the matched
    /// handler cannot be resolved.
    pub fn dispatch(&self, method: &str, uri: &str) -> Result<DispatchOutcome, DispatchError> {
        for middleware in self.registry.middleware().iter() {
            middleware.preprocess(&self.registry);
        }

        let path = if self.config.decode_uri {
            normalize_path(uri)
        } else {
            uri.to_string()
        };

        if let Ok(method_key) = Method::from_bytes(method.to_ascii_uppercase().as_bytes()) {
            if let Some((route, params)) = self.registry.routes().find_match(&method_key, &path) {
                return self.run_matched(route, params, &method_key, &path);
            }
        }

        if method.eq_ignore_ascii_case("OPTIONS") {
            return Ok(self.run_discovery(&path));
        }

        debug!(method, path = %path, "no route matched");
        Err(DispatchError::invalid_path(method, path))
    }

    /// Runs the preroute phase and the handler for a matched route.
    fn run_matched(
        &self,
        route: &Route<SharedHandler>,
        params: Params,
        method: &Method,
        path: &str,
    ) -> Result<DispatchOutcome, DispatchError> {
        let pattern = route.template().as_pattern();
        debug!(method = %method, pattern, "route matched");

        let request = Request::with_params(method.clone(), path, params.clone());
        let mut response = Response::new();
        let ctx = RequestContext::matched(
            pattern,
            method.clone(),
            params,
            Arc::clone(route.handler()),
        );

        for middleware in self.registry.middleware().iter() {
            if !middleware.should_run(HookPhase::Preroute) {
                continue;
            }
            if middleware.preroute(&ctx, &request, &mut response).is_abort() {
                debug!(middleware = middleware.name(), "preroute aborted dispatch");
                return Ok(DispatchOutcome::Aborted { response });
            }
        }

        let handler = self.resolver.resolve(route.handler(), route.source())?;
        let value = handler.invoke(&request, &mut response);
        Ok(DispatchOutcome::Handled { value, response })
    }

    /// Produces the capability-discovery response for an unmatched OPTIONS
    /// request.
    fn run_discovery(&self, path: &str) -> DispatchOutcome {
        debug!(path, "capability discovery for unmatched OPTIONS");

        let request = Request::new(Method::OPTIONS, path);
        let mut response = Response::new();
        let ctx = RequestContext::discovery(Method::OPTIONS);

        // Outcomes are deliberately ignored: this path cannot be aborted.
        for middleware in self.registry.middleware().iter() {
            if middleware.should_run(HookPhase::Preroute) {
                let _ = middleware.preroute(&ctx, &request, &mut response);
            }
        }

        let allowed: Vec<Method> = SUPPORTED_METHODS.to_vec();
        let header = allowed
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(",");
        response.set_format(DISCOVERY_FORMAT);
        response.insert_header(
            ALLOW,
            HeaderValue::from_str(&header).expect("static verb list is a valid header value"),
        );
        response.send(StatusCode::OK);

        DispatchOutcome::Options { allowed, response }
    }
}
