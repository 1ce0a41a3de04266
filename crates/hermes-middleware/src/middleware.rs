//! The middleware trait and hook protocol.
//!
//! Middleware wraps dispatch with two hook phases:
//!
//! - **preprocess** runs for every instance on every dispatch attempt,
//!   before route lookup. It cannot abort anything; return values do not
//!   exist in this phase.
//! - **preroute** runs only after a route has matched (and, separately, on
//!   the OPTIONS capability-discovery path), gated per instance by
//!   [`should_run`](Middleware::should_run). Returning
//!   [`HookOutcome::Abort`] stops the chain and prevents the handler from
//!   running.
//!
//! The chain stores instances in attachment order; that order is the de
//! facto priority for preroute short-circuiting. Hooks are only ever
//! invoked by the dispatcher, never by the chain itself.

use hermes_core::{Request, RequestContext, Response};

use crate::registry::Registry;

/// The hook phase a middleware is being asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    /// The unconditional pre-lookup phase.
    Preprocess,
    /// The gated, abortable post-match phase.
    Preroute,
}

/// The result of a preroute hook.
///
/// An explicit tagged result rather than a sentinel value: `Abort` is a
/// successful, deliberate short-circuit, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookOutcome {
    /// Continue with the remaining hooks and the handler.
    #[default]
    Continue,
    /// Stop the chain; the handler must not run.
    Abort,
}

impl HookOutcome {
    /// Returns true for [`HookOutcome::Abort`].
    #[must_use]
    pub fn is_abort(self) -> bool {
        matches!(self, Self::Abort)
    }
}

/// The middleware capability set.
///
/// Only [`name`](Middleware::name) is mandatory; the hook methods default
/// to doing nothing and letting dispatch continue, so an implementation
/// overrides exactly the phases it cares about.
///
/// # Example
///
/// ```rust
/// use hermes_core::{Request, RequestContext, Response};
/// use hermes_middleware::{HookOutcome, Middleware};
///
/// struct AdminGate;
///
/// impl Middleware for AdminGate {
///     fn name(&self) -> &'static str {
///         "admin_gate"
///     }
///
///     fn preroute(
///         &self,
///         ctx: &RequestContext,
///         _request: &Request,
///         _response: &mut Response,
///     ) -> HookOutcome {
///         if ctx.pattern().is_some_and(|p| p.starts_with("/admin/")) {
///             HookOutcome::Abort
///         } else {
///             HookOutcome::Continue
///         }
///     }
/// }
/// ```
pub trait Middleware: Send + Sync + 'static {
    /// Returns the unique name of this middleware, used for logging and
    /// chain introspection.
    fn name(&self) -> &'static str;

    /// Unconditional hook, run before route lookup on every dispatch
    /// attempt. Receives the registry for introspection.
    fn preprocess(&self, registry: &Registry) {
        let _ = registry;
    }

    /// Gate for the conditional phases. Instances that return false for a
    /// phase are skipped entirely in that phase.
    fn should_run(&self, phase: HookPhase) -> bool {
        let _ = phase;
        true
    }

    /// Abortable hook, run after a route has matched.
    fn preroute(
        &self,
        ctx: &RequestContext,
        request: &Request,
        response: &mut Response,
    ) -> HookOutcome {
        let _ = (ctx, request, response);
        HookOutcome::Continue
    }
}
