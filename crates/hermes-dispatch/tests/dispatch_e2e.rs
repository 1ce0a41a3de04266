//! End-to-end dispatch integration tests.
//!
//! These tests exercise the full flow through a frozen registry:
//! unconditional preprocess, registration-order route matching, the gated
//! and abortable preroute phase, handler invocation, and the OPTIONS
//! capability-discovery fallback.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use http::header::ALLOW;
use http::StatusCode;

use hermes_core::{Request, RequestContext, Response, SharedHandler};
use hermes_dispatch::{DispatchConfig, DispatchError, DispatchOutcome, Dispatcher};
use hermes_middleware::{HookOutcome, HookPhase, Middleware, Registry};
use hermes_router::RouteSpec;

/// A handler that counts its invocations and reports a tag.
fn counting_handler(tag: &'static str) -> (SharedHandler, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_handler = Arc::clone(&calls);
    let handler: SharedHandler = Arc::new(move |_: &Request, res: &mut Response| {
        calls_in_handler.fetch_add(1, Ordering::SeqCst);
        res.send(StatusCode::OK);
        Some(serde_json::json!(tag))
    });
    (handler, calls)
}

/// Middleware that counts hook invocations and records hook order.
struct Recording {
    name: &'static str,
    preprocess_calls: Arc<AtomicUsize>,
    preroute_calls: Arc<AtomicUsize>,
    order: Arc<Mutex<Vec<&'static str>>>,
}

impl Recording {
    fn new(name: &'static str, order: Arc<Mutex<Vec<&'static str>>>) -> Self {
        Self {
            name,
            preprocess_calls: Arc::new(AtomicUsize::new(0)),
            preroute_calls: Arc::new(AtomicUsize::new(0)),
            order,
        }
    }
}

impl Middleware for Recording {
    fn name(&self) -> &'static str {
        self.name
    }

    fn preprocess(&self, _registry: &Registry) {
        self.preprocess_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn preroute(
        &self,
        _ctx: &RequestContext,
        _request: &Request,
        _response: &mut Response,
    ) -> HookOutcome {
        self.preroute_calls.fetch_add(1, Ordering::SeqCst);
        self.order.lock().unwrap().push(self.name);
        HookOutcome::Continue
    }
}

/// Middleware that aborts every preroute whose matched pattern starts with
/// a prefix.
struct PrefixGate {
    prefix: &'static str,
    aborts: Arc<AtomicUsize>,
}

impl Middleware for PrefixGate {
    fn name(&self) -> &'static str {
        "prefix_gate"
    }

    fn preroute(
        &self,
        ctx: &RequestContext,
        _request: &Request,
        response: &mut Response,
    ) -> HookOutcome {
        if ctx.pattern().is_some_and(|p| p.starts_with(self.prefix)) {
            self.aborts.fetch_add(1, Ordering::SeqCst);
            response.send(StatusCode::UNAUTHORIZED);
            return HookOutcome::Abort;
        }
        HookOutcome::Continue
    }
}

/// Middleware that opts out of the preroute phase entirely.
struct OptedOut {
    preroute_calls: Arc<AtomicUsize>,
}

impl Middleware for OptedOut {
    fn name(&self) -> &'static str {
        "opted_out"
    }

    fn should_run(&self, phase: HookPhase) -> bool {
        phase != HookPhase::Preroute
    }

    fn preroute(
        &self,
        _ctx: &RequestContext,
        _request: &Request,
        _response: &mut Response,
    ) -> HookOutcome {
        self.preroute_calls.fetch_add(1, Ordering::SeqCst);
        HookOutcome::Continue
    }
}

#[test]
fn constrained_param_matches_digits_and_rejects_the_rest() {
    // Scenario: GET /users/{id} with id constrained to digits.
    let mut registry = Registry::new();
    let (handler, calls) = counting_handler("user");
    registry
        .add_route(
            RouteSpec::new("/users/{id}")
                .pattern("id", "[0-9]+")
                .get(handler),
        )
        .unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry));

    match dispatcher.dispatch("GET", "/users/42").unwrap() {
        DispatchOutcome::Handled { value, .. } => {
            assert_eq!(value, Some(serde_json::json!("user")));
        }
        other => panic!("expected Handled, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let err = dispatcher.dispatch("GET", "/users/abc").unwrap_err();
    assert!(matches!(err, DispatchError::InvalidPath { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn handler_sees_extracted_params() {
    let mut registry = Registry::new();
    let handler: SharedHandler = Arc::new(|req: &Request, res: &mut Response| {
        res.send(StatusCode::OK);
        Some(serde_json::json!({
            "category": req.param("category"),
            "post": req.param("post"),
        }))
    });
    registry
        .add_route(RouteSpec::new("/blog/{category}/{post}").get(handler))
        .unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry));

    match dispatcher.dispatch("GET", "/blog/rust/routers").unwrap() {
        DispatchOutcome::Handled { value, .. } => {
            let value = value.unwrap();
            assert_eq!(value["category"], "rust");
            assert_eq!(value["post"], "routers");
        }
        other => panic!("expected Handled, got {other:?}"),
    }
}

#[test]
fn options_fallback_announces_the_full_static_verb_set() {
    // Scenario: only POST and GET registered for /items; the discovery
    // response still announces every supported verb.
    let mut registry = Registry::new();
    let (get_handler, _) = counting_handler("list");
    let (post_handler, _) = counting_handler("create");
    registry
        .add_route(
            RouteSpec::new("/items")
                .get(get_handler)
                .post(post_handler),
        )
        .unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry));

    match dispatcher.dispatch("OPTIONS", "/items").unwrap() {
        DispatchOutcome::Options { allowed, response } => {
            assert_eq!(allowed.len(), 7);
            assert_eq!(response.status(), Some(StatusCode::OK));
            assert_eq!(response.format(), Some("httpd/unix-directory"));
            assert_eq!(
                response.headers().get(ALLOW).unwrap(),
                "GET,POST,PUT,PATCH,DELETE,HEAD,OPTIONS"
            );
        }
        other => panic!("expected Options, got {other:?}"),
    }
}

#[test]
fn preroute_abort_vetoes_the_handler() {
    // Scenario: a gate aborts everything under /admin/.
    let mut registry = Registry::new();
    let (handler, calls) = counting_handler("dash");
    registry
        .add_route(RouteSpec::new("/admin/{action}").get(handler))
        .unwrap();
    let aborts = Arc::new(AtomicUsize::new(0));
    registry.attach(PrefixGate {
        prefix: "/admin/",
        aborts: Arc::clone(&aborts),
    });
    let dispatcher = Dispatcher::new(Arc::new(registry));

    let outcome = dispatcher.dispatch("GET", "/admin/dash").unwrap();
    assert!(outcome.is_aborted());
    assert_eq!(outcome.response().status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(aborts.load(Ordering::SeqCst), 1);
}

#[test]
fn abort_skips_remaining_preroute_hooks() {
    let mut registry = Registry::new();
    let (handler, calls) = counting_handler("secret");
    registry
        .add_route(RouteSpec::new("/admin/{action}").get(handler))
        .unwrap();

    let order = Arc::new(Mutex::new(Vec::new()));
    let before = Recording::new("before_gate", Arc::clone(&order));
    let before_preroute = Arc::clone(&before.preroute_calls);
    registry.attach(before);
    registry.attach(PrefixGate {
        prefix: "/admin/",
        aborts: Arc::new(AtomicUsize::new(0)),
    });
    let after = Recording::new("after_gate", Arc::clone(&order));
    let after_preroute = Arc::clone(&after.preroute_calls);
    registry.attach(after);

    let dispatcher = Dispatcher::new(Arc::new(registry));
    let outcome = dispatcher.dispatch("GET", "/admin/panel").unwrap();

    assert!(outcome.is_aborted());
    assert_eq!(before_preroute.load(Ordering::SeqCst), 1);
    assert_eq!(after_preroute.load(Ordering::SeqCst), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(*order.lock().unwrap(), vec!["before_gate"]);
}

#[test]
fn preprocess_runs_once_per_middleware_per_attempt() {
    let mut registry = Registry::new();
    let (handler, _) = counting_handler("ok");
    registry
        .add_route(RouteSpec::new("/ping").get(handler))
        .unwrap();

    let order = Arc::new(Mutex::new(Vec::new()));
    let first = Recording::new("first", Arc::clone(&order));
    let second = Recording::new("second", Arc::clone(&order));
    let first_pre = Arc::clone(&first.preprocess_calls);
    let second_pre = Arc::clone(&second.preprocess_calls);
    registry.attach(first);
    registry.attach(second);

    let dispatcher = Dispatcher::new(Arc::new(registry));

    // Matched dispatch.
    dispatcher.dispatch("GET", "/ping").unwrap();
    // Unmatched dispatch.
    let _ = dispatcher.dispatch("GET", "/missing");
    // Discovery dispatch.
    dispatcher.dispatch("OPTIONS", "/missing").unwrap();

    assert_eq!(first_pre.load(Ordering::SeqCst), 3);
    assert_eq!(second_pre.load(Ordering::SeqCst), 3);
}

#[test]
fn preroute_hooks_run_in_attachment_order() {
    let mut registry = Registry::new();
    let (handler, _) = counting_handler("ok");
    registry
        .add_route(RouteSpec::new("/ping").get(handler))
        .unwrap();

    let order = Arc::new(Mutex::new(Vec::new()));
    registry.attach(Recording::new("alpha", Arc::clone(&order)));
    registry.attach(Recording::new("beta", Arc::clone(&order)));
    registry.attach(Recording::new("gamma", Arc::clone(&order)));

    let dispatcher = Dispatcher::new(Arc::new(registry));
    dispatcher.dispatch("GET", "/ping").unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["alpha", "beta", "gamma"]);
}

#[test]
fn should_run_false_skips_preroute_entirely() {
    let mut registry = Registry::new();
    let (handler, calls) = counting_handler("ok");
    registry
        .add_route(RouteSpec::new("/ping").get(handler))
        .unwrap();

    let preroute_calls = Arc::new(AtomicUsize::new(0));
    registry.attach(OptedOut {
        preroute_calls: Arc::clone(&preroute_calls),
    });

    let dispatcher = Dispatcher::new(Arc::new(registry));
    dispatcher.dispatch("GET", "/ping").unwrap();

    assert_eq!(preroute_calls.load(Ordering::SeqCst), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn discovery_runs_preroute_hooks_but_cannot_be_aborted() {
    let mut registry = Registry::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    let recording = Recording::new("observer", Arc::clone(&order));
    let preroute_calls = Arc::clone(&recording.preroute_calls);
    registry.attach(recording);
    // A gate that aborts unconditionally; the discovery path must ignore it.
    struct AlwaysAbort;
    impl Middleware for AlwaysAbort {
        fn name(&self) -> &'static str {
            "always_abort"
        }
        fn preroute(
            &self,
            _ctx: &RequestContext,
            _request: &Request,
            _response: &mut Response,
        ) -> HookOutcome {
            HookOutcome::Abort
        }
    }
    registry.attach(AlwaysAbort);

    let dispatcher = Dispatcher::new(Arc::new(registry));
    let outcome = dispatcher.dispatch("options", "/anywhere").unwrap();

    assert!(matches!(outcome, DispatchOutcome::Options { .. }));
    assert_eq!(preroute_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn duplicate_registration_last_write_wins() {
    let mut registry = Registry::new();
    let (first, first_calls) = counting_handler("first");
    let (second, second_calls) = counting_handler("second");
    registry
        .add_route(RouteSpec::new("/items").get(first))
        .unwrap();
    let replaced = registry
        .add_route(RouteSpec::new("/items").get(second))
        .unwrap();
    assert_eq!(replaced.len(), 1);

    let dispatcher = Dispatcher::new(Arc::new(registry));
    dispatcher.dispatch("GET", "/items").unwrap();

    assert_eq!(first_calls.load(Ordering::SeqCst), 0);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn overlapping_templates_resolve_to_the_first_registered() {
    let mut registry = Registry::new();
    let (literal, literal_calls) = counting_handler("literal");
    let (param, param_calls) = counting_handler("param");
    registry
        .add_route(RouteSpec::new("/users/me").get(literal))
        .unwrap();
    registry
        .add_route(RouteSpec::new("/users/{id}").get(param))
        .unwrap();

    let dispatcher = Dispatcher::new(Arc::new(registry));
    dispatcher.dispatch("GET", "/users/me").unwrap();

    assert_eq!(literal_calls.load(Ordering::SeqCst), 1);
    assert_eq!(param_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn attach_named_with_unknown_factory_adds_nothing() {
    // Scenario: attaching a type outside the capability set fails up front.
    let mut registry = Registry::new();
    let err = registry
        .attach_named("not_a_middleware", &serde_json::json!({}))
        .unwrap_err();

    assert!(matches!(
        err,
        hermes_middleware::ChainError::UnknownMiddleware { .. }
    ));
    assert!(registry.middleware().is_empty());
}

#[test]
fn bootstrap_applies_loaded_configuration() {
    let config =
        DispatchConfig::from_toml_str("warn_on_duplicate_route = false\n").unwrap();

    let mut registry = Registry::new();
    config.apply(&mut registry);
    let (first, _) = counting_handler("first");
    let (second, second_calls) = counting_handler("second");
    registry
        .add_route(RouteSpec::new("/quiet").get(first))
        .unwrap();
    // Overwrites without a diagnostic; last write still wins.
    registry
        .add_route(RouteSpec::new("/quiet").get(second))
        .unwrap();

    let dispatcher = Dispatcher::new(Arc::new(registry)).with_config(config);
    dispatcher.dispatch("GET", "/quiet").unwrap();
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn middleware_can_introspect_the_registry_during_preprocess() {
    struct RouteCounter {
        seen: Arc<AtomicUsize>,
    }

    impl Middleware for RouteCounter {
        fn name(&self) -> &'static str {
            "route_counter"
        }

        fn preprocess(&self, registry: &Registry) {
            self.seen.store(registry.routes().len(), Ordering::SeqCst);
        }
    }

    let mut registry = Registry::new();
    let (handler, _) = counting_handler("ok");
    registry
        .add_route(RouteSpec::new("/a").get(handler))
        .unwrap();
    let seen = Arc::new(AtomicUsize::new(0));
    registry.attach(RouteCounter {
        seen: Arc::clone(&seen),
    });

    let dispatcher = Dispatcher::new(Arc::new(registry));
    let _ = dispatcher.dispatch("GET", "/a");

    assert_eq!(seen.load(Ordering::SeqCst), 1);
}
