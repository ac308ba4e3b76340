use http::Method;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{Dispatcher, Outcome, Request, Response};
use crate::config::RouterConfig;
use crate::controller::{Controller, ControllerRegistry};
use crate::error::RouterError;
use crate::registry::{Callback, RouterBuilder};

#[derive(Default)]
struct Home;

impl Controller for Home {
    fn call(&mut self, action: &str, args: &[String]) -> Option<String> {
        match action {
            "index" => Some("welcome".to_string()),
            "show" => Some(format!("home {}", args.join("/"))),
            _ => None,
        }
    }
}

fn controllers() -> ControllerRegistry {
    let mut controllers = ControllerRegistry::default();
    controllers.register_default::<Home>("Home");
    controllers
}

#[test]
fn test_inline_handler_receives_captures() {
    let mut builder = RouterBuilder::default();
    builder.get(
        "/sum/:num1/:num2",
        Callback::inline(|args| {
            let total: u64 = args.iter().filter_map(|a| a.parse::<u64>().ok()).sum();
            total.to_string()
        }),
    );
    let dispatcher = Dispatcher::new(builder.build().unwrap(), controllers());

    let response = dispatcher.dispatch(&Request::get("/sum/2/40"));
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "42");
    assert_eq!(
        response.get_header("content-type"),
        Some("text/html; charset=utf-8")
    );
}

#[test]
fn test_controller_action() {
    let mut builder = RouterBuilder::default();
    builder.get("/home/:any", Callback::action("Home::show").unwrap());
    let dispatcher = Dispatcher::new(builder.build().unwrap(), controllers());

    let outcome = dispatcher.try_dispatch(&Request::get("/home/docs")).unwrap();
    assert_eq!(
        outcome,
        Outcome::Rendered {
            template: "/home/:any".to_string(),
            body: "home docs".to_string(),
        }
    );
}

#[test]
fn test_qualified_controller_action() {
    let mut controllers = controllers();
    controllers.register_default::<Home>("Web::Home");
    let mut builder = RouterBuilder::default();
    builder.get("/web", Callback::action("Web::Home::index").unwrap());
    let dispatcher = Dispatcher::new(builder.build().unwrap(), controllers);

    let response = dispatcher.dispatch(&Request::get("/web"));
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "welcome");
}

#[test]
fn test_default_route_uses_default_controller() {
    let builder = RouterBuilder::new(RouterConfig::with_default("Home", "index"));
    let dispatcher = Dispatcher::new(builder.build().unwrap(), controllers());

    let response = dispatcher.dispatch(&Request::get("/"));
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "welcome");
    // An empty request target is the root as well
    assert_eq!(dispatcher.dispatch(&Request::get("")).body, "welcome");
}

#[test]
fn test_unresolvable_controller_is_500() {
    let mut builder = RouterBuilder::default();
    builder.get("/missing", Callback::action("Missing::index").unwrap());
    builder.get("/no-action", Callback::action("Home::nope").unwrap());
    let dispatcher = Dispatcher::new(builder.build().unwrap(), controllers());

    for path in ["/missing", "/no-action"] {
        let err = dispatcher.try_dispatch(&Request::get(path)).unwrap_err();
        assert!(matches!(err, RouterError::UnresolvableController { .. }));

        let response = dispatcher.dispatch(&Request::get(path));
        assert_eq!(response.status, 500);
        assert_eq!(response.get_header("content-type"), Some("application/json"));
    }
}

#[test]
fn test_no_route_is_404_without_side_effects() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut builder = RouterBuilder::default();
    builder.get(
        "/only",
        Callback::inline(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            String::new()
        }),
    );
    let dispatcher = Dispatcher::new(builder.build().unwrap(), controllers());

    let response = dispatcher.dispatch(&Request::get("/nowhere"));
    assert_eq!(response.status, 404);
    let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["status"], 404);

    let response = dispatcher.dispatch(&Request::post("/only"));
    assert_eq!(response.status, 404);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_redirect_runs_no_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut builder = RouterBuilder::default();
    builder.redirect_with_status("/old", "/new", 302).unwrap();
    builder.get(
        "/:any",
        Callback::inline(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            String::new()
        }),
    );
    let dispatcher = Dispatcher::new(builder.build().unwrap(), controllers());

    let req = Request::get("/old").with_host("example.com").with_scheme("https");
    let response = dispatcher.dispatch(&req);
    assert_eq!(response.status, 302);
    assert!(response.is_redirect());
    assert_eq!(
        response.get_header("location"),
        Some("https://example.com/new")
    );
    assert!(response.body.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_redirect_includes_mount_prefix() {
    let mut builder = RouterBuilder::new(RouterConfig::default().mounted_at("/site"));
    builder.redirect("/old", "/new").unwrap();
    let dispatcher = Dispatcher::new(builder.build().unwrap(), controllers());

    let outcome = dispatcher
        .try_dispatch(&Request::get("/site/old").with_host("example.com:8080"))
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::Redirect {
            location: "http://example.com:8080/site/new".to_string(),
            status: 301,
        }
    );
}

#[test]
fn test_redirect_keeps_request_host() {
    let mut builder = RouterBuilder::new(RouterConfig::default().mounted_at("/app"));
    builder.redirect("/old", "//evil.example/x").unwrap();
    builder.redirect("/relative", "new").unwrap();
    let dispatcher = Dispatcher::new(builder.build().unwrap(), controllers());

    let outcome = dispatcher
        .try_dispatch(&Request::get("/app/old").with_host("site.test"))
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::Redirect {
            location: "http://site.test/app/evil.example/x".to_string(),
            status: 301,
        }
    );

    let response = dispatcher.dispatch(&Request::get("/app/relative").with_host("site.test"));
    assert_eq!(response.get_header("location"), Some("http://site.test/app/new"));
}

#[test]
fn test_redirect_to_absolute_url() {
    let mut builder = RouterBuilder::default();
    builder
        .redirect_with_status("/docs", "https://docs.example.org/guide", 308)
        .unwrap();
    let dispatcher = Dispatcher::new(builder.build().unwrap(), controllers());

    let response = dispatcher.dispatch(&Request::get("/docs"));
    assert_eq!(response.status, 308);
    assert_eq!(
        response.get_header("location"),
        Some("https://docs.example.org/guide")
    );
}

#[test]
fn test_query_string_is_ignored_for_matching() {
    let mut builder = RouterBuilder::default();
    builder.get("/search", Callback::inline(|_| "results".to_string()));
    let dispatcher = Dispatcher::new(builder.build().unwrap(), controllers());
    assert_eq!(dispatcher.dispatch(&Request::get("/search?q=rust")).body, "results");
}

#[test]
fn test_handler_panic_is_contained() {
    let mut builder = RouterBuilder::default();
    builder.get("/boom", Callback::inline(|_| panic!("handler exploded")));
    builder.get("/fine", Callback::inline(|_| "still serving".to_string()));
    let dispatcher = Dispatcher::new(builder.build().unwrap(), controllers());

    match dispatcher.try_dispatch(&Request::get("/boom")).unwrap_err() {
        RouterError::HandlerPanicked { template, message } => {
            assert_eq!(template, "/boom");
            assert_eq!(message, "handler exploded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(dispatcher.dispatch(&Request::get("/boom")).status, 500);
    assert_eq!(dispatcher.dispatch(&Request::get("/fine")).body, "still serving");
}

#[test]
fn test_request_from_http_request() {
    let req = http::Request::builder()
        .method(Method::POST)
        .uri("/form?step=2")
        .header("host", "example.com")
        .body(())
        .unwrap();
    let req = Request::from(&req);
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.uri, "/form?step=2");
    assert_eq!(req.host, "example.com");
    assert_eq!(req.scheme, "http");

    let req = http::Request::builder()
        .uri("https://example.org/a")
        .body(())
        .unwrap();
    let req = Request::from(&req);
    assert_eq!(req.scheme, "https");
    assert_eq!(req.host, "example.org");
    assert_eq!(req.uri, "/a");
}

#[test]
fn test_response_into_http() {
    let response = Response::redirect("http://localhost/new".to_string(), 301)
        .into_http()
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers().get(http::header::LOCATION).unwrap(),
        "http://localhost/new"
    );
}

#[test]
fn test_dispatcher_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Dispatcher>();
}
