//! End-to-end dispatch tests.
//!
//! These tests register a small controller set and drive requests through
//! lookup, binding, invocation and normalization.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use http::{Method, StatusCode};
use serde::Serialize;
use wayfinder::prelude::*;

/// A record returned by the user controller.
#[derive(Debug, Serialize)]
struct User {
    id: i64,
    name: String,
}

/// A controller counting its own instantiations.
struct UserController;

static INSTANCES: AtomicUsize = AtomicUsize::new(0);

impl Controller for UserController {
    fn instantiate() -> Result<Self, HandlerError> {
        INSTANCES.fetch_add(1, Ordering::SeqCst);
        Ok(Self)
    }
}

impl UserController {
    fn show(&mut self, args: &BoundArguments) -> HandlerResult<ModelView> {
        let id = args
            .get("id")
            .as_i64()
            .ok_or_else(|| HandlerError::execution("id is required"))?;
        let user = User {
            id,
            name: format!("user-{id}"),
        };
        let user = Value::from_serializable(&user)
            .map_err(|e| HandlerError::with_source("cannot encode user", e))?;
        Ok(ModelView::new("user/show").add("user", user))
    }

    fn search(&mut self, args: &BoundArguments) -> HandlerResult<Value> {
        let ctx = args
            .context()
            .ok_or_else(|| HandlerError::execution("no context"))?;
        Ok(Value::from(vec![
            Value::from(ctx.path()),
            args.get("q").clone(),
            args.get("page").clone(),
            args.get("filters").clone(),
        ]))
    }
}

fn registry() -> Registry {
    Registry::new()
        .route(
            RouteDescriptor::get("/users/{id}", HandlerFn::per_call(UserController::show))
                .with_param(ParamSpec::new("id", ParamType::Long))
                .produces_json()
                .named("UserController", "show"),
        )
        .route(
            RouteDescriptor::get("/users/search", HandlerFn::per_call(UserController::search))
                .with_param(ParamSpec::context("request"))
                .with_param(ParamSpec::string("q"))
                .with_param(ParamSpec::new("page", ParamType::Int).bind_query("p"))
                .with_param(ParamSpec::query_map("filters"))
                .produces_json()
                .named("UserController", "search"),
        )
        .route(
            RouteDescriptor::get(
                "/fail",
                HandlerFn::new(|_: &BoundArguments| -> Result<(), HandlerError> {
                    Err(anyhow::anyhow!("upstream timed out").into())
                }),
            )
            .named("FailController", "fail"),
        )
        .route(
            RouteDescriptor::get(
                "/panic",
                HandlerFn::new(|_: &BoundArguments| -> Result<(), HandlerError> {
                    panic!("handler bug")
                }),
            )
            .produces_json()
            .named("PanicController", "panic"),
        )
        .route(
            RouteDescriptor::delete(
                "/users/{id}",
                HandlerFn::new(|_: &BoundArguments| Ok(JsonEnvelope::error("read only", 403))),
            )
            .with_param(ParamSpec::new("id", ParamType::Long)),
        )
}

fn dispatcher() -> Dispatcher {
    Dispatcher::new(registry().build().unwrap())
}

fn get(path: &str, query: &str) -> RequestContext {
    RequestContext::new(Method::GET, path).with_query(QueryParams::parse(query).unwrap())
}

#[test]
fn test_json_view_unwraps_single_entry() {
    let rendered = dispatcher().dispatch(&get("/users/7", ""));
    assert_eq!(
        rendered.body(),
        Some(r#"{"status":"success","code":200,"data":{"id":7,"name":"user-7"}}"#)
    );
}

#[test]
fn test_controller_instantiated_per_call() {
    let dispatcher = dispatcher();
    let before = INSTANCES.load(Ordering::SeqCst);
    dispatcher.dispatch(&get("/users/1", ""));
    dispatcher.dispatch(&get("/users/2", ""));
    assert!(INSTANCES.load(Ordering::SeqCst) >= before + 2);
}

#[test]
fn test_exact_static_hit_beats_earlier_pattern() {
    // `/users/{id}` is declared first and would match in a scan.
    let rendered = dispatcher().dispatch(&get("/users/search", "q=ada"));
    let body = rendered.body().unwrap();
    assert!(body.starts_with(
        r#"{"status":"success","code":200,"count":4,"data":["\/users\/search","ada""#
    ));
}

#[test]
fn test_binding_precedence_end_to_end() {
    let rendered = dispatcher().dispatch(&get(
        "/Users/Search",
        "q=rust&p=3&page=9&tag=a&tag=b",
    ));
    assert_eq!(
        rendered.body(),
        Some(concat!(
            r#"{"status":"success","code":200,"count":4,"data":["#,
            r#""\/Users\/Search","rust",3,"#,
            r#"{"q":"rust","p":"3","page":"9","tag":["a","b"]}]}"#
        ))
    );
}

#[test]
fn test_missing_query_binds_null() {
    let rendered = dispatcher().dispatch(&get("/users/search", ""));
    assert_eq!(
        rendered.body(),
        Some(r#"{"status":"success","code":200,"count":4,"data":["\/users\/search",null,null,{}]}"#)
    );
}

#[test]
fn test_text_failure_from_anyhow() {
    let rendered = dispatcher().dispatch(&get("/fail", ""));
    assert_eq!(rendered.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(rendered.body(), Some("error: upstream timed out"));
}

#[test]
fn test_panic_is_isolated() {
    let dispatcher = dispatcher();
    let rendered = dispatcher.dispatch(&get("/panic", ""));
    assert_eq!(
        rendered.body(),
        Some(r#"{"status":"error","code":500,"data":{"message":"handler panicked: handler bug"}}"#)
    );

    // The table and other routes are unaffected.
    assert_eq!(dispatcher.routes().len(), 5);
    assert!(dispatcher.dispatch(&get("/users/3", "")).is_json());
}

#[test]
fn test_prebuilt_envelope_on_text_route() {
    let ctx = RequestContext::new(Method::DELETE, "/users/3");
    let rendered = dispatcher().dispatch(&ctx);
    assert_eq!(rendered.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        rendered.body(),
        Some(r#"{"status":"error","code":403,"data":{"message":"read only"}}"#)
    );
}

#[test]
fn test_unknown_verb_and_path() {
    let dispatcher = dispatcher();
    let ctx = RequestContext::from_raw("patch", "/users/3").unwrap();
    assert_eq!(
        dispatcher.dispatch(&ctx),
        Rendered::NoRoute("no route matched for PATCH /users/3".to_string())
    );
    assert_eq!(dispatcher.routes().len(), 5);
}

#[test]
fn test_routes_listing() {
    assert_eq!(
        dispatcher().routes(),
        [
            "GET /users/{id} -> UserController#show",
            "GET /users/search -> UserController#search",
            "GET /fail -> FailController#fail",
            "GET /panic -> PanicController#panic",
            "DELETE /users/{id}",
        ]
    );
}

#[test]
fn test_shared_state_through_closure() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let dispatcher = Dispatcher::new(
        Registry::new()
            .route(RouteDescriptor::post(
                "/hits",
                HandlerFn::new(move |_: &BoundArguments| {
                    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    Ok(i64::try_from(n).unwrap_or(i64::MAX))
                }),
            ))
            .build()
            .unwrap(),
    );

    let ctx = RequestContext::new(Method::POST, "/hits");
    assert_eq!(dispatcher.dispatch(&ctx), Rendered::Text("1".to_string()));
    assert_eq!(dispatcher.dispatch(&ctx), Rendered::Text("2".to_string()));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn test_lowercase_verb_reaches_route() {
    let ctx = RequestContext::new(Method::from_bytes(b"get").unwrap(), "/users/3");
    let rendered = dispatcher().dispatch(&ctx);
    assert_eq!(
        rendered.body(),
        Some(r#"{"status":"success","code":200,"data":{"id":3,"name":"user-3"}}"#)
    );
}

#[test]
fn test_float_capture_keeps_decimal_form() {
    let dispatcher = Dispatcher::new(
        Registry::new()
            .route(
                RouteDescriptor::get(
                    "/ratio/{x}",
                    HandlerFn::new(|args: &BoundArguments| Ok(args.get("x").clone())),
                )
                .with_param(ParamSpec::new("x", ParamType::Float))
                .produces_json(),
            )
            .build()
            .unwrap(),
    );

    let rendered = dispatcher.dispatch(&get("/ratio/0.1", ""));
    assert_eq!(rendered.body(), Some(r#"{"status":"success","code":200,"data":0.1}"#));
}
