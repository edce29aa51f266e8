//! Building dispatchers from configuration files.

use std::io::Write as _;

use http::{Method, StatusCode};
use wayfinder::config::{ConfigLoader, ConversionMode, RoutingMode};
use wayfinder::prelude::*;

fn registry() -> Registry {
    Registry::new().route(
        RouteDescriptor::post(
            "/orders/{id}",
            HandlerFn::new(|args: &BoundArguments| Ok(args.get("id").clone())),
        )
        .with_param(ParamSpec::new("id", ParamType::Long))
        .produces_json(),
    )
}

#[test]
fn test_dispatcher_from_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[routing]
mode = "legacy"

[binding]
conversion = "strict"

[telemetry.metrics]
enabled = false
"#
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_file(file.path())
        .unwrap()
        .load()
        .unwrap();
    assert_eq!(config.routing.mode, RoutingMode::Legacy);
    assert_eq!(config.binding.conversion, ConversionMode::Strict);

    let dispatcher = Dispatcher::from_config(&config, registry()).unwrap();

    // Legacy tables ignore the verb.
    let rendered = dispatcher.dispatch(&RequestContext::new(Method::GET, "/orders/12"));
    assert_eq!(
        rendered.body(),
        Some(r#"{"status":"success","code":200,"data":12}"#)
    );

    // Strict binding rejects what lenient binding would null out.
    let rendered = dispatcher.dispatch(&RequestContext::new(Method::POST, "/orders/twelve"));
    assert_eq!(rendered.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_dispatcher_from_default_config() {
    let config = ConfigLoader::new().load().unwrap();
    let dispatcher = Dispatcher::from_config(&config, registry()).unwrap();

    let rendered = dispatcher.dispatch(&RequestContext::new(Method::GET, "/orders/12"));
    assert!(matches!(rendered, Rendered::NoRoute(_)));

    let rendered = dispatcher.dispatch(&RequestContext::new(Method::POST, "/orders/twelve"));
    assert_eq!(
        rendered.body(),
        Some(r#"{"status":"success","code":200,"data":null}"#)
    );
}

#[test]
fn test_from_config_reports_bad_pattern() {
    let config = ConfigLoader::new().load().unwrap();
    let registry = Registry::new().route(RouteDescriptor::get(
        "/orders/{}",
        HandlerFn::new(|_: &BoundArguments| Ok(())),
    ));

    let err = Dispatcher::from_config(&config, registry).unwrap_err();
    assert_eq!(err.route(), "GET /orders/{}");
}
