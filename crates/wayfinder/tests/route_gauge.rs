//! Which metrics a dispatcher publishes, observed through a local recorder.

use metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};
use parking_lot::Mutex;
use wayfinder::config::WayfinderConfig;
use wayfinder::prelude::*;

/// Remembers the name of every metric registered through it.
#[derive(Default)]
struct NameLog {
    names: Mutex<Vec<String>>,
}

impl NameLog {
    fn note(&self, key: &Key) {
        self.names.lock().push(key.name().to_string());
    }

    fn names(&self) -> Vec<String> {
        self.names.lock().clone()
    }
}

impl Recorder for NameLog {
    fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
    fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
    fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

    fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
        self.note(key);
        Counter::noop()
    }

    fn register_gauge(&self, key: &Key, _: &Metadata<'_>) -> Gauge {
        self.note(key);
        Gauge::noop()
    }

    fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
        self.note(key);
        Histogram::noop()
    }
}

fn registry() -> Registry {
    Registry::new().route(RouteDescriptor::get(
        "/ping",
        HandlerFn::new(|_: &BoundArguments| Ok("pong")),
    ))
}

#[test]
fn test_disabled_metrics_publish_nothing() {
    let mut config = WayfinderConfig::default();
    config.telemetry.metrics.enabled = false;
    let log = NameLog::default();

    metrics::with_local_recorder(&log, || {
        let dispatcher = Dispatcher::from_config(&config, registry()).unwrap();
        dispatcher.dispatch(&RequestContext::new(http::Method::GET, "/ping"));
        dispatcher.replace_routes(registry()).unwrap();
    });

    assert!(log.names().is_empty(), "recorded {:?}", log.names());
}

#[test]
fn test_enabled_metrics_publish_route_gauge() {
    let config = WayfinderConfig::default();
    let log = NameLog::default();

    metrics::with_local_recorder(&log, || {
        Dispatcher::from_config(&config, registry()).unwrap();
    });

    assert_eq!(log.names(), ["wayfinder_routes"]);
}

#[test]
fn test_dispatch_records_counter_and_latency() {
    let log = NameLog::default();

    metrics::with_local_recorder(&log, || {
        let dispatcher = Dispatcher::new(registry().build().unwrap());
        dispatcher.dispatch(&RequestContext::new(http::Method::GET, "/ping"));
    });

    assert_eq!(
        log.names(),
        [
            "wayfinder_routes",
            "wayfinder_dispatch_total",
            "wayfinder_dispatch_duration_seconds",
        ]
    );
}

#[test]
fn test_switching_metrics_off_after_new_silences_dispatch() {
    let log = NameLog::default();

    metrics::with_local_recorder(&log, || {
        let dispatcher = Dispatcher::new(registry().build().unwrap()).with_metrics(false);
        dispatcher.dispatch(&RequestContext::new(http::Method::GET, "/ping"));
    });

    assert_eq!(log.names(), ["wayfinder_routes"]);
}
