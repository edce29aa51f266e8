//! Request dispatch.
//!
//! ```text
//!   RequestContext
//!        │
//!        ▼
//!   lookup ──── none ───▶ no-route message
//!        │
//!        ▼
//!   bind arguments ── strict failure ──▶ 400
//!        │
//!        ▼
//!   invoke (fault boundary)
//!        │
//!        ▼
//!   normalize ──▶ Rendered
//! ```
//!
//! The live table sits behind `RwLock<Arc<_>>`. A dispatch clones the `Arc`
//! and releases the lock before doing any work, so a reload swaps the whole
//! table while in-flight requests finish on the one they started with.

use std::sync::Arc;
use std::time::Instant;

use http::Method;
use parking_lot::RwLock;
use tracing::{debug, info, warn};
use wayfinder_config::{ConversionMode, RoutingMode, WayfinderConfig};
use wayfinder_core::{InvocationResult, RequestContext, RouteDescriptor};
use wayfinder_extract::{ArgumentBinder, ConversionPolicy};
use wayfinder_router::{Params, RouteTable, TableMode};
use wayfinder_telemetry::metrics::{self, outcome};
use wayfinder_telemetry::{log_dispatch_complete, log_dispatch_error};

use crate::{Invoker, Registry, RegistryError, Rendered, ResponseNormalizer};

/// Route label used in metrics when nothing matched.
const NO_ROUTE_LABEL: &str = "-";

/// Routes requests to handlers.
///
/// # Example
///
/// ```
/// use wayfinder::{
///     BoundArguments, Dispatcher, HandlerFn, ParamSpec, ParamType, Registry, RequestContext,
///     RouteDescriptor,
/// };
/// use http::Method;
///
/// let registry = Registry::new().route(
///     RouteDescriptor::get(
///         "/users/{id}",
///         HandlerFn::new(|args: &BoundArguments| Ok(vec![args.get("id").clone()])),
///     )
///     .with_param(ParamSpec::new("id", ParamType::Long))
///     .produces_json(),
/// );
///
/// let dispatcher = Dispatcher::new(registry.build().unwrap());
/// let rendered = dispatcher.dispatch(&RequestContext::new(Method::GET, "/Users/42"));
///
/// assert_eq!(
///     rendered.body(),
///     Some(r#"{"status":"success","code":200,"count":1,"data":[42]}"#)
/// );
/// ```
#[derive(Debug)]
pub struct Dispatcher {
    table: RwLock<Arc<RouteTable<RouteDescriptor>>>,
    binder: ArgumentBinder,
    invoker: Invoker,
    metrics_enabled: bool,
}

impl Dispatcher {
    /// Creates a dispatcher over a built table, with lenient binding and
    /// metrics enabled.
    #[must_use]
    pub fn new(table: RouteTable<RouteDescriptor>) -> Self {
        Self::assemble(table, ArgumentBinder::default(), true)
    }

    /// Builds the registry with the configured table mode and applies the
    /// configured binding policy.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if a pattern does not compile.
    pub fn from_config(
        config: &WayfinderConfig,
        registry: Registry,
    ) -> Result<Self, RegistryError> {
        let mode = match config.routing.mode {
            RoutingMode::MethodAware => TableMode::MethodAware,
            RoutingMode::Legacy => TableMode::Legacy,
        };
        let policy = match config.binding.conversion {
            ConversionMode::Lenient => ConversionPolicy::Lenient,
            ConversionMode::Strict => ConversionPolicy::Strict,
        };

        let table = registry.with_mode(mode).build()?;
        Ok(Self::assemble(
            table,
            ArgumentBinder::new(policy),
            config.telemetry.metrics.enabled,
        ))
    }

    // The route gauge is recorded here, once the metrics flag is final.
    fn assemble(
        table: RouteTable<RouteDescriptor>,
        binder: ArgumentBinder,
        metrics_enabled: bool,
    ) -> Self {
        let dispatcher = Self {
            table: RwLock::new(Arc::new(table)),
            binder,
            invoker: Invoker::new(),
            metrics_enabled,
        };
        dispatcher.record_route_count();
        dispatcher
    }

    /// Replaces the argument binder.
    #[must_use]
    pub fn with_binder(mut self, binder: ArgumentBinder) -> Self {
        self.binder = binder;
        self
    }

    /// Turns dispatch metrics on or off.
    ///
    /// [`new`](Self::new) has already published the route gauge by the time
    /// this runs. [`from_config`](Self::from_config) applies the flag before
    /// anything is recorded.
    #[must_use]
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    /// Returns the argument binder.
    #[must_use]
    pub fn binder(&self) -> ArgumentBinder {
        self.binder
    }

    /// Returns a snapshot of the live table.
    #[must_use]
    pub fn table(&self) -> Arc<RouteTable<RouteDescriptor>> {
        Arc::clone(&self.table.read())
    }

    /// Handles one request.
    pub fn dispatch(&self, ctx: &RequestContext) -> Rendered {
        let started = Instant::now();
        let table = self.table();

        let Some(found) = table.lookup(ctx.method(), ctx.path()) else {
            debug!(
                request_id = %ctx.request_id(),
                http.method = %ctx.method(),
                http.path = ctx.path(),
                "no route matched"
            );
            self.finish(ctx, NO_ROUTE_LABEL, outcome::NO_ROUTE, started);
            return ResponseNormalizer::no_route(ctx);
        };

        let (route, captures) = found.into_parts();
        let label = route.label();
        debug!(
            request_id = %ctx.request_id(),
            route = %label,
            captures = captures.len(),
            "route matched"
        );

        let (rendered, result_outcome) = match self.binder.bind(route.params(), &captures, ctx) {
            Ok(args) => {
                let result = self.invoker.invoke(route, &args);
                let result_outcome = if let InvocationResult::Failure { cause, .. } = &result {
                    log_dispatch_error!(ctx.request_id(), label, cause);
                    outcome::FAILURE
                } else {
                    outcome::OK
                };
                (ResponseNormalizer::normalize(result, route.wants_json()), result_outcome)
            }
            Err(err) => {
                warn!(
                    request_id = %ctx.request_id(),
                    route = %label,
                    param = err.field(),
                    error = %err,
                    "argument rejected"
                );
                (
                    ResponseNormalizer::bad_request(&err, route.wants_json()),
                    outcome::BAD_REQUEST,
                )
            }
        };

        self.finish(ctx, &label, result_outcome, started);
        rendered
    }

    /// Finds the route for a method and path without invoking it.
    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> Option<(RouteDescriptor, Params)> {
        let table = self.table();
        table.lookup(method, path).map(|found| {
            let (route, params) = found.into_parts();
            (route.clone(), params)
        })
    }

    /// Builds a new table from `registry` and swaps it in.
    ///
    /// The current table mode is kept. On error the live table is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if a pattern does not compile.
    pub fn replace_routes(&self, registry: Registry) -> Result<usize, RegistryError> {
        let mode = self.table().mode();
        let table = Arc::new(registry.with_mode(mode).build()?);
        let count = table.len();

        *self.table.write() = table;

        info!(routes = count, "route table replaced");
        self.record_route_count();
        Ok(count)
    }

    /// Lists the live routes in scan order, one display line each.
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.table()
            .iter()
            .map(|route| route.target().to_string())
            .collect()
    }

    fn finish(
        &self,
        ctx: &RequestContext,
        label: &str,
        result_outcome: &'static str,
        started: Instant,
    ) {
        let elapsed = started.elapsed();
        log_dispatch_complete!(
            ctx.request_id(),
            label,
            result_outcome,
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        );
        if self.metrics_enabled {
            metrics::record_dispatch(label, result_outcome, elapsed);
        }
    }

    fn record_route_count(&self) {
        if self.metrics_enabled {
            metrics::record_route_count(self.table().len());
        }
    }
}
