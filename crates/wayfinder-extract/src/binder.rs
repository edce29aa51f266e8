//! Handler argument binding.
//!
//! Each declared parameter is resolved by the first rule that applies:
//!
//! 1. context-typed parameters receive the request context
//! 2. query-map parameters receive every query parameter
//! 3. a path capture with the parameter's name
//! 4. the explicitly bound query key, if one was declared
//! 5. the query parameter with the parameter's own name
//! 6. absent
//!
//! The raw string (or absence) is then converted to the declared type.

use tracing::warn;
use wayfinder_core::{Argument, BoundArguments, ParamSpec, ParamType, RequestContext, Value};
use wayfinder_router::Params;

use crate::{convert, ConversionPolicy, ExtractionError, ExtractionSource};

/// Resolves handler arguments from path captures and request facts.
///
/// # Example
///
/// ```rust
/// use wayfinder_core::{ParamSpec, ParamType, QueryParams, RequestContext};
/// use wayfinder_extract::ArgumentBinder;
/// use wayfinder_router::Params;
/// use http::Method;
///
/// let mut captures = Params::new();
/// captures.push("id", "42");
/// let ctx = RequestContext::new(Method::GET, "/users/42")
///     .with_query(QueryParams::parse("verbose=true").unwrap());
///
/// let params = [
///     ParamSpec::new("id", ParamType::Long),
///     ParamSpec::new("verbose", ParamType::Boolean),
/// ];
///
/// let args = ArgumentBinder::default().bind(&params, &captures, &ctx).unwrap();
/// assert_eq!(args.get("id").as_i64(), Some(42));
/// assert_eq!(args.get("verbose").as_bool(), Some(true));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentBinder {
    policy: ConversionPolicy,
}

impl ArgumentBinder {
    /// Creates a binder with the given conversion policy.
    #[must_use]
    pub fn new(policy: ConversionPolicy) -> Self {
        Self { policy }
    }

    /// Returns the conversion policy.
    #[must_use]
    pub fn policy(&self) -> ConversionPolicy {
        self.policy
    }

    /// Binds every declared parameter, in declaration order.
    ///
    /// # Errors
    ///
    /// Only under [`ConversionPolicy::Strict`], when a raw value does not
    /// convert.
    pub fn bind(
        &self,
        params: &[ParamSpec],
        captures: &Params,
        ctx: &RequestContext,
    ) -> Result<BoundArguments, ExtractionError> {
        let mut args = BoundArguments::with_capacity(params.len());
        for spec in params {
            let argument = self.resolve(spec, captures, ctx)?;
            args.push(spec.name(), argument);
        }
        Ok(args)
    }

    /// Resolves a single parameter.
    pub fn resolve(
        &self,
        spec: &ParamSpec,
        captures: &Params,
        ctx: &RequestContext,
    ) -> Result<Argument, ExtractionError> {
        match spec.ty() {
            ParamType::Context => return Ok(Argument::Context(ctx.clone())),
            ParamType::QueryMap => {
                return Ok(Argument::Value(Value::Map(ctx.query().to_value_map())));
            }
            _ => {}
        }

        let (source, raw) = raw_value(spec, captures, ctx);
        match convert(raw, spec.ty()) {
            Ok(value) => Ok(Argument::Value(value)),
            Err(cause) => match self.policy {
                ConversionPolicy::Lenient => {
                    warn!(
                        param = spec.name(),
                        param_type = %spec.ty(),
                        source = %source,
                        raw = %cause.raw,
                        "argument conversion failed, binding null"
                    );
                    Ok(Argument::Value(Value::Null))
                }
                ConversionPolicy::Strict => {
                    Err(ExtractionError::invalid_type(source, spec.name(), cause))
                }
            },
        }
    }
}

// Rules 3 to 6.
fn raw_value<'a>(
    spec: &ParamSpec,
    captures: &'a Params,
    ctx: &'a RequestContext,
) -> (ExtractionSource, Option<&'a str>) {
    if let Some(captured) = captures.get(spec.name()) {
        return (ExtractionSource::Path, Some(captured));
    }
    if let Some(key) = spec.query_key() {
        return (ExtractionSource::Query, ctx.query().get(key));
    }
    match ctx.query().get(spec.name()) {
        Some(value) => (ExtractionSource::Query, Some(value)),
        None => (ExtractionSource::Absent, None),
    }
}
