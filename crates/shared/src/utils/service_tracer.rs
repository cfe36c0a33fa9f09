use crate::utils::{
    metrics::{Method, Metrics, Status},
    otel::TracingContext,
};
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use std::fmt;
use tokio::time::Instant;
use tracing::{error, info};

/// Span-per-operation helper shared by the service layer. Every call to
/// [`ServiceTracer::start`] must be closed by `success` or `error`, which
/// also records the request metrics.
#[derive(Clone)]
pub struct ServiceTracer {
    name: &'static str,
    metrics: Metrics,
}

impl ServiceTracer {
    /// `name` is both the tracer name and the metric prefix, e.g. `cart_service`.
    pub fn new(name: &'static str, component: &str, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, name, component);
        Self { name, metrics }
    }

    fn tracer(&self) -> BoxedTracer {
        global::tracer(self.name)
    }

    pub fn start(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    pub fn success(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, true, message);
    }

    pub fn error(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, false, message);
    }

    /// Closes the span from the outcome of the operation and passes it on.
    pub fn finish<T, E: fmt::Display>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<T, E>,
        success_message: &str,
    ) -> Result<T, E> {
        match &result {
            Ok(_) => self.success(tracing_ctx, method, success_message),
            Err(e) => self.error(tracing_ctx, method, &e.to_string()),
        }
        result
    }

    fn complete(&self, tracing_ctx: &TracingContext, method: Method, is_success: bool, message: &str) {
        let (status_str, status) = if is_success {
            ("SUCCESS", Status::Success)
        } else {
            ("ERROR", Status::Error)
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}
