use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

const OTEL_SILENCED: [&str; 5] = ["hyper", "opentelemetry", "tonic", "h2", "reqwest"];

pub fn init_logger(
    sdk_logger_provider: &SdkLoggerProvider,
    component: &str,
    is_dev: bool,
    enable_file: bool,
) {
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_dev {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_ansi(is_dev)
        .with_filter(console_filter);

    let file_layer = if enable_file {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };
        let file_name = format!("marketplace_{component}.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
        let (file_writer, guard) = non_blocking(file_appender);

        // the writer flushes on drop; the subscriber lives for the whole process
        std::mem::forget(guard);

        Some(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new("info")),
        )
    } else {
        None
    };

    let mut otel_filter = EnvFilter::new("info");
    for target in OTEL_SILENCED {
        if let Ok(directive) = format!("{target}=off").parse() {
            otel_filter = otel_filter.add_directive(directive);
        }
    }

    let otel_layer = OpenTelemetryTracingBridge::new(sdk_logger_provider).with_filter(otel_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(otel_layer)
        .init();
}
