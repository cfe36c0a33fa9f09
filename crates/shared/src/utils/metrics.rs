use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family, gauge::Gauge};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::{
    fs,
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use sysinfo::System;

const COLLECT_INTERVAL: Duration = Duration::from_secs(15);

fn thread_count(pid: usize) -> Option<i64> {
    let contents = fs::read_to_string(format!("/proc/{pid}/status")).ok()?;
    contents
        .lines()
        .find(|line| line.starts_with("Threads:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|count| count.parse::<i64>().ok())
}

/// Process-level gauges refreshed by [`run_metrics_collector`].
#[derive(Debug, Clone, Default)]
pub struct SystemMetrics {
    pub memory_resident_bytes: Gauge,
    pub memory_virtual_bytes: Gauge,
    pub available_memory_kib: Gauge,
    pub thread_count: Gauge,
    pub cpu_usage_percent: Gauge,
    pub process_start_time: Gauge,
}

impl SystemMetrics {
    pub fn new() -> Self {
        let start_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        let metrics = Self::default();
        metrics.process_start_time.set(start_time);
        metrics
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "process_memory_resident_bytes",
            "Resident memory of the process in bytes",
            self.memory_resident_bytes.clone(),
        );
        registry.register(
            "process_memory_virtual_bytes",
            "Virtual memory of the process in bytes",
            self.memory_virtual_bytes.clone(),
        );
        registry.register(
            "system_available_memory_kib",
            "Available system memory in KiB",
            self.available_memory_kib.clone(),
        );
        registry.register(
            "process_thread_total",
            "Number of OS threads in the process",
            self.thread_count.clone(),
        );
        registry.register(
            "system_cpu_usage_percent",
            "Global CPU usage",
            self.cpu_usage_percent.clone(),
        );
        registry.register(
            "process_start_time_seconds",
            "Start time of the process since unix epoch in seconds",
            self.process_start_time.clone(),
        );
    }

    pub fn update_metrics(&self, sys: &mut System) {
        sys.refresh_all();

        let pid = std::process::id() as usize;

        if let Some(process) = sys.process(sysinfo::Pid::from(pid)) {
            self.memory_resident_bytes.set(process.memory() as i64);
            self.memory_virtual_bytes
                .set(process.virtual_memory() as i64);
        }

        self.available_memory_kib
            .set((sys.available_memory() / 1_024) as i64);
        self.cpu_usage_percent.set(sys.global_cpu_usage() as i64);

        if let Some(count) = thread_count(pid) {
            self.thread_count.set(count);
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub method: Method,
    pub status: Status,
}

#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(vec![
                    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ])
            }),
        }
    }

    /// Registers both families as `{prefix}_request_counter` and
    /// `{prefix}_request_duration`.
    pub fn register(&self, registry: &mut Registry, prefix: &str, component: &str) {
        registry.register(
            format!("{prefix}_request_counter"),
            format!("Total number of requests to the {component}"),
            self.request_counter.clone(),
        );
        registry.register(
            format!("{prefix}_request_duration"),
            format!("Histogram of request durations for the {component}"),
            self.request_duration.clone(),
        );
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        let labels = Labels { method, status };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }
}

pub async fn run_metrics_collector(system_metrics: Arc<SystemMetrics>) {
    let mut sys = System::new_all();
    let mut interval = tokio::time::interval(COLLECT_INTERVAL);
    loop {
        interval.tick().await;
        system_metrics.update_metrics(&mut sys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::encoding::text::encode;

    #[test]
    fn recorded_requests_show_up_in_registry() {
        let mut registry = Registry::default();
        let metrics = Metrics::new();
        metrics.register(&mut registry, "cart_service", "CartService");

        metrics.record(Method::Post, Status::Success, 0.02);
        metrics.record(Method::Post, Status::Error, 0.5);

        let mut out = String::new();
        encode(&mut out, &registry).unwrap();

        assert!(out.contains("cart_service_request_counter_total{method=\"Post\",status=\"Success\"} 1"));
        assert!(out.contains("cart_service_request_counter_total{method=\"Post\",status=\"Error\"} 1"));
    }
}
