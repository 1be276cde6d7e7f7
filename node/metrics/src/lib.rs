// Copyright 2024 Aleo Network Foundation
// This file is part of the snarkOS library.

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at:

// http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod names;

// Expose the names at the crate level for easy access.
pub use names::*;

use std::net::SocketAddr;

/// Initializes the metrics, serving the Prometheus exporter on the given address.
pub fn initialize_metrics(listen_addr: Option<SocketAddr>) -> Result<(), String> {
    // Build the Prometheus exporter.
    let mut builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    if let Some(listen_addr) = listen_addr {
        builder = builder.with_http_listener(listen_addr);
    }
    builder.install().map_err(|error| format!("can't build the prometheus exporter: {error}"))?;

    // Register the metrics so they exist on init.
    for name in crate::names::GAUGE_NAMES {
        register_gauge(name);
    }
    for name in crate::names::COUNTER_NAMES {
        register_counter(name);
    }
    for name in crate::names::HISTOGRAM_NAMES {
        register_histogram(name);
    }
    tracing::debug!("Registered {} metrics", GAUGE_NAMES.len() + COUNTER_NAMES.len() + HISTOGRAM_NAMES.len());
    Ok(())
}

/// Registers a gauge with the given name.
pub fn register_gauge(name: &'static str) {
    let _ = ::metrics::gauge!(name);
}

/// Registers a counter with the given name.
pub fn register_counter(name: &'static str) {
    let _ = ::metrics::counter!(name);
}

/// Registers a histogram with the given name.
pub fn register_histogram(name: &'static str) {
    let _ = ::metrics::histogram!(name);
}

/// Sets the gauge with the given name to the given value.
pub fn gauge<V: Into<f64>>(name: &'static str, value: V) {
    ::metrics::gauge!(name).set(value.into());
}

/// Increments the counter with the given name by one.
pub fn increment_counter(name: &'static str) {
    ::metrics::counter!(name).increment(1);
}

/// Records the given value on the histogram with the given name.
pub fn histogram<V: Into<f64>>(name: &'static str, value: V) {
    ::metrics::histogram!(name).record(value.into());
}
