use std::net::SocketAddr;
use tracing::{info, warn};

pub const ROWS_READ: &str = "cbe_rows_read_total";
pub const TRIPLES_WRITTEN: &str = "cbe_triples_written_total";
pub const IDS_WRITTEN: &str = "cbe_ids_written_total";
pub const FILES_SKIPPED: &str = "cbe_files_skipped_total";
pub const FILES_FAILED: &str = "cbe_files_failed_total";
pub const FILE_DURATION: &str = "cbe_file_duration_seconds";
pub const LOOKUPS: &str = "cbe_lookups_total";
pub const LOOKUP_DURATION: &str = "cbe_lookup_duration_seconds";

/// Installs the Prometheus exporter; `CBE_METRICS_PORT` selects the port (9898 by default).
pub fn init_metrics() {
    let port: u16 = std::env::var("CBE_METRICS_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9898);
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
        Err(e) => warn!("Prometheus exporter install failed (possibly already installed): {}", e),
    }
}
