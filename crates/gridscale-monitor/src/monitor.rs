//! Demand monitor — the per-cycle fetch/classify/report pipeline.
//!
//! Fetches the latest `ResourceLoad` snapshot from the heartbeat
//! layer, classifies it, and publishes a `DemandReport` to the
//! scaling decision. Both collaborators are callbacks so the monitor
//! stays free of transport and provisioning concerns.

use std::time::Duration;

use tracing::{debug, info, warn};

use gridscale_demand::{ResourceLoad, classify};

use crate::error::{MonitorError, MonitorResult};
use crate::report::DemandReport;

type BoxFuture<T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = anyhow::Result<T>> + Send>>;

/// Callback producing the current load snapshot.
///
/// Implemented by the heartbeat aggregation layer.
pub type LoadFetchFn = Box<dyn Fn() -> BoxFuture<ResourceLoad> + Send + Sync>;

/// Callback consuming each cycle's demand report.
///
/// Implemented by the scaling-decision layer.
pub type ReportPublishFn = Box<dyn Fn(DemandReport) -> BoxFuture<()> + Send + Sync>;

/// Polls demand snapshots and reports classified per-shape counts.
pub struct DemandMonitor {
    fetch_fn: LoadFetchFn,
    publish_fn: Option<ReportPublishFn>,
}

impl DemandMonitor {
    /// Create a monitor reading snapshots through `fetch_fn`.
    pub fn new(fetch_fn: LoadFetchFn) -> Self {
        Self {
            fetch_fn,
            publish_fn: None,
        }
    }

    /// Set the callback that receives each cycle's report.
    pub fn with_publish_fn(mut self, f: ReportPublishFn) -> Self {
        self.publish_fn = Some(f);
        self
    }

    /// Run one cycle: fetch, classify, publish.
    ///
    /// The classification itself cannot fail; errors come only from
    /// the fetch and publish boundaries.
    pub async fn poll_once(&self) -> MonitorResult<DemandReport> {
        let load = (self.fetch_fn)().await.map_err(MonitorError::Fetch)?;
        let classified = classify(&load);
        let report = DemandReport::from_classified(&classified);

        debug!(
            records = load.resource_demands.len(),
            waiting = report.waiting_units(),
            infeasible = report.infeasible_units(),
            "classified demand snapshot"
        );

        for entry in &report.infeasible {
            warn!(
                shape = %entry.shape,
                requests = entry.count,
                "demand cannot be satisfied by any known node type"
            );
        }

        if let Some(ref publish_fn) = self.publish_fn {
            publish_fn(report.clone())
                .await
                .map_err(MonitorError::Publish)?;
        }

        Ok(report)
    }

    /// Run the monitor loop until the shutdown signal fires.
    ///
    /// A failed cycle is logged and the loop continues; a stale or
    /// missing snapshot must never take the autoscaler down.
    pub async fn run(
        &self,
        interval: Duration,
        mut shutdown: tokio::sync::watch::Receiver<bool>,
    ) {
        info!(interval_secs = interval.as_secs(), "demand monitor started");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    if let Err(e) = self.poll_once().await {
                        tracing::error!(error = %e, "demand monitor cycle failed");
                    }
                }
                _ = shutdown.changed() => {
                    info!("demand monitor shutting down");
                    break;
                }
            }
        }
    }
}
