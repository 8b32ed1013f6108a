//! gridscale-monitor — the polling seam around the demand classifier.
//!
//! Once per cycle the monitor fetches a [`ResourceLoad`] snapshot from
//! the heartbeat aggregation layer, classifies it with
//! [`gridscale_demand::classify`], folds the result into a per-shape
//! [`DemandReport`], and hands the report to the scaling-decision
//! layer. Both collaborators are wired in as async callbacks; this
//! crate owns only the cycle itself.
//!
//! ```text
//! DemandMonitor
//!   ├── LoadFetchFn      (heartbeat aggregation — external)
//!   ├── classify()       (gridscale-demand)
//!   └── ReportPublishFn  (scaling decision — external)
//! ```

pub mod error;
pub mod monitor;
pub mod report;

pub use error::{MonitorError, MonitorResult};
pub use monitor::{DemandMonitor, LoadFetchFn, ReportPublishFn};
pub use report::{DemandReport, ShapeCount};
