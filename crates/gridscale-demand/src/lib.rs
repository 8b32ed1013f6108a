//! gridscale-demand — resource demand model and classifier.
//!
//! The demand side of the autoscaler: heartbeat aggregation produces a
//! periodic [`ResourceLoad`] snapshot (one [`ResourceDemand`] record per
//! distinct [`ResourceShape`] outstanding in the cluster), and
//! [`classify`] splits that snapshot into the two lists the scaling
//! decision operates on:
//!
//! - **waiting** — requests that can be scheduled once capacity of
//!   their shape exists (ready + backlogged demand)
//! - **infeasible** — requests no current or plannable node type can
//!   ever satisfy
//!
//! Snapshots are eventually consistent: they are merged from
//! asynchronous heartbeats and may contain records that are internally
//! inconsistent or carry malformed counts. The classifier never
//! rejects a snapshot — it clamps bad counts and emits inconsistent
//! records as reported, guaranteeing only that every unit of demand
//! lands in exactly one of the two lists.

pub mod classifier;
pub mod demand;
pub mod shape;

pub use classifier::{ClassifiedDemand, classify};
pub use demand::{ResourceDemand, ResourceLoad};
pub use shape::ResourceShape;
