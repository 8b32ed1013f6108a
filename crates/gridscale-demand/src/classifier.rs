//! Demand classification — split a load snapshot into waiting and
//! infeasible request lists.
//!
//! This is the core of the scale-up decision: the classifier is a pure
//! function from one [`ResourceLoad`] snapshot to two flat multisets
//! of shapes, one entry per demand unit. Downstream capacity planning
//! counts shapes in those multisets to decide how many nodes of each
//! shape to add.

use std::iter;

use tracing::warn;

use crate::demand::{ResourceLoad, clamp};
use crate::shape::ResourceShape;

/// Result of classifying one load snapshot.
///
/// Both lists are denormalized: a shape appears once per demand unit,
/// not once per record. No ordering guarantee beyond grouping by
/// source record; consumers should treat these as unordered multisets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedDemand {
    /// Requests schedulable once capacity of their shape exists.
    pub waiting: Vec<ResourceShape>,
    /// Requests no current or plannable node type can satisfy.
    pub infeasible: Vec<ResourceShape>,
}

impl ClassifiedDemand {
    /// Total demand units across both lists.
    pub fn total(&self) -> usize {
        self.waiting.len() + self.infeasible.len()
    }

    /// Multiset count of `shape` in the waiting list.
    pub fn waiting_count(&self, shape: &ResourceShape) -> usize {
        self.waiting.iter().filter(|s| *s == shape).count()
    }

    /// Multiset count of `shape` in the infeasible list.
    pub fn infeasible_count(&self, shape: &ResourceShape) -> usize {
        self.infeasible.iter().filter(|s| *s == shape).count()
    }
}

/// Classify a load snapshot into waiting and infeasible demand.
///
/// Per record: ready units go to `waiting`, backlog units go to
/// `waiting` (a backlogged request is presumed schedulable once
/// capacity appears), infeasible units go to `infeasible`.
///
/// The snapshot is eventually consistent, so this is deliberately
/// tolerant:
///
/// - Negative counts are clamped to zero, never an error.
/// - A record may report both ready and infeasible demand for the
///   same shape. No reconciliation is attempted — both contributions
///   are emitted as reported, and only the total is guaranteed: every
///   unit of `ready + infeasible + backlog` appears exactly once
///   across the two lists.
///
/// Total over any input; never panics, never mutates the snapshot.
pub fn classify(load: &ResourceLoad) -> ClassifiedDemand {
    let mut waiting = Vec::new();
    let mut infeasible = Vec::new();

    for demand in &load.resource_demands {
        let ready = checked_count(
            demand.num_ready_requests_queued,
            "num_ready_requests_queued",
            &demand.shape,
        );
        let backlog = checked_count(demand.backlog_size, "backlog_size", &demand.shape);
        let unsatisfiable = checked_count(
            demand.num_infeasible_requests_queued,
            "num_infeasible_requests_queued",
            &demand.shape,
        );

        waiting.extend(iter::repeat_n(demand.shape.clone(), ready + backlog));
        infeasible.extend(iter::repeat_n(demand.shape.clone(), unsatisfiable));
    }

    ClassifiedDemand { waiting, infeasible }
}

fn checked_count(count: i64, field: &str, shape: &ResourceShape) -> usize {
    if count < 0 {
        warn!(
            shape = %shape,
            field,
            value = count,
            "negative demand count in load snapshot, clamping to zero"
        );
    }
    clamp(count) as usize
}
