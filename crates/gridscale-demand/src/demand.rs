//! Load snapshot types produced by heartbeat aggregation.
//!
//! A [`ResourceLoad`] is one polling cycle's view of cluster-wide
//! pending demand: one [`ResourceDemand`] record per distinct shape.
//! Snapshots are consumed by [`classify`](crate::classify) and
//! discarded; nothing here persists across cycles.

use serde::{Deserialize, Serialize};

use crate::shape::ResourceShape;

/// Pending demand for one resource shape.
///
/// Counts are `i64` because heartbeat data is untrusted — a merged
/// snapshot may carry negative values, which classification clamps to
/// zero rather than rejecting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDemand {
    /// The shape being requested.
    pub shape: ResourceShape,
    /// Requests of this shape queued and schedulable once capacity exists.
    pub num_ready_requests_queued: i64,
    /// Requests of this shape no current or plannable node type can satisfy.
    pub num_infeasible_requests_queued: i64,
    /// Additional pending requests reported in aggregate, not yet
    /// tracked individually as ready or infeasible.
    pub backlog_size: i64,
}

impl ResourceDemand {
    /// Total demand units this record contributes, with negative
    /// counts clamped to zero.
    pub fn total_units(&self) -> u64 {
        clamp(self.num_ready_requests_queued)
            + clamp(self.num_infeasible_requests_queued)
            + clamp(self.backlog_size)
    }
}

/// One heartbeat snapshot of cluster-wide pending demand.
///
/// Record order carries no meaning; every record is traversed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLoad {
    pub resource_demands: Vec<ResourceDemand>,
}

impl ResourceLoad {
    /// Total demand units across all records.
    pub fn total_units(&self) -> u64 {
        self.resource_demands.iter().map(ResourceDemand::total_units).sum()
    }
}

pub(crate) fn clamp(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_units_sums_all_fields() {
        let demand = ResourceDemand {
            shape: ResourceShape::new([("CPU", 1.0)]),
            num_ready_requests_queued: 2,
            num_infeasible_requests_queued: 1,
            backlog_size: 3,
        };
        assert_eq!(demand.total_units(), 6);
    }

    #[test]
    fn total_units_clamps_negative_fields() {
        let demand = ResourceDemand {
            shape: ResourceShape::new([("CPU", 1.0)]),
            num_ready_requests_queued: -5,
            num_infeasible_requests_queued: 2,
            backlog_size: -1,
        };
        assert_eq!(demand.total_units(), 2);
    }

    #[test]
    fn empty_load_has_no_units() {
        assert_eq!(ResourceLoad::default().total_units(), 0);
    }
}
