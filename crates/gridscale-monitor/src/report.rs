//! Per-cycle demand report handed to the scaling decision.
//!
//! The classifier emits flat multisets (one entry per demand unit);
//! the scaling decision wants per-shape counts. [`DemandReport`] is
//! that fold — lossless with respect to the observable counts, with a
//! deterministic output order for logging and serialization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use gridscale_demand::{ClassifiedDemand, ResourceShape};

/// Demand units counted for one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeCount {
    pub shape: ResourceShape,
    pub count: u64,
}

/// Aggregated view of one classified snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandReport {
    /// Per-shape counts of demand waiting for capacity.
    pub waiting: Vec<ShapeCount>,
    /// Per-shape counts of demand no node type can satisfy.
    pub infeasible: Vec<ShapeCount>,
}

impl DemandReport {
    /// Fold a classified snapshot into per-shape counts.
    pub fn from_classified(classified: &ClassifiedDemand) -> Self {
        Self {
            waiting: tally(&classified.waiting),
            infeasible: tally(&classified.infeasible),
        }
    }

    /// Total waiting demand units.
    pub fn waiting_units(&self) -> u64 {
        self.waiting.iter().map(|c| c.count).sum()
    }

    /// Total infeasible demand units.
    pub fn infeasible_units(&self) -> u64 {
        self.infeasible.iter().map(|c| c.count).sum()
    }

    /// Total demand units across both buckets.
    pub fn total_units(&self) -> u64 {
        self.waiting_units() + self.infeasible_units()
    }
}

/// Count shapes by value, then order by display form so repeated
/// cycles over the same snapshot produce identical reports.
fn tally(shapes: &[ResourceShape]) -> Vec<ShapeCount> {
    let mut counts: HashMap<&ResourceShape, u64> = HashMap::new();
    for shape in shapes {
        *counts.entry(shape).or_insert(0) += 1;
    }

    let mut tallied: Vec<ShapeCount> = counts
        .into_iter()
        .map(|(shape, count)| ShapeCount {
            shape: shape.clone(),
            count,
        })
        .collect();
    tallied.sort_by_key(|c| c.shape.to_string());
    tallied
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridscale_demand::{ResourceDemand, ResourceLoad, classify};

    fn load() -> ResourceLoad {
        ResourceLoad {
            resource_demands: vec![
                ResourceDemand {
                    shape: ResourceShape::new([("CPU", 1.0)]),
                    num_ready_requests_queued: 2,
                    num_infeasible_requests_queued: 0,
                    backlog_size: 3,
                },
                ResourceDemand {
                    shape: ResourceShape::new([("GPU", 1.0)]),
                    num_ready_requests_queued: 0,
                    num_infeasible_requests_queued: 4,
                    backlog_size: 0,
                },
            ],
        }
    }

    #[test]
    fn counts_match_classifier_multisets() {
        let classified = classify(&load());
        let report = DemandReport::from_classified(&classified);

        assert_eq!(
            report.waiting,
            vec![ShapeCount {
                shape: ResourceShape::new([("CPU", 1.0)]),
                count: 5,
            }]
        );
        assert_eq!(
            report.infeasible,
            vec![ShapeCount {
                shape: ResourceShape::new([("GPU", 1.0)]),
                count: 4,
            }]
        );
        assert_eq!(report.total_units(), classified.total() as u64);
    }

    #[test]
    fn report_order_is_deterministic() {
        let classified = classify(&load());
        let a = DemandReport::from_classified(&classified);
        let b = DemandReport::from_classified(&classified);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_classification_yields_empty_report() {
        let report = DemandReport::from_classified(&ClassifiedDemand::default());
        assert!(report.waiting.is_empty());
        assert!(report.infeasible.is_empty());
        assert_eq!(report.total_units(), 0);
    }

    #[test]
    fn report_serializes_for_handoff() {
        let report = DemandReport::from_classified(&classify(&load()));
        let json = serde_json::to_string(&report).unwrap();
        let back: DemandReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
