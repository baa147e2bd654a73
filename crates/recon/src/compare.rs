//! Two-source job comparator.
//!
//! Walks the union of job ids. One-sided jobs are reported only when they
//! carry labor or materials; two-sided jobs only when either difference
//! exceeds the absolute tolerance (strict `>`). All differences use the same
//! [`Direction`], with an absent side counting as zero.

use std::collections::BTreeSet;

use crate::config::Direction;
use crate::model::{Discrepancy, DiscrepancyKind, JobMap, JobRecord, SideValues};

/// One cent.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    pub tolerance: f64,
    pub direction: Direction,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            direction: Direction::default(),
        }
    }
}

/// Compare two job maps. Output follows job id order.
pub fn compare_jobs(left: &JobMap, right: &JobMap, options: &CompareOptions) -> Vec<Discrepancy> {
    let all_ids: BTreeSet<&String> = left.keys().chain(right.keys()).collect();
    let dir = options.direction;

    all_ids
        .into_iter()
        .filter_map(|job_id| match (left.get(job_id), right.get(job_id)) {
            (Some(l), Some(r)) => compare_pair(l, r, options),
            (Some(l), None) => one_sided(l, DiscrepancyKind::LeftOnly, |v| dir.apply(v, 0.0)),
            (None, Some(r)) => one_sided(r, DiscrepancyKind::RightOnly, |v| dir.apply(0.0, v)),
            (None, None) => None,
        })
        .collect()
}

fn one_sided(
    job: &JobRecord,
    kind: DiscrepancyKind,
    signed: impl Fn(f64) -> f64,
) -> Option<Discrepancy> {
    if !job.has_activity() {
        return None;
    }
    Some(Discrepancy {
        job_id: job.job_id.clone(),
        business_unit: job.business_unit.clone(),
        kind,
        labor_diff: signed(job.labor),
        materials_diff: signed(job.materials),
        sides: None,
    })
}

fn compare_pair(left: &JobRecord, right: &JobRecord, options: &CompareOptions) -> Option<Discrepancy> {
    let labor_diff = options.direction.apply(left.labor, right.labor);
    let materials_diff = options.direction.apply(left.materials, right.materials);

    if labor_diff.abs() <= options.tolerance && materials_diff.abs() <= options.tolerance {
        return None;
    }

    Some(Discrepancy {
        job_id: left.job_id.clone(),
        business_unit: left.business_unit.clone(),
        kind: DiscrepancyKind::Different,
        labor_diff,
        materials_diff,
        sides: Some(SideValues {
            left_labor: left.labor,
            right_labor: right.labor,
            left_materials: left.materials,
            right_materials: right.materials,
        }),
    })
}
