use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::{Discrepancy, DiscrepancyKind, ReconSummary, UnitSummary};

/// Group discrepancies by business unit, summing signed diffs.
pub fn summarize_by_unit(discrepancies: &[Discrepancy]) -> BTreeMap<String, UnitSummary> {
    let mut units: BTreeMap<String, UnitSummary> = BTreeMap::new();

    for d in discrepancies {
        let entry = units.entry(d.business_unit.clone()).or_default();
        entry.count += 1;
        entry.labor_diff += d.labor_diff;
        entry.materials_diff += d.materials_diff;
    }

    units
}

/// Largest combined impact first; ties by job id.
pub fn sort_by_magnitude(discrepancies: &mut [Discrepancy]) {
    discrepancies.sort_by(|a, b| {
        b.magnitude()
            .partial_cmp(&a.magnitude())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.job_id.cmp(&b.job_id))
    });
}

/// Counts and totals over a discrepancy list.
pub fn compute_summary(
    discrepancies: &[Discrepancy],
    left_jobs: usize,
    right_jobs: usize,
    union_jobs: usize,
) -> ReconSummary {
    let mut summary = ReconSummary {
        left_jobs,
        right_jobs,
        union_jobs,
        discrepancies: discrepancies.len(),
        ..ReconSummary::default()
    };

    for d in discrepancies {
        match d.kind {
            DiscrepancyKind::LeftOnly => summary.left_only += 1,
            DiscrepancyKind::RightOnly => summary.right_only += 1,
            DiscrepancyKind::Different => summary.different += 1,
        }
        summary.total_labor_diff += d.labor_diff;
        summary.total_materials_diff += d.materials_diff;
    }

    summary
}
