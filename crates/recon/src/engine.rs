use std::collections::BTreeSet;

use tracing::info;

use crate::aggregate::{compute_summary, sort_by_magnitude, summarize_by_unit};
use crate::compare::compare_jobs;
use crate::config::JobReconConfig;
use crate::model::{LoadReport, LoadedSource, ReconMeta, ReconReport};

/// Compare two loaded sources per config. Returns the sorted discrepancy
/// list, per-unit rollup and summary.
pub fn run(config: &JobReconConfig, left: &LoadedSource, right: &LoadedSource) -> ReconReport {
    let options = config.compare_options();

    let mut discrepancies = compare_jobs(&left.jobs, &right.jobs, &options);
    sort_by_magnitude(&mut discrepancies);

    let union_jobs = left
        .jobs
        .keys()
        .chain(right.jobs.keys())
        .collect::<BTreeSet<_>>()
        .len();

    let summary = compute_summary(&discrepancies, left.jobs.len(), right.jobs.len(), union_jobs);
    let by_unit = summarize_by_unit(&discrepancies);

    info!(
        union = union_jobs,
        discrepancies = summary.discrepancies,
        different = summary.different,
        left_only = summary.left_only,
        right_only = summary.right_only,
        "comparison complete"
    );

    ReconReport {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            left_label: left.label.clone(),
            right_label: right.label.clone(),
            tolerance: options.tolerance,
            direction: options.direction,
        },
        load: LoadReport {
            left: left.stats.clone(),
            right: right.stats.clone(),
        },
        summary,
        by_unit,
        discrepancies,
    }
}
