use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::Direction;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One normalized job as seen by a single source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub job_id: String,
    pub revenue: f64,
    pub labor: f64,
    pub materials: f64,
    pub business_unit: String,
}

impl JobRecord {
    /// True when the job carries positive labor or materials cost.
    pub fn has_activity(&self) -> bool {
        self.labor > 0.0 || self.materials > 0.0
    }
}

/// Jobs keyed by id. Ordered so iteration (and therefore output) is stable.
pub type JobMap = BTreeMap<String, JobRecord>;

/// Counters collected while loading a source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Rows or lines that produced a record (duplicates included).
    pub rows: usize,
    /// Delimited lines dropped for having the wrong field count.
    pub skipped_lines: usize,
    /// Rows whose job id was already present and got overwritten.
    pub duplicate_ids: usize,
}

/// A loaded source: its label, jobs and load counters.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub label: String,
    pub jobs: JobMap,
    pub stats: LoadStats,
}

impl LoadedSource {
    pub fn new(label: impl Into<String>, jobs: JobMap, stats: LoadStats) -> Self {
        Self {
            label: label.into(),
            jobs,
            stats,
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// Job exists only in the left (primary) source.
    LeftOnly,
    /// Job exists only in the right (secondary) source.
    RightOnly,
    /// Job exists in both with labor or materials outside tolerance.
    Different,
}

impl DiscrepancyKind {
    /// Report label, e.g. `ST_ONLY` / `DB_ONLY` / `DIFFERENT`.
    pub fn label(&self, left_label: &str, right_label: &str) -> String {
        match self {
            Self::LeftOnly => format!("{}_ONLY", left_label.to_uppercase()),
            Self::RightOnly => format!("{}_ONLY", right_label.to_uppercase()),
            Self::Different => "DIFFERENT".to_string(),
        }
    }
}

impl std::fmt::Display for DiscrepancyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeftOnly => write!(f, "left_only"),
            Self::RightOnly => write!(f, "right_only"),
            Self::Different => write!(f, "different"),
        }
    }
}

/// Both sides' values for a two-sided discrepancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideValues {
    pub left_labor: f64,
    pub right_labor: f64,
    pub left_materials: f64,
    pub right_materials: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discrepancy {
    pub job_id: String,
    pub business_unit: String,
    pub kind: DiscrepancyKind,
    pub labor_diff: f64,
    pub materials_diff: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sides: Option<SideValues>,
}

impl Discrepancy {
    /// Combined unsigned impact used for ranking.
    pub fn magnitude(&self) -> f64 {
        self.labor_diff.abs() + self.materials_diff.abs()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnitSummary {
    pub count: usize,
    pub labor_diff: f64,
    pub materials_diff: f64,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconSummary {
    pub left_jobs: usize,
    pub right_jobs: usize,
    pub union_jobs: usize,
    pub discrepancies: usize,
    pub left_only: usize,
    pub right_only: usize,
    pub different: usize,
    pub total_labor_diff: f64,
    pub total_materials_diff: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub left_label: String,
    pub right_label: String,
    pub tolerance: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub left: LoadStats,
    pub right: LoadStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub load: LoadReport,
    pub summary: ReconSummary,
    pub by_unit: BTreeMap<String, UnitSummary>,
    /// Sorted by descending magnitude.
    pub discrepancies: Vec<Discrepancy>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_source_names() {
        assert_eq!(DiscrepancyKind::LeftOnly.label("st", "db"), "ST_ONLY");
        assert_eq!(DiscrepancyKind::RightOnly.label("ST", "DB"), "DB_ONLY");
        assert_eq!(DiscrepancyKind::Different.label("ST", "DB"), "DIFFERENT");
    }

    #[test]
    fn activity_ignores_revenue() {
        let job = JobRecord {
            job_id: "389664342".into(),
            revenue: 500.0,
            labor: 0.0,
            materials: 0.0,
            business_unit: "Commercial-AZ-Production".into(),
        };
        assert!(!job.has_activity());
    }

    #[test]
    fn activity_requires_positive_cost() {
        let mut job = JobRecord {
            job_id: "N1".into(),
            revenue: 0.0,
            labor: -25.0,
            materials: 0.0,
            business_unit: "Tucson-Production".into(),
        };
        assert!(!job.has_activity());
        job.materials = 0.01;
        assert!(job.has_activity());
    }

    #[test]
    fn one_sided_serializes_without_sides() {
        let d = Discrepancy {
            job_id: "J1".into(),
            business_unit: "X".into(),
            kind: DiscrepancyKind::LeftOnly,
            labor_diff: 100.0,
            materials_diff: 50.0,
            sides: None,
        };
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["kind"], "left_only");
        assert!(v.get("sides").is_none());
    }
}
