use serde::{Deserialize, Serialize};

use crate::compare::{CompareOptions, DEFAULT_TOLERANCE};
use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct JobReconConfig {
    pub name: String,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default)]
    pub direction: Direction,
    pub left: SourceConfig,
    pub right: SourceConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

/// Which way signed differences point. Applied to every discrepancy kind,
/// with an absent side counting as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    LeftMinusRight,
    RightMinusLeft,
}

impl Direction {
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Self::LeftMinusRight => left - right,
            Self::RightMinusLeft => right - left,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeftMinusRight => write!(f, "left_minus_right"),
            Self::RightMinusLeft => write!(f, "right_minus_left"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Short name used in report labels (`ST` -> `ST_ONLY`).
    pub label: String,
    pub kind: SourceKind,
    /// Path, resolved relative to the config file by the caller.
    pub file: String,
    #[serde(default)]
    pub amount_format: AmountFormat,
    #[serde(default)]
    pub columns: Option<ColumnMapping>,
}

impl SourceConfig {
    pub fn columns(&self) -> ColumnMapping {
        self.columns.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Header-row CSV with one column per field.
    Csv,
    /// Six comma-separated fields per line, labor split into pay + adjustment.
    Delimited,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Delimited => write!(f, "delimited"),
        }
    }
}

/// How numeric cells are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountFormat {
    /// Plain decimal literal; anything else is a fatal parse error.
    #[default]
    Plain,
    /// `$1,234.56` style; blank or unparsable cells read as zero.
    Currency,
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub job_id: String,
    pub revenue: String,
    pub labor: String,
    pub materials: String,
    pub business_unit: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            job_id: "job_id".into(),
            revenue: "revenue".into(),
            labor: "labor".into(),
            materials: "materials".into(),
            business_unit: "business_unit".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

pub const DEFAULT_TOP: usize = 20;

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_top() -> usize {
    DEFAULT_TOP
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { top: DEFAULT_TOP }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl JobReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: JobReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }

        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ReconError::ConfigValidation(format!(
                "tolerance must be a finite, non-negative number, got {}",
                self.tolerance
            )));
        }

        for (side, source) in [("left", &self.left), ("right", &self.right)] {
            if source.label.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "{side}: label must not be empty"
                )));
            }
            if source.file.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "{side}: file must not be empty"
                )));
            }
            if source.kind == SourceKind::Delimited && source.columns.is_some() {
                return Err(ReconError::ConfigValidation(format!(
                    "{side}: columns only apply to kind = \"csv\""
                )));
            }
        }

        if self.left.label.eq_ignore_ascii_case(&self.right.label) {
            return Err(ReconError::ConfigValidation(format!(
                "left and right labels must differ, both are '{}'",
                self.left.label
            )));
        }

        Ok(())
    }

    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            tolerance: self.tolerance,
            direction: self.direction,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
