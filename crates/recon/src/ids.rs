//! Identifier reconciliation: which job ids does a reference list have that
//! an internal export lacks, and vice versa.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::ReconError;

/// How many ids a listing shows before truncating.
pub const DEFAULT_SHOW_LIMIT: usize = 50;

pub type IdSet = BTreeSet<String>;

/// One id per line. Whitespace is trimmed and blank lines dropped.
pub fn read_id_lines(text: &str) -> IdSet {
    text.lines()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ids from one column of a header-row CSV. Blank cells are dropped.
pub fn read_id_csv(source: &str, csv_data: &str, column: &str) -> Result<IdSet, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let csv_err = |e: csv::Error| ReconError::Csv {
        source: source.into(),
        message: e.to_string(),
    };

    let idx = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| ReconError::MissingColumn {
            source: source.into(),
            column: column.into(),
        })?;

    let mut ids = IdSet::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let id = record.get(idx).unwrap_or("").trim();
        if !id.is_empty() {
            ids.insert(id.to_string());
        }
    }
    Ok(ids)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdDiff {
    pub reference_count: usize,
    pub ours_count: usize,
    /// In the reference but not ours, sorted.
    pub missing: Vec<String>,
    /// In ours but not the reference, sorted.
    pub extra: Vec<String>,
}

pub fn diff_ids(reference: &IdSet, ours: &IdSet) -> IdDiff {
    IdDiff {
        reference_count: reference.len(),
        ours_count: ours.len(),
        missing: reference.difference(ours).cloned().collect(),
        extra: ours.difference(reference).cloned().collect(),
    }
}

impl IdDiff {
    /// Full missing set, one id per line, newline-terminated.
    pub fn missing_file_contents(&self) -> String {
        let mut out = String::new();
        for id in &self.missing {
            out.push_str(id);
            out.push('\n');
        }
        out
    }
}
