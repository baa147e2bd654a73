//! Source loaders: raw text in, [`LoadedSource`] out.
//!
//! Pure functions over already-read text; the caller owns file IO.

use tracing::{debug, info};

use crate::config::{AmountFormat, ColumnMapping, SourceConfig, SourceKind};
use crate::error::ReconError;
use crate::model::{JobMap, JobRecord, LoadStats, LoadedSource};
use crate::money::read_amount;

/// Field count of one delimited feed line.
pub const DELIMITED_FIELDS: usize = 6;

/// Load a source per its config.
pub fn load_source(config: &SourceConfig, data: &str) -> Result<LoadedSource, ReconError> {
    let loaded = match config.kind {
        SourceKind::Csv => load_csv_jobs(&config.label, data, &config.columns(), config.amount_format)?,
        SourceKind::Delimited => load_delimited_jobs(&config.label, data, config.amount_format)?,
    };
    info!(
        source = %loaded.label,
        kind = %config.kind,
        jobs = loaded.jobs.len(),
        rows = loaded.stats.rows,
        skipped = loaded.stats.skipped_lines,
        duplicates = loaded.stats.duplicate_ids,
        "loaded source"
    );
    Ok(loaded)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Load a header-row CSV export. Every column in `columns` must exist; a
/// numeric cell that fails under `format` aborts the whole load.
pub fn load_csv_jobs(
    source: &str,
    csv_data: &str,
    columns: &ColumnMapping,
    format: AmountFormat,
) -> Result<LoadedSource, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_err(source, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, ReconError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReconError::MissingColumn {
                source: source.into(),
                column: name.into(),
            })
    };

    let job_id_idx = idx(&columns.job_id)?;
    let revenue_idx = idx(&columns.revenue)?;
    let labor_idx = idx(&columns.labor)?;
    let materials_idx = idx(&columns.materials)?;
    let bu_idx = idx(&columns.business_unit)?;

    let mut jobs = JobMap::new();
    let mut stats = LoadStats::default();

    for record in reader.records() {
        let record = record.map_err(|e| csv_err(source, e))?;

        let job_id = record.get(job_id_idx).unwrap_or("").trim().to_string();
        let amount = |i: usize, column: &str| -> Result<f64, ReconError> {
            let raw = record.get(i).unwrap_or("");
            read_amount(raw, format).ok_or_else(|| ReconError::AmountParse {
                source: source.into(),
                job_id: job_id.clone(),
                column: column.into(),
                value: raw.into(),
            })
        };

        let job = JobRecord {
            revenue: amount(revenue_idx, &columns.revenue)?,
            labor: amount(labor_idx, &columns.labor)?,
            materials: amount(materials_idx, &columns.materials)?,
            business_unit: record.get(bu_idx).unwrap_or("").trim().to_string(),
            job_id,
        };
        insert_job(source, &mut jobs, &mut stats, job);
    }

    Ok(LoadedSource::new(source, jobs, stats))
}

fn csv_err(source: &str, e: csv::Error) -> ReconError {
    ReconError::Csv {
        source: source.into(),
        message: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Delimited feed
// ---------------------------------------------------------------------------

/// Load a pasted feed: one job per line as
/// `job_id,revenue,labor_pay,payroll_adjustment,materials,business_unit`.
///
/// Lines without exactly six fields are dropped (logged at debug level).
/// Blank lines are ignored.
pub fn load_delimited_jobs(
    source: &str,
    text: &str,
    format: AmountFormat,
) -> Result<LoadedSource, ReconError> {
    let mut jobs = JobMap::new();
    let mut stats = LoadStats::default();

    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_delimited_line(source, line, format)? {
            Some(job) => insert_job(source, &mut jobs, &mut stats, job),
            None => {
                stats.skipped_lines += 1;
                debug!(source, line = line_no + 1, content = line, "skipping malformed line");
            }
        }
    }

    Ok(LoadedSource::new(source, jobs, stats))
}

/// Parse one feed line. `Ok(None)` when the field count is wrong; labor is
/// `labor_pay + payroll_adjustment`.
pub fn parse_delimited_line(
    source: &str,
    line: &str,
    format: AmountFormat,
) -> Result<Option<JobRecord>, ReconError> {
    let parts: Vec<&str> = line.trim().split(',').collect();
    if parts.len() != DELIMITED_FIELDS {
        return Ok(None);
    }

    let job_id = parts[0].trim();
    let amount = |i: usize, column: &str| -> Result<f64, ReconError> {
        read_amount(parts[i], format).ok_or_else(|| ReconError::AmountParse {
            source: source.into(),
            job_id: job_id.into(),
            column: column.into(),
            value: parts[i].into(),
        })
    };

    let revenue = amount(1, "revenue")?;
    let labor_pay = amount(2, "labor_pay")?;
    let payroll_adjustment = amount(3, "payroll_adjustment")?;
    let materials = amount(4, "materials")?;

    Ok(Some(JobRecord {
        job_id: job_id.to_string(),
        revenue,
        labor: labor_pay + payroll_adjustment,
        materials,
        business_unit: parts[5].trim().to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Last row wins for a repeated job id.
fn insert_job(source: &str, jobs: &mut JobMap, stats: &mut LoadStats, job: JobRecord) {
    stats.rows += 1;
    if let Some(previous) = jobs.insert(job.job_id.clone(), job) {
        stats.duplicate_ids += 1;
        debug!(source, job_id = %previous.job_id, "duplicate job id, keeping later row");
    }
}

/// Distinct business units of a loaded source, sorted.
pub fn business_units(jobs: &JobMap) -> Vec<String> {
    let mut units: Vec<String> = jobs.values().map(|j| j.business_unit.clone()).collect();
    units.sort();
    units.dedup();
    units
}
