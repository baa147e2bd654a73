//! `jobrecon run`, `validate` and `units`: config-driven job reconciliation.

use std::path::{Path, PathBuf};

use jobrecon_engine::config::SourceConfig;
use jobrecon_engine::loader::business_units;
use jobrecon_engine::model::LoadedSource;
use jobrecon_engine::JobReconConfig;
use tracing::info;

use crate::report::render_report;
use crate::{CliError, Side};

fn load_config(config_path: &Path) -> Result<JobReconConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        CliError::io(format!("cannot read config {}: {e}", config_path.display()))
    })?;
    JobReconConfig::from_toml(&config_str).map_err(CliError::recon)
}

/// Read and parse one source; `file` resolves relative to the config's directory.
fn load_side(config_path: &Path, source: &SourceConfig) -> Result<LoadedSource, CliError> {
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let path = base_dir.join(&source.file);
    info!(source = %source.label, path = %path.display(), "reading source");

    let data = std::fs::read_to_string(&path).map_err(|e| {
        CliError::io(format!("cannot read {} source {}: {e}", source.label, path.display()))
    })?;
    jobrecon_engine::load_source(source, &data).map_err(CliError::recon)
}

pub fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    top: Option<usize>,
) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    let left = load_side(&config_path, &config.left)?;
    let right = load_side(&config_path, &config.right)?;

    let result = jobrecon_engine::run(&config, &left, &right);

    if json_output || output_file.is_some() {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = output_file {
            std::fs::write(path, &json_str)
                .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
            eprintln!("wrote {}", path.display());
        }

        if json_output {
            println!("{json_str}");
            return Ok(());
        }
    }

    print!("{}", render_report(&result, top.unwrap_or(config.report.top)));
    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    eprintln!(
        "valid: '{}' {} ({}) vs {} ({}), tolerance {}, {}",
        config.name,
        config.left.label,
        config.left.kind,
        config.right.label,
        config.right.kind,
        config.tolerance,
        config.direction,
    );
    Ok(())
}

pub fn cmd_units(config_path: PathBuf, side: Side) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    let source = match side {
        Side::Left => &config.left,
        Side::Right => &config.right,
    };
    let loaded = load_side(&config_path, source)?;

    let units = business_units(&loaded.jobs);
    for unit in &units {
        println!("{unit}");
    }
    eprintln!("{} business unit(s) in {}", units.len(), loaded.label);
    Ok(())
}
