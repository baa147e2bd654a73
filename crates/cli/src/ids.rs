//! `jobrecon missing-ids`: reference id list vs. our export's id column.

use std::path::PathBuf;

use jobrecon_engine::ids::{diff_ids, read_id_csv, read_id_lines};
use tracing::info;

use crate::report::render_id_diff;
use crate::CliError;

pub fn cmd_missing_ids(
    reference_path: PathBuf,
    ours_path: PathBuf,
    column: String,
    output: PathBuf,
    limit: usize,
    json_output: bool,
) -> Result<(), CliError> {
    if limit == 0 {
        return Err(CliError::args("--limit must be at least 1")
            .with_hint("the full missing set is always written to --output"));
    }

    let reference_text = std::fs::read_to_string(&reference_path).map_err(|e| {
        CliError::io(format!("cannot read {}: {e}", reference_path.display()))
    })?;
    let ours_text = std::fs::read_to_string(&ours_path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", ours_path.display())))?;

    let reference = read_id_lines(&reference_text);
    let ours = read_id_csv(&ours_path.display().to_string(), &ours_text, &column)
        .map_err(CliError::recon)?;
    info!(reference = reference.len(), ours = ours.len(), "read id sets");

    let diff = diff_ids(&reference, &ours);

    std::fs::write(&output, diff.missing_file_contents())
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", output.display())))?;

    if json_output {
        let json_str = serde_json::to_string_pretty(&diff)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    } else {
        print!("{}", render_id_diff(&diff, limit));
    }
    eprintln!("wrote {} missing id(s) to {}", diff.missing.len(), output.display());
    Ok(())
}
