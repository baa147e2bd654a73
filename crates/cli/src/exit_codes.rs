//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Discrepancies are a normal result and exit 0; only failures to load,
//! parse or write are non-zero.
//!
//! | Code | Description                                  |
//! |------|----------------------------------------------|
//! | 0    | Success                                      |
//! | 2    | Usage or config error                        |
//! | 3    | IO error (missing input, unwritable output)  |
//! | 4    | Parse error (bad CSV, bad amount, bad column)|

use jobrecon_engine::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, invalid config.
pub const EXIT_USAGE: u8 = 2;

/// Input file missing or unreadable, output file unwritable.
pub const EXIT_IO: u8 = 3;

/// Source data could not be parsed (strict amount, missing column, bad CSV).
pub const EXIT_PARSE: u8 = 4;

/// Map an engine error to its exit code. The engine never touches the
/// filesystem, so IO failures are raised by the CLI itself with [`EXIT_IO`].
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_USAGE,
        ReconError::MissingColumn { .. }
        | ReconError::AmountParse { .. }
        | ReconError::Csv { .. } => EXIT_PARSE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_usage() {
        assert_eq!(recon_exit_code(&ReconError::ConfigParse("x".into())), EXIT_USAGE);
        assert_eq!(recon_exit_code(&ReconError::ConfigValidation("x".into())), EXIT_USAGE);
    }

    #[test]
    fn csv_and_column_errors_are_parse() {
        let missing = ReconError::MissingColumn { source: "DB".into(), column: "labor".into() };
        let csv = ReconError::Csv { source: "DB".into(), message: "unequal lengths".into() };
        assert_eq!(recon_exit_code(&missing), EXIT_PARSE);
        assert_eq!(recon_exit_code(&csv), EXIT_PARSE);
    }

    #[test]
    fn data_errors_are_parse() {
        let err = ReconError::AmountParse {
            source: "DB".into(),
            job_id: "1".into(),
            column: "labor".into(),
            value: "x".into(),
        };
        assert_eq!(recon_exit_code(&err), EXIT_PARSE);
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [EXIT_SUCCESS, EXIT_USAGE, EXIT_IO, EXIT_PARSE];
        let mut sorted = codes.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }
}
