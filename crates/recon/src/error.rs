use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty name, duplicate labels, bad tolerance, etc.).
    ConfigValidation(String),
    /// Missing required column in a CSV source.
    MissingColumn { source: String, column: String },
    /// Strict amount parse error.
    AmountParse {
        source: String,
        job_id: String,
        column: String,
        value: String,
    },
    /// Malformed CSV (bad quoting, ragged rows, invalid UTF-8).
    Csv { source: String, message: String },
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "source '{source}': missing column '{column}'")
            }
            Self::AmountParse { source, job_id, column, value } => {
                write!(
                    f,
                    "source '{source}', job '{job_id}': cannot parse {column} '{value}'"
                )
            }
            Self::Csv { source, message } => write!(f, "source '{source}': {message}"),
        }
    }
}

impl std::error::Error for ReconError {}
