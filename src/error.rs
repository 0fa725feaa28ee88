use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading a salary dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The HTTP request failed or the server answered with a non-success status.
    #[error("Failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A local file could not be opened or read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input has no column with this name.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A row could not be interpreted as a salary record.
    #[error("Row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message() {
        let err = LoadError::MissingColumn("usd".to_string());
        assert_eq!(err.to_string(), "Missing required column 'usd'");
    }

    #[test]
    fn test_invalid_row_message() {
        let err = LoadError::InvalidRow {
            row: 3,
            message: "null value in 'cargo'".to_string(),
        };
        assert_eq!(err.to_string(), "Row 3: null value in 'cargo'");
    }

    #[test]
    fn test_file_read_keeps_source() {
        use std::error::Error as _;
        let err = LoadError::FileRead {
            path: PathBuf::from("/nonexistent/salaries.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/nonexistent/salaries.csv"));
        assert!(err.source().is_some());
    }
}
