//! Error types for yamala-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Canonical description of the dataset shape accepted by the writer.
///
/// Every structural rejection carries exactly this text, whatever the
/// offending part of the input was.
pub const STRUCTURE_ERROR_MESSAGE: &str = "\
input must have the following structure:

    {
        'sheet1_name': {
            'rows': ['row1_text', 'row2_text', ...],
            'columns': {
                'column1_header': [row1_col1_value, row2_col1_value, ...],
                'column2_header': ...
            }
        },
        'sheet2_name': ...
    }

the dataset must not be empty and every column must hold exactly one value per row";

/// Errors that can occur in yamala-core
#[derive(Debug, Error)]
pub enum Error {
    /// The dataset does not have the shape the writer expects
    #[error("{}", STRUCTURE_ERROR_MESSAGE)]
    Structure,

    /// A file or folder given as input does not exist
    #[error("no such file or directory: '{}'", path.display())]
    NotFound { path: PathBuf },

    /// The reader only accepts YAML files
    #[error("File extension must be .yaml or .yml")]
    FileType { path: PathBuf },

    /// Failed to read a file
    #[error("failed to read file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML decoding error
    #[error("YAML error in '{}': {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A sheet has more rows or columns than a worksheet can hold
    #[error("sheet '{sheet}' with {rows} rows and {columns} columns does not fit in a worksheet")]
    SheetTooLarge {
        sheet: String,
        rows: usize,
        columns: usize,
    },

    /// The workbook could not be encoded or written
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
