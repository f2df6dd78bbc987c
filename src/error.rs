use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading a flight log and drawing its charts
#[derive(Debug, Error)]
pub enum PlotError {
    /// the time column is not among the table's columns
    #[error("time column '{column}' not found, available columns: {available:?}")]
    MissingTimeColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("sheet '{sheet}' not found, available sheets: {available:?}")]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("unsupported input format: '{0}'")]
    UnsupportedFormat(String),

    /// no header row to take the column names from
    #[error("no header row in {}", .0.display())]
    Empty(PathBuf),

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not draw {}: {message}", path.display())]
    Draw { path: PathBuf, message: String },

    #[error("could not open a viewer for {}: {source}", path.display())]
    View {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
