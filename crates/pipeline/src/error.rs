use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that can occur while normalizing or aggregating tracker data.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required column is missing from an input table.
    #[error("Missing column '{column}' in {table} table")]
    MissingColumn { table: String, column: String },

    /// Sheet-level failure while reshaping an input table.
    #[error("Sheet error: {0}")]
    Sheet(#[from] decomchart_sheet::SheetError),

    /// Unknown fuel category name.
    #[error("Unknown fuel category: {0}")]
    UnknownCategory(String),
}
