use thiserror::Error;

/// Errors raised by the pursuit simulation and its file formats
#[derive(Debug, Error)]
pub enum SimError {
    #[error("position ({row}, {col}) is outside the {rows}x{cols} grid")]
    InvalidPosition {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("cell ({row}, {col}) is an obstacle")]
    Blocked { row: usize, col: usize },
    #[error("cell ({row}, {col}) holds a zombie or human")]
    Occupied { row: usize, col: usize },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("distance field is {field_rows}x{field_cols} but the grid is {rows}x{cols}")]
    FieldMismatch {
        field_rows: usize,
        field_cols: usize,
        rows: usize,
        cols: usize,
    },
    #[error("layout line {line}: {message}")]
    Layout { line: usize, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
