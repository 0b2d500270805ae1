//! Library errors.

use std::fmt;

use thiserror::Error;

/// Library result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Which label map a lookup went to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    Coordinates,
    Values,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Coordinates => write!(f, "coordinates"),
            TableKind::Values => write!(f, "values"),
        }
    }
}

/// Library errors.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("label `{label}` not found in {table}")]
    MissingLabel { label: String, table: TableKind },

    #[error("{labels} labels but {points} points")]
    LengthMismatch { labels: usize, points: usize },

    #[error("duplicate label `{0}`")]
    DuplicateLabel(String),

    #[error("count `{digits}` of component `{component}` does not fit in u32")]
    InvalidCount { component: String, digits: String },

    #[error("cannot fit a scaler on zero samples")]
    EmptyInput,

    #[error("expected {expected} features, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
}

impl Error {
    pub(crate) fn missing(label: &str, table: TableKind) -> Self {
        Error::MissingLabel {
            label: label.to_string(),
            table,
        }
    }
}
