use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoOverlapError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("no intersection tables could be loaded")]
    NoIntersectTables,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GoOverlapError>;
