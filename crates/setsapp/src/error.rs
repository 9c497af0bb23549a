use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetsError {
    #[error("No such operator: {0}")]
    UnknownOperator(String),

    #[error("Cannot resolve attribute: {0}")]
    UnresolvedAttribute(String),

    #[error("Clause on '{0}' needs a context document but the query has none")]
    MissingContext(String),

    #[error("Query cannot create documents: operator '{0}' has no enforce")]
    NotCreatable(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Document already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid clause: {0}")]
    InvalidClause(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SetsError>;
