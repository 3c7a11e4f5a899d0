//! Route table errors.

use thiserror::Error;

pub type RouteResult<T> = Result<T, RouteError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route path must start with '/': {0}")]
    RelativePath(String),

    #[error("Empty parameter name in route path: {0}")]
    EmptyParam(String),

    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),
}
