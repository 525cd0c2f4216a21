use std::error;
use std::fmt;
use std::result;

/// Errors returned by queries and structural operations on trees.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The value a query was made against is not present in the tree.
    NotFound,
    /// The operation conflicts with how the tree places its values.
    Unsupported(&'static str),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "no node was found for the value"),
            Error::Unsupported(reason) => write!(f, "unsupported operation: {}", reason),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
