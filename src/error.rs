use std::collections::TryReserveError;
use std::error;
use std::fmt;
use std::result;

/// The error type for operations that allocate treap nodes.
#[derive(Debug)]
pub enum Error {
    /// The node table could not grow to hold another node.
    AllocError(TryReserveError),
}

/// Convenience `Result` alias for fallible treap operations.
pub type Result<T> = result::Result<T, Error>;

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Error {
        Error::AllocError(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::AllocError(error) => write!(f, "failed to allocate treap node: {}", error),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::AllocError(error) => Some(error),
        }
    }
}
