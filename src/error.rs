use crate::shared_types::InvalidOperation;
use std::{error, fmt, io};
use tarpc::client::RpcError;

/// Error type for `kv_server`
#[derive(Debug)]
pub enum Error {
    /// std::io::Error, e.g. connection refused or bind failure
    Io(io::Error),
    /// The call did not complete: disconnect, deadline, or server-side drop
    Rpc(RpcError),
    /// Set was called with an empty key
    EmptyKey,
    /// Set was called with an empty value
    EmptyValue,
    /// No such key in the store
    KeyNotFound(String),
    /// Rejected configuration value
    Config(String),
}

impl Error {
    /// Whether the server refused the call, as opposed to the call not reaching it.
    pub fn is_invalid_operation(&self) -> bool {
        matches!(
            self,
            Self::EmptyKey | Self::EmptyValue | Self::KeyNotFound(_)
        )
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Io(value)
    }
}

impl From<RpcError> for Error {
    fn from(value: RpcError) -> Self {
        Error::Rpc(value)
    }
}

impl From<InvalidOperation> for Error {
    fn from(value: InvalidOperation) -> Self {
        match value {
            InvalidOperation::EmptyKey => Error::EmptyKey,
            InvalidOperation::EmptyValue => Error::EmptyValue,
            InvalidOperation::KeyNotFound(key) => Error::KeyNotFound(key),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{}", e),
            Self::Rpc(e) => write!(f, "rpc failed: {}", e),
            Self::EmptyKey => write!(f, "key must not be empty"),
            Self::EmptyValue => write!(f, "value must not be empty"),
            Self::KeyNotFound(key) => write!(f, "no such key named `{}`", key),
            Self::Config(msg) => write!(f, "bad configuration: {}", msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Rpc(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for `kv_server`
pub type Result<T> = std::result::Result<T, Error>;
