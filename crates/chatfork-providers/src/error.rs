use std::fmt;

/// Result type for chatfork-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal load failures. Per-message problems are never reported here; they are
/// collected as degradations on the normalized document.
#[derive(Debug)]
pub enum Error {
    /// IO operation failed while reading the source file
    Io(std::io::Error),

    /// The input is not valid JSON
    MalformedDocument(serde_json::Error),

    /// The JSON does not match any known export schema
    UnsupportedFormat(String),
}

/// Distinguishable error kinds for callers that surface load failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    MalformedDocument,
    UnsupportedFormat,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::MalformedDocument(_) => ErrorKind::MalformedDocument,
            Error::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::MalformedDocument(err) => write!(f, "Malformed document: {}", err),
            Error::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::MalformedDocument(err) => Some(err),
            Error::UnsupportedFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedDocument(err)
    }
}
