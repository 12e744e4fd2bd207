use std::fmt;

/// Errors from a single oracle exchange.
#[derive(Debug)]
pub enum OracleError {
    /// Connection-level failure reaching the service.
    Http(reqwest::Error),
    /// Response body could not be decoded as JSON.
    Json(reqwest::Error),
    /// HTTP status outside the 2xx range.
    Status(u16),
    /// Well-formed response whose `status` field reports failure.
    Rejected(String),
    /// Response payload violates the wire contract (ragged grid, empty route).
    Malformed(String),
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleError::Http(err) => write!(f, "oracle unreachable: {err}"),
            OracleError::Json(err) => write!(f, "unreadable oracle response: {err}"),
            OracleError::Status(code) => write!(f, "oracle answered with HTTP {code}"),
            OracleError::Rejected(status) => write!(f, "oracle rejected the request: {status}"),
            OracleError::Malformed(message) => write!(f, "malformed oracle payload: {message}"),
        }
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        OracleError::Http(err)
    }
}
