use thiserror::Error;

/// Failure of a single Trello request. URLs carried here never include the
/// credential query string.
#[derive(Error, Debug)]
pub enum TrelloError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TrelloError {
    pub fn url(&self) -> &str {
        match self {
            Self::Request { url, .. } | Self::Status { url, .. } | Self::Decode { url, .. } => url,
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request { source, .. } | Self::Decode { source, .. } => source.status(),
        }
    }
}
