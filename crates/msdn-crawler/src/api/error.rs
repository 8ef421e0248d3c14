//! Errors raised while fetching and decoding one catalog resource.

use thiserror::Error;

/// Which remote resource a request was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Items,
    Languages,
    Listing,
    Detail,
}

impl Resource {
    pub fn as_str(&self) -> &str {
        match self {
            Resource::Items => "items",
            Resource::Languages => "languages",
            Resource::Listing => "listing",
            Resource::Detail => "detail",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed fetch. Non-2xx statuses are not errors by themselves; only
/// transport, body-read and decode failures are.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("failed to decode {resource} response: {source}")]
    Decode {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },

    #[error("{resource} response carried Status=false")]
    Rejected { resource: Resource },

    /// Raised by non-HTTP transports (test doubles, alternative backends)
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    pub fn decode(resource: Resource, source: serde_json::Error) -> Self {
        FetchError::Decode { resource, source }
    }
}
