//! Error types for fetching and traversal.

use crate::types::Level;

/// Failure to obtain one page or node. The traversal treats every variant the same way.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection, DNS, timeout, or the body could not be read in full.
    #[error("GET {url}: {message}")]
    Transport { url: String, message: String },

    /// Server answered with a non-2xx status.
    #[error("GET {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body did not match the expected page or node schema.
    #[error("decode {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

/// Terminal error of a traversal, or a setup failure raised before any request.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid filter pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{filters} filter level(s) requested below {root}, which has only {available}")]
    TooDeep {
        root: Level,
        filters: usize,
        available: usize,
    },

    #[error("traversal producer thread panicked")]
    ProducerPanicked,
}

pub type Result<T> = std::result::Result<T, WalkError>;
