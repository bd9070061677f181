//! Error type for LearnIT API calls

/// Failure of a single API call
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{endpoint} returned HTTP {status}: {message}")]
    Status {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    #[error("Failed to reach {endpoint}: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} reported failure: {message}")]
    Rejected {
        endpoint: &'static str,
        message: String,
    },

    #[error("API task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// Endpoint path the error belongs to, if known
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            Self::Status { endpoint, .. }
            | Self::Transport { endpoint, .. }
            | Self::Decode { endpoint, .. }
            | Self::Rejected { endpoint, .. } => Some(endpoint),
            Self::Join(_) => None,
        }
    }

    /// True for 401/403 responses
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}
