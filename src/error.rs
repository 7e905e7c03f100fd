use std::time::Duration;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HeyGenError>;

/// Every error the SDK can surface.
///
/// Nothing is retried internally; each variant reaches the immediate caller.
#[derive(Debug, thiserror::Error)]
pub enum HeyGenError {
    /// A local precondition failed. No request was sent.
    #[error("invalid request: {message}")]
    Validation { message: String },

    /// The HTTP call failed, or the service answered with an error or with a
    /// response that does not match the expected envelope.
    #[error("remote error ({}): {message}", status_label(.status))]
    Remote {
        /// HTTP status of the response, when one was received.
        status: Option<u16>,
        message: String,
    },

    /// A catalog listing came back empty while a default had to be picked.
    #[error("no {kind}s available")]
    NoResource { kind: &'static str },

    /// The service reported the job as failed.
    #[error("video {video_id} failed: {message}")]
    JobFailed {
        video_id: String,
        code: Option<String>,
        message: String,
    },

    /// The job did not reach a terminal state within the allowed time.
    #[error("video {video_id} did not finish within {}s", .max_wait.as_secs_f64())]
    Timeout { video_id: String, max_wait: Duration },

    /// The service broke its own contract, e.g. completed without a URL.
    #[error("service contract violated: {message}")]
    ContractViolation { message: String },

    /// Polling was stopped through the caller's cancellation token.
    #[error("waiting for video {video_id} was cancelled")]
    Cancelled { video_id: String },

    #[error("API key is missing. Provide it or set the HEYGEN_API_KEY environment variable.")]
    MissingApiKey,

    #[error("API key is not a valid header value")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl HeyGenError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        HeyGenError::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        HeyGenError::Remote {
            status,
            message: message.into(),
        }
    }

    /// HTTP status attached to a [`HeyGenError::Remote`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            HeyGenError::Remote { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HeyGenError {
    fn from(err: reqwest::Error) -> Self {
        HeyGenError::Remote {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP {code}"),
        None => "no response".to_string(),
    }
}
