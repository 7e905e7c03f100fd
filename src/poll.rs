//! The completion polling state machine.
//!
//! A wait starts in [`PollState::Polling`] and ends in exactly one of the
//! terminal states. [`next_state`] is evaluated after every status query; it
//! looks at the observed status first and at the elapsed time second, so a
//! job that completes on the very last poll is still reported as completed.

use std::time::Duration;

use crate::error::{HeyGenError, Result};
use crate::types::{VideoStatus, VideoStatusData};

/// Message reported when a failed job carries no error text.
pub const DEFAULT_FAILURE_MESSAGE: &str = "video generation failed";

#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    Polling,
    Completed(String),
    Failed {
        code: Option<String>,
        message: String,
    },
    TimedOut,
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Polling)
    }

    /// Converts a terminal state into the caller-facing result.
    ///
    /// Returns `None` while still polling.
    pub(crate) fn into_outcome(self, video_id: &str, max_wait: Duration) -> Option<Result<String>> {
        match self {
            PollState::Polling => None,
            PollState::Completed(url) => Some(Ok(url)),
            PollState::Failed { code, message } => Some(Err(HeyGenError::JobFailed {
                video_id: video_id.to_string(),
                code,
                message,
            })),
            PollState::TimedOut => Some(Err(HeyGenError::Timeout {
                video_id: video_id.to_string(),
                max_wait,
            })),
        }
    }
}

/// Computes the state that follows a status observation.
///
/// `elapsed` is measured from the first poll of this wait.
///
/// # Errors
///
/// `HeyGenError::ContractViolation` if the job is `completed` without a URL.
pub fn next_state(
    snapshot: &VideoStatusData,
    elapsed: Duration,
    max_wait: Duration,
) -> Result<PollState> {
    match snapshot.status {
        VideoStatus::Completed => match snapshot.video_url.as_deref() {
            Some(url) if !url.is_empty() => Ok(PollState::Completed(url.to_string())),
            _ => Err(HeyGenError::ContractViolation {
                message: "video completed but no URL was provided".to_string(),
            }),
        },
        VideoStatus::Failed => {
            let error = snapshot.error.as_ref();
            Ok(PollState::Failed {
                code: error.and_then(|e| e.code.clone()),
                message: error
                    .and_then(|e| e.message.clone())
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            })
        }
        VideoStatus::Pending
        | VideoStatus::Processing
        | VideoStatus::Waiting
        | VideoStatus::Unknown => {
            if elapsed >= max_wait {
                Ok(PollState::TimedOut)
            } else {
                Ok(PollState::Polling)
            }
        }
    }
}
