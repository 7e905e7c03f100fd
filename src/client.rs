use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

use crate::config::{ClientConfig, WaitOptions};
use crate::error::{HeyGenError, Result};
use crate::poll::{next_state, PollState};
use crate::types::{
    ApiResponse, Avatar, AvatarList, Character, GeneratedVideoId, StatusResponse,
    VideoGenerationRequest, VideoStatusData, Voice, VoiceList, VoiceSource, MAX_INPUT_TEXT_CHARS,
};

const API_KEY_HEADER: &str = "x-api-key";
const STATUS_OK_CODE: i64 = 100;

/// The main client for interacting with the HeyGen API.
///
/// It holds the shared `reqwest::Client` and the base URL for all API requests.
/// It is cheap to clone and safe to share across tasks; each call is independent.
#[derive(Clone)]
pub struct HeyGenClient {
    client: reqwest::Client,
    base_url: Url,
    wait: WaitOptions,
}

impl HeyGenClient {
    /// Creates a new `HeyGenClient` from an explicit configuration.
    ///
    /// # Errors
    ///
    /// - `HeyGenError::InvalidApiKey` if the key cannot be sent as a header.
    /// - `HeyGenError::Remote` if the internal HTTP client fails to build.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut api_key = HeaderValue::from_str(&config.api_key)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            wait: config.wait,
        })
    }

    /// Lists the avatars available to this account, in service order.
    pub async fn list_avatars(&self) -> Result<Vec<Avatar>> {
        let url = self.base_url.join("v2/avatars")?;
        let response = self.client.get(url).send().await?;
        let list: AvatarList = read_data(response).await?;
        debug!(count = list.avatars.len(), "fetched avatars");
        Ok(list.avatars)
    }

    /// Lists the voices available to this account, in service order.
    pub async fn list_voices(&self) -> Result<Vec<Voice>> {
        let url = self.base_url.join("v2/voices")?;
        let response = self.client.get(url).send().await?;
        let list: VoiceList = read_data(response).await?;
        debug!(count = list.voices.len(), "fetched voices");
        Ok(list.voices)
    }

    /// Submits a video generation job and returns its video ID.
    ///
    /// The request is checked locally first; an invalid request never
    /// reaches the network.
    ///
    /// # Errors
    ///
    /// - `HeyGenError::Validation` for empty inputs, missing IDs, or text that is
    ///   empty or longer than 1500 characters.
    /// - `HeyGenError::Remote` if the call fails or the response is malformed.
    pub async fn generate_video(&self, request: &VideoGenerationRequest) -> Result<String> {
        validate_request(request)?;

        let url = self.base_url.join("v2/video/generate")?;
        debug!(body = ?request, "submitting video generation request");
        let response = self.client.post(url).json(request).send().await?;
        let created: GeneratedVideoId = read_data(response).await?;

        if created.video_id.is_empty() {
            return Err(HeyGenError::remote(None, "service returned an empty video_id"));
        }
        info!(video_id = %created.video_id, "video generation started");
        Ok(created.video_id)
    }

    /// Retrieves the current status of a video job.
    ///
    /// A response whose envelope `code` is not 100 is an error even when the
    /// HTTP status is 200.
    pub async fn get_video_status(&self, video_id: &str) -> Result<VideoStatusData> {
        let mut url = self.base_url.join("v1/video_status.get")?;
        url.query_pairs_mut().append_pair("video_id", video_id);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        let body = response.text().await?;
        let envelope: StatusResponse = parse_envelope(status.as_u16(), &body)?;
        if envelope.code != STATUS_OK_CODE {
            return Err(HeyGenError::remote(
                Some(status.as_u16()),
                envelope
                    .message
                    .unwrap_or_else(|| format!("unknown error (code {})", envelope.code)),
            ));
        }

        envelope.data.ok_or_else(|| {
            HeyGenError::remote(Some(status.as_u16()), "status response has no data")
        })
    }

    /// Waits for a job using the wait options from the client configuration.
    pub async fn wait_for_completion(&self, video_id: &str) -> Result<String> {
        self.wait_for_completion_with(video_id, self.wait).await
    }

    /// Polls a job until it completes, fails, or `options.max_wait` elapses.
    ///
    /// # Returns
    ///
    /// The URL of the finished video.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use heygen::{ClientConfig, HeyGenClient, WaitOptions};
    /// # use std::time::Duration;
    /// # #[tokio::main]
    /// # async fn main() -> anyhow::Result<()> {
    /// # let client = HeyGenClient::new(ClientConfig::new("your_api_key"))?;
    /// let options = WaitOptions::new(Duration::from_secs(2), Duration::from_secs(120));
    /// let url = client.wait_for_completion_with("some_video_id", options).await?;
    /// println!("Video ready: {url}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn wait_for_completion_with(
        &self,
        video_id: &str,
        options: WaitOptions,
    ) -> Result<String> {
        self.poll_until_terminal(video_id, options, None).await
    }

    /// Like [`HeyGenClient::wait_for_completion_with`], but stops early with
    /// `HeyGenError::Cancelled` once `cancel` fires.
    pub async fn wait_for_completion_cancellable(
        &self,
        video_id: &str,
        options: WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<String> {
        self.poll_until_terminal(video_id, options, Some(cancel)).await
    }

    async fn poll_until_terminal(
        &self,
        video_id: &str,
        options: WaitOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<String> {
        let started = Instant::now();

        loop {
            let snapshot = self.get_video_status(video_id).await?;
            let elapsed = started.elapsed();
            debug!(video_id, status = %snapshot.status, ?elapsed, "polled video status");

            let state = next_state(&snapshot, elapsed, options.max_wait)?;
            if let PollState::Completed(url) = &state {
                info!(video_id, url = %url, "video completed");
            }
            if let Some(outcome) = state.into_outcome(video_id, options.max_wait) {
                return outcome;
            }

            let remaining = options.max_wait.saturating_sub(elapsed);
            let pause = options.poll_interval.min(remaining);
            pause_between_polls(video_id, pause, cancel).await?;
        }
    }
}

async fn pause_between_polls(
    video_id: &str,
    pause: Duration,
    cancel: Option<&CancellationToken>,
) -> Result<()> {
    match cancel {
        None => {
            sleep(pause).await;
            Ok(())
        }
        Some(token) => tokio::select! {
            _ = token.cancelled() => Err(HeyGenError::Cancelled {
                video_id: video_id.to_string(),
            }),
            _ = sleep(pause) => Ok(()),
        },
    }
}

/// Checks a generation request against the limits the service enforces.
pub(crate) fn validate_request(request: &VideoGenerationRequest) -> Result<()> {
    if request.video_inputs.is_empty() {
        return Err(HeyGenError::validation("video inputs must be provided"));
    }

    for (index, input) in request.video_inputs.iter().enumerate() {
        let Character::Avatar { avatar_id, .. } = &input.character;
        if avatar_id.trim().is_empty() {
            return Err(HeyGenError::validation(format!(
                "video input {index} has no avatar_id"
            )));
        }

        let VoiceSource::Text {
            input_text,
            voice_id,
            ..
        } = &input.voice;
        if voice_id.trim().is_empty() {
            return Err(HeyGenError::validation(format!(
                "video input {index} has no voice_id"
            )));
        }
        validate_input_text(input_text)?;
    }

    Ok(())
}

/// Input text must be present and at most 1500 characters long.
pub(crate) fn validate_input_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(HeyGenError::validation("input text must be provided"));
    }
    let length = text.chars().count();
    if length > MAX_INPUT_TEXT_CHARS {
        return Err(HeyGenError::validation(format!(
            "input text is {length} characters, the limit is {MAX_INPUT_TEXT_CHARS}"
        )));
    }
    Ok(())
}

/// Reads a v2 `{ data, error }` envelope and returns its payload.
async fn read_data<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(error_from_response(response).await);
    }

    let body = response.text().await?;
    let envelope: ApiResponse<T> = parse_envelope(status.as_u16(), &body)?;

    if let Some(error) = envelope.error {
        let message = match (error.code, error.message) {
            (Some(code), Some(message)) => format!("{message} (code {code})"),
            (None, Some(message)) => message,
            (Some(code), None) => format!("service error code {code}"),
            (None, None) => "service reported an error".to_string(),
        };
        return Err(HeyGenError::remote(Some(status.as_u16()), message));
    }

    envelope
        .data
        .ok_or_else(|| HeyGenError::remote(Some(status.as_u16()), "response has no data"))
}

fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|err| {
        HeyGenError::remote(Some(status), format!("unexpected response format: {err}"))
    })
}

/// Builds a `Remote` error from a non-2xx response, keeping the best message available.
async fn error_from_response(response: Response) -> HeyGenError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = service_message(&body)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());

    HeyGenError::remote(Some(status.as_u16()), message)
}

fn service_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| value.pointer("/error/message").and_then(|m| m.as_str()))
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
