//! High-level video generation on top of [`HeyGenClient`].
//!
//! [`VideoGenerator`] lets a caller supply only the text to speak. Missing
//! avatar and voice choices are resolved from the remote catalogs in list
//! order, the request is submitted, and by default the call blocks until the
//! video is ready.

use tracing::info;

use crate::client::{validate_input_text, HeyGenClient};
use crate::config::WaitOptions;
use crate::error::{HeyGenError, Result};
use crate::types::{
    Avatar, Dimension, VideoGenerationRequest, VideoInput, VideoStatusData, Voice,
    DEFAULT_AVATAR_STYLE,
};

/// What to generate and how long to wait for it.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub text: String,
    pub avatar_id: Option<String>,
    pub voice_id: Option<String>,
    pub avatar_style: String,
    pub speed: Option<f32>,
    pub dimension: Dimension,
    pub background: Option<String>,
    pub wait_for_completion: bool,
    /// Overrides the client's configured wait bounds.
    pub wait_options: Option<WaitOptions>,
}

impl GenerateOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            avatar_id: None,
            voice_id: None,
            avatar_style: DEFAULT_AVATAR_STYLE.to_string(),
            speed: None,
            dimension: Dimension::default(),
            background: None,
            wait_for_completion: true,
            wait_options: None,
        }
    }

    pub fn avatar_id(mut self, avatar_id: impl Into<String>) -> Self {
        self.avatar_id = Some(avatar_id.into());
        self
    }

    pub fn voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }

    pub fn avatar_style(mut self, style: impl Into<String>) -> Self {
        self.avatar_style = style.into();
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn dimension(mut self, width: u32, height: u32) -> Self {
        self.dimension = Dimension { width, height };
        self
    }

    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// When `false`, `generate_video` returns right after submission.
    pub fn wait_for_completion(mut self, wait: bool) -> Self {
        self.wait_for_completion = wait;
        self
    }

    pub fn wait_options(mut self, options: WaitOptions) -> Self {
        self.wait_options = Some(options);
        self
    }
}

/// Result of [`VideoGenerator::generate_video`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVideo {
    pub video_id: String,
    /// Present only when the call waited for completion.
    pub video_url: Option<String>,
}

/// Orchestrates default resolution, submission and waiting.
#[derive(Clone)]
pub struct VideoGenerator {
    client: HeyGenClient,
}

impl VideoGenerator {
    pub fn new(client: HeyGenClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &HeyGenClient {
        &self.client
    }

    /// Generates a video, resolving a default avatar and voice when omitted.
    /// A blank ID counts as omitted.
    ///
    /// # Errors
    ///
    /// - `HeyGenError::Validation` if the text is empty or too long. Checked
    ///   before any catalog lookup.
    /// - `HeyGenError::NoResource` if a default was needed and the catalog is empty.
    /// - Any error from submission or from waiting on the job.
    pub async fn generate_video(&self, options: GenerateOptions) -> Result<GeneratedVideo> {
        validate_input_text(&options.text)?;

        let avatar_id = match options.avatar_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => {
                let avatars = self.client.list_avatars().await?;
                let avatar = select_default_avatar(&avatars)?;
                info!(avatar = %avatar.avatar_name, avatar_id = %avatar.avatar_id, "using default avatar");
                avatar.avatar_id.clone()
            }
        };

        let voice_id = match options.voice_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => {
                let voices = self.client.list_voices().await?;
                let voice = select_default_voice(&voices)?;
                info!(voice = %voice.name, voice_id = %voice.voice_id, "using default voice");
                voice.voice_id.clone()
            }
        };

        let mut input =
            VideoInput::new(avatar_id, voice_id, options.text).with_avatar_style(options.avatar_style);
        if let Some(speed) = options.speed {
            input = input.with_speed(speed);
        }

        let mut request = VideoGenerationRequest::new(vec![input]).with_dimension(options.dimension);
        if let Some(background) = options.background {
            request = request.with_background(background);
        }

        let video_id = self.client.generate_video(&request).await?;

        if !options.wait_for_completion {
            return Ok(GeneratedVideo {
                video_id,
                video_url: None,
            });
        }

        info!(video_id = %video_id, "waiting for video completion");
        let video_url = match options.wait_options {
            Some(wait) => self.client.wait_for_completion_with(&video_id, wait).await?,
            None => self.client.wait_for_completion(&video_id).await?,
        };

        Ok(GeneratedVideo {
            video_id,
            video_url: Some(video_url),
        })
    }

    pub async fn list_available_avatars(&self) -> Result<Vec<Avatar>> {
        self.client.list_avatars().await
    }

    pub async fn list_available_voices(&self) -> Result<Vec<Voice>> {
        self.client.list_voices().await
    }

    pub async fn get_video_status(&self, video_id: &str) -> Result<VideoStatusData> {
        self.client.get_video_status(video_id).await
    }

    /// Waits on a job submitted earlier with `wait_for_completion(false)`.
    pub async fn wait_for_video(&self, video_id: &str, options: WaitOptions) -> Result<String> {
        self.client.wait_for_completion_with(video_id, options).await
    }
}

/// The first avatar in catalog order.
pub fn select_default_avatar(avatars: &[Avatar]) -> Result<&Avatar> {
    avatars
        .first()
        .ok_or(HeyGenError::NoResource { kind: "avatar" })
}

/// The first voice whose language mentions English, else the first voice.
pub fn select_default_voice(voices: &[Voice]) -> Result<&Voice> {
    voices
        .iter()
        .find(|voice| voice.language.to_lowercase().contains("english"))
        .or_else(|| voices.first())
        .ok_or(HeyGenError::NoResource { kind: "voice" })
}
