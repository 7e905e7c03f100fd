use serde::{Deserialize, Deserializer, Serialize};

/// Longest input text the service accepts for a single video input.
pub const MAX_INPUT_TEXT_CHARS: usize = 1500;

/// Avatar style used when the caller does not ask for one.
pub const DEFAULT_AVATAR_STYLE: &str = "normal";

/// Whether an avatar is part of the premium catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarType {
    Premium,
    Standard,
}

impl std::fmt::Display for AvatarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvatarType::Premium => f.write_str("premium"),
            AvatarType::Standard => f.write_str("standard"),
        }
    }
}

/// An avatar from the remote catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawAvatar")]
pub struct Avatar {
    pub avatar_id: String,
    pub avatar_name: String,
    pub preview_image_url: Option<String>,
    pub gender: Option<String>,
    pub avatar_type: AvatarType,
}

// Wire shape of an avatar; `premium` is folded into `AvatarType`.
#[derive(Deserialize)]
struct RawAvatar {
    avatar_id: String,
    avatar_name: String,
    #[serde(default)]
    preview_image_url: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    premium: Option<bool>,
}

impl From<RawAvatar> for Avatar {
    fn from(raw: RawAvatar) -> Self {
        Avatar {
            avatar_id: raw.avatar_id,
            avatar_name: raw.avatar_name,
            preview_image_url: raw.preview_image_url,
            gender: raw.gender,
            avatar_type: if raw.premium.unwrap_or(false) {
                AvatarType::Premium
            } else {
                AvatarType::Standard
            },
        }
    }
}

/// A voice from the remote catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub language: String,
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub preview_audio: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub support_pause: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub emotion_support: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Output frame size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

impl Default for Dimension {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Who appears on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Character {
    Avatar {
        avatar_id: String,
        avatar_style: String,
    },
}

/// What the character says.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoiceSource {
    Text {
        input_text: String,
        voice_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        speed: Option<f32>,
    },
}

/// One scene of a generated video: a character paired with a voice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoInput {
    pub character: Character,
    pub voice: VoiceSource,
}

impl VideoInput {
    /// An avatar speaking `text` with the given voice, in the default style.
    pub fn new(
        avatar_id: impl Into<String>,
        voice_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            character: Character::Avatar {
                avatar_id: avatar_id.into(),
                avatar_style: DEFAULT_AVATAR_STYLE.to_string(),
            },
            voice: VoiceSource::Text {
                input_text: text.into(),
                voice_id: voice_id.into(),
                speed: None,
            },
        }
    }

    pub fn with_avatar_style(mut self, style: impl Into<String>) -> Self {
        let Character::Avatar { avatar_style, .. } = &mut self.character;
        *avatar_style = style.into();
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        let VoiceSource::Text { speed: slot, .. } = &mut self.voice;
        *slot = Some(speed);
        self
    }
}

/// Body of `POST /v2/video/generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoGenerationRequest {
    pub video_inputs: Vec<VideoInput>,
    pub dimension: Dimension,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl VideoGenerationRequest {
    pub fn new(video_inputs: Vec<VideoInput>) -> Self {
        Self {
            video_inputs,
            dimension: Dimension::default(),
            background: None,
        }
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }
}

/// Server-side lifecycle of a video job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    Pending,
    Processing,
    Waiting,
    Completed,
    Failed,
    /// Any status this SDK does not know yet; treated as still in progress.
    #[serde(other)]
    Unknown,
}

impl VideoStatus {
    /// `completed` and `failed` are the only states the service never leaves.
    pub fn is_terminal(self) -> bool {
        matches!(self, VideoStatus::Completed | VideoStatus::Failed)
    }
}

impl std::fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VideoStatus::Pending => "pending",
            VideoStatus::Processing => "processing",
            VideoStatus::Waiting => "waiting",
            VideoStatus::Completed => "completed",
            VideoStatus::Failed => "failed",
            VideoStatus::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Failure details attached to a `failed` job.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoError {
    #[serde(default, deserialize_with = "string_or_number")]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A snapshot of a job as last reported by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoStatusData {
    #[serde(default)]
    pub id: Option<String>,
    pub status: VideoStatus,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub error: Option<VideoError>,
}

/// The service sends error codes as either strings or integers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Code>::deserialize(deserializer)?.map(|code| match code {
        Code::Text(text) => text,
        Code::Number(number) => number.to_string(),
    }))
}

/// (Internal) The `{ data: ..., error: ... }` wrapper used by v2 endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    #[serde(default = "Option::default")]
    pub(crate) data: Option<T>,
    #[serde(default)]
    pub(crate) error: Option<ServiceError>,
}

/// (Internal) The `{ code, data, message }` wrapper used by the v1 status endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    pub(crate) code: i64,
    #[serde(default)]
    pub(crate) data: Option<VideoStatusData>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

/// (Internal) Error object embedded in a v2 envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ServiceError {
    #[serde(default, deserialize_with = "string_or_number")]
    pub(crate) code: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AvatarList {
    pub(crate) avatars: Vec<Avatar>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VoiceList {
    pub(crate) voices: Vec<Voice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedVideoId {
    pub(crate) video_id: String,
}
