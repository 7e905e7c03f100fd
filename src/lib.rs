//! An unofficial Rust SDK for the HeyGen avatar video API.
//!
//! This SDK provides an asynchronous interface for generating talking-avatar
//! videos from text. It covers the catalog endpoints, job submission and
//! status polling, and adds a small orchestration layer that picks a default
//! avatar and voice when the caller does not name one.
//!
//! ## Features
//! - Avatar and voice catalog listing.
//! - Video generation with local validation before any request is sent.
//! - Bounded completion polling with timeout and optional cancellation.
//! - Typed error handling for every failure mode.
//!
//! ## Example
//!
//! ```no_run
//! use heygen::{ClientConfig, GenerateOptions, HeyGenClient, VideoGenerator};
//!
//! # #[tokio::main]
//! # async fn main() -> heygen::Result<()> {
//! let client = HeyGenClient::new(ClientConfig::from_env()?)?;
//! let generator = VideoGenerator::new(client);
//!
//! let video = generator
//!     .generate_video(GenerateOptions::new("Hello from Rust!"))
//!     .await?;
//! println!("{} -> {:?}", video.video_id, video.video_url);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod poll;
pub mod types;

pub use client::HeyGenClient;
pub use config::{ClientConfig, WaitOptions};
pub use error::{HeyGenError, Result};
pub use generator::{
    select_default_avatar, select_default_voice, GenerateOptions, GeneratedVideo, VideoGenerator,
};
pub use poll::PollState;
pub use types::{
    Avatar, AvatarType, Character, Dimension, VideoError, VideoGenerationRequest, VideoInput,
    VideoStatus, VideoStatusData, Voice, VoiceSource, MAX_INPUT_TEXT_CHARS,
};
