use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use heygen::{ClientConfig, GenerateOptions, HeyGenClient, VideoGenerator, WaitOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "heygen", version, about = "HeyGen avatar video generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the API base URL (defaults to HEYGEN_BASE_URL or the public API)
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available avatars
    Avatars,
    /// List available voices
    Voices,
    /// Generate a video from text
    Generate(GenerateArgs),
    /// Show the current status of a video
    Status {
        video_id: String,
    },
    /// Wait until a video finishes and print its URL
    Wait {
        video_id: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Text the avatar should speak (at most 1500 characters)
    text: String,
    /// Avatar ID; the first catalog avatar is used when omitted
    avatar_id: Option<String>,
    /// Voice ID; an English voice is picked when omitted
    voice_id: Option<String>,
    /// Speech speed multiplier
    #[arg(long)]
    speed: Option<f32>,
    #[arg(long, default_value_t = 1280)]
    width: u32,
    #[arg(long, default_value_t = 720)]
    height: u32,
    #[arg(long)]
    background: Option<String>,
    /// Return right after submission instead of waiting for the video
    #[arg(long)]
    no_wait: bool,
    #[command(flatten)]
    wait: WaitArgs,
}

#[derive(Args, Debug)]
struct WaitArgs {
    /// Pause between status checks, in milliseconds
    #[arg(long, default_value_t = 5_000)]
    poll_interval_ms: u64,
    /// Give up after this many seconds
    #[arg(long, default_value_t = 300)]
    max_wait_secs: u64,
}

impl From<&WaitArgs> for WaitOptions {
    fn from(args: &WaitArgs) -> Self {
        WaitOptions::new(
            Duration::from_millis(args.poll_interval_ms),
            Duration::from_secs(args.max_wait_secs),
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file if it exists.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    let generator = VideoGenerator::new(HeyGenClient::new(config)?);

    match cli.command {
        Commands::Avatars => {
            let avatars = generator.list_available_avatars().await?;
            println!("Available avatars:");
            for avatar in avatars {
                println!(
                    "- {} (ID: {}, {})",
                    avatar.avatar_name, avatar.avatar_id, avatar.avatar_type
                );
            }
        }
        Commands::Voices => {
            let voices = generator.list_available_voices().await?;
            println!("Available voices:");
            for voice in voices {
                println!("- {} ({}, ID: {})", voice.name, voice.language, voice.voice_id);
            }
        }
        Commands::Generate(args) => {
            let mut options = GenerateOptions::new(args.text)
                .dimension(args.width, args.height)
                .wait_for_completion(!args.no_wait)
                .wait_options(WaitOptions::from(&args.wait));
            if let Some(avatar_id) = args.avatar_id {
                options = options.avatar_id(avatar_id);
            }
            if let Some(voice_id) = args.voice_id {
                options = options.voice_id(voice_id);
            }
            if let Some(speed) = args.speed {
                options = options.speed(speed);
            }
            if let Some(background) = args.background {
                options = options.background(background);
            }

            let video = generator.generate_video(options).await?;
            println!("Video ID: {}", video.video_id);
            match video.video_url {
                Some(url) => {
                    println!("Video URL: {url}");
                    println!("Note: video URLs expire after 7 days");
                }
                None => println!("Check progress with: heygen status {}", video.video_id),
            }
        }
        Commands::Status { video_id } => {
            let status = generator.get_video_status(&video_id).await?;
            println!("Video status: {}", status.status);
            if let Some(url) = status.video_url {
                println!("Video URL: {url}");
            }
            if let Some(error) = status.error {
                println!(
                    "Error: {}",
                    error.message.as_deref().unwrap_or("no message provided")
                );
            }
            if !status.status.is_terminal() {
                println!("Still in progress. Wait for it with: heygen wait {video_id}");
            }
        }
        Commands::Wait { video_id, wait } => {
            let url = generator
                .wait_for_video(&video_id, WaitOptions::from(&wait))
                .await?;
            println!("Video URL: {url}");
        }
    }

    Ok(())
}
