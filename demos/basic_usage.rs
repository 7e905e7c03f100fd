//! This example submits a video without blocking, then waits for it separately:
//! 1. Generating a video from text with a default avatar and voice.
//! 2. Polling the returned video ID until the video is ready.
//!
//! To run this example, you must have the `HEYGEN_API_KEY` environment variable set.
//!
//! Usage:
//! `cargo run --example basic_usage "Text to speak"`

use heygen::{ClientConfig, GenerateOptions, HeyGenClient, VideoGenerator, WaitOptions};
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let client = HeyGenClient::new(ClientConfig::from_env()?)?;
    let generator = VideoGenerator::new(client);

    let text = env::args()
        .nth(1)
        .unwrap_or_else(|| "This video was generated asynchronously.".to_string());

    let submitted = generator
        .generate_video(GenerateOptions::new(text).wait_for_completion(false))
        .await?;
    println!("Video generation started: {}", submitted.video_id);

    let options = WaitOptions::new(Duration::from_secs(5), Duration::from_secs(600));
    match generator.wait_for_video(&submitted.video_id, options).await {
        Ok(url) => println!("Video ready: {url}"),
        Err(e) => eprintln!("Video did not finish: {e}"),
    }

    Ok(())
}
