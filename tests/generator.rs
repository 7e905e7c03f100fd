mod common;

use std::time::Duration;

use common::{avatars_body, client_for, completed, pending, voices_body, StatusSequence};
use heygen::{GenerateOptions, HeyGenError, VideoGenerator, WaitOptions};
use serde_json::{json, Value};
use wiremock::matchers::{any, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VIDEO_URL: &str = "https://cdn.example.com/video.mp4";

async fn mount_avatars(server: &MockServer, avatars: Value) {
    Mock::given(method("GET"))
        .and(path("/v2/avatars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(avatars_body(avatars)))
        .mount(server)
        .await;
}

async fn mount_voices(server: &MockServer, voices: Value) {
    Mock::given(method("GET"))
        .and(path("/v2/voices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(voices_body(voices)))
        .mount(server)
        .await;
}

fn generated(video_id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "error": null,
        "data": { "video_id": video_id }
    }))
}

fn fast() -> WaitOptions {
    WaitOptions::new(Duration::ZERO, Duration::from_secs(5))
}

#[tokio::test]
async fn test_generate_resolves_defaults_and_waits() {
    let server = MockServer::start().await;

    mount_avatars(
        &server,
        json!([
            { "avatar_id": "first_avatar", "avatar_name": "First" },
            { "avatar_id": "second_avatar", "avatar_name": "Second", "premium": true }
        ]),
    )
    .await;
    mount_voices(
        &server,
        json!([
            { "voice_id": "ja_voice", "language": "Japanese", "name": "Haruka" },
            { "voice_id": "en_voice", "language": "english (US)", "name": "Paul" }
        ]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/v2/video/generate"))
        .and(body_partial_json(json!({
            "video_inputs": [{
                "character": { "type": "avatar", "avatar_id": "first_avatar", "avatar_style": "normal" },
                "voice": { "type": "text", "input_text": "Hello from Rust", "voice_id": "en_voice" }
            }],
            "dimension": { "width": 1280, "height": 720 }
        })))
        .respond_with(generated("vid_1"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/video_status.get"))
        .respond_with(StatusSequence::new(vec![
            pending("vid_1"),
            completed("vid_1", VIDEO_URL),
        ]))
        .expect(2)
        .mount(&server)
        .await;

    let generator = VideoGenerator::new(client_for(&server));
    let video = generator
        .generate_video(GenerateOptions::new("Hello from Rust").wait_options(fast()))
        .await
        .unwrap();

    assert_eq!(video.video_id, "vid_1");
    assert_eq!(video.video_url.as_deref(), Some(VIDEO_URL));
}

#[tokio::test]
async fn test_generate_falls_back_to_first_voice() {
    let server = MockServer::start().await;

    mount_voices(
        &server,
        json!([
            { "voice_id": "fr_voice", "language": "French", "name": "Amelie" },
            { "voice_id": "de_voice", "language": "German", "name": "Hans" }
        ]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/v2/video/generate"))
        .and(body_partial_json(json!({
            "video_inputs": [{
                "character": { "avatar_id": "chosen_avatar" },
                "voice": { "voice_id": "fr_voice" }
            }]
        })))
        .respond_with(generated("vid_2"))
        .expect(1)
        .mount(&server)
        .await;

    let generator = VideoGenerator::new(client_for(&server));
    let video = generator
        .generate_video(
            GenerateOptions::new("Bonjour")
                .avatar_id("chosen_avatar")
                .wait_for_completion(false),
        )
        .await
        .unwrap();

    assert_eq!(video.video_id, "vid_2");
    assert!(video.video_url.is_none());
}

#[tokio::test]
async fn test_generate_with_empty_avatar_catalog_sends_nothing() {
    let server = MockServer::start().await;

    mount_avatars(&server, json!([])).await;

    Mock::given(method("POST"))
        .and(path("/v2/video/generate"))
        .respond_with(generated("never"))
        .expect(0)
        .mount(&server)
        .await;

    let generator = VideoGenerator::new(client_for(&server));
    let err = generator
        .generate_video(GenerateOptions::new("Hello"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, HeyGenError::NoResource { kind: "avatar" }),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_generate_with_empty_voice_catalog_fails() {
    let server = MockServer::start().await;

    mount_voices(&server, json!([])).await;

    Mock::given(method("POST"))
        .and(path("/v2/video/generate"))
        .respond_with(generated("never"))
        .expect(0)
        .mount(&server)
        .await;

    let generator = VideoGenerator::new(client_for(&server));
    let err = generator
        .generate_video(GenerateOptions::new("Hello").avatar_id("a1"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, HeyGenError::NoResource { kind: "voice" }),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_generate_rejects_long_text_before_catalog_lookup() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let generator = VideoGenerator::new(client_for(&server));
    let err = generator
        .generate_video(GenerateOptions::new("y".repeat(1501)))
        .await
        .unwrap_err();

    assert!(matches!(err, HeyGenError::Validation { .. }), "{err:?}");
}

#[tokio::test]
async fn test_generate_with_explicit_ids_skips_catalogs() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/avatars"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/voices"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/video/generate"))
        .and(body_partial_json(json!({
            "video_inputs": [{
                "character": { "avatar_id": "a1", "avatar_style": "closeUp" },
                "voice": { "voice_id": "v1", "speed": 0.5 }
            }],
            "dimension": { "width": 720, "height": 1280 },
            "background": "#000000"
        })))
        .respond_with(generated("vid_3"))
        .expect(1)
        .mount(&server)
        .await;

    let generator = VideoGenerator::new(client_for(&server));
    let video = generator
        .generate_video(
            GenerateOptions::new("Portrait video")
                .avatar_id("a1")
                .voice_id("v1")
                .avatar_style("closeUp")
                .speed(0.5)
                .dimension(720, 1280)
                .background("#000000")
                .wait_for_completion(false),
        )
        .await
        .unwrap();

    assert_eq!(video.video_id, "vid_3");
}

#[tokio::test]
async fn test_wait_for_video_after_async_submission() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/video_status.get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completed("vid_4", VIDEO_URL)))
        .expect(1)
        .mount(&server)
        .await;

    let generator = VideoGenerator::new(client_for(&server));
    let url = generator.wait_for_video("vid_4", fast()).await.unwrap();

    assert_eq!(url, VIDEO_URL);
}

#[tokio::test]
async fn test_generate_treats_blank_ids_as_missing() {
    let server = MockServer::start().await;

    mount_avatars(
        &server,
        json!([{ "avatar_id": "catalog_avatar", "avatar_name": "Catalog" }]),
    )
    .await;
    mount_voices(
        &server,
        json!([{ "voice_id": "catalog_voice", "language": "English", "name": "Paul" }]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/v2/video/generate"))
        .and(body_partial_json(json!({
            "video_inputs": [{
                "character": { "avatar_id": "catalog_avatar" },
                "voice": { "voice_id": "catalog_voice" }
            }]
        })))
        .respond_with(generated("vid_5"))
        .expect(1)
        .mount(&server)
        .await;

    let generator = VideoGenerator::new(client_for(&server));
    let video = generator
        .generate_video(
            GenerateOptions::new("Hello")
                .avatar_id("")
                .voice_id("   ")
                .wait_for_completion(false),
        )
        .await
        .unwrap();

    assert_eq!(video.video_id, "vid_5");
}
