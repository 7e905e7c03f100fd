#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use heygen::{ClientConfig, HeyGenClient};
use serde_json::{json, Value};
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const API_KEY: &str = "test_api_key";

pub fn client_for(server: &MockServer) -> HeyGenClient {
    let config = ClientConfig::new(API_KEY)
        .with_base_url(&server.uri())
        .unwrap();
    HeyGenClient::new(config).unwrap()
}

pub fn avatars_body(avatars: Value) -> Value {
    json!({ "error": null, "data": { "avatars": avatars } })
}

pub fn voices_body(voices: Value) -> Value {
    json!({ "error": null, "data": { "voices": voices } })
}

pub fn status_body(data: Value) -> Value {
    json!({ "code": 100, "data": data, "message": "Success" })
}

pub fn pending(video_id: &str) -> Value {
    status_body(json!({ "id": video_id, "status": "pending" }))
}

pub fn completed(video_id: &str, url: &str) -> Value {
    status_body(json!({
        "id": video_id,
        "status": "completed",
        "video_url": url,
        "thumbnail_url": "https://cdn.example.com/thumb.jpg",
        "duration": 4.2
    }))
}

/// Replays a fixed list of status bodies, repeating the last one forever.
pub struct StatusSequence {
    bodies: Vec<Value>,
    calls: AtomicUsize,
}

impl StatusSequence {
    pub fn new(bodies: Vec<Value>) -> Self {
        Self {
            bodies,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Respond for StatusSequence {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let index = call.min(self.bodies.len() - 1);
        ResponseTemplate::new(200).set_body_json(self.bodies[index].clone())
    }
}
