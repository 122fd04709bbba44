//! Shared test fixtures

use slashgen::{Config, JobDispatcher};
use slashgen::config::{ReplicateConfig, ServerConfig, SlackConfig};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config pointing every external collaborator at the mock server
pub fn config_for(server: &MockServer) -> Config {
    Config {
        server: ServerConfig::default(),
        slack: SlackConfig {
            bot_token: "xoxb-test".to_string(),
            api_base: server.uri(),
        },
        replicate: ReplicateConfig {
            api_token: "r8_test".to_string(),
            model_version: "deadbeef".to_string(),
            api_base: server.uri(),
        },
    }
}

/// Dispatcher wired against the mock server
pub fn dispatcher_for(server: &MockServer) -> Arc<JobDispatcher> {
    Arc::new(JobDispatcher::from_config(&config_for(server)))
}

/// Mount a generation service that produces `count` one-pixel outputs
pub async fn mount_generation(server: &MockServer, count: usize) {
    let outputs: Vec<String> = (1..=count)
        .map(|i| format!("{}/generated/{}.png", server.uri(), i))
        .collect();
    Mock::given(method("POST"))
        .and(path("/v1/predictions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "status": "succeeded",
            "output": outputs,
        })))
        .mount(server)
        .await;
    for i in 1..=count {
        Mock::given(method("GET"))
            .and(path(format!("/generated/{}.png", i)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]))
            .mount(server)
            .await;
    }
}

/// Mount a Slack upload protocol that succeeds for `count` files
pub async fn mount_upload(server: &MockServer, count: usize) {
    for i in 1..=count {
        Mock::given(method("GET"))
            .and(path("/api/files.getUploadURLExternal"))
            .and(wiremock::matchers::query_param(
                "filename",
                format!("image-{}.png", i),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "upload_url": format!("{}/upload/{}", server.uri(), i),
                "file_id": format!("F{}", i),
            })))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/upload/{}", i)))
            .respond_with(ResponseTemplate::new(200))
            .mount(server)
            .await;
    }
    let files: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "id": format!("F{}", i),
                "permalink": format!("https://files.example/{}", i),
            })
        })
        .collect();
    Mock::given(method("POST"))
        .and(path("/api/files.completeUploadExternal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "files": files,
        })))
        .mount(server)
        .await;
}
