//! End-to-end command pipeline tests
//!
//! Every external collaborator (generation service, Slack upload API,
//! callback URL) is a wiremock endpoint; the pipeline itself runs for real.

use crate::common::{config_for, dispatcher_for, mount_generation, mount_upload};
use slashgen::{JobDispatcher, RawCommand};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn callback_bodies(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/callback")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

/// Drive one command through `accept` and wait for the terminal callback
async fn run_command(server: &MockServer, dispatcher: Arc<JobDispatcher>, text: &str) {
    let ack = dispatcher.accept(RawCommand {
        text: text.to_string(),
        channel_id: "C123".to_string(),
        response_url: format!("{}/callback", server.uri()),
    });
    assert_eq!(ack.response_type, "ephemeral");

    for _ in 0..250 {
        if !callback_bodies(server).await.is_empty() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("job never delivered a terminal notification");
}

#[tokio::test]
async fn test_single_output_command_end_to_end() {
    let server = MockServer::start().await;
    mount_generation(&server, 1).await;
    mount_upload(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/callback"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    run_command(&server, dispatcher, "a red car --ar 16:9 --num_outputs 1").await;

    let bodies = callback_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["response_type"], "in_channel");
    assert_eq!(bodies[0]["image_urls"][0], "https://files.example/1");

    // the prediction request carried the parsed options and the full prompt
    let prediction = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.url.path() == "/v1/predictions")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&prediction.body).unwrap();
    assert_eq!(body["input"]["aspect_ratio"], "16:9");
    assert_eq!(body["input"]["num_outputs"], 1);
    assert_eq!(body["input"]["num_inference_steps"], 28);
    let prompt = body["input"]["prompt"].as_str().unwrap();
    assert!(prompt.contains("a red car"));
    assert!(prompt.contains("yellow robot"));
}

#[tokio::test]
async fn test_batch_command_delivers_four_references() {
    let server = MockServer::start().await;
    mount_generation(&server, 4).await;
    mount_upload(&server, 4).await;
    Mock::given(method("POST"))
        .and(path("/callback"))
        .and(body_partial_json(serde_json::json!({
            "response_type": "in_channel",
            "image_urls": [
                "https://files.example/1",
                "https://files.example/2",
                "https://files.example/3",
                "https://files.example/4",
            ],
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    run_command(&server, dispatcher, "a castle at dawn").await;
}

#[tokio::test]
async fn test_generation_outage_reports_failure_to_requester() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/predictions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/callback"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    run_command(&server, dispatcher, "anything").await;

    let bodies = callback_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["response_type"], "ephemeral");
    assert!(bodies[0]["text"].as_str().unwrap().contains("Failed to generate"));
}

#[tokio::test]
async fn test_concurrent_commands_each_notify_once() {
    let server = MockServer::start().await;
    mount_generation(&server, 1).await;
    mount_upload(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/callback"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    for _ in 0..3 {
        dispatcher.accept(RawCommand {
            text: "a red car --num_outputs 1".to_string(),
            channel_id: "C123".to_string(),
            response_url: format!("{}/callback", server.uri()),
        });
    }

    for _ in 0..250 {
        if callback_bodies(&server).await.len() == 3 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("expected three terminal notifications");
}

#[tokio::test]
async fn test_config_validation_rejects_missing_tokens() {
    let server = MockServer::start().await;
    let mut config = config_for(&server);
    config.slack.bot_token = String::new();
    assert!(config.validate().is_err());
}
