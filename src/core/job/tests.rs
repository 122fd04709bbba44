//! Tests for the job dispatcher: exactly-once notification under success
//! and failure at every stage.

#[cfg(test)]
mod tests {
    use crate::config::SlackConfig;
    use crate::core::command::SlashRequest;
    use crate::core::generation::{Artifact, GenerationError, ImageGenerator};
    use crate::core::job::{JobDispatcher, Notifier, RawCommand, TerminalMessage};
    use crate::core::upload::{SlackFilesClient, UploadPipeline};
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Arc;
    use std::time::Duration;
    use uuid::Uuid;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Generator double returning a fixed set of artifacts
    struct StaticGenerator(Vec<Artifact>);

    #[async_trait]
    impl ImageGenerator for StaticGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _request: &SlashRequest,
        ) -> Result<Vec<Artifact>, GenerationError> {
            Ok(self.0.clone())
        }
    }

    /// Generator double that always fails
    struct FailingGenerator;

    #[async_trait]
    impl ImageGenerator for FailingGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _request: &SlashRequest,
        ) -> Result<Vec<Artifact>, GenerationError> {
            Err(GenerationError::Empty)
        }
    }

    fn dispatcher_for(server: &MockServer, generator: Arc<dyn ImageGenerator>) -> Arc<JobDispatcher> {
        let pipeline = UploadPipeline::new(SlackFilesClient::new(SlackConfig {
            bot_token: "xoxb-test".to_string(),
            api_base: server.uri(),
        }));
        Arc::new(JobDispatcher::new(generator, pipeline, Notifier::new()))
    }

    fn command_for(server: &MockServer) -> RawCommand {
        RawCommand {
            text: "a red car --ar 16:9 --num_outputs 1".to_string(),
            channel_id: "C123".to_string(),
            response_url: format!("{}/callback", server.uri()),
        }
    }

    fn one_artifact() -> Vec<Artifact> {
        vec![Artifact {
            name: "image-1.png".to_string(),
            bytes: Bytes::from_static(b"png"),
        }]
    }

    /// Mount a fully successful upload protocol exchange
    async fn mount_upload_success(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/files.getUploadURLExternal"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "upload_url": format!("{}/upload/1", server.uri()),
                "file_id": "F1",
            })))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/upload/1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/files.completeUploadExternal"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "files": [{"id": "F1", "permalink": "https://files.example/one"}],
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_success_notifies_exactly_once_with_references() {
        let server = MockServer::start().await;
        mount_upload_success(&server).await;
        Mock::given(method("POST"))
            .and(path("/callback"))
            .and(body_partial_json(serde_json::json!({
                "response_type": "in_channel",
                "image_urls": ["https://files.example/one"],
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(&server, Arc::new(StaticGenerator(one_artifact())));
        dispatcher.run_job(Uuid::new_v4(), command_for(&server)).await;
    }

    #[tokio::test]
    async fn test_generation_failure_notifies_exactly_once() {
        let server = MockServer::start().await;
        // the upload protocol must never start
        Mock::given(method("GET"))
            .and(path("/api/files.getUploadURLExternal"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/callback"))
            .and(body_partial_json(serde_json::json!({
                "response_type": "ephemeral",
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(&server, Arc::new(FailingGenerator));
        dispatcher.run_job(Uuid::new_v4(), command_for(&server)).await;
    }

    #[tokio::test]
    async fn test_upload_failure_notifies_with_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/files.getUploadURLExternal"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "upload_url": format!("{}/upload/1", server.uri()),
                "file_id": "F1",
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/upload/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/callback"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(&server, Arc::new(StaticGenerator(one_artifact())));
        dispatcher.run_job(Uuid::new_v4(), command_for(&server)).await;

        let callback = server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .find(|r| r.url.path() == "/callback")
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&callback.body).unwrap();
        assert_eq!(body["response_type"], "ephemeral");
        let text = body["text"].as_str().unwrap();
        assert!(text.contains("byte transfer failed"), "unexpected text: {text}");
    }

    #[tokio::test]
    async fn test_notification_failure_is_best_effort() {
        let server = MockServer::start().await;
        mount_upload_success(&server).await;
        Mock::given(method("POST"))
            .and(path("/callback"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        // completes without retrying and without panicking
        let dispatcher = dispatcher_for(&server, Arc::new(StaticGenerator(one_artifact())));
        dispatcher.run_job(Uuid::new_v4(), command_for(&server)).await;
    }

    #[tokio::test]
    async fn test_accept_acknowledges_immediately_and_spawns_the_job() {
        let server = MockServer::start().await;
        mount_upload_success(&server).await;
        Mock::given(method("POST"))
            .and(path("/callback"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(&server, Arc::new(StaticGenerator(one_artifact())));
        let ack = dispatcher.accept(command_for(&server));
        assert_eq!(ack.response_type, "ephemeral");
        assert!(!ack.text.is_empty());

        // the spawned job delivers the terminal notification on its own
        let mut notified = false;
        for _ in 0..100 {
            let requests = server.received_requests().await.unwrap();
            if requests.iter().any(|r| r.url.path() == "/callback") {
                notified = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(notified, "background job never notified the callback URL");
    }

    #[test]
    fn test_terminal_message_payloads() {
        let success = TerminalMessage::success(vec!["https://x/1".to_string()]);
        let payload = success.to_payload();
        assert_eq!(payload["response_type"], "in_channel");
        assert_eq!(payload["image_urls"][0], "https://x/1");

        let failure = TerminalMessage::failure("it broke");
        let payload = failure.to_payload();
        assert_eq!(payload["response_type"], "ephemeral");
        assert_eq!(payload["text"], "it broke");
    }
}
