#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use duetask::api::{AiError, ChatMessage, Completion, OpenAi};
    use duetask::libs::config::AiConfig;
    use duetask::libs::digest::{AiOutcome, Digest, DIGEST_FALLBACK, SUGGESTION_FALLBACK};
    use duetask::libs::task::{Task, TaskStatus};
    use serde_json::json;
    use test_context::{test_context, AsyncTestContext};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const API_KEY: &str = "test-key";

    struct DigestTestContext {
        server: MockServer,
        config: AiConfig,
        today: NaiveDate,
        tasks: Vec<Task>,
    }

    impl AsyncTestContext for DigestTestContext {
        async fn setup() -> Self {
            let server = MockServer::start().await;
            let config = AiConfig {
                api_url: format!("{}/v1/chat/completions", server.uri()),
                ..Default::default()
            };
            let tasks = vec![
                Task::new("a", "Pay invoice").with_date("2024-03-09"),
                Task::new("b", "Book flight")
                    .with_status(TaskStatus::InProgress)
                    .with_date("2024-03-12")
                    .with_notes("window seat"),
                Task::new("c", "Someday"),
            ];
            DigestTestContext {
                server,
                config,
                today: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                tasks,
            }
        }

        async fn teardown(self) {}
    }

    impl DigestTestContext {
        fn client(&self) -> OpenAi {
            OpenAi::new(&self.config, Some(API_KEY.to_string()))
        }
    }

    fn completion(content: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }],
        }))
    }

    #[test_context(DigestTestContext)]
    #[tokio::test]
    async fn test_complete_sends_model_and_credential(ctx: &mut DigestTestContext) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "messages": [{ "role": "user", "content": "Hello" }],
            })))
            .respond_with(completion(json!("Hi there")))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let reply = ctx.client().complete(&[ChatMessage::user("Hello")]).await.unwrap();
        assert_eq!(reply.as_deref(), Some("Hi there"));
    }

    #[test_context(DigestTestContext)]
    #[tokio::test]
    async fn test_complete_reports_api_error(ctx: &mut DigestTestContext) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" },
            })))
            .mount(&ctx.server)
            .await;

        let err = ctx.client().complete(&[ChatMessage::user("Hello")]).await.unwrap_err();
        match err {
            AiError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test_context(DigestTestContext)]
    #[tokio::test]
    async fn test_summary_of_relevant_tasks(ctx: &mut DigestTestContext) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(completion(json!("Pay the invoice first.")))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let digest = Digest::new(ctx.client());
        let outcome = digest.summarize(&ctx.tasks, ctx.today).await;
        assert_eq!(outcome, AiOutcome::Text("Pay the invoice first.".to_string()));

        let requests = ctx.server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let prompt = body["messages"][1]["content"].as_str().unwrap();
        assert!(prompt.contains("Title: Pay invoice"));
        assert!(!prompt.contains("Book flight"));
        assert!(!prompt.contains("Someday"));
        assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test_context(DigestTestContext)]
    #[tokio::test]
    async fn test_summary_without_relevant_tasks_skips_request(ctx: &mut DigestTestContext) {
        Mock::given(method("POST"))
            .respond_with(completion(json!("unused")))
            .expect(0)
            .mount(&ctx.server)
            .await;

        let digest = Digest::new(ctx.client());
        let later = vec![Task::new("x", "Later").with_date("2024-03-20"), Task::new("y", "Undated")];
        assert_eq!(digest.summarize(&later, ctx.today).await, AiOutcome::NothingToAsk);
        assert_eq!(digest.summarize(&[], ctx.today).await, AiOutcome::NothingToAsk);
    }

    #[test_context(DigestTestContext)]
    #[tokio::test]
    async fn test_missing_content_uses_fallback(ctx: &mut DigestTestContext) {
        Mock::given(method("POST"))
            .respond_with(completion(json!(null)))
            .mount(&ctx.server)
            .await;

        let digest = Digest::new(ctx.client());
        assert_eq!(
            digest.summarize(&ctx.tasks, ctx.today).await,
            AiOutcome::Text(DIGEST_FALLBACK.to_string())
        );
        assert_eq!(
            digest.suggest("Renew passport").await,
            AiOutcome::Text(SUGGESTION_FALLBACK.to_string())
        );
    }

    #[test_context(DigestTestContext)]
    #[tokio::test]
    async fn test_empty_choices_use_fallback(ctx: &mut DigestTestContext) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&ctx.server)
            .await;

        let digest = Digest::new(ctx.client());
        assert_eq!(digest.suggest("Renew passport").await.text(), SUGGESTION_FALLBACK);
    }

    #[test_context(DigestTestContext)]
    #[tokio::test]
    async fn test_blank_content_is_returned_as_is(ctx: &mut DigestTestContext) {
        Mock::given(method("POST"))
            .respond_with(completion(json!("  ")))
            .mount(&ctx.server)
            .await;

        let digest = Digest::new(ctx.client());
        assert_eq!(
            digest.summarize(&ctx.tasks, ctx.today).await,
            AiOutcome::Text("  ".to_string())
        );
    }

    #[test_context(DigestTestContext)]
    #[tokio::test]
    async fn test_service_failure_is_unavailable(ctx: &mut DigestTestContext) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&ctx.server)
            .await;

        let digest = Digest::new(ctx.client());
        let outcome = digest.summarize(&ctx.tasks, ctx.today).await;
        assert_eq!(outcome, AiOutcome::Unavailable);
        assert_eq!(outcome.text(), "");
    }

    #[test_context(DigestTestContext)]
    #[tokio::test]
    async fn test_malformed_response_is_unavailable(ctx: &mut DigestTestContext) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&ctx.server)
            .await;

        let digest = Digest::new(ctx.client());
        assert_eq!(digest.suggest("Renew passport").await, AiOutcome::Unavailable);
    }

    #[test_context(DigestTestContext)]
    #[tokio::test]
    async fn test_missing_credential_is_not_configured(ctx: &mut DigestTestContext) {
        Mock::given(method("POST"))
            .respond_with(completion(json!("unused")))
            .expect(0)
            .mount(&ctx.server)
            .await;

        let client = OpenAi::new(&ctx.config, Some("  ".to_string()));
        assert!(!client.is_configured());
        assert!(matches!(
            client.complete(&[ChatMessage::user("Hello")]).await,
            Err(AiError::NotConfigured)
        ));

        let digest = Digest::new(client);
        assert_eq!(digest.summarize(&ctx.tasks, ctx.today).await, AiOutcome::NotConfigured);
        assert_eq!(digest.suggest("Renew passport").await, AiOutcome::NotConfigured);

        // The credential is checked before anything else, even when there is
        // nothing to ask about.
        let later = vec![Task::new("x", "Later").with_date("2024-03-20")];
        assert_eq!(digest.summarize(&later, ctx.today).await, AiOutcome::NotConfigured);
        assert_eq!(digest.summarize(&[], ctx.today).await, AiOutcome::NotConfigured);
        assert_eq!(digest.suggest("   ").await, AiOutcome::NotConfigured);

        let no_key = Digest::new(OpenAi::new(&ctx.config, None));
        assert_eq!(no_key.suggest("").await, AiOutcome::NotConfigured);
    }

    #[test_context(DigestTestContext)]
    #[tokio::test]
    async fn test_blank_draft_skips_request(ctx: &mut DigestTestContext) {
        Mock::given(method("POST"))
            .respond_with(completion(json!("unused")))
            .expect(0)
            .mount(&ctx.server)
            .await;

        let digest = Digest::new(ctx.client());
        assert_eq!(digest.suggest("   ").await, AiOutcome::NothingToAsk);
    }

    #[test_context(DigestTestContext)]
    #[tokio::test]
    async fn test_suggestion_prompt_carries_draft(ctx: &mut DigestTestContext) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "messages": [{ "role": "system" }, { "role": "user", "content": "Renew passport" }],
            })))
            .respond_with(completion(json!("Book an appointment and gather photos.")))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let digest = Digest::new(ctx.client());
        assert_eq!(
            digest.suggest(" Renew passport ").await.text(),
            "Book an appointment and gather photos."
        );
    }
}
