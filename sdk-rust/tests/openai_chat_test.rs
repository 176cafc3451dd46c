mod mock_server;

use axum::http::StatusCode;
use mock_server::MockServer;
use serde_json::json;
use study_sdk::{
    openai::{OpenAIChatModel, OpenAIChatModelOptions},
    CredentialSource, GenerationConfig, ProviderClient, ProviderConfig, ProviderError,
    ProviderKind,
};

#[tokio::test]
async fn generate_posts_chat_completion_and_returns_message_content() {
    let server = MockServer::start(
        StatusCode::OK,
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "QUIZ\n1. What is 2+2?"},
                "finish_reason": "stop"
            }]
        })
        .to_string(),
    )
    .await;
    let model = OpenAIChatModel::new(
        "gpt-4o-mini",
        OpenAIChatModelOptions {
            base_url: Some(server.base_url("/v1/")),
            credential: Some(CredentialSource::secret("sk-test")),
            ..Default::default()
        },
    );

    let text = model
        .generate(
            "Make a quiz",
            &GenerationConfig {
                temperature: Some(0.4),
                max_output_tokens: Some(1024),
                top_p: Some(0.95),
            },
        )
        .await
        .expect("generate succeeds");

    assert_eq!(text, "QUIZ\n1. What is 2+2?");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/v1/chat/completions");
    assert_eq!(requests[0].headers["authorization"], "Bearer sk-test");
    assert_eq!(
        requests[0].body,
        json!({
            "model": "gpt-4o-mini",
            "messages": [{"role": "user", "content": "Make a quiz"}],
            "max_tokens": 1024,
            "temperature": 0.4,
            "top_p": 0.95
        })
    );
}

#[tokio::test]
async fn configured_client_without_credential_makes_no_request() {
    let server = MockServer::start(StatusCode::OK, "{}").await;
    let client = ProviderConfig {
        kind: ProviderKind::OpenAI,
        base_url: Some(server.base_url("/v1")),
        credential: Some(CredentialSource::secret("")),
        ..Default::default()
    }
    .build();

    let error = client
        .generate("hello", &GenerationConfig::default())
        .await
        .unwrap_err();

    assert!(error.is_auth());
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn unauthorized_status_is_http_error_with_body() {
    let server = MockServer::start(
        StatusCode::UNAUTHORIZED,
        "{\"error\":{\"message\":\"Incorrect API key provided\"}}",
    )
    .await;
    let model = OpenAIChatModel::new(
        "gpt-4o-mini",
        OpenAIChatModelOptions {
            base_url: Some(server.base_url("/v1")),
            credential: Some(CredentialSource::secret("sk-wrong")),
            ..Default::default()
        },
    );

    let error = model
        .generate("hello", &GenerationConfig::default())
        .await
        .unwrap_err();

    match error {
        ProviderError::Http { status, body } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED.as_u16());
            assert!(body.contains("Incorrect API key provided"));
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}
