use mockito::Matcher;
use serde_json::json;

use chat_relay::config::Config;
use chat_relay::message::Turn;
use chat_relay::services::gemini::{GeminiClient, GeneratorError, TextGenerator};

fn config_for(server: &mockito::ServerGuard, system_prompt: Option<&str>) -> Config {
    Config {
        port: 3000,
        api_key: "test-key".to_string(),
        model: "gemini-2.0-flash".to_string(),
        base_url: server.url(),
        system_prompt: system_prompt.map(str::to_string),
    }
}

#[tokio::test]
async fn generate_sends_wire_format_and_extracts_text() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJson(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "Hi"}]},
                {"role": "model", "parts": [{"text": "Hello"}]},
                {"role": "user", "parts": [{"text": "Capital of France?"}]}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"  Paris.  "}]}}]}"#,
        )
        .create_async()
        .await;

    let client = GeminiClient::new(&config_for(&server, None));
    let turns = vec![
        Turn::user("Hi"),
        Turn::model("Hello"),
        Turn::user("Capital of France?"),
    ];

    let reply = client.generate(&turns).await.unwrap();
    assert_eq!(reply, "Paris.");

    mock.assert_async().await;
}

#[tokio::test]
async fn system_instruction_rides_along_when_configured() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJson(json!({
            "systemInstruction": {"parts": [{"text": "Answer as a poet."}]}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"ode"}]}}]}"#)
        .create_async()
        .await;

    let client = GeminiClient::new(&config_for(&server, Some("Answer as a poet.")));
    let reply = client.generate(&[Turn::user("Hi")]).await.unwrap();
    assert_eq!(reply, "ode");

    mock.assert_async().await;
}

#[tokio::test]
async fn multi_part_candidate_is_concatenated() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}}]}"#,
        )
        .create_async()
        .await;

    let client = GeminiClient::new(&config_for(&server, None));
    let reply = client.generate(&[Turn::user("Hi")]).await.unwrap();
    assert_eq!(reply, "Hello world");
}

#[tokio::test]
async fn upstream_error_status_is_surfaced() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", Matcher::Any)
        .with_status(429)
        .with_body("quota exceeded")
        .create_async()
        .await;

    let client = GeminiClient::new(&config_for(&server, None));
    let err = client.generate(&[Turn::user("Hi")]).await.unwrap_err();

    match err {
        GeneratorError::Api { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("quota exceeded"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn candidate_free_body_is_an_error() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[]}"#)
        .create_async()
        .await;

    let client = GeminiClient::new(&config_for(&server, None));
    let err = client.generate(&[Turn::user("Hi")]).await.unwrap_err();
    assert!(matches!(err, GeneratorError::MalformedResponse(_)));
}
