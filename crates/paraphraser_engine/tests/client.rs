use paraphraser_engine::{
    ClientSettings, FailureKind, Generator, GenerationRequest, OpenAiGenerator,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> GenerationRequest {
    GenerationRequest {
        model: "gpt-4o".to_string(),
        instruction_prompt: "Paraphrase into academic language.".to_string(),
        source_text: "The cat sat on the mat.".to_string(),
        api_key: "sk-test".to_string(),
    }
}

fn generator_for(server: &MockServer) -> OpenAiGenerator {
    OpenAiGenerator::new(ClientSettings {
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        ..ClientSettings::default()
    })
}

#[tokio::test]
async fn sends_one_well_formed_request_and_returns_reply_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o",
            "temperature": 0.7,
            "messages": [
                {
                    "role": "system",
                    "content": "You are a helpful assistant that paraphrases documents into LaTeX format.",
                },
                {
                    "role": "user",
                    "content": "Paraphrase into academic language.\n\nHere is the document content:\n\nThe cat sat on the mat.",
                },
            ],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [
                { "message": { "content": "\\begin{document}A feline rested.\\end{document}" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = generator_for(&server).generate(&request()).await.unwrap();
    assert_eq!(reply, "\\begin{document}A feline rested.\\end{document}");
}

#[tokio::test]
async fn only_the_first_choice_is_read() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [
                { "message": { "content": "first" } },
                { "message": { "content": "second" } }
            ]
        })))
        .mount(&server)
        .await;

    let reply = generator_for(&server).generate(&request()).await.unwrap();
    assert_eq!(reply, "first");
}

#[tokio::test]
async fn non_success_status_reports_the_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = generator_for(&server)
        .generate(&request())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(401));
    assert!(err.message.contains("401"), "got: {}", err.message);
}

#[tokio::test]
async fn empty_choice_list_is_an_empty_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
        )
        .mount(&server)
        .await;

    let err = generator_for(&server)
        .generate(&request())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::EmptyReply);
}

#[tokio::test]
async fn blank_completion_text_is_an_empty_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [ { "message": { "content": "" } } ]
        })))
        .mount(&server)
        .await;

    let err = generator_for(&server)
        .generate(&request())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::EmptyReply);
}

#[tokio::test]
async fn unparseable_payload_is_invalid_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = generator_for(&server)
        .generate(&request())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidReply);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_failure() {
    let server = MockServer::start().await;
    let endpoint = format!("{}/v1/chat/completions", server.uri());
    drop(server);

    let generator = OpenAiGenerator::new(ClientSettings {
        endpoint,
        ..ClientSettings::default()
    });
    let err = generator.generate(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}
