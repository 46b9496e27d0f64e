use std::sync::Arc;
use std::time::{Duration, Instant};

use paraphraser_engine::{
    EngineEvent, EngineHandle, FailureKind, GenerateError, GenerationRequest, Generator,
};

struct StubGenerator {
    reply: Result<String, GenerateError>,
}

#[async_trait::async_trait]
impl Generator for StubGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerateError> {
        self.reply.clone()
    }
}

fn request() -> GenerationRequest {
    GenerationRequest {
        model: "gpt-4o".to_string(),
        instruction_prompt: "Paraphrase.".to_string(),
        source_text: "text".to_string(),
        api_key: "sk-test".to_string(),
    }
}

fn wait_for_event(handle: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = handle.try_recv() {
            return event;
        }
        assert!(Instant::now() < deadline, "no engine event within 5s");
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn generate_extracts_the_fragment_from_the_reply() {
    let handle = EngineHandle::with_generator(Arc::new(StubGenerator {
        reply: Ok("prefix \\begin{document}BODY\\end{document} suffix".to_string()),
    }));

    handle.generate(1, request());

    match wait_for_event(&handle) {
        EngineEvent::GenerationCompleted { request_id, result } => {
            assert_eq!(request_id, 1);
            let outcome = result.unwrap();
            assert_eq!(
                outcome.raw_reply,
                "prefix \\begin{document}BODY\\end{document} suffix"
            );
            assert_eq!(outcome.artifact, "\\begin{document}BODY\\end{document}");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn generate_forwards_client_failures() {
    let handle = EngineHandle::with_generator(Arc::new(StubGenerator {
        reply: Err(GenerateError {
            kind: FailureKind::HttpStatus(429),
            message: "API request failed with status 429".to_string(),
        }),
    }));

    handle.generate(7, request());

    match wait_for_event(&handle) {
        EngineEvent::GenerationCompleted { request_id, result } => {
            assert_eq!(request_id, 7);
            let err = result.unwrap_err();
            assert_eq!(err.kind, FailureKind::HttpStatus(429));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn render_preview_reports_success_and_failure() {
    let handle = EngineHandle::with_generator(Arc::new(StubGenerator {
        reply: Ok(String::new()),
    }));

    handle.render_preview(1, "\\begin{document}Hi\\end{document}");
    match wait_for_event(&handle) {
        EngineEvent::PreviewRendered { result, .. } => {
            assert!(result.unwrap().contains("<p>Hi</p>"));
        }
        other => panic!("unexpected event: {other:?}"),
    }

    handle.render_preview(2, "\\begin{itemize}never closed");
    match wait_for_event(&handle) {
        EngineEvent::PreviewRendered { result, .. } => {
            assert!(result.is_err());
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
