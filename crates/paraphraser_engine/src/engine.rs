use std::sync::{mpsc, Arc};
use std::thread;

use crate::client::{ClientSettings, Generator, OpenAiGenerator};
use crate::extract::extract_latex_fragment;
use crate::render::render_html;
use crate::{EngineEvent, GenerationOutcome, GenerationRequest, RequestId};

enum EngineCommand {
    Generate {
        request_id: RequestId,
        request: GenerationRequest,
    },
    RenderPreview {
        request_id: RequestId,
        latex: String,
    },
}

pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Self {
        Self::with_generator(Arc::new(OpenAiGenerator::new(settings)))
    }

    pub fn with_generator(generator: Arc<dyn Generator>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let generator = generator.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(generator.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn generate(&self, request_id: RequestId, request: GenerationRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Generate {
            request_id,
            request,
        });
    }

    pub fn render_preview(&self, request_id: RequestId, latex: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::RenderPreview {
            request_id,
            latex: latex.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    generator: &dyn Generator,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Generate {
            request_id,
            request,
        } => {
            let result = generator.generate(&request).await.map(|raw_reply| {
                let artifact = extract_latex_fragment(&raw_reply).to_string();
                GenerationOutcome { raw_reply, artifact }
            });
            let _ = event_tx.send(EngineEvent::GenerationCompleted { request_id, result });
        }
        EngineCommand::RenderPreview { request_id, latex } => {
            let result = render_html(&latex);
            let _ = event_tx.send(EngineEvent::PreviewRendered { request_id, result });
        }
    }
}
