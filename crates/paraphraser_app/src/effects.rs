use std::path::PathBuf;
use std::sync::Arc;

use engine_logging::{engine_error, engine_info, engine_warn};
use paraphraser_core::{Effect, GeneratedContent, Msg};
use paraphraser_engine::{
    write_overleaf_handoff, write_preview_html, write_tex, ClientSettings, EngineEvent,
    EngineHandle, GenerationRequest, RequestId,
};

use crate::persistence::PreferenceStore;

/// Executes core effects against the engine, the preference store, and the
/// export writers, and translates engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    store: Arc<dyn PreferenceStore>,
    output_dir: PathBuf,
    next_request_id: RequestId,
}

impl EffectRunner {
    pub fn new(store: Arc<dyn PreferenceStore>, output_dir: PathBuf) -> Self {
        Self {
            engine: EngineHandle::new(ClientSettings::default()),
            store,
            output_dir,
            next_request_id: 1,
        }
    }

    /// Execute effects. Returns user-facing notices for the front end to
    /// print.
    pub fn enqueue(&mut self, effects: Vec<Effect>) -> Vec<String> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::IssueGeneration(request) => {
                    let request_id = self.next_request_id;
                    self.next_request_id += 1;
                    engine_info!(
                        "IssueGeneration request_id={} model={} source_len={}",
                        request_id,
                        request.model,
                        request.source_text.len()
                    );
                    self.engine.generate(
                        request_id,
                        GenerationRequest {
                            model: request.model,
                            instruction_prompt: request.instruction_prompt,
                            source_text: request.source_text,
                            api_key: request.api_key,
                        },
                    );
                }
                Effect::RenderPreview { latex } => {
                    let request_id = self.next_request_id;
                    self.next_request_id += 1;
                    self.engine.render_preview(request_id, latex);
                }
                Effect::SavePreference { key, value } => {
                    self.store.save(key, &value);
                }
                Effect::WriteTexFile { latex } => match write_tex(&self.output_dir, &latex) {
                    Ok(path) => {
                        engine_info!("LaTeX export written to {:?}", path);
                        notices.push(format!("Saved {}", path.display()));
                    }
                    Err(err) => {
                        engine_error!("LaTeX export failed: {}", err);
                        notices.push(format!("Could not save LaTeX file: {err}"));
                    }
                },
                Effect::ExportPreviewHtml { html } => {
                    match write_preview_html(&self.output_dir, &html) {
                        Ok(path) => {
                            engine_info!("Preview written to {:?}", path);
                            notices.push(format!("Preview rendered to {}", path.display()));
                        }
                        Err(err) => {
                            engine_error!("Preview export failed: {}", err);
                        }
                    }
                }
                Effect::OverleafHandoff { latex } => {
                    match write_overleaf_handoff(&self.output_dir, &latex) {
                        Ok(path) => {
                            engine_info!("Overleaf hand-off written to {:?}", path);
                            notices.push(format!(
                                "Hand-off page written to {}; open it in a browser to send the \
                                 document to Overleaf",
                                path.display()
                            ));
                        }
                        Err(err) => {
                            engine_error!("Overleaf hand-off failed: {}", err);
                            notices.push(format!("Could not write hand-off page: {err}"));
                        }
                    }
                }
            }
        }
        notices
    }

    /// Drain engine events into messages for the update loop.
    pub fn pump(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            match event {
                EngineEvent::GenerationCompleted { request_id, result } => {
                    let result = match result {
                        Ok(outcome) => Ok(GeneratedContent {
                            raw_reply: outcome.raw_reply,
                            latex: outcome.artifact,
                        }),
                        Err(err) => {
                            engine_warn!(
                                "Generation request {} failed: {}",
                                request_id,
                                err.kind
                            );
                            Err(err.message)
                        }
                    };
                    msgs.push(Msg::GenerationFinished { result });
                }
                EngineEvent::PreviewRendered { request_id, result } => {
                    let result = result.map_err(|err| {
                        // Not fatal: the textual preview stays available.
                        engine_warn!("Preview render {} failed: {}", request_id, err);
                        err.to_string()
                    });
                    msgs.push(Msg::PreviewRendered { result });
                }
            }
        }
        msgs
    }
}
