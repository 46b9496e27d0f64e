use crate::{
    AppState, DocumentContent, Effect, GenerationRequest, Msg, PrefKey, SessionStatus,
    MISSING_INPUT_MESSAGE,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ApiKeyChanged(value) => {
            state.set_api_key(value.clone());
            vec![Effect::SavePreference {
                key: PrefKey::ApiKey,
                value,
            }]
        }
        Msg::ModelChanged(value) => {
            state.set_model(value.clone());
            vec![Effect::SavePreference {
                key: PrefKey::Model,
                value,
            }]
        }
        Msg::PromptChanged(value) => {
            state.set_prompt(value.clone());
            vec![Effect::SavePreference {
                key: PrefKey::Prompt,
                value,
            }]
        }
        Msg::PreferencesRestored {
            api_key,
            model,
            prompt,
        } => {
            if let Some(api_key) = api_key {
                state.set_api_key(api_key);
            }
            if let Some(model) = model {
                state.set_model(model);
            }
            if let Some(prompt) = prompt {
                state.set_prompt(prompt);
            }
            Vec::new()
        }
        Msg::DocumentLoaded { content, file_name } => {
            // A re-upload replaces the document wholesale but does not clear
            // a standing error.
            state.set_document(DocumentContent { content, file_name });
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.session() == &SessionStatus::InFlight {
                // Single-slot gate: a request is pending, the attempt is
                // rejected outright.
                return (state, Vec::new());
            }
            // A new attempt clears any standing error before the guard runs.
            state.clear_error();

            // The request needs a non-empty source text and credential.
            let has_source_text = state
                .document()
                .map(|d| !d.content.is_empty())
                .unwrap_or(false);
            let api_key = state.preferences().api_key.clone();
            if !has_source_text || api_key.is_empty() {
                state.set_error(MISSING_INPUT_MESSAGE);
                return (state, Vec::new());
            }

            let request = GenerationRequest {
                model: state.preferences().model.clone(),
                instruction_prompt: state.preferences().prompt.clone(),
                source_text: state
                    .document()
                    .map(|d| d.content.clone())
                    .unwrap_or_default(),
                api_key,
            };
            state.begin_generation();
            vec![Effect::IssueGeneration(request)]
        }
        Msg::GenerationFinished { result } => match result {
            Ok(generated) => {
                state.store_generated(generated.raw_reply, generated.latex.clone());
                state.begin_rendering();
                vec![Effect::RenderPreview {
                    latex: generated.latex,
                }]
            }
            Err(message) => {
                state.set_error(format!("Error: {message}"));
                Vec::new()
            }
        },
        Msg::PreviewRendered { result } => match result {
            Ok(html) => {
                state.finish_rendering(Some(html.clone()));
                vec![Effect::ExportPreviewHtml { html }]
            }
            Err(_) => {
                // Render failures are logged by the effect runner; the
                // textual preview stays available.
                state.finish_rendering(None);
                Vec::new()
            }
        },
        Msg::DownloadClicked => match state.artifact() {
            Some(latex) => vec![Effect::WriteTexFile {
                latex: latex.to_string(),
            }],
            None => Vec::new(),
        },
        Msg::OverleafClicked => match state.artifact() {
            Some(latex) => vec![Effect::OverleafHandoff {
                latex: latex.to_string(),
            }],
            None => Vec::new(),
        },
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
