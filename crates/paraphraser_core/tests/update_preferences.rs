use std::sync::Once;

use paraphraser_core::{
    update, AppState, Effect, Msg, PrefKey, DEFAULT_INSTRUCTION_PROMPT, DEFAULT_MODEL,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

#[test]
fn defaults_apply_before_any_edit() {
    init_logging();
    let view = AppState::new().view();
    assert_eq!(view.model, DEFAULT_MODEL);
    assert_eq!(view.prompt, DEFAULT_INSTRUCTION_PROMPT);
    assert!(!view.api_key_set);
    assert_eq!(view.masked_api_key, None);
}

#[test]
fn every_edit_is_persisted_under_its_own_key() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(state, Msg::ApiKeyChanged("sk-live-1234".to_string()));
    assert_eq!(
        effects,
        vec![Effect::SavePreference {
            key: PrefKey::ApiKey,
            value: "sk-live-1234".to_string(),
        }]
    );

    let (state, effects) = update(state, Msg::ModelChanged("gpt-4o-mini".to_string()));
    assert_eq!(
        effects,
        vec![Effect::SavePreference {
            key: PrefKey::Model,
            value: "gpt-4o-mini".to_string(),
        }]
    );

    let (state, effects) = update(state, Msg::PromptChanged("Use British English.".to_string()));
    assert_eq!(
        effects,
        vec![Effect::SavePreference {
            key: PrefKey::Prompt,
            value: "Use British English.".to_string(),
        }]
    );

    let view = state.view();
    assert_eq!(view.model, "gpt-4o-mini");
    assert_eq!(view.prompt, "Use British English.");
    assert_eq!(view.masked_api_key.as_deref(), Some("****1234"));
}

#[test]
fn later_edit_wins() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::ModelChanged("gpt-4-turbo".to_string()));
    let (state, _) = update(state, Msg::ModelChanged("my-custom-model".to_string()));
    assert_eq!(state.view().model, "my-custom-model");
}

#[test]
fn restore_sets_values_without_save_effects() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::PreferencesRestored {
            api_key: Some("sk-stored".to_string()),
            model: Some("gpt-3.5-turbo".to_string()),
            prompt: None,
        },
    );

    assert!(effects.is_empty(), "startup restore must not write back");
    let view = state.view();
    assert!(view.api_key_set);
    assert_eq!(view.model, "gpt-3.5-turbo");
    // Missing keys keep their defaults.
    assert_eq!(view.prompt, DEFAULT_INSTRUCTION_PROMPT);
}
