use paraphraser_core::{update, AppState, Msg};

#[test]
fn tick_and_noop_change_nothing() {
    let state = AppState::new();
    let before = state.view();

    let (state, effects) = update(state, Msg::Tick);
    assert!(effects.is_empty());
    assert_eq!(state.view(), before);

    let (mut state, effects) = update(state, Msg::NoOp);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}
