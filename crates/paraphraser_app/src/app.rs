use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use paraphraser_core::{update, AppState, Msg, PrefKey};
use paraphraser_engine::load_document;

use crate::effects::EffectRunner;
use crate::persistence::{FilePreferenceStore, PreferenceStore};
use crate::ui;

pub struct AppOptions {
    pub input: Option<PathBuf>,
    pub config_dir: PathBuf,
    pub output_dir: PathBuf,
}

pub fn run_app(options: AppOptions) -> anyhow::Result<()> {
    let store: Arc<dyn PreferenceStore> =
        Arc::new(FilePreferenceStore::new(options.config_dir.clone()));

    let mut state = AppState::new();
    let mut runner = EffectRunner::new(store.clone(), options.output_dir.clone());

    // Preferences are read once at startup; every later edit writes through.
    dispatch(
        &mut state,
        &mut runner,
        Msg::PreferencesRestored {
            api_key: store.load(PrefKey::ApiKey),
            model: store.load(PrefKey::Model),
            prompt: store.load(PrefKey::Prompt),
        },
    );

    println!("{}", ui::HELP_TEXT);
    if let Some(path) = &options.input {
        open_document(&mut state, &mut runner, path);
    }
    print!("{}", ui::render(&state.view()));
    state.consume_dirty();

    // Stdin is read on its own thread so engine events keep flowing while
    // the user types (or doesn't).
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        for msg in runner.pump() {
            dispatch(&mut state, &mut runner, msg);
        }

        match line_rx.try_recv() {
            Ok(line) => {
                if handle_line(&mut state, &mut runner, &line) {
                    break;
                }
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => break,
        }

        if state.consume_dirty() {
            print!("{}", ui::render(&state.view()));
        }
        thread::sleep(Duration::from_millis(20));
    }

    engine_info!("Session ended");
    Ok(())
}

fn dispatch(state: &mut AppState, runner: &mut EffectRunner, msg: Msg) {
    let current = std::mem::take(state);
    let (next, effects) = update(current, msg);
    *state = next;
    for notice in runner.enqueue(effects) {
        println!("{notice}");
    }
}

/// Returns true when the session should end.
fn handle_line(state: &mut AppState, runner: &mut EffectRunner, line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return false;
    }
    let (command, argument) = match line.split_once(' ') {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match command {
        "open" => {
            if argument.is_empty() {
                println!("Usage: open <path-to-document>");
            } else {
                open_document(state, runner, Path::new(argument));
            }
        }
        "key" => {
            if argument.is_empty() {
                println!("Usage: key <api-key>");
            } else {
                dispatch(state, runner, Msg::ApiKeyChanged(argument.to_string()));
            }
        }
        "model" => {
            if argument.is_empty() {
                println!("{}", ui::list_models(&state.view().model));
            } else {
                dispatch(state, runner, Msg::ModelChanged(argument.to_string()));
            }
        }
        "prompt" => {
            if argument.is_empty() {
                println!("Prompt: {}", state.view().prompt);
            } else {
                dispatch(state, runner, Msg::PromptChanged(argument.to_string()));
            }
        }
        "submit" => dispatch(state, runner, Msg::SubmitClicked),
        "save" => dispatch(state, runner, Msg::DownloadClicked),
        "overleaf" => dispatch(state, runner, Msg::OverleafClicked),
        "show" => print!("{}", ui::render(&state.view())),
        "help" => println!("{}", ui::HELP_TEXT),
        "quit" | "exit" => return true,
        other => println!("Unknown command '{other}'; type 'help' for the command list."),
    }
    false
}

/// Decode a document and store it on success. Failures are reported as a
/// blocking notice and leave the loaded document untouched.
fn open_document(state: &mut AppState, runner: &mut EffectRunner, path: &Path) {
    println!("Processing document...");
    match load_document(path) {
        Ok(document) => {
            engine_info!(
                "Loaded document {} ({} chars)",
                document.file_name,
                document.content.len()
            );
            dispatch(
                state,
                runner,
                Msg::DocumentLoaded {
                    content: document.content,
                    file_name: document.file_name,
                },
            );
        }
        Err(err) => {
            engine_warn!("Document load failed: {}", err);
            println!("Error processing document: {err}");
        }
    }
}
