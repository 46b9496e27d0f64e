mod app;
mod effects;
mod logging;
mod persistence;
mod ui;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::logging::LogDestination;

/// Paraphrase a Word document into LaTeX through a chat-completion API.
#[derive(Debug, Parser)]
#[command(name = "paraphraser", version, about)]
struct Cli {
    /// Word document (.doc/.docx) to load at startup.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Directory holding the persisted preferences (API key, model, prompt).
    #[arg(long, value_name = "DIR", default_value = ".paraphraser")]
    config_dir: PathBuf,

    /// Directory receiving the exported files.
    #[arg(long, value_name = "DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Where log output goes. The default keeps the terminal free for the
    /// interactive session.
    #[arg(long, value_enum, default_value = "file")]
    log: LogArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogArg {
    File,
    Terminal,
    Both,
}

impl From<LogArg> for LogDestination {
    fn from(value: LogArg) -> Self {
        match value {
            LogArg::File => LogDestination::File,
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::Both => LogDestination::Both,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log.into());

    app::run_app(app::AppOptions {
        input: cli.input,
        config_dir: cli.config_dir,
        output_dir: cli.output_dir,
    })
}
