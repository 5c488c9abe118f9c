mod repl;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use simple_undo_config::AppConfig;
use simple_undo_core::{Document, HistoryConfig, HistoryStatus};

use crate::repl::Action;

/// A tiny line editor demonstrating linear undo/redo.
#[derive(Parser, Debug)]
#[command(name = "simple-undo", version, about)]
struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial text, overriding the configured initial content.
    #[arg(long)]
    text: Option<String>,

    /// Keep at most N undo steps.
    #[arg(long = "max-depth")]
    max_depth: Option<usize>,

    /// Log filter, e.g. `debug` or `simple_undo_history=trace`.
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the edited text
    let filter = match &cli.log {
        Some(directives) => tracing_subscriber::EnvFilter::new(directives),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_or_create(&config_path);
    if let Some(depth) = cli.max_depth {
        config.history.max_depth = Some(depth);
        config.sanitize();
    }
    tracing::info!("Using config at {}", config_path.display());

    let initial = cli.text.as_deref().unwrap_or(&config.initial_content);
    let mut doc = Document::with_text(initial, HistoryConfig::from(&config.history));

    let show_status = config.show_status_after_each_command;
    doc.subscribe(move |status| {
        if show_status {
            println!("{}", describe(status));
        }
    });

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run(&mut doc, stdin.lock(), &mut stdout, &config.prompt)
}

/// Reads actions until `quit` or end of input.
fn run(doc: &mut Document, input: impl BufRead, out: &mut impl Write, prompt: &str) -> Result<()> {
    write!(out, "{prompt}")?;
    out.flush()?;
    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        match repl::parse(&line) {
            Ok(Some(action)) => {
                if !dispatch(doc, action, out)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => writeln!(out, "error: {e:#}")?,
        }
        write!(out, "{prompt}")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

/// Applies one action. Returns `false` when the session should end.
///
/// Edit failures are reported to the user and do not end the session.
fn dispatch(doc: &mut Document, action: Action, out: &mut impl Write) -> Result<bool> {
    let outcome = match action {
        Action::Set(text) => doc.replace_all(&text),
        Action::Append(text) => doc.append(&text),
        Action::Insert { at, text } => doc.insert_text(at, &text),
        Action::Delete { start, end } => doc.delete_range(start, end),
        Action::Undo => doc.undo(),
        Action::Redo => doc.redo(),
        Action::Clear => doc.clear_history(),
        Action::Show => {
            writeln!(out, "{}", doc.text())?;
            Ok(())
        }
        Action::Status => {
            writeln!(out, "{}", describe(&doc.status()))?;
            Ok(())
        }
        Action::History => {
            let cursor = doc.status().cursor;
            for (i, label) in doc.history().labels().enumerate() {
                let marker = if Some(i) == cursor { '*' } else { ' ' };
                writeln!(out, "{marker} {i:>3} {label}")?;
            }
            Ok(())
        }
        Action::Help => {
            writeln!(out, "{}", repl::HELP)?;
            Ok(())
        }
        Action::Quit => return Ok(false),
    };
    if let Err(e) = outcome {
        writeln!(out, "error: {e:#}")?;
    }
    Ok(true)
}

fn describe(status: &HistoryStatus) -> String {
    let flag = |on: bool| if on { "yes" } else { "no" };
    format!(
        "[undo: {} | redo: {} | steps: {}]",
        flag(status.can_undo),
        flag(status.can_redo),
        status.len
    )
}
