//! Line-oriented command parsing for the demo editor.

use anyhow::{bail, Context, Result};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Set(String),
    Append(String),
    Insert { at: usize, text: String },
    Delete { start: usize, end: usize },
    Undo,
    Redo,
    Show,
    Status,
    History,
    Clear,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  set TEXT          replace the whole text
  append TEXT       add TEXT at the end
  insert IDX TEXT   insert TEXT at char index IDX
  delete START END  remove chars [START..END)
  undo | redo       step through history
  show              print the text
  status            print undo/redo availability
  history           list recorded commands
  clear             forget the history, keep the text
  help | quit";

/// Parses a single input line. Blank lines yield `None`.
///
/// `\n` inside TEXT arguments is turned into a newline.
pub fn parse(line: &str) -> Result<Option<Action>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let action = match word {
        "set" => Action::Set(unescape(rest)),
        "append" => Action::Append(unescape(rest)),
        "insert" => {
            let (at, text) = rest.split_once(' ').unwrap_or((rest, ""));
            Action::Insert {
                at: parse_index(at, "insert position")?,
                text: unescape(text),
            }
        }
        "delete" => {
            let mut parts = rest.split_whitespace();
            let start = parse_index(parts.next().unwrap_or(""), "delete start")?;
            let end = parse_index(parts.next().unwrap_or(""), "delete end")?;
            if let Some(extra) = parts.next() {
                bail!("delete takes exactly two indices, got extra argument `{extra}`");
            }
            Action::Delete { start, end }
        }
        "undo" => Action::Undo,
        "redo" => Action::Redo,
        "show" => Action::Show,
        "status" => Action::Status,
        "history" => Action::History,
        "clear" => Action::Clear,
        "help" | "?" => Action::Help,
        "quit" | "exit" => Action::Quit,
        other => bail!("unknown command `{other}` (try `help`)"),
    };
    Ok(Some(action))
}

fn parse_index(raw: &str, what: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .with_context(|| format!("{what} must be a non-negative integer, got `{raw}`"))
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}
