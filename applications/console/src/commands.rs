//! Line command parsing
//!
//! Users count playlists and tracks from 1; parsed commands carry 0-based
//! indices.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Create(String),
    Select(usize),
    Delete(usize),
    Rename(usize, String),
    Add(Vec<PathBuf>),
    Remove(usize),
    Play(usize),
    Toggle,
    Next,
    Previous,
    Seek(f64),
    Status,
    Tick(f64),
    End,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Numbers start at 1")]
    ZeroIndex,

    #[error("'{0}' is not a number")]
    NotANumber(String),
}

pub const HELP: &str = "\
Commands:
  list                   show playlists and the active playlist's tracks
  create <name>          create a playlist and switch to it
  select <n>             switch to playlist n
  rename <n> <name>      rename playlist n
  delete <n>             delete playlist n
  add <path>...          add audio files to the active playlist
  remove <n>             remove track n from the active playlist
  play <n>               play track n (toggles if it is already active)
  toggle                 play/pause
  next | prev            skip forward/back (wraps around)
  seek <secs>            jump to a position
  tick <secs>            let simulated time pass
  end                    play the current track to its end
  status                 show what is playing
  quit                   exit";

impl Command {
    /// Parse one input line; `Ok(None)` for blank lines
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "list" | "ls" => Command::List,
            "create" | "new" => Command::Create(rest.to_string()),
            "select" => Command::Select(index(rest, "select <n>")?),
            "delete" => Command::Delete(index(rest, "delete <n>")?),
            "rename" => {
                let (n, name) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::Usage("rename <n> <name>"))?;
                Command::Rename(index(n, "rename <n> <name>")?, name.trim().to_string())
            }
            "add" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("add <path>..."));
                }
                Command::Add(rest.split_whitespace().map(PathBuf::from).collect())
            }
            "remove" | "rm" => Command::Remove(index(rest, "remove <n>")?),
            "play" => Command::Play(index(rest, "play <n>")?),
            "toggle" | "pause" | "p" => Command::Toggle,
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "seek" => Command::Seek(seconds(rest, "seek <secs>")?),
            "status" | "s" => Command::Status,
            "tick" => Command::Tick(seconds(rest, "tick <secs>")?),
            "end" => Command::End,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn index(arg: &str, usage: &'static str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    match arg.parse::<usize>() {
        Ok(0) => Err(CommandError::ZeroIndex),
        Ok(n) => Ok(n - 1),
        Err(_) => Err(CommandError::NotANumber(arg.to_string())),
    }
}

fn seconds(arg: &str, usage: &'static str) -> Result<f64, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    arg.parse::<f64>()
        .map_err(|_| CommandError::NotANumber(arg.to_string()))
}
