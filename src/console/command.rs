//! Parsing of console input lines.

use thiserror::Error;

use super::router::{Route, RouteError};

pub const HELP: &str = "\
commands:
  open <route>    go to /, /users or /posts
  list            show the current view again
  search <text>   filter the current list
  clear           clear the search
  create          fill the form and submit a new record
  edit <id>       edit a record
  delete <id>     delete a record
  cancel          close the open post edit
  help            show this help
  quit            leave the console";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Open(Route),
    List,
    Search(String),
    Clear,
    Create,
    Edit(i64),
    Delete(i64),
    Cancel,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid id `{0}`")]
    InvalidId(String),
    #[error(transparent)]
    Route(#[from] RouteError),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "" => Self::Empty,
            "open" | "go" => Self::Open(required("open", rest)?.parse()?),
            "list" | "ls" => Self::List,
            // an empty search is the same as clearing it
            "search" | "/" => Self::Search(rest.to_string()),
            "clear" => Self::Clear,
            "create" | "new" => Self::Create,
            "edit" => Self::Edit(parse_id(required("edit", rest)?)?),
            "delete" | "rm" => Self::Delete(parse_id(required("delete", rest)?)?),
            "cancel" => Self::Cancel,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(name: &'static str, rest: &'a str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    Ok(rest)
}

fn parse_id(raw: &str) -> Result<i64, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}
