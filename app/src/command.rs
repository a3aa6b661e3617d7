//! Line commands standing in for the page's inputs and buttons.

use books_core::{DraftField, Event};

pub const HELP: &str = "\
commands:
  title <text>     set draft title        author <text>   set draft author
  date <YYYY-MM-DD> set published date    desc <text>     set description
  add              submit the draft
  search <text>    filter by title        year <n>        filter by year
                   (no argument clears the field)
  delete <id>      delete a listed book
  refresh          reload the list        show            print the page
  help             this text              quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit(DraftField, String),
    Add,
    Search(String),
    Year(String),
    Delete(String),
    Refresh,
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
    #[error("`delete` needs a book id")]
    MissingId,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest.to_string()),
            None => (line.trim(), String::new()),
        };

        let command = match word {
            "title" => Command::Edit(DraftField::Title, rest),
            "author" => Command::Edit(DraftField::Author, rest),
            "date" => Command::Edit(DraftField::PublishedDate, rest.trim().to_string()),
            "desc" | "description" => Command::Edit(DraftField::Description, rest),
            "add" => Command::Add,
            "search" => Command::Search(rest),
            "year" => Command::Year(rest.trim().to_string()),
            "delete" | "rm" => {
                let id = rest.trim();
                if id.is_empty() {
                    return Err(CommandError::MissingId);
                }
                Command::Delete(id.to_string())
            }
            "refresh" => Command::Refresh,
            "" | "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }

    /// The page event this command fires, if it touches state at all.
    pub fn into_event(self) -> Option<Event> {
        match self {
            Command::Edit(field, value) => Some(Event::DraftEdited(field, value)),
            Command::Add => Some(Event::SubmitRequested),
            Command::Search(title) => Some(Event::TitleFilterChanged(title)),
            Command::Year(year) => Some(Event::YearFilterChanged(year)),
            Command::Delete(id) => Some(Event::DeleteRequested(id)),
            Command::Refresh => Some(Event::RefreshRequested),
            Command::Show | Command::Help | Command::Quit => None,
        }
    }
}
