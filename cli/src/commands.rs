//! Command parsing for the line-oriented shell.
//!
//! Item numbers are 1-based positions in the displayed (newest first) list.

/// Parsed command from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,

    /// Re-fetch the whole collection.
    Refresh,

    /// Redraw the list without touching the server.
    List,

    /// Set the draft title. An empty text clears it.
    Title { text: String },

    /// Set the draft description. An empty text clears it.
    Description { text: String },

    /// Submit the draft form (create, or update in edit mode).
    Submit,

    /// Leave edit mode, fill the form and submit it as a new todo.
    Add { title: String, description: String },

    Edit { index: usize },

    Cancel,

    Toggle { index: usize },

    /// Ask for confirmation, then delete.
    Delete { index: usize },

    Help,

    Quit,

    /// Unknown command word.
    Unknown { input: String },

    /// Command with missing or invalid arguments.
    InvalidArgs { command: String, error: String },
}

pub const HELP: &str = "\
commands:
  refresh | r              reload todos from the server
  list | ls                show the list again
  title <text>             set the draft title
  desc [text]              set the draft description
  save | s                 create the draft, or save the edited todo
  add <title> [-- <desc>]  create a todo in one step
  edit | e <n>             edit todo n
  cancel                   leave edit mode and clear the draft
  toggle | x <n>           mark todo n done / not done
  delete | rm <n>          delete todo n (asks first)
  help | ?                 this text
  quit | q                 exit
";

/// Parse a line of user input into a command.
pub fn parse(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::Empty;
    }

    let (word, rest) = match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    };

    match word {
        "refresh" | "r" => Command::Refresh,
        "list" | "ls" => Command::List,
        "title" | "t" => Command::Title { text: rest.to_string() },
        "desc" | "d" => Command::Description { text: rest.to_string() },
        "save" | "submit" | "s" => Command::Submit,
        "add" | "a" => {
            let (title, description) = match rest.split_once("--") {
                Some((title, description)) => (title.trim(), description.trim()),
                None => (rest, ""),
            };
            Command::Add {
                title: title.to_string(),
                description: description.to_string(),
            }
        }
        "edit" | "e" => index_arg("edit", rest).map_or_else(|e| e, |index| Command::Edit { index }),
        "cancel" | "c" => Command::Cancel,
        "toggle" | "x" => {
            index_arg("toggle", rest).map_or_else(|e| e, |index| Command::Toggle { index })
        }
        "delete" | "rm" => {
            index_arg("delete", rest).map_or_else(|e| e, |index| Command::Delete { index })
        }
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown { input: input.to_string() },
    }
}

fn index_arg(command: &str, rest: &str) -> Result<usize, Command> {
    match rest.parse::<usize>() {
        Ok(index) if index >= 1 => Ok(index),
        _ => Err(Command::InvalidArgs {
            command: command.to_string(),
            error: format!("usage: {command} <n>  (n is the number shown in the list)"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty() {
        assert_eq!(parse("   "), Command::Empty);
    }

    #[test]
    fn parse_aliases() {
        assert_eq!(parse("r"), Command::Refresh);
        assert_eq!(parse("ls"), Command::List);
        assert_eq!(parse("s"), Command::Submit);
        assert_eq!(parse("q"), Command::Quit);
        assert_eq!(parse("?"), Command::Help);
    }

    #[test]
    fn parse_title_keeps_inner_spacing() {
        assert_eq!(
            parse("title  Buy  milk "),
            Command::Title { text: "Buy  milk".into() }
        );
        assert_eq!(parse("title"), Command::Title { text: String::new() });
    }

    #[test]
    fn parse_add_with_description() {
        assert_eq!(
            parse("add Buy milk -- 2 litres"),
            Command::Add {
                title: "Buy milk".into(),
                description: "2 litres".into()
            }
        );
        assert_eq!(
            parse("add Walk dog"),
            Command::Add {
                title: "Walk dog".into(),
                description: String::new()
            }
        );
    }

    #[test]
    fn parse_indexed_commands() {
        assert_eq!(parse("edit 2"), Command::Edit { index: 2 });
        assert_eq!(parse("e 1"), Command::Edit { index: 1 });
        assert_eq!(parse("x 3"), Command::Toggle { index: 3 });
        assert_eq!(parse("rm 1"), Command::Delete { index: 1 });
    }

    #[test]
    fn parse_bad_index() {
        assert!(matches!(parse("edit"), Command::InvalidArgs { command, .. } if command == "edit"));
        assert!(matches!(parse("toggle 0"), Command::InvalidArgs { .. }));
        assert!(matches!(parse("rm two"), Command::InvalidArgs { command, .. } if command == "delete"));
    }

    #[test]
    fn parse_unknown_command() {
        assert_eq!(parse("frobnicate 1"), Command::Unknown { input: "frobnicate 1".into() });
    }
}
