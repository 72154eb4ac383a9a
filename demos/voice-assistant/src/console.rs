//! Line commands understood by the tool console

/// One parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line
    Empty,
    /// Print usage
    Help,
    /// Print the tool catalogue
    List,
    /// Print the session description handed to the voice pipeline
    Session,
    /// Print one tool's input schema
    Schema(String),
    /// Invoke a tool with a JSON argument object
    Call {
        /// Tool name
        name: String,
        /// Raw JSON arguments
        input: String,
    },
    /// Leave the console
    Quit,
}

/// Usage text printed by `help`
pub const USAGE: &str = "\
Commands:
  list                  show registered tools
  schema <tool>         show a tool's input schema
  session               show the session description
  <tool> [json]         call a tool, e.g. calculate {\"expression\": \"2 + 2\"}
  help                  show this message
  quit | exit           leave";

/// Parse a console line
#[must_use]
pub fn parse(line: &str) -> Command {
    let line = line.trim();
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(head, rest)| (head, rest.trim()));

    match head.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "help" | "?" => Command::Help,
        "list" | "tools" => Command::List,
        "session" => Command::Session,
        "quit" | "exit" => Command::Quit,
        "schema" if !rest.is_empty() => Command::Schema(rest.to_string()),
        "schema" => Command::Help,
        _ => Command::Call {
            name: head.to_string(),
            input: if rest.is_empty() {
                "{}".to_string()
            } else {
                rest.to_string()
            },
        },
    }
}
