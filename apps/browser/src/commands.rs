//! Commands typed at the browser prompt.

use shared::domain::ArtworkId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserCommand {
    Next,
    Prev,
    /// 1-based page number as shown in the header.
    Page(usize),
    Reload,
    Toggle(ArtworkId),
    SelectPage,
    ClearPage,
    ToggleRowsOverlay,
    Input(String),
    Submit,
    SelectRows(String),
    ShowSelected,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  next | prev | page <n>   change page (1-based)
  reload                   re-request the current page
  toggle <id>              check/uncheck one row
  all | none               check/uncheck every row on this page
  rows                     open/close the select-rows box
  input <n>                type into the select-rows box
  submit                   select the first <n> rows
  select <n>               rows + input + submit in one step
  selected                 list the selection
  help | quit";

impl BrowserCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "n" | "next" => Self::Next,
            "p" | "prev" => Self::Prev,
            "page" | "g" => {
                let number = rest
                    .parse::<usize>()
                    .ok()
                    .filter(|number| *number > 0)
                    .ok_or_else(|| format!("page expects a page number, got {rest:?}"))?;
                Self::Page(number)
            }
            "reload" | "r" => Self::Reload,
            "toggle" | "t" => {
                let id = rest
                    .parse::<i64>()
                    .map_err(|_| format!("toggle expects an artwork id, got {rest:?}"))?;
                Self::Toggle(ArtworkId(id))
            }
            "all" => Self::SelectPage,
            "none" => Self::ClearPage,
            "rows" => Self::ToggleRowsOverlay,
            "input" => Self::Input(rest.to_string()),
            "submit" => Self::Submit,
            "select" => Self::SelectRows(rest.to_string()),
            "selected" | "ls" => Self::ShowSelected,
            "help" | "?" | "" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(format!("unknown command {other:?}; try `help`")),
        };
        Ok(command)
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
