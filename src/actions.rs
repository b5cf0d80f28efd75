//! User actions read from the terminal, one per line.

use crate::app::Category;
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  all                      re-show current results (All News)
  trending | sports | politics | entertainment | health | education
  search <text>            search for <text>
  next | prev              change page
  page <n>                 jump to page n (n >= 1)
  help                     show this help
  quit                     exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AllNews,
    Category(Category),
    Search(String),
    Next,
    Previous,
    Page(u32),
    Help,
    Quit,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let action = match word.to_ascii_lowercase().as_str() {
            "all" => Action::AllNews,
            "search" => Action::Search(rest.to_string()),
            "next" => Action::Next,
            "prev" | "previous" => Action::Previous,
            "page" => match rest.parse::<u32>() {
                Ok(n) if n >= 1 => Action::Page(n),
                _ => return Err(format!("page needs a number >= 1, got {rest:?}")),
            },
            "help" | "?" => Action::Help,
            "quit" | "exit" => Action::Quit,
            other => Action::Category(
                other
                    .parse()
                    .map_err(|_| format!("unknown command {line:?}; type `help`"))?,
            ),
        };
        Ok(action)
    }
}
