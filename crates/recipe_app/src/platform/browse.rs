use std::io::{BufRead, Write};

use recipe_core::{FilterKind, Msg, Route};
use recipe_logging::recipe_warn;
use thiserror::Error;

use super::app::Session;
use super::ui::render;

const HELP: &[&str] = &[
    "search <text>            run a search (empty text lists everything)",
    "type <text>              type into the search box (autocomplete)",
    "pick <n>                 open the n-th suggestion",
    "dismiss                  close the suggestion list",
    "filter <diet|cuisine|type> <value|all>",
    "clear-filters            reset every filter",
    "page <n>                 go to a results page",
    "open <id>                open a recipe",
    "toggle <ingredient-id>   exclude or include an ingredient",
    "restore                  include every ingredient again",
    "back                     return to the search results",
    "retry                    repeat the failed request",
    "link                     print the shareable search link",
    "goto <query-string>      restore a search from a link",
    "theme                    switch between light and dark",
    "filters                  list filter values",
    "quit",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
    #[error("unknown filter '{0}' (use diet, cuisine or type)")]
    UnknownFilter(String),
    #[error("'{value}' is not a {filter} option (see 'filters')")]
    UnknownFilterValue { filter: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Dispatch(Msg),
    Retry,
    ShowLink,
    ShowFilters,
    Help,
    Quit,
    Nothing,
}

pub fn parse_command(line: &str) -> Result<BrowseCommand, QueryError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let msg = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(BrowseCommand::Nothing),
        "search" | "s" => Msg::SearchSubmitted(rest.to_string()),
        "type" => Msg::SearchInputChanged(rest.to_string()),
        "pick" => {
            let n: usize = number(rest, "pick", "a suggestion number")?;
            match n.checked_sub(1) {
                Some(index) => Msg::SuggestionChosen(index),
                None => return Err(QueryError::InvalidNumber(rest.to_string())),
            }
        }
        "dismiss" => Msg::SuggestionsDismissed,
        "filter" => {
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let filter = match name.to_ascii_lowercase().as_str() {
                "" => {
                    return Err(QueryError::MissingArgument {
                        command: "filter",
                        argument: "a filter name",
                    })
                }
                "diet" => FilterKind::Diet,
                "cuisine" => FilterKind::Cuisine,
                "type" => FilterKind::DishType,
                other => return Err(QueryError::UnknownFilter(other.to_string())),
            };
            Msg::FilterChanged {
                filter,
                value: filter_value(filter, value)?,
            }
        }
        "clear-filters" => Msg::FiltersCleared,
        "page" => Msg::PageChanged(number(rest, "page", "a page number")?),
        "open" => Msg::RecipeOpened(number(rest, "open", "a recipe id")?),
        "toggle" => Msg::IngredientToggled(number(rest, "toggle", "an ingredient id")?),
        "restore" => Msg::ExclusionsCleared,
        "back" => Msg::BackToSearch,
        "goto" => Msg::LocationRestored(rest.to_string()),
        "theme" => Msg::ThemeToggled,
        "retry" => return Ok(BrowseCommand::Retry),
        "link" => return Ok(BrowseCommand::ShowLink),
        "filters" => return Ok(BrowseCommand::ShowFilters),
        "help" | "?" => return Ok(BrowseCommand::Help),
        "quit" | "exit" | "q" => return Ok(BrowseCommand::Quit),
        other => return Err(QueryError::UnknownCommand(other.to_string())),
    };
    Ok(BrowseCommand::Dispatch(msg))
}

/// Normalises a filter value typed by the user; `all` or blank clears it.
pub fn filter_value(kind: FilterKind, input: &str) -> Result<Option<String>, QueryError> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    kind.find_option(input)
        .map(|option| Some(option.value.to_string()))
        .ok_or_else(|| QueryError::UnknownFilterValue {
            filter: kind.label(),
            value: input.to_string(),
        })
}

fn number<T: std::str::FromStr>(
    text: &str,
    command: &'static str,
    argument: &'static str,
) -> Result<T, QueryError> {
    if text.is_empty() {
        return Err(QueryError::MissingArgument { command, argument });
    }
    text.parse()
        .map_err(|_| QueryError::InvalidNumber(text.to_string()))
}

/// Line-driven session: one command per line until `quit` or end of input.
pub fn run(session: &mut Session, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
    session.render_to(out)?;
    writeln!(out, "Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        let msg = match command {
            BrowseCommand::Dispatch(msg) => msg,
            BrowseCommand::Retry => match session.state().route() {
                Route::Recipe(_) => Msg::RecipeRetried,
                Route::Home => Msg::SearchRetried,
            },
            BrowseCommand::ShowLink => {
                match session.runner().location() {
                    Some(query) => writeln!(out, "?{query}")?,
                    None => writeln!(out, "No search yet.")?,
                }
                continue;
            }
            BrowseCommand::ShowFilters => {
                for line in render::render_filters() {
                    writeln!(out, "{line}")?;
                }
                continue;
            }
            BrowseCommand::Help => {
                for line in HELP {
                    writeln!(out, "{line}")?;
                }
                continue;
            }
            BrowseCommand::Quit => break,
            BrowseCommand::Nothing => continue,
        };

        let mut changed = session.dispatch(msg);
        if !session.state().is_idle() {
            if let Err(err) = session.settle() {
                recipe_warn!("{}", err);
                writeln!(out, "{err}")?;
            }
            changed = true;
        }
        if changed {
            session.render_to(out)?;
        }
    }
    Ok(())
}
