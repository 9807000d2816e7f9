use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use recipe_client::{ClientSettings, EngineSettings, DEFAULT_API_URL, DEFAULT_SUGGESTION_LIMIT};
use recipe_logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "recipe-explorer",
    version,
    about = "Search recipes, browse details and explore nutrition"
)]
pub struct Cli {
    /// Base URL of the recipe API.
    #[arg(long, env = "RECIPE_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "RECIPE_API_TIMEOUT_SECS", default_value_t = 15, global = true)]
    pub timeout_secs: u64,

    /// Quiet period before autocomplete is queried.
    #[arg(long, default_value_t = 300, global = true)]
    pub debounce_ms: u64,

    /// Directory holding the saved theme preference.
    #[arg(long, env = "RECIPE_STATE_DIR", default_value = ".", global = true)]
    pub state_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = LogTarget::File, global = true)]
    pub log: LogTarget,

    /// Log file path (defaults to ./recipe.log).
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search recipes.
    Search {
        /// Free-text query; may be empty.
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        diet: Option<String>,
        #[arg(long)]
        cuisine: Option<String>,
        #[arg(long = "type")]
        dish_type: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show a recipe, optionally excluding ingredients by id.
    Show {
        id: u64,
        #[arg(long = "exclude")]
        exclude: Vec<u64>,
    },
    /// Show a recipe with ingredients excluded by the server.
    ShowExcluding {
        id: u64,
        #[arg(long = "ingredient", required = true)]
        ingredients: Vec<String>,
    },
    /// List autocomplete suggestions.
    Suggest {
        query: String,
        #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: u32,
    },
    /// Check that the recipe API is reachable.
    Health,
    /// List the diet, cuisine and dish type filter values.
    Filters,
    /// Show the theme, or flip and save it.
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// Interactive session.
    Browse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Off,
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Off => LogDestination::Off,
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

impl Cli {
    pub fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_url.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..ClientSettings::default()
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        let suggestion_limit = match self.command {
            Command::Suggest { limit, .. } => limit,
            _ => DEFAULT_SUGGESTION_LIMIT,
        };
        EngineSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            suggestion_limit,
        }
    }

    /// Upper bound on how long one user action may take to settle.
    pub fn settle_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs) + Duration::from_millis(self.debounce_ms)
            + Duration::from_secs(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_api_server() {
        let cli = Cli::try_parse_from(["recipe-explorer", "health"]).unwrap();
        assert_eq!(cli.api_url, DEFAULT_API_URL);
        assert_eq!(cli.timeout_secs, 15);
        assert_eq!(cli.debounce_ms, 300);
        assert_eq!(cli.log, LogTarget::File);
        assert_eq!(cli.level(), LevelFilter::Info);
        assert_eq!(cli.client_settings().request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn search_accepts_filters_and_page() {
        let cli = Cli::try_parse_from([
            "recipe-explorer",
            "search",
            "pasta",
            "--diet",
            "vegan",
            "--type",
            "main course",
            "--page",
            "2",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.level(), LevelFilter::Trace);
        match cli.command {
            Command::Search {
                query,
                diet,
                cuisine,
                dish_type,
                page,
            } => {
                assert_eq!(query, "pasta");
                assert_eq!(diet.as_deref(), Some("vegan"));
                assert_eq!(cuisine, None);
                assert_eq!(dish_type.as_deref(), Some("main course"));
                assert_eq!(page, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_collects_repeated_exclusions() {
        let cli = Cli::try_parse_from([
            "recipe-explorer",
            "show",
            "1",
            "--exclude",
            "2",
            "--exclude",
            "3",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Show { id: 1, ref exclude } if exclude == &[2, 3]));
    }

    #[test]
    fn suggest_limit_reaches_engine() {
        let cli =
            Cli::try_parse_from(["recipe-explorer", "suggest", "pas", "--limit", "8"]).unwrap();
        assert_eq!(cli.engine_settings().suggestion_limit, 8);
    }

    #[test]
    fn show_excluding_requires_an_ingredient() {
        assert!(Cli::try_parse_from(["recipe-explorer", "show-excluding", "1"]).is_err());
    }
}
