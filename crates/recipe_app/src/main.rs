mod config;
mod platform;

use clap::Parser;
use recipe_logging::log_file_path;

fn main() -> anyhow::Result<()> {
    let cli = config::Cli::parse();
    recipe_logging::initialize(
        cli.level(),
        cli.log.into(),
        &log_file_path(cli.log_file.as_deref()),
    );
    platform::app::run(cli)
}
