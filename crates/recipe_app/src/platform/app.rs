use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context};
use recipe_client::{EngineEvent, EngineHandle, ReqwestRecipeClient};
use recipe_core::{resolve_dark_mode, update, AppState, FilterKind, Msg, SearchParams};
use recipe_logging::{recipe_debug, recipe_info};

use super::browse;
use super::effects::EffectRunner;
use super::persistence;
use super::ui::render;
use crate::config::{Cli, Command};

/// Owns the state and feeds effects and engine results through `update`.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
    settle_timeout: Duration,
}

impl Session {
    pub fn new(state: AppState, runner: EffectRunner, settle_timeout: Duration) -> Self {
        Self {
            state,
            runner,
            settle_timeout,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn runner(&self) -> &EffectRunner {
        &self.runner
    }

    pub fn runner_mut(&mut self) -> &mut EffectRunner {
        &mut self.runner
    }

    /// Applies one message; returns whether the view changed.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        recipe_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        was_dirty
    }

    /// Feeds engine results back in until nothing is in flight.
    pub fn settle(&mut self) -> anyhow::Result<()> {
        let deadline = Instant::now() + self.settle_timeout;
        while !self.state.is_idle() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                bail!("timed out waiting for the recipe API");
            }
            if let Some(msg) = self.runner.next_msg(remaining) {
                self.dispatch(msg);
            }
        }
        Ok(())
    }

    pub fn render_to(&self, out: &mut impl Write) -> io::Result<()> {
        for line in render::render(&self.state.view()) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    fn check_health(&self) -> anyhow::Result<String> {
        let engine: &EngineHandle = self.runner.engine();
        engine.check_health();
        let deadline = Instant::now() + self.settle_timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match engine.recv_timeout(remaining) {
                Some(EngineEvent::HealthChecked(result)) => {
                    return result.map_err(|err| anyhow!("recipe API unavailable: {err}"));
                }
                Some(other) => recipe_debug!("Ignoring {:?} while checking health", other),
                None => bail!("timed out waiting for the recipe API"),
            }
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Command::Filters = cli.command {
        for line in render::render_filters() {
            writeln!(out, "{line}")?;
        }
        return Ok(());
    }

    let mut session = build_session(&cli)?;
    match cli.command {
        Command::Search {
            query,
            diet,
            cuisine,
            dish_type,
            page,
        } => {
            let mut params = SearchParams {
                query: query.trim().to_string(),
                page: page.max(1),
                ..SearchParams::default()
            };
            for (kind, value) in [
                (FilterKind::Diet, diet),
                (FilterKind::Cuisine, cuisine),
                (FilterKind::DishType, dish_type),
            ] {
                if let Some(value) = value {
                    let value = browse::filter_value(kind, &value)?;
                    params.set_filter(kind, value);
                }
            }
            let query_string = params.to_query_string();
            session.dispatch(Msg::LocationRestored(query_string.clone()));
            session.settle()?;
            session.render_to(&mut out)?;
            writeln!(out, "Link: ?{query_string}")?;
        }
        Command::Show { id, exclude } => {
            session.dispatch(Msg::RecipeOpened(id));
            session.settle()?;
            for ingredient_id in exclude {
                session.dispatch(Msg::IngredientToggled(ingredient_id));
                if !session.state().exclusions().contains(ingredient_id) {
                    writeln!(out, "Ingredient {ingredient_id} is not part of recipe {id}")?;
                }
            }
            session.render_to(&mut out)?;
        }
        Command::ShowExcluding { id, ingredients } => {
            session.runner_mut().exclude_on_server(id, ingredients);
            session.dispatch(Msg::RecipeOpened(id));
            session.settle()?;
            session.render_to(&mut out)?;
        }
        Command::Suggest { query, .. } => {
            session.dispatch(Msg::SearchInputChanged(query));
            session.settle()?;
            let view = session.state().view();
            if view.suggestions.items.is_empty() {
                writeln!(out, "No suggestions.")?;
            }
            for (index, item) in view.suggestions.items.iter().enumerate() {
                writeln!(out, "{}) {} [{}]", index + 1, item.title, item.id)?;
            }
        }
        Command::Health => {
            let text = session.check_health()?;
            writeln!(out, "{text}")?;
        }
        Command::Theme { toggle } => {
            if toggle {
                session.dispatch(Msg::ThemeToggled);
            }
            let theme = if session.state().dark_mode() { "dark" } else { "light" };
            writeln!(out, "Theme: {theme}")?;
        }
        Command::Browse => {
            let stdin = io::stdin();
            browse::run(&mut session, stdin.lock(), &mut out)?;
        }
        Command::Filters => {}
    }
    Ok(())
}

fn build_session(cli: &Cli) -> anyhow::Result<Session> {
    let client =
        ReqwestRecipeClient::new(cli.client_settings()).context("invalid recipe API settings")?;
    let engine = EngineHandle::new(Arc::new(client), cli.engine_settings())
        .context("failed to start the async runtime")?;

    let dark_mode = initial_dark_mode(&cli.state_dir);
    recipe_info!("Starting with api_url={} dark_mode={}", cli.api_url, dark_mode);

    let runner = EffectRunner::new(engine, cli.state_dir.clone());
    Ok(Session::new(
        AppState::with_dark_mode(dark_mode),
        runner,
        cli.settle_timeout(),
    ))
}

fn initial_dark_mode(state_dir: &Path) -> bool {
    let saved = persistence::load_or_default(state_dir).dark_mode;
    let colorfgbg = std::env::var("COLORFGBG").ok();
    resolve_dark_mode(saved, persistence::platform_prefers_dark(colorfgbg.as_deref()))
}
