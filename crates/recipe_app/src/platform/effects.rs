use std::path::PathBuf;
use std::time::Duration;

use recipe_client::{ApiError, EngineEvent, EngineHandle};
use recipe_core::{Effect, FetchFailure, Msg, RecipeId};
use recipe_logging::{recipe_error, recipe_info, recipe_warn};

use super::persistence;

/// Executes core effects against the engine and the local state directory.
pub struct EffectRunner {
    engine: EngineHandle,
    state_dir: PathBuf,
    location: Option<String>,
    /// Set for one recipe load that should go through the server-side exclusion call.
    server_exclusions: Option<(RecipeId, Vec<String>)>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, state_dir: PathBuf) -> Self {
        Self {
            engine,
            state_dir,
            location: None,
            server_exclusions: None,
        }
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    /// Query string of the last search, as it would appear in the address bar.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn exclude_on_server(&mut self, id: RecipeId, ingredients: Vec<String>) {
        self.server_exclusions = Some((id, ingredients));
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Search(request) => {
                    recipe_info!(
                        "Search query={:?} offset={} diet={:?} cuisine={:?} type={:?}",
                        request.query,
                        request.offset,
                        request.diet,
                        request.cuisine,
                        request.dish_type
                    );
                    self.engine.search(request);
                }
                Effect::UpdateLocation(query_string) => {
                    recipe_info!("Location ?{}", query_string);
                    self.location = Some(query_string);
                }
                Effect::LoadRecipe { id } => match self.server_exclusions.take() {
                    Some((excluded_id, ingredients)) if excluded_id == id => {
                        recipe_info!("LoadRecipe id={} excluding {:?} on server", id, ingredients);
                        self.engine.load_recipe_with_exclusions(id, ingredients);
                    }
                    _ => {
                        recipe_info!("LoadRecipe id={}", id);
                        self.engine.load_recipe(id);
                    }
                },
                Effect::RequestSuggestions { generation, query } => {
                    self.engine.suggest(generation, query);
                }
                Effect::CancelSuggestions => self.engine.cancel_suggestions(),
                Effect::PersistTheme { dark_mode } => {
                    if let Err(err) = persistence::save_dark_mode(&self.state_dir, dark_mode) {
                        recipe_error!("Failed to save theme preference: {}", err);
                    }
                }
            }
        }
    }

    /// Waits up to `timeout` for the next engine result that maps to a message.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        match self.engine.recv_timeout(timeout)? {
            EngineEvent::HealthChecked(result) => {
                recipe_warn!("Unrequested health result dropped: {:?}", result);
                Some(Msg::NoOp)
            }
            event => map_event(event),
        }
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::SearchCompleted(result) => {
            Some(Msg::SearchCompleted(result.map_err(map_failure)))
        }
        EngineEvent::RecipeLoaded { result, .. } => {
            Some(Msg::RecipeLoaded(result.map_err(map_failure)))
        }
        EngineEvent::SuggestionsLoaded { generation, result } => Some(Msg::SuggestionsLoaded {
            generation,
            result: result.map_err(map_failure),
        }),
        EngineEvent::HealthChecked(_) => None,
    }
}

pub(crate) fn map_failure(err: ApiError) -> FetchFailure {
    let mut failure = FetchFailure::new(err.to_string());
    if let Some(message) = err.server_message() {
        failure = failure.with_server_message(message);
    }
    if err.is_not_found() {
        failure = failure.not_found();
    }
    failure
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use recipe_core::SearchPage;

    #[test]
    fn not_found_keeps_server_message() {
        let failure = map_failure(ApiError::NotFound {
            message: Some("Recipe not found".into()),
        });
        assert_eq!(
            failure,
            FetchFailure::new("not found")
                .with_server_message("Recipe not found")
                .not_found()
        );
    }

    #[test]
    fn transport_failure_has_no_server_message() {
        let failure = map_failure(ApiError::Timeout);
        assert_eq!(failure.server_message, None);
        assert!(!failure.not_found);
        assert_eq!(failure.user_message("fallback"), "fallback");
    }

    #[test]
    fn engine_events_become_messages() {
        let msg = map_event(EngineEvent::SearchCompleted(Ok(SearchPage::default())));
        assert_eq!(msg, Some(Msg::SearchCompleted(Ok(SearchPage::default()))));

        let msg = map_event(EngineEvent::SuggestionsLoaded {
            generation: 4,
            result: Err(ApiError::Network("refused".into())),
        });
        assert_eq!(
            msg,
            Some(Msg::SuggestionsLoaded {
                generation: 4,
                result: Err(FetchFailure::new("network error: refused")),
            })
        );

        assert_eq!(map_event(EngineEvent::HealthChecked(Ok("ok".into()))), None);
    }
}
