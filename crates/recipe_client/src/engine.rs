use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use recipe_core::{RecipeId, SearchRequest};
use recipe_logging::{recipe_debug, recipe_warn};
use tokio_util::sync::CancellationToken;

use crate::client::{RecipeApi, DEFAULT_SUGGESTION_LIMIT};
use crate::EngineEvent;

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Quiet period before an autocomplete lookup is sent.
    pub debounce: Duration,
    pub suggestion_limit: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

enum EngineCommand {
    Search(SearchRequest),
    LoadRecipe {
        id: RecipeId,
    },
    LoadRecipeWithExclusions {
        id: RecipeId,
        ingredients: Vec<String>,
    },
    Suggest {
        generation: u64,
        query: String,
    },
    CancelSuggestions,
    CheckHealth,
}

/// Runs API calls on a background tokio runtime and reports them as events.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn RecipeApi>, settings: EngineSettings) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            let mut worker = Worker {
                api,
                settings,
                event_tx,
                suggestion_token: None,
            };
            while let Ok(command) = cmd_rx.recv() {
                worker.handle(&runtime, command);
            }
            if let Some(token) = worker.suggestion_token.take() {
                token.cancel();
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn search(&self, request: SearchRequest) {
        self.send(EngineCommand::Search(request));
    }

    pub fn load_recipe(&self, id: RecipeId) {
        self.send(EngineCommand::LoadRecipe { id });
    }

    pub fn load_recipe_with_exclusions(&self, id: RecipeId, ingredients: Vec<String>) {
        self.send(EngineCommand::LoadRecipeWithExclusions { id, ingredients });
    }

    /// Schedules a debounced lookup, cancelling any earlier one.
    pub fn suggest(&self, generation: u64, query: impl Into<String>) {
        self.send(EngineCommand::Suggest {
            generation,
            query: query.into(),
        });
    }

    pub fn cancel_suggestions(&self) {
        self.send(EngineCommand::CancelSuggestions);
    }

    pub fn check_health(&self) {
        self.send(EngineCommand::CheckHealth);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            recipe_warn!("Engine worker stopped; command dropped");
        }
    }
}

struct Worker {
    api: Arc<dyn RecipeApi>,
    settings: EngineSettings,
    event_tx: mpsc::Sender<EngineEvent>,
    suggestion_token: Option<CancellationToken>,
}

impl Worker {
    fn handle(&mut self, runtime: &tokio::runtime::Runtime, command: EngineCommand) {
        let api = self.api.clone();
        let event_tx = self.event_tx.clone();
        match command {
            EngineCommand::Search(request) => {
                runtime.spawn(async move {
                    let result = api.search(&request).await;
                    let _ = event_tx.send(EngineEvent::SearchCompleted(result));
                });
            }
            EngineCommand::LoadRecipe { id } => {
                runtime.spawn(async move {
                    let result = api.recipe(id).await;
                    let _ = event_tx.send(EngineEvent::RecipeLoaded { id, result });
                });
            }
            EngineCommand::LoadRecipeWithExclusions { id, ingredients } => {
                runtime.spawn(async move {
                    let result = api.recipe_with_exclusions(id, &ingredients).await;
                    let _ = event_tx.send(EngineEvent::RecipeLoaded { id, result });
                });
            }
            EngineCommand::Suggest { generation, query } => {
                let token = self.replace_suggestion_token();
                let debounce = self.settings.debounce;
                let limit = self.settings.suggestion_limit;
                runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => return,
                        _ = tokio::time::sleep(debounce) => {}
                    }
                    let result = tokio::select! {
                        _ = token.cancelled() => None,
                        result = api.autocomplete(&query, limit) => Some(result),
                    };
                    match result {
                        Some(result) if !token.is_cancelled() => {
                            let _ = event_tx
                                .send(EngineEvent::SuggestionsLoaded { generation, result });
                        }
                        _ => recipe_debug!("Suggestion lookup {} cancelled", generation),
                    }
                });
            }
            EngineCommand::CancelSuggestions => {
                if let Some(token) = self.suggestion_token.take() {
                    token.cancel();
                }
            }
            EngineCommand::CheckHealth => {
                runtime.spawn(async move {
                    let result = api.health_check().await;
                    let _ = event_tx.send(EngineEvent::HealthChecked(result));
                });
            }
        }
    }

    fn replace_suggestion_token(&mut self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.suggestion_token.replace(token.clone()) {
            previous.cancel();
        }
        token
    }
}
