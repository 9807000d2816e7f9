use crate::model::{RecipeDetail, RecipeId, SearchPage, Suggestion};
use crate::nutrition::ExclusionSet;
use crate::pagination::total_pages;
use crate::search_params::SearchParams;

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search recipes. Please try again.";
pub const RECIPE_FAILED_MESSAGE: &str = "Failed to load recipe details.";

/// Minimum trimmed length before autocomplete is consulted.
pub const MIN_SUGGESTION_QUERY_CHARS: usize = 2;

/// Lifecycle of one remote resource.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    /// No request issued yet.
    Idle,
    /// Request in flight; the last good value stays visible.
    Pending { previous: Option<T> },
    Ready(T),
    /// Settled with a user-displayable message; prior data is dropped.
    Failed(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    /// Move to `Pending`, keeping whatever data is currently shown.
    pub fn begin(&mut self) {
        let previous = match std::mem::replace(self, RequestState::Idle) {
            RequestState::Ready(value) => Some(value),
            RequestState::Pending { previous } => previous,
            RequestState::Idle | RequestState::Failed(_) => None,
        };
        *self = RequestState::Pending { previous };
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RequestState::Ready(value) => Some(value),
            RequestState::Pending { previous } => previous.as_ref(),
            RequestState::Idle | RequestState::Failed(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Recipe(RecipeId),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct SearchState {
    pub(crate) params: SearchParams,
    pub(crate) results: RequestState<SearchPage>,
    pub(crate) has_searched: bool,
}

impl SearchState {
    pub(crate) fn known_total_pages(&self) -> Option<u32> {
        self.results
            .data()
            .map(|page| total_pages(page.total_results))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct DetailState {
    pub(crate) recipe_id: Option<RecipeId>,
    pub(crate) recipe: RequestState<RecipeDetail>,
    pub(crate) exclusions: ExclusionSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SuggestionState {
    pub(crate) input: String,
    pub(crate) generation: u64,
    pub(crate) pending_generation: Option<u64>,
    pub(crate) items: Vec<Suggestion>,
    pub(crate) open: bool,
}

impl SuggestionState {
    pub(crate) fn close(&mut self) {
        self.items.clear();
        self.open = false;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub(crate) route: Route,
    pub(crate) dark_mode: bool,
    pub(crate) search: SearchState,
    pub(crate) detail: DetailState,
    pub(crate) suggestions: SuggestionState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the resolved theme preference.
    pub fn with_dark_mode(dark_mode: bool) -> Self {
        Self {
            dark_mode,
            ..Self::default()
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn search_params(&self) -> &SearchParams {
        &self.search.params
    }

    pub fn search_results(&self) -> &RequestState<SearchPage> {
        &self.search.results
    }

    pub fn recipe(&self) -> &RequestState<RecipeDetail> {
        &self.detail.recipe
    }

    pub fn current_recipe_id(&self) -> Option<RecipeId> {
        self.detail.recipe_id
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.detail.exclusions
    }

    pub fn suggestion_generation(&self) -> u64 {
        self.suggestions.generation
    }

    pub fn is_idle(&self) -> bool {
        !self.search.results.is_pending()
            && !self.detail.recipe.is_pending()
            && !self.suggestions_pending()
    }

    /// A suggestion lookup was requested and has not answered yet.
    pub fn suggestions_pending(&self) -> bool {
        self.suggestions.pending_generation == Some(self.suggestions.generation)
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
