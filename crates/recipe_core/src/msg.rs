use crate::filters::FilterKind;
use crate::model::{IngredientId, RecipeDetail, RecipeId, SearchPage, Suggestion};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted the search box.
    SearchSubmitted(String),
    /// User picked a filter value; `None` selects "all".
    FilterChanged {
        filter: FilterKind,
        value: Option<String>,
    },
    /// User cleared every filter.
    FiltersCleared,
    /// User navigated to a 1-based results page.
    PageChanged(u32),
    /// User asked to retry the failed search.
    SearchRetried,
    /// Location query string restored by back navigation or a shared link.
    LocationRestored(String),
    /// API response for the most recent search call to resolve.
    SearchCompleted(Result<SearchPage, FetchFailure>),
    /// User opened a recipe detail page.
    RecipeOpened(RecipeId),
    /// User asked to retry loading the current recipe.
    RecipeRetried,
    /// API response for a recipe detail call.
    RecipeLoaded(Result<RecipeDetail, FetchFailure>),
    /// User toggled exclusion of one ingredient.
    IngredientToggled(IngredientId),
    /// User restored every excluded ingredient.
    ExclusionsCleared,
    /// User left the detail page.
    BackToSearch,
    /// Search box text changed (drives autocomplete).
    SearchInputChanged(String),
    /// Autocomplete response tagged with the generation that requested it.
    SuggestionsLoaded {
        generation: u64,
        result: Result<Vec<Suggestion>, FetchFailure>,
    },
    /// User picked a suggestion by position.
    SuggestionChosen(usize),
    /// Suggestion list closed (escape or click outside).
    SuggestionsDismissed,
    /// User flipped dark mode.
    ThemeToggled,
    /// Engine result with no state to update, such as an unrequested health check.
    NoOp,
}

/// Failed API call, reduced to what the state needs to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// Structured `message` from the server error body, if any.
    pub server_message: Option<String>,
    /// Transport-level description.
    pub detail: String,
    pub not_found: bool,
}

impl FetchFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            server_message: None,
            detail: detail.into(),
            not_found: false,
        }
    }

    pub fn with_server_message(mut self, message: impl Into<String>) -> Self {
        self.server_message = Some(message.into());
        self
    }

    pub fn not_found(mut self) -> Self {
        self.not_found = true;
        self
    }

    /// Server message when present, else the caller's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}
