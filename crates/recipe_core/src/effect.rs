use crate::model::RecipeId;
use crate::search_params::SearchRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Search(SearchRequest),
    /// Mirror the search into the location query string.
    UpdateLocation(String),
    LoadRecipe { id: RecipeId },
    /// Debounced autocomplete lookup; supersedes any earlier generation.
    RequestSuggestions { generation: u64, query: String },
    /// Drop the pending debounce timer and any in-flight lookup.
    CancelSuggestions,
    PersistTheme { dark_mode: bool },
}
