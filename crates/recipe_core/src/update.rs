use recipe_logging::recipe_debug;

use crate::state::{
    MIN_SUGGESTION_QUERY_CHARS, RECIPE_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE,
};
use crate::{AppState, Effect, FilterKind, Msg, RecipeId, RequestState, Route};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchSubmitted(query) => {
            state.search.params.query = query.trim().to_string();
            state.search.params.page = 1;
            state.route = Route::Home;
            let cancel = cancel_pending_suggestions(&mut state);
            let mut effects = begin_search(&mut state, true);
            effects.extend(cancel);
            effects
        }
        Msg::FilterChanged { filter, value } => {
            let value = value.filter(|v| !v.trim().is_empty());
            if state.search.params.filter(filter) == value.as_deref() {
                return (state, Vec::new());
            }
            state.search.params.set_filter(filter, value);
            state.mark_dirty();
            research_from_first_page(&mut state)
        }
        Msg::FiltersCleared => {
            if !state.search.params.has_active_filters() {
                return (state, Vec::new());
            }
            for kind in FilterKind::ALL {
                state.search.params.set_filter(kind, None);
            }
            state.mark_dirty();
            research_from_first_page(&mut state)
        }
        Msg::PageChanged(page) => {
            let out_of_range = state
                .search
                .known_total_pages()
                .is_some_and(|total| page > total);
            if !state.search.has_searched
                || page == 0
                || page == state.search.params.page
                || out_of_range
            {
                return (state, Vec::new());
            }
            state.search.params.page = page;
            begin_search(&mut state, true)
        }
        Msg::SearchRetried => {
            if state.search.has_searched {
                begin_search(&mut state, false)
            } else {
                Vec::new()
            }
        }
        Msg::LocationRestored(query_string) => {
            match crate::SearchParams::from_query_string(&query_string) {
                Some(params) => {
                    state.search.params = params;
                    state.route = Route::Home;
                    begin_search(&mut state, false)
                }
                None => Vec::new(),
            }
        }
        Msg::SearchCompleted(result) => {
            state.search.results = match result {
                Ok(page) => RequestState::Ready(page),
                Err(failure) => RequestState::Failed(failure.user_message(SEARCH_FAILED_MESSAGE)),
            };
            state.mark_dirty();
            Vec::new()
        }
        Msg::RecipeOpened(id) => open_recipe(&mut state, id),
        Msg::RecipeRetried => match state.detail.recipe_id {
            Some(id) => {
                state.detail.recipe.begin();
                state.mark_dirty();
                vec![Effect::LoadRecipe { id }]
            }
            None => Vec::new(),
        },
        Msg::RecipeLoaded(result) => {
            state.detail.recipe = match result {
                Ok(recipe) => RequestState::Ready(recipe),
                Err(failure) => RequestState::Failed(failure.user_message(RECIPE_FAILED_MESSAGE)),
            };
            state.mark_dirty();
            Vec::new()
        }
        Msg::IngredientToggled(ingredient_id) => {
            let known = state
                .detail
                .recipe
                .data()
                .is_some_and(|recipe| recipe.ingredient(ingredient_id).is_some());
            if known {
                state.detail.exclusions.toggle(ingredient_id);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ExclusionsCleared => {
            if !state.detail.exclusions.is_empty() {
                state.detail.exclusions.clear();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::BackToSearch => {
            if state.route != Route::Home {
                state.route = Route::Home;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SearchInputChanged(text) => {
            let suggestions = &mut state.suggestions;
            suggestions.generation += 1;
            let query = text.trim().to_string();
            suggestions.input = text;
            state.mark_dirty();
            if query.chars().count() < MIN_SUGGESTION_QUERY_CHARS {
                state.suggestions.close();
                state.suggestions.pending_generation = None;
                vec![Effect::CancelSuggestions]
            } else {
                let generation = state.suggestions.generation;
                state.suggestions.pending_generation = Some(generation);
                vec![Effect::RequestSuggestions { generation, query }]
            }
        }
        Msg::SuggestionsLoaded { generation, result } => {
            if generation != state.suggestions.generation {
                recipe_debug!(
                    "Dropping stale suggestions generation={} current={}",
                    generation,
                    state.suggestions.generation
                );
                return (state, Vec::new());
            }
            state.suggestions.pending_generation = None;
            match result {
                Ok(items) => {
                    state.suggestions.open = !items.is_empty();
                    state.suggestions.items = items;
                }
                Err(failure) => {
                    recipe_debug!("Autocomplete failed: {}", failure.detail);
                    state.suggestions.close();
                }
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::SuggestionChosen(index) => {
            let chosen = state
                .suggestions
                .open
                .then(|| state.suggestions.items.get(index).cloned())
                .flatten();
            match chosen {
                Some(suggestion) => {
                    state.suggestions.close();
                    state.suggestions.input = suggestion.title;
                    open_recipe(&mut state, suggestion.id)
                }
                None => Vec::new(),
            }
        }
        Msg::SuggestionsDismissed => {
            if state.suggestions.open {
                state.suggestions.open = false;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ThemeToggled => {
            state.dark_mode = !state.dark_mode;
            state.mark_dirty();
            vec![Effect::PersistTheme {
                dark_mode: state.dark_mode,
            }]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn begin_search(state: &mut AppState, update_location: bool) -> Vec<Effect> {
    state.search.has_searched = true;
    state.search.results.begin();
    state.mark_dirty();

    let mut effects = vec![Effect::Search(state.search.params.to_request())];
    if update_location {
        effects.push(Effect::UpdateLocation(state.search.params.to_query_string()));
    }
    effects
}

/// Closes the suggestion list and invalidates any lookup still in flight.
fn cancel_pending_suggestions(state: &mut AppState) -> Option<Effect> {
    state.suggestions.close();
    if state.suggestions_pending() {
        state.suggestions.generation += 1;
        state.suggestions.pending_generation = None;
        Some(Effect::CancelSuggestions)
    } else {
        None
    }
}

/// Filters only re-run a search once the user has searched.
fn research_from_first_page(state: &mut AppState) -> Vec<Effect> {
    if !state.search.has_searched {
        return Vec::new();
    }
    state.search.params.page = 1;
    begin_search(state, true)
}

fn open_recipe(state: &mut AppState, id: RecipeId) -> Vec<Effect> {
    state.route = Route::Recipe(id);
    state.mark_dirty();

    let already_shown = state.detail.recipe_id == Some(id)
        && !matches!(state.detail.recipe, RequestState::Failed(_) | RequestState::Idle);
    if already_shown {
        return Vec::new();
    }

    state.detail.recipe_id = Some(id);
    state.detail.exclusions.clear();
    state.detail.recipe = RequestState::Pending { previous: None };
    vec![Effect::LoadRecipe { id }]
}
