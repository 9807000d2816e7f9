use recipe_core::{update, AppState, Effect, FetchFailure, Msg, Route, Suggestion};

fn suggestion(id: u64, title: &str) -> Suggestion {
    Suggestion {
        id,
        title: title.to_string(),
        image_type: None,
    }
}

fn typed(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::SearchInputChanged(text.to_string()))
}

#[test]
fn short_input_cancels_instead_of_requesting() {
    for text in ["", " ", "p", " p "] {
        let (state, effects) = typed(AppState::new(), text);
        assert_eq!(effects, vec![Effect::CancelSuggestions], "input {text:?}");
        assert!(!state.suggestions_pending());
        assert!(!state.view().suggestions.open);
    }
}

#[test]
fn each_keystroke_bumps_generation() {
    let (state, effects) = typed(AppState::new(), "pa");
    assert_eq!(
        effects,
        vec![Effect::RequestSuggestions {
            generation: 1,
            query: "pa".to_string()
        }]
    );
    let (state, effects) = typed(state, "pas ");
    assert_eq!(
        effects,
        vec![Effect::RequestSuggestions {
            generation: 2,
            query: "pas".to_string()
        }]
    );
    assert_eq!(state.suggestion_generation(), 2);
    assert!(state.suggestions_pending());
    assert!(!state.is_idle());
}

#[test]
fn stale_response_is_ignored() {
    let (state, _) = typed(AppState::new(), "pa");
    let (state, _) = typed(state, "pasta");

    let (mut state, _) = update(
        state,
        Msg::SuggestionsLoaded {
            generation: 1,
            result: Ok(vec![suggestion(9, "Pancakes")]),
        },
    );
    state.consume_dirty();
    assert!(!state.view().suggestions.open);
    assert!(state.suggestions_pending());

    let (mut state, _) = update(
        state,
        Msg::SuggestionsLoaded {
            generation: 2,
            result: Ok(vec![suggestion(1, "Pasta Carbonara"), suggestion(2, "Pasta Primavera")]),
        },
    );
    assert!(state.consume_dirty());
    let view = state.view();
    assert!(view.suggestions.open);
    assert_eq!(view.suggestions.items.len(), 2);
    assert!(state.is_idle());
}

#[test]
fn failures_are_swallowed() {
    let (state, _) = typed(AppState::new(), "pasta");
    let (state, effects) = update(
        state,
        Msg::SuggestionsLoaded {
            generation: 1,
            result: Err(FetchFailure::new("network error")),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.suggestions.open);
    assert!(view.suggestions.items.is_empty());
    assert!(view.search.error.is_none());
}

#[test]
fn choosing_suggestion_opens_recipe() {
    let (state, _) = typed(AppState::new(), "pasta");
    let (state, _) = update(
        state,
        Msg::SuggestionsLoaded {
            generation: 1,
            result: Ok(vec![suggestion(1, "Pasta Carbonara"), suggestion(2, "Pasta Primavera")]),
        },
    );

    let (state, effects) = update(state, Msg::SuggestionChosen(1));
    assert_eq!(effects, vec![Effect::LoadRecipe { id: 2 }]);
    assert_eq!(state.route(), Route::Recipe(2));
    let view = state.view();
    assert!(!view.suggestions.open);
    assert_eq!(view.suggestions.input, "Pasta Primavera");

    let (_state, effects) = update(state, Msg::SuggestionChosen(0));
    assert!(effects.is_empty());
}

#[test]
fn dismiss_closes_list() {
    let (state, _) = typed(AppState::new(), "pasta");
    let (state, _) = update(
        state,
        Msg::SuggestionsLoaded {
            generation: 1,
            result: Ok(vec![suggestion(1, "Pasta Carbonara")]),
        },
    );
    let (mut state, _) = update(state, Msg::SuggestionsDismissed);
    assert!(state.consume_dirty());
    assert!(!state.view().suggestions.open);

    let (mut state, _) = update(state, Msg::SuggestionsDismissed);
    assert!(!state.consume_dirty());
}

#[test]
fn submitting_search_invalidates_pending_lookup() {
    let (state, _) = typed(AppState::new(), "pasta");
    let (state, effects) = update(state, Msg::SearchSubmitted("pasta".into()));
    assert!(effects.contains(&Effect::CancelSuggestions));
    assert!(!state.suggestions_pending());

    let (state, _) = update(
        state,
        Msg::SuggestionsLoaded {
            generation: 1,
            result: Ok(vec![suggestion(1, "Pasta Carbonara")]),
        },
    );
    assert!(!state.view().suggestions.open);
}
