mod common;

use pretty_assertions::assert_eq;
use recipe_core::{
    update, AppState, Effect, FetchFailure, Msg, RequestState, Route, RECIPE_FAILED_MESSAGE,
};

use common::{carbonara, init_logging};

fn opened(id: u64) -> (AppState, Vec<Effect>) {
    update(AppState::new(), Msg::RecipeOpened(id))
}

fn loaded() -> AppState {
    let (state, _) = opened(1);
    let (state, _) = update(state, Msg::RecipeLoaded(Ok(carbonara())));
    state
}

#[test]
fn opening_recipe_loads_it() {
    init_logging();
    let (mut state, effects) = opened(1);

    assert_eq!(effects, vec![Effect::LoadRecipe { id: 1 }]);
    assert_eq!(state.route(), Route::Recipe(1));
    assert!(state.consume_dirty());
    let detail = state.view().detail.unwrap();
    assert!(detail.loading);
    assert!(!detail.updating);
    assert!(detail.recipe.is_none());
}

#[test]
fn loaded_recipe_renders_detail_view() {
    init_logging();
    let state = loaded();
    let view = state.view();
    let recipe = view.detail.unwrap().recipe.unwrap();

    assert_eq!(recipe.title, "Pasta Carbonara");
    assert_eq!(
        recipe.image_url.as_deref(),
        Some("https://example.com/pasta-636x393.jpg")
    );
    assert!(recipe
        .image_srcset
        .starts_with("https://example.com/pasta-312x231.jpg 312w, "));
    assert_eq!(recipe.health_score, Some(65));
    assert_eq!(recipe.tags, vec!["Italian", "main course", "dinner"]);
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.ingredients[0].line, "400g spaghetti");
    assert!(recipe.ingredients.iter().all(|row| !row.excluded));

    let nutrition = recipe.nutrition.unwrap();
    assert!(!nutrition.has_exclusions);
    assert_eq!(nutrition.main_amount("Calories"), Some(550.0));
    assert_eq!(nutrition.main_amount("Carbs"), Some(65.0));
    assert_eq!(nutrition.detailed.len(), 1);
    assert_eq!(nutrition.detailed[0].label, "Sodium");
}

#[test]
fn toggling_ingredient_recomputes_nutrition_without_fetch() {
    init_logging();
    let state = loaded();

    let (mut state, effects) = update(state, Msg::IngredientToggled(1));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert!(state.exclusions().contains(1));

    let recipe = state.view().detail.unwrap().recipe.unwrap();
    assert!(recipe.ingredients[0].excluded);
    let nutrition = recipe.nutrition.unwrap();
    assert!(nutrition.has_exclusions);
    assert_eq!(nutrition.main_amount("Calories"), Some(200.0));

    let (state, _) = update(state, Msg::IngredientToggled(1));
    assert!(state.exclusions().is_empty());
    let nutrition = state.view().detail.unwrap().recipe.unwrap().nutrition.unwrap();
    assert_eq!(nutrition.main_amount("Calories"), Some(550.0));
}

#[test]
fn unknown_ingredient_toggle_is_ignored() {
    init_logging();
    let mut state = loaded();
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::IngredientToggled(99));
    assert!(state.exclusions().is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn exclusions_reset_when_recipe_changes() {
    init_logging();
    let state = loaded();
    let (state, _) = update(state, Msg::IngredientToggled(2));
    let (state, _) = update(state, Msg::IngredientToggled(3));
    assert_eq!(state.exclusions().len(), 2);

    let (state, effects) = update(state, Msg::RecipeOpened(2));
    assert_eq!(effects, vec![Effect::LoadRecipe { id: 2 }]);
    assert!(state.exclusions().is_empty());
    // The old recipe is not shown while the new one loads.
    assert!(state.view().detail.unwrap().recipe.is_none());
}

#[test]
fn reopening_same_recipe_keeps_state() {
    init_logging();
    let state = loaded();
    let (state, _) = update(state, Msg::IngredientToggled(2));
    let (state, _) = update(state, Msg::BackToSearch);
    assert_eq!(state.route(), Route::Home);
    assert!(state.view().detail.is_none());

    let (state, effects) = update(state, Msg::RecipeOpened(1));
    assert!(effects.is_empty());
    assert_eq!(state.route(), Route::Recipe(1));
    assert!(state.exclusions().contains(2));
}

#[test]
fn not_found_shows_server_message_and_retry_reloads() {
    init_logging();
    let (state, _) = opened(999);
    let failure = FetchFailure::new("http status 404")
        .with_server_message("Recipe not found with id: 999")
        .not_found();
    let (state, _) = update(state, Msg::RecipeLoaded(Err(failure)));

    let detail = state.view().detail.unwrap();
    assert_eq!(detail.error.as_deref(), Some("Recipe not found with id: 999"));
    assert!(detail.recipe.is_none());

    let (state, effects) = update(state, Msg::RecipeRetried);
    assert_eq!(effects, vec![Effect::LoadRecipe { id: 999 }]);
    assert!(state.recipe().is_pending());
}

#[test]
fn failure_without_message_uses_fallback() {
    init_logging();
    let (state, _) = opened(5);
    let (state, _) = update(state, Msg::RecipeLoaded(Err(FetchFailure::new("network"))));
    assert_eq!(
        state.recipe(),
        &RequestState::Failed(RECIPE_FAILED_MESSAGE.to_string())
    );

    // A failed recipe is fetched again when reopened.
    let (state, _) = update(state, Msg::BackToSearch);
    let (_state, effects) = update(state, Msg::RecipeOpened(5));
    assert_eq!(effects, vec![Effect::LoadRecipe { id: 5 }]);
}

#[test]
fn retry_keeps_loaded_recipe_visible() {
    init_logging();
    let state = loaded();
    let (state, _) = update(state, Msg::RecipeRetried);
    let detail = state.view().detail.unwrap();
    assert!(detail.updating);
    assert!(!detail.loading);
    assert!(detail.recipe.is_some());
}

#[test]
fn clearing_exclusions_restores_totals() {
    init_logging();
    let state = loaded();
    let (state, _) = update(state, Msg::IngredientToggled(1));
    let (mut state, _) = update(state, Msg::ExclusionsCleared);
    assert!(state.consume_dirty());
    assert!(state.exclusions().is_empty());

    let (mut state, _) = update(state, Msg::ExclusionsCleared);
    assert!(!state.consume_dirty());
}
