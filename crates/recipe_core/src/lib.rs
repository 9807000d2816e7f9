//! Recipe core: data model, pure state machine and view-model helpers.
mod effect;
mod filters;
mod image;
mod model;
mod msg;
mod nutrition;
mod pagination;
mod search_params;
mod state;
mod theme;
mod update;
mod view_model;

pub use effect::Effect;
pub use filters::{FilterKind, FilterOption, CUISINE_OPTIONS, DIET_OPTIONS, TYPE_OPTIONS};
pub use image::{image_srcset, resolve_image_url, ImageSize};
pub use model::{
    CaloricBreakdown, ExtendedIngredient, IngredientId, IngredientNutrition, Nutrient, Nutrition,
    RecipeDetail, RecipeId, RecipeSummary, SearchPage, Suggestion, WeightPerServing,
};
pub use msg::{FetchFailure, Msg};
pub use nutrition::{adjust_nutrition, ExclusionSet};
pub use pagination::{page_offset, total_pages, PageItem, Pagination, RESULTS_PER_PAGE};
pub use search_params::{SearchParams, SearchRequest};
pub use state::{
    AppState, RequestState, Route, MIN_SUGGESTION_QUERY_CHARS, RECIPE_FAILED_MESSAGE,
    SEARCH_FAILED_MESSAGE,
};
pub use theme::resolve_dark_mode;
pub use update::update;
pub use view_model::{
    AppViewModel, DetailView, IngredientRowView, NutrientView, NutritionView, RecipeCardView,
    RecipeDetailView, SearchView, SuggestionsView, DETAILED_NUTRIENT_LIMIT,
};
