use crate::image::{image_srcset, resolve_image_url, ImageSize};
use crate::model::{IngredientId, Nutrient, RecipeDetail, RecipeId, RecipeSummary, Suggestion};
use crate::nutrition::adjust_nutrition;
use crate::pagination::{total_pages, PageItem, Pagination};
use crate::state::{AppState, Route};
use crate::SearchParams;

/// Nutrients promoted to the headline tiles, with their display labels.
const MAIN_NUTRIENTS: [(&str, &str, &str); 4] = [
    ("Calories", "Calories", "kcal"),
    ("Protein", "Protein", "g"),
    ("Carbohydrates", "Carbs", "g"),
    ("Fat", "Fat", "g"),
];

/// Cap on the detailed breakdown list.
pub const DETAILED_NUTRIENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub route: Route,
    pub dark_mode: bool,
    pub search: SearchView,
    pub detail: Option<DetailView>,
    pub suggestions: SuggestionsView,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchView {
    pub params: SearchParams,
    pub has_searched: bool,
    pub has_active_filters: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub results: Vec<RecipeCardView>,
    pub total_results: u32,
    pub pagination: Option<Vec<PageItem>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCardView {
    pub id: RecipeId,
    pub title: String,
    pub image_url: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub recipe_id: RecipeId,
    /// Nothing to show yet.
    pub loading: bool,
    /// Showing the previous data while a refresh is in flight.
    pub updating: bool,
    pub error: Option<String>,
    pub recipe: Option<RecipeDetailView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetailView {
    pub id: RecipeId,
    pub title: String,
    pub image_url: Option<String>,
    /// Responsive variants of the image, empty when there is none.
    pub image_srcset: String,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub health_score: Option<i32>,
    pub diet_labels: Vec<&'static str>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub instructions: Option<String>,
    pub source_url: Option<String>,
    pub ingredients: Vec<IngredientRowView>,
    pub nutrition: Option<NutritionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRowView {
    pub id: IngredientId,
    pub line: String,
    pub excluded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NutritionView {
    pub has_exclusions: bool,
    pub main: Vec<NutrientView>,
    pub detailed: Vec<NutrientView>,
}

impl NutritionView {
    pub fn main_amount(&self, label: &str) -> Option<f64> {
        self.main
            .iter()
            .find(|n| n.label.eq_ignore_ascii_case(label))
            .map(|n| n.amount)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NutrientView {
    pub label: String,
    pub amount: f64,
    pub unit: String,
    pub percent_of_daily_needs: Option<f64>,
}

impl From<&Nutrient> for NutrientView {
    fn from(nutrient: &Nutrient) -> Self {
        Self {
            label: nutrient.name.clone(),
            amount: nutrient.amount,
            unit: nutrient.unit.clone(),
            percent_of_daily_needs: nutrient.percent_of_daily_needs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuggestionsView {
    pub input: String,
    pub open: bool,
    pub items: Vec<Suggestion>,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            route: self.route,
            dark_mode: self.dark_mode,
            search: self.search_view(),
            detail: self.detail_view(),
            suggestions: SuggestionsView {
                input: self.suggestions.input.clone(),
                open: self.suggestions.open,
                items: if self.suggestions.open {
                    self.suggestions.items.clone()
                } else {
                    Vec::new()
                },
            },
        }
    }

    fn search_view(&self) -> SearchView {
        let search = &self.search;
        let page = search.results.data();
        let total_results = page.map_or(0, |p| p.total_results);
        SearchView {
            params: search.params.clone(),
            has_searched: search.has_searched,
            has_active_filters: search.params.has_active_filters(),
            loading: search.results.is_pending(),
            error: search.results.error().map(str::to_string),
            results: page
                .map(|p| p.results.iter().map(card_view).collect())
                .unwrap_or_default(),
            total_results,
            pagination: Pagination::new(search.params.page, total_pages(total_results)).items(),
        }
    }

    fn detail_view(&self) -> Option<DetailView> {
        let recipe_id = match self.route {
            Route::Recipe(id) => id,
            Route::Home => return None,
        };
        let detail = &self.detail;
        let recipe = detail.recipe.data();
        Some(DetailView {
            recipe_id,
            loading: detail.recipe.is_pending() && recipe.is_none(),
            updating: detail.recipe.is_pending() && recipe.is_some(),
            error: detail.recipe.error().map(str::to_string),
            recipe: recipe.map(|r| self.recipe_view(r)),
        })
    }

    fn recipe_view(&self, recipe: &RecipeDetail) -> RecipeDetailView {
        let exclusions = &self.detail.exclusions;
        let nutrition = recipe.nutrition.as_ref().map(|nutrition| {
            let adjusted = adjust_nutrition(nutrition, &recipe.extended_ingredients, exclusions);
            let main = MAIN_NUTRIENTS
                .iter()
                .map(|(name, label, unit)| {
                    let found = adjusted.nutrient(name);
                    NutrientView {
                        label: (*label).to_string(),
                        amount: found.map_or(0.0, |n| n.amount),
                        unit: (*unit).to_string(),
                        percent_of_daily_needs: found.and_then(|n| n.percent_of_daily_needs),
                    }
                })
                .collect();
            let detailed = adjusted
                .nutrients
                .iter()
                .filter(|n| {
                    !MAIN_NUTRIENTS
                        .iter()
                        .any(|(name, _, _)| n.name.eq_ignore_ascii_case(name))
                })
                .take(DETAILED_NUTRIENT_LIMIT)
                .map(NutrientView::from)
                .collect();
            NutritionView {
                has_exclusions: !exclusions.is_empty(),
                main,
                detailed,
            }
        });

        RecipeDetailView {
            id: recipe.id,
            title: recipe.title.clone(),
            image_url: resolve_image_url(recipe.image.as_deref(), ImageSize::Full.token()),
            image_srcset: image_srcset(recipe.image.as_deref()),
            ready_in_minutes: recipe.ready_in_minutes.filter(|m| *m > 0),
            servings: recipe.servings.filter(|s| *s > 0),
            health_score: recipe.health_score.filter(|s| *s > 0),
            diet_labels: recipe.diet_labels(),
            tags: recipe
                .cuisines
                .iter()
                .chain(recipe.dish_types.iter())
                .cloned()
                .collect(),
            summary: recipe.summary.clone().filter(|s| !s.is_empty()),
            instructions: recipe.instructions.clone().filter(|s| !s.is_empty()),
            source_url: recipe.source_url.clone(),
            ingredients: recipe
                .extended_ingredients
                .iter()
                .map(|ingredient| IngredientRowView {
                    id: ingredient.id,
                    line: ingredient.display_line(),
                    excluded: exclusions.contains(ingredient.id),
                })
                .collect(),
            nutrition,
        }
    }
}

fn card_view(summary: &RecipeSummary) -> RecipeCardView {
    RecipeCardView {
        id: summary.id,
        title: summary.title.clone(),
        image_url: resolve_image_url(summary.image.as_deref(), ImageSize::Medium.token()),
        ready_in_minutes: summary.ready_in_minutes,
        servings: summary.servings,
    }
}

