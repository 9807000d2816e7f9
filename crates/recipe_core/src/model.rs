//! Recipe records as served by the recipe API.
//!
//! Every optional attribute carries a serde default so partially populated
//! provider payloads still decode.

use serde::{Deserialize, Serialize};

pub type RecipeId = u64;
pub type IngredientId = u64;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub image: Option<String>,
    pub image_type: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchPage {
    pub results: Vec<RecipeSummary>,
    pub offset: u32,
    pub number: u32,
    pub total_results: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeDetail {
    pub id: RecipeId,
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub health_score: Option<i32>,
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
    pub very_healthy: bool,
    pub cheap: bool,
    pub very_popular: bool,
    pub summary: Option<String>,
    pub instructions: Option<String>,
    pub source_url: Option<String>,
    pub cuisines: Vec<String>,
    pub dish_types: Vec<String>,
    pub diets: Vec<String>,
    pub extended_ingredients: Vec<ExtendedIngredient>,
    pub nutrition: Option<Nutrition>,
    pub price_per_serving: Option<f64>,
}

impl RecipeDetail {
    /// Labels for the diet flags that are set, in display order.
    pub fn diet_labels(&self) -> Vec<&'static str> {
        [
            (self.vegetarian, "Vegetarian"),
            (self.vegan, "Vegan"),
            (self.gluten_free, "Gluten Free"),
            (self.dairy_free, "Dairy Free"),
            (self.very_healthy, "Very Healthy"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }

    pub fn ingredient(&self, id: IngredientId) -> Option<&ExtendedIngredient> {
        self.extended_ingredients.iter().find(|ing| ing.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtendedIngredient {
    pub id: IngredientId,
    pub name: String,
    pub original: Option<String>,
    pub original_name: Option<String>,
    pub amount: f64,
    pub unit: String,
    pub image: Option<String>,
    pub aisle: Option<String>,
    pub consistency: Option<String>,
}

impl ExtendedIngredient {
    /// The free-text line as written in the recipe, or a line rebuilt from
    /// amount, unit and name.
    pub fn display_line(&self) -> String {
        match self.original.as_deref() {
            Some(original) if !original.trim().is_empty() => original.to_string(),
            _ => format!("{} {} {}", format_amount(self.amount), self.unit, self.name)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount}")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Nutrition {
    pub nutrients: Vec<Nutrient>,
    /// Per-ingredient breakdown; only present in the richer payload.
    pub ingredients: Vec<IngredientNutrition>,
    pub caloric_breakdown: Option<CaloricBreakdown>,
    pub weight_per_serving: Option<WeightPerServing>,
}

impl Nutrition {
    /// Case-insensitive lookup of an aggregate nutrient.
    pub fn nutrient(&self, name: &str) -> Option<&Nutrient> {
        self.nutrients
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Nutrient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub percent_of_daily_needs: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngredientNutrition {
    pub id: Option<IngredientId>,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub nutrients: Vec<Nutrient>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaloricBreakdown {
    pub percent_protein: f64,
    pub percent_fat: f64,
    pub percent_carbs: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeightPerServing {
    pub amount: f64,
    pub unit: String,
}

/// Autocomplete entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Suggestion {
    pub id: RecipeId,
    pub title: String,
    pub image_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_decodes_with_missing_fields() {
        let detail: RecipeDetail =
            serde_json::from_str(r#"{"id": 7, "title": "Toast", "glutenFree": true}"#).unwrap();
        assert_eq!(detail.id, 7);
        assert!(detail.gluten_free);
        assert!(detail.extended_ingredients.is_empty());
        assert!(detail.nutrition.is_none());
        assert_eq!(detail.diet_labels(), vec!["Gluten Free"]);
    }

    #[test]
    fn display_line_prefers_original_text() {
        let ingredient = ExtendedIngredient {
            name: "pasta".into(),
            original: Some("400g spaghetti".into()),
            amount: 400.0,
            unit: "g".into(),
            ..ExtendedIngredient::default()
        };
        assert_eq!(ingredient.display_line(), "400g spaghetti");
    }

    #[test]
    fn display_line_rebuilds_without_original() {
        let ingredient = ExtendedIngredient {
            name: "eggs".into(),
            amount: 4.0,
            ..ExtendedIngredient::default()
        };
        assert_eq!(ingredient.display_line(), "4 eggs");

        let ingredient = ExtendedIngredient {
            name: "milk".into(),
            amount: 1.5,
            unit: "cups".into(),
            ..ExtendedIngredient::default()
        };
        assert_eq!(ingredient.display_line(), "1.5 cups milk");
    }

    #[test]
    fn nutrient_lookup_ignores_case() {
        let nutrition = Nutrition {
            nutrients: vec![Nutrient {
                name: "Calories".into(),
                amount: 10.0,
                unit: "kcal".into(),
                percent_of_daily_needs: None,
            }],
            ..Nutrition::default()
        };
        assert_eq!(nutrition.nutrient("calories").map(|n| n.amount), Some(10.0));
        assert!(nutrition.nutrient("fat").is_none());
    }
}
