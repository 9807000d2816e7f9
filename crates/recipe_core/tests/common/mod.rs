#![allow(dead_code)]

use recipe_core::{
    ExtendedIngredient, IngredientNutrition, Nutrient, Nutrition, RecipeDetail, RecipeSummary,
    SearchPage,
};

pub fn init_logging() {
    recipe_logging::initialize_for_tests();
}

fn nutrient(name: &str, amount: f64, unit: &str, percent: Option<f64>) -> Nutrient {
    Nutrient {
        name: name.to_string(),
        amount,
        unit: unit.to_string(),
        percent_of_daily_needs: percent,
    }
}

fn ingredient(id: u64, name: &str, original: &str, amount: f64, unit: &str) -> ExtendedIngredient {
    ExtendedIngredient {
        id,
        name: name.to_string(),
        original: Some(original.to_string()),
        amount,
        unit: unit.to_string(),
        ..ExtendedIngredient::default()
    }
}

fn breakdown(id: Option<u64>, name: &str, values: [f64; 4]) -> IngredientNutrition {
    let [calories, protein, carbs, fat] = values;
    IngredientNutrition {
        id,
        name: name.to_string(),
        amount: 0.0,
        unit: String::new(),
        nutrients: vec![
            nutrient("Calories", calories, "kcal", None),
            nutrient("Protein", protein, "g", None),
            nutrient("Carbohydrates", carbs, "g", None),
            nutrient("Fat", fat, "g", None),
        ],
    }
}

/// Pasta carbonara with per-ingredient nutrition: pasta 350 kcal, eggs and
/// parmesan 100 kcal each, 550 kcal in total.
pub fn carbonara() -> RecipeDetail {
    RecipeDetail {
        id: 1,
        title: "Pasta Carbonara".to_string(),
        image: Some("https://example.com/pasta-312x231.jpg".to_string()),
        ready_in_minutes: Some(30),
        servings: Some(4),
        health_score: Some(65),
        summary: Some("A classic Italian pasta dish.".to_string()),
        instructions: Some("Cook pasta, make sauce, combine.".to_string()),
        cuisines: vec!["Italian".to_string()],
        dish_types: vec!["main course".to_string(), "dinner".to_string()],
        extended_ingredients: vec![
            ingredient(1, "pasta", "400g spaghetti", 400.0, "g"),
            ingredient(2, "eggs", "4 large eggs", 4.0, ""),
            ingredient(3, "parmesan", "100g parmesan cheese", 100.0, "g"),
        ],
        nutrition: Some(carbonara_nutrition()),
        ..RecipeDetail::default()
    }
}

pub fn carbonara_nutrition() -> Nutrition {
    Nutrition {
        nutrients: vec![
            nutrient("Calories", 550.0, "kcal", Some(27.5)),
            nutrient("Protein", 25.0, "g", Some(50.0)),
            nutrient("Carbohydrates", 65.0, "g", Some(21.7)),
            nutrient("Fat", 18.0, "g", Some(27.7)),
            nutrient("Sodium", 800.0, "mg", Some(34.8)),
        ],
        ingredients: vec![
            breakdown(Some(1), "pasta", [350.0, 12.0, 60.0, 2.0]),
            breakdown(Some(2), "eggs", [100.0, 8.0, 1.0, 8.0]),
            breakdown(Some(3), "parmesan", [100.0, 5.0, 4.0, 8.0]),
        ],
        ..Nutrition::default()
    }
}

pub fn summary(id: u64, title: &str) -> RecipeSummary {
    RecipeSummary {
        id,
        title: title.to_string(),
        image: Some(format!("https://example.com/{id}-312x231.jpg")),
        ..RecipeSummary::default()
    }
}

pub fn search_page(total_results: u32, titles: &[&str]) -> SearchPage {
    SearchPage {
        results: titles
            .iter()
            .enumerate()
            .map(|(i, title)| summary(i as u64 + 1, title))
            .collect(),
        offset: 0,
        number: 12,
        total_results,
    }
}
