//! Client-side nutrition recalculation for excluded ingredients.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

use crate::model::{ExtendedIngredient, IngredientId, IngredientNutrition, Nutrition};

/// Ingredient ids the user removed from the displayed recipe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExclusionSet {
    ids: BTreeSet<IngredientId>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id when absent, remove it when present. Returns whether the id
    /// is excluded afterwards.
    pub fn toggle(&mut self, id: IngredientId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: IngredientId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = IngredientId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<IngredientId> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = IngredientId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Recompute aggregate nutrients with the excluded ingredients removed.
///
/// Amounts are clamped at zero and rounded to two decimals. The percent of
/// daily needs is rescaled by the same ratio as the amount. An empty
/// exclusion set returns the input untouched.
pub fn adjust_nutrition<'a>(
    nutrition: &'a Nutrition,
    ingredients: &[ExtendedIngredient],
    excluded: &ExclusionSet,
) -> Cow<'a, Nutrition> {
    if excluded.is_empty() {
        return Cow::Borrowed(nutrition);
    }

    let subtractions = excluded_totals(nutrition, ingredients, excluded);

    let mut adjusted = nutrition.clone();
    for nutrient in &mut adjusted.nutrients {
        let original = finite_or_zero(nutrient.amount);
        let subtract = subtractions
            .get(&nutrient.name.to_lowercase())
            .copied()
            .unwrap_or(0.0);
        let amount = round2((original - subtract).max(0.0));
        nutrient.percent_of_daily_needs = nutrient.percent_of_daily_needs.map(|percent| {
            if original != 0.0 && amount != original {
                round2(percent * amount / original)
            } else {
                round2(percent)
            }
        });
        nutrient.amount = amount;
    }
    Cow::Owned(adjusted)
}

/// Sum of nutrient amounts per lower-cased nutrient name across all excluded
/// ingredients.
fn excluded_totals(
    nutrition: &Nutrition,
    ingredients: &[ExtendedIngredient],
    excluded: &ExclusionSet,
) -> HashMap<String, f64> {
    let by_id: HashMap<IngredientId, &IngredientNutrition> = nutrition
        .ingredients
        .iter()
        .filter_map(|entry| entry.id.map(|id| (id, entry)))
        .collect();
    let by_name: HashMap<String, &IngredientNutrition> = nutrition
        .ingredients
        .iter()
        .map(|entry| (entry.name.to_lowercase(), entry))
        .collect();

    let mut totals: HashMap<String, f64> = HashMap::new();
    for id in excluded.iter() {
        let breakdown = by_id.get(&id).copied().or_else(|| {
            ingredients
                .iter()
                .find(|ing| ing.id == id)
                .and_then(|ing| by_name.get(&ing.name.to_lowercase()).copied())
        });
        let Some(breakdown) = breakdown else {
            continue;
        };
        for nutrient in &breakdown.nutrients {
            *totals.entry(nutrient.name.to_lowercase()).or_insert(0.0) +=
                finite_or_zero(nutrient.amount);
        }
    }
    totals
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Nutrient;

    fn nutrient(name: &str, amount: f64, percent: Option<f64>) -> Nutrient {
        Nutrient {
            name: name.into(),
            amount,
            unit: "g".into(),
            percent_of_daily_needs: percent,
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut set = ExclusionSet::new();
        assert!(set.toggle(4));
        assert!(set.contains(4));
        assert!(!set.toggle(4));
        assert!(set.is_empty());
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(10.004), 10.0);
    }

    #[test]
    fn non_finite_contributions_count_as_zero() {
        let nutrition = Nutrition {
            nutrients: vec![nutrient("Fat", 10.0, Some(20.0))],
            ingredients: vec![IngredientNutrition {
                id: Some(1),
                name: "oil".into(),
                nutrients: vec![nutrient("Fat", f64::NAN, None)],
                ..IngredientNutrition::default()
            }],
            ..Nutrition::default()
        };
        let excluded: ExclusionSet = [1].into_iter().collect();
        let adjusted = adjust_nutrition(&nutrition, &[], &excluded);
        assert_eq!(adjusted.nutrients[0].amount, 10.0);
        assert_eq!(adjusted.nutrients[0].percent_of_daily_needs, Some(20.0));
    }
}
