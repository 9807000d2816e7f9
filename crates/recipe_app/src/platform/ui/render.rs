use recipe_core::{
    AppViewModel, DetailView, FilterKind, NutrientView, PageItem, RecipeDetailView, SearchView,
    SuggestionsView,
};
use scraper::Html;

/// Renders the whole view as terminal lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let theme = if view.dark_mode { "dark" } else { "light" };
    let mut lines = vec![format!("== Recipe Explorer ({theme} theme) ==")];

    match &view.detail {
        Some(detail) => render_detail(detail, &mut lines),
        None => render_search(&view.search, &mut lines),
    }
    render_suggestions(&view.suggestions, &mut lines);
    lines
}

fn render_search(search: &SearchView, lines: &mut Vec<String>) {
    let params = &search.params;
    let mut header = format!("Search: \"{}\"", params.query);
    for kind in FilterKind::ALL {
        if let Some(value) = params.filter(kind) {
            header.push_str(&format!(" | {}: {}", kind.label(), value));
        }
    }
    lines.push(header);

    if !search.has_searched {
        lines.push("Type a search to find recipes.".to_string());
        return;
    }
    if search.loading {
        lines.push("Searching...".to_string());
    }
    if let Some(error) = &search.error {
        lines.push(format!("Error: {error} (retry to try again)"));
        return;
    }
    if search.results.is_empty() {
        if !search.loading {
            lines.push("No recipes found. Try another search or fewer filters.".to_string());
        }
        return;
    }

    lines.push(format!("{} recipes found", search.total_results));
    for card in &search.results {
        let mut line = format!("  [{}] {}", card.id, card.title);
        if let Some(minutes) = card.ready_in_minutes {
            line.push_str(&format!(" | {minutes} min"));
        }
        if let Some(servings) = card.servings {
            line.push_str(&format!(" | {servings} servings"));
        }
        lines.push(line);
        if let Some(url) = &card.image_url {
            lines.push(format!("      {url}"));
        }
    }
    if let Some(items) = &search.pagination {
        lines.push(format!("Pages: {}", render_pagination(items)));
    }
}

pub fn render_pagination(items: &[PageItem]) -> String {
    items
        .iter()
        .map(|item| match *item {
            PageItem::Previous { enabled, .. } => String::from(if enabled { "<" } else { "-" }),
            PageItem::Next { enabled, .. } => String::from(if enabled { ">" } else { "-" }),
            PageItem::Page { number, current } if current => format!("[{number}]"),
            PageItem::Page { number, .. } => number.to_string(),
            PageItem::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_detail(detail: &DetailView, lines: &mut Vec<String>) {
    if detail.loading {
        lines.push(format!("Loading recipe {}...", detail.recipe_id));
    }
    if let Some(error) = &detail.error {
        lines.push(format!("Error: {error} (retry to try again, back to return)"));
        return;
    }
    let Some(recipe) = &detail.recipe else {
        return;
    };
    if detail.updating {
        lines.push("Refreshing...".to_string());
    }
    render_recipe(recipe, lines);
}

fn render_recipe(recipe: &RecipeDetailView, lines: &mut Vec<String>) {
    lines.push(format!("# {}", recipe.title));
    if let Some(url) = &recipe.image_url {
        lines.push(url.clone());
    }
    if !recipe.image_srcset.is_empty() {
        lines.push(format!("Sizes: {}", recipe.image_srcset));
    }

    let mut meta = Vec::new();
    if let Some(minutes) = recipe.ready_in_minutes {
        meta.push(format!("Ready in {minutes} min"));
    }
    if let Some(servings) = recipe.servings {
        meta.push(format!("Serves {servings}"));
    }
    if let Some(score) = recipe.health_score {
        meta.push(format!("Health score {score}"));
    }
    if !meta.is_empty() {
        lines.push(meta.join(" | "));
    }
    if !recipe.diet_labels.is_empty() {
        lines.push(format!("Diets: {}", recipe.diet_labels.join(", ")));
    }
    if !recipe.tags.is_empty() {
        lines.push(format!("Tags: {}", recipe.tags.join(", ")));
    }
    if let Some(summary) = &recipe.summary {
        lines.push(String::new());
        lines.push(strip_tags(summary));
    }

    lines.push(String::new());
    lines.push("Ingredients (toggle <id> to exclude):".to_string());
    for row in &recipe.ingredients {
        let mark = if row.excluded { "x" } else { " " };
        lines.push(format!("  [{mark}] {:>6}  {}", row.id, row.line));
    }

    if let Some(nutrition) = &recipe.nutrition {
        lines.push(String::new());
        if nutrition.has_exclusions {
            lines.push("Nutrition per serving (adjusted for excluded ingredients):".to_string());
        } else {
            lines.push("Nutrition per serving:".to_string());
        }
        let tiles: Vec<String> = nutrition.main.iter().map(nutrient_text).collect();
        lines.push(format!("  {}", tiles.join(" | ")));
        for nutrient in &nutrition.detailed {
            lines.push(format!("  - {}", nutrient_text(nutrient)));
        }
    }

    if let Some(instructions) = &recipe.instructions {
        lines.push(String::new());
        lines.push("Instructions:".to_string());
        lines.push(strip_tags(instructions));
    }
    if let Some(source) = &recipe.source_url {
        lines.push(format!("Source: {source}"));
    }
}

fn nutrient_text(nutrient: &NutrientView) -> String {
    let amount = format!("{}: {:.0}{}", nutrient.label, nutrient.amount, nutrient.unit);
    match nutrient.percent_of_daily_needs {
        Some(percent) => format!("{amount} ({percent:.0}%)"),
        None => amount,
    }
}

fn render_suggestions(suggestions: &SuggestionsView, lines: &mut Vec<String>) {
    if !suggestions.open {
        return;
    }
    lines.push(format!("Suggestions for \"{}\":", suggestions.input.trim()));
    for (index, item) in suggestions.items.iter().enumerate() {
        lines.push(format!("  {}) {}", index + 1, item.title));
    }
}

/// Lists every filter value.
pub fn render_filters() -> Vec<String> {
    let mut lines = Vec::new();
    for kind in FilterKind::ALL {
        lines.push(format!("{}:", kind.label()));
        for option in kind.options() {
            lines.push(format!("  {:<20} {}", option.value, option.label));
        }
    }
    lines
}

/// Visible text of provider HTML, with entities decoded and whitespace collapsed.
fn strip_tags(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
