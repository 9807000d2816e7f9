#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Diet,
    Cuisine,
    DishType,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [FilterKind::Diet, FilterKind::Cuisine, FilterKind::DishType];

    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Diet => "Diet",
            FilterKind::Cuisine => "Cuisine",
            FilterKind::DishType => "Meal Type",
        }
    }

    pub fn options(self) -> &'static [FilterOption] {
        match self {
            FilterKind::Diet => DIET_OPTIONS,
            FilterKind::Cuisine => CUISINE_OPTIONS,
            FilterKind::DishType => TYPE_OPTIONS,
        }
    }

    /// Match user input against the option values or labels, ignoring case.
    pub fn find_option(self, input: &str) -> Option<&'static FilterOption> {
        let input = input.trim();
        self.options().iter().find(|option| {
            option.value.eq_ignore_ascii_case(input) || option.label.eq_ignore_ascii_case(input)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> FilterOption {
    FilterOption { value, label }
}

pub const DIET_OPTIONS: &[FilterOption] = &[
    opt("vegetarian", "Vegetarian"),
    opt("vegan", "Vegan"),
    opt("gluten free", "Gluten Free"),
    opt("ketogenic", "Ketogenic"),
    opt("paleo", "Paleo"),
    opt("pescetarian", "Pescetarian"),
];

pub const CUISINE_OPTIONS: &[FilterOption] = &[
    opt("african", "African"),
    opt("american", "American"),
    opt("british", "British"),
    opt("chinese", "Chinese"),
    opt("french", "French"),
    opt("greek", "Greek"),
    opt("indian", "Indian"),
    opt("italian", "Italian"),
    opt("japanese", "Japanese"),
    opt("korean", "Korean"),
    opt("mediterranean", "Mediterranean"),
    opt("mexican", "Mexican"),
    opt("middle eastern", "Middle Eastern"),
    opt("thai", "Thai"),
    opt("vietnamese", "Vietnamese"),
];

pub const TYPE_OPTIONS: &[FilterOption] = &[
    opt("main course", "Main Course"),
    opt("side dish", "Side Dish"),
    opt("dessert", "Dessert"),
    opt("appetizer", "Appetizer"),
    opt("salad", "Salad"),
    opt("bread", "Bread"),
    opt("breakfast", "Breakfast"),
    opt("soup", "Soup"),
    opt("beverage", "Beverage"),
    opt("sauce", "Sauce"),
    opt("snack", "Snack"),
];
