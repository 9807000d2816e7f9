use url::form_urlencoded;

use crate::filters::FilterKind;
use crate::pagination::{page_offset, RESULTS_PER_PAGE};

/// Search inputs owned by the home page and mirrored into the location
/// query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub diet: Option<String>,
    pub cuisine: Option<String>,
    pub dish_type: Option<String>,
    /// 1-based page number.
    pub page: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            diet: None,
            cuisine: None,
            dish_type: None,
            page: 1,
        }
    }
}

/// Wire-level request handed to the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub diet: Option<String>,
    pub cuisine: Option<String>,
    pub dish_type: Option<String>,
    pub offset: u32,
    pub number: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            diet: None,
            cuisine: None,
            dish_type: None,
            offset: 0,
            number: RESULTS_PER_PAGE,
        }
    }
}

impl SearchParams {
    pub fn filter(&self, kind: FilterKind) -> Option<&str> {
        match kind {
            FilterKind::Diet => self.diet.as_deref(),
            FilterKind::Cuisine => self.cuisine.as_deref(),
            FilterKind::DishType => self.dish_type.as_deref(),
        }
    }

    /// Sets a filter; blank values clear it.
    pub fn set_filter(&mut self, kind: FilterKind, value: Option<String>) {
        let value = value.filter(|v| !v.trim().is_empty());
        match kind {
            FilterKind::Diet => self.diet = value,
            FilterKind::Cuisine => self.cuisine = value,
            FilterKind::DishType => self.dish_type = value,
        }
    }

    pub fn has_active_filters(&self) -> bool {
        FilterKind::ALL.iter().any(|kind| self.filter(*kind).is_some())
    }

    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            query: self.query.clone(),
            diet: self.diet.clone(),
            cuisine: self.cuisine.clone(),
            dish_type: self.dish_type.clone(),
            offset: page_offset(self.page),
            number: RESULTS_PER_PAGE,
        }
    }

    /// Encode as a location query string (`query=..&page=..&diet=..`).
    ///
    /// Page 1 and unset filters are omitted.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("query", &self.query);
        if self.page > 1 {
            serializer.append_pair("page", &self.page.to_string());
        }
        for (key, value) in [
            ("diet", &self.diet),
            ("cuisine", &self.cuisine),
            ("type", &self.dish_type),
        ] {
            if let Some(value) = value {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// Decode a location query string. A leading `?` is accepted.
    ///
    /// Returns `None` when no `query` key is present, meaning the location
    /// carries no search to restore. Unparsable or zero pages fall back to 1.
    pub fn from_query_string(input: &str) -> Option<Self> {
        let input = input.strip_prefix('?').unwrap_or(input);
        let mut params = SearchParams::default();
        let mut has_query = false;
        for (key, value) in form_urlencoded::parse(input.as_bytes()) {
            match key.as_ref() {
                "query" => {
                    params.query = value.into_owned();
                    has_query = true;
                }
                "page" => params.page = value.parse().ok().filter(|p| *p > 0).unwrap_or(1),
                "diet" => params.set_filter(FilterKind::Diet, Some(value.into_owned())),
                "cuisine" => params.set_filter(FilterKind::Cuisine, Some(value.into_owned())),
                "type" => params.set_filter(FilterKind::DishType, Some(value.into_owned())),
                _ => {}
            }
        }
        has_query.then_some(params)
    }
}
