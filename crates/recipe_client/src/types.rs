use recipe_core::{RecipeDetail, RecipeId, SearchPage, Suggestion};

/// Failure of one API call.
///
/// `Display` is the transport-level description; the structured message the
/// server put in a JSON error body is available through [`ApiError::server_message`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound { message: Option<String> },
    #[error("http status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("response too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// `message` field of the server's error body, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { message } | ApiError::Status { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SearchCompleted(Result<SearchPage, ApiError>),
    RecipeLoaded {
        id: RecipeId,
        result: Result<RecipeDetail, ApiError>,
    },
    /// Autocomplete answer for the lookup tagged `generation`.
    SuggestionsLoaded {
        generation: u64,
        result: Result<Vec<Suggestion>, ApiError>,
    },
    HealthChecked(Result<String, ApiError>),
}
