use std::time::Duration;

use futures_util::StreamExt;
use recipe_core::{
    RecipeDetail, RecipeId, SearchPage, SearchRequest, Suggestion, MIN_SUGGESTION_QUERY_CHARS,
};
use recipe_logging::{recipe_debug, recipe_error};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::ApiError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Suggestions requested per autocomplete lookup.
pub const DEFAULT_SUGGESTION_LIMIT: u32 = 5;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait RecipeApi: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, ApiError>;

    async fn recipe(&self, id: RecipeId) -> Result<RecipeDetail, ApiError>;

    /// Server-side exclusion by ingredient name. The client recomputes
    /// nutrition locally instead; this remains for the CLI.
    async fn recipe_with_exclusions(
        &self,
        id: RecipeId,
        ingredients: &[String],
    ) -> Result<RecipeDetail, ApiError>;

    /// Returns no suggestions, without a request, for queries shorter than
    /// two characters.
    async fn autocomplete(&self, query: &str, limit: u32) -> Result<Vec<Suggestion>, ApiError>;

    async fn health_check(&self) -> Result<String, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestRecipeClient {
    settings: ClientSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestRecipeClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {err}", settings.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(settings.base_url.clone()));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let bytes = self.get(url).await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            let err = ApiError::Decode(err.to_string());
            recipe_error!("API Error: {}", err);
            err
        })
    }

    async fn get(&self, url: Url) -> Result<Vec<u8>, ApiError> {
        recipe_debug!("API Request: GET {}", url.path());
        let result = self.execute(url).await;
        if let Err(err) = &result {
            match err.server_message() {
                Some(message) => recipe_error!("API Error: {} ({})", message, err),
                None => recipe_error!("API Error: {}", err),
            }
        }
        result
    }

    async fn execute(&self, url: Url) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::TooLarge {
                    max_bytes,
                    actual: Some(content_len),
                });
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ApiError::TooLarge {
                    max_bytes,
                    actual: Some(next_len),
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        if status.is_success() {
            return Ok(bytes);
        }
        let message = server_message(&bytes);
        if status == StatusCode::NOT_FOUND {
            Err(ApiError::NotFound { message })
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait::async_trait]
impl RecipeApi for ReqwestRecipeClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, ApiError> {
        let mut url = self.endpoint(&["recipes", "search"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("query", &request.query)
                .append_pair("offset", &request.offset.to_string())
                .append_pair("number", &request.number.to_string());
            let filters = [
                ("diet", &request.diet),
                ("cuisine", &request.cuisine),
                ("type", &request.dish_type),
            ];
            for (key, value) in filters {
                if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                    query.append_pair(key, value);
                }
            }
        }
        self.get_json(url).await
    }

    async fn recipe(&self, id: RecipeId) -> Result<RecipeDetail, ApiError> {
        let url = self.endpoint(&["recipes", &id.to_string()])?;
        self.get_json(url).await
    }

    async fn recipe_with_exclusions(
        &self,
        id: RecipeId,
        ingredients: &[String],
    ) -> Result<RecipeDetail, ApiError> {
        let mut url = self.endpoint(&["recipes", &id.to_string(), "exclude"])?;
        {
            let mut query = url.query_pairs_mut();
            for ingredient in ingredients {
                query.append_pair("excludeIngredients", ingredient);
            }
        }
        self.get_json(url).await
    }

    async fn autocomplete(&self, query: &str, limit: u32) -> Result<Vec<Suggestion>, ApiError> {
        let query = query.trim();
        if query.chars().count() < MIN_SUGGESTION_QUERY_CHARS {
            return Ok(Vec::new());
        }
        let mut url = self.endpoint(&["recipes", "autocomplete"])?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("number", &limit.to_string());
        self.get_json(url).await
    }

    async fn health_check(&self) -> Result<String, ApiError> {
        let url = self.endpoint(&["recipes", "health"])?;
        let bytes = self.get(url).await?;
        Ok(String::from_utf8_lossy(&bytes).trim().to_string())
    }
}

fn server_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ReqwestRecipeClient {
        ReqwestRecipeClient::new(ClientSettings {
            base_url: base_url.to_string(),
            ..ClientSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        let url = client("http://localhost:8080/api").endpoint(&["recipes", "search"]);
        assert_eq!(url.unwrap().as_str(), "http://localhost:8080/api/recipes/search");

        let url = client("http://localhost:8080/api/").endpoint(&["recipes", "7"]);
        assert_eq!(url.unwrap().as_str(), "http://localhost:8080/api/recipes/7");
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = ReqwestRecipeClient::new(ClientSettings {
            base_url: "not a url".into(),
            ..ClientSettings::default()
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn server_message_reads_json_error_body() {
        assert_eq!(
            server_message(br#"{"message":"Recipe not found"}"#).as_deref(),
            Some("Recipe not found")
        );
        assert_eq!(server_message(br#"{"message":""}"#), None);
        assert_eq!(server_message(b"Internal Server Error"), None);
    }
}
