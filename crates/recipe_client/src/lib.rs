//! Recipe client: HTTP access to the recipe API and the background engine.
mod client;
mod engine;
mod types;

pub use client::{
    ClientSettings, RecipeApi, ReqwestRecipeClient, DEFAULT_API_URL, DEFAULT_SUGGESTION_LIMIT,
};
pub use engine::{EngineHandle, EngineSettings};
pub use types::{ApiError, EngineEvent};
