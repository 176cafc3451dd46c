mod api;
mod model;

pub use model::{GeminiModel, GeminiModelOptions, GEMINI_API_KEY_ENV, GEMINI_DEFAULT_MODEL};
