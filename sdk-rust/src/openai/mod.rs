mod chat_api;
mod chat_model;

pub use chat_model::{
    OpenAIChatModel, OpenAIChatModelOptions, OPENAI_API_KEY_ENV, OPENAI_DEFAULT_MODEL,
};
