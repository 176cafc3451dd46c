use serde::{Deserialize, Serialize};

/// Body of `POST /chat/completions`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateChatCompletionRequest {
    /// Model ID used to generate the response, like `gpt-4o-mini`.
    pub model: String,
    /// The messages comprising the conversation so far.
    pub messages: Vec<ChatCompletionRequestMessage>,
    /// The maximum number of tokens that can be generated in the chat
    /// completion.
    pub max_tokens: u32,
    /// What sampling temperature to use, between 0 and 2.
    pub temperature: f64,
    /// An alternative to sampling with temperature, called nucleus sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatCompletionRequestMessage {
    pub role: String,
    pub content: String,
}
