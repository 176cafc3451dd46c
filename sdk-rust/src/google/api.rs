use serde::{Deserialize, Serialize};

/// Body of `models.generateContent`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Content of the request. Always a single user turn here.
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// Contains the multi-part content of a message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Content {
    /// The producer of the content. Either 'user' or 'model'.
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Part {
    pub text: String,
}

/// Generation config for `generateContent`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Controls the randomness of predictions.
    pub temperature: f64,
    /// Maximum number of tokens that can be generated in the response.
    pub max_output_tokens: u32,
    /// Tokens are selected from the most to least probable until the sum of
    /// their probabilities equals this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}
