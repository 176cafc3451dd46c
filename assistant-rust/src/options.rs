use crate::ParseOptionError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use study_sdk::GenerationConfig;

pub const DEFAULT_QUESTION_COUNT: u32 = 5;
pub const MIN_QUESTION_COUNT: u32 = 1;
pub const MAX_QUESTION_COUNT: u32 = 50;

/// The study task, which selects the prompt template and option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    ExplainTopic,
    SummarizeNotes,
    GenerateQuiz,
    FreeformChat,
}

impl Mode {
    #[must_use]
    pub fn default_temperature(self) -> f64 {
        match self {
            Self::ExplainTopic => 0.3,
            Self::SummarizeNotes => 0.2,
            Self::GenerateQuiz | Self::FreeformChat => 0.4,
        }
    }

    #[must_use]
    pub fn default_max_output_tokens(self) -> u32 {
        match self {
            Self::ExplainTopic | Self::GenerateQuiz => 1024,
            Self::SummarizeNotes | Self::FreeformChat => 800,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ExplainTopic => "explain",
            Self::SummarizeNotes => "summarize",
            Self::GenerateQuiz => "quiz",
            Self::FreeformChat => "chat",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExplainLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SummaryTone {
    #[default]
    Neutral,
    Simple,
    ExamFocused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// Options for one generation action. Every field is optional; the accessors
/// apply the documented defaults, some of which depend on the [`Mode`].
///
/// # Default Values
/// - `explain_level`: `Beginner`
/// - `summary_tone`: `Neutral`
/// - `question_count`: 5, clamped to `1..=50`
/// - `include_answers`: `true`
/// - `difficulty`: none (the quiz prompt states no difficulty)
/// - `temperature`: [`Mode::default_temperature`]
/// - `max_output_tokens`: [`Mode::default_max_output_tokens`]
/// - `top_p`: none
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    pub explain_level: Option<ExplainLevel>,
    pub summary_tone: Option<SummaryTone>,
    pub question_count: Option<u32>,
    pub include_answers: Option<bool>,
    pub difficulty: Option<Difficulty>,
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
    pub top_p: Option<f64>,
}

impl GenerationOptions {
    #[must_use]
    pub fn explain_level(&self) -> ExplainLevel {
        self.explain_level.unwrap_or_default()
    }

    #[must_use]
    pub fn summary_tone(&self) -> SummaryTone {
        self.summary_tone.unwrap_or_default()
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
            .unwrap_or(DEFAULT_QUESTION_COUNT)
            .clamp(MIN_QUESTION_COUNT, MAX_QUESTION_COUNT)
    }

    #[must_use]
    pub fn include_answers(&self) -> bool {
        self.include_answers.unwrap_or(true)
    }

    /// Resolves sampling parameters for `mode`, filling unset fields with the
    /// mode's defaults.
    #[must_use]
    pub fn generation_config(&self, mode: Mode) -> GenerationConfig {
        GenerationConfig {
            temperature: Some(self.temperature.unwrap_or(mode.default_temperature())),
            max_output_tokens: Some(
                self.max_output_tokens
                    .unwrap_or(mode.default_max_output_tokens()),
            ),
            top_p: self.top_p,
        }
    }
}

fn normalized(value: &str) -> String {
    value
        .trim()
        .to_ascii_lowercase()
        .replace(['-', '_', ' '], "")
}

impl FromStr for Mode {
    type Err = ParseOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalized(value).as_str() {
            "explain" | "explaintopic" => Ok(Self::ExplainTopic),
            "summarize" | "summarise" | "summarizenotes" => Ok(Self::SummarizeNotes),
            "quiz" | "generatequiz" => Ok(Self::GenerateQuiz),
            "chat" | "freeformchat" => Ok(Self::FreeformChat),
            _ => Err(ParseOptionError {
                kind: "mode",
                value: value.to_string(),
                expected: "explain, summarize, quiz, chat",
            }),
        }
    }
}

impl FromStr for ExplainLevel {
    type Err = ParseOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalized(value).as_str() {
            "beginner" | "simple" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(ParseOptionError {
                kind: "explain level",
                value: value.to_string(),
                expected: "beginner, intermediate, advanced",
            }),
        }
    }
}

impl FromStr for SummaryTone {
    type Err = ParseOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalized(value).as_str() {
            "neutral" => Ok(Self::Neutral),
            "simple" => Ok(Self::Simple),
            "exam" | "examfocused" => Ok(Self::ExamFocused),
            _ => Err(ParseOptionError {
                kind: "summary tone",
                value: value.to_string(),
                expected: "neutral, simple, exam-focused",
            }),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalized(value).as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseOptionError {
                kind: "difficulty",
                value: value.to_string(),
                expected: "easy, medium, hard",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_options_take_per_mode_defaults() {
        let options = GenerationOptions::default();

        assert_eq!(options.explain_level(), ExplainLevel::Beginner);
        assert_eq!(options.summary_tone(), SummaryTone::Neutral);
        assert_eq!(options.question_count(), 5);
        assert!(options.include_answers());

        let config = options.generation_config(Mode::GenerateQuiz);
        assert_eq!(config.temperature, Some(0.4));
        assert_eq!(config.max_output_tokens, Some(1024));
        assert_eq!(config.top_p, None);

        let config = options.generation_config(Mode::SummarizeNotes);
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.max_output_tokens, Some(800));
    }

    #[test]
    fn explicit_options_pass_through() {
        let options = GenerationOptions {
            temperature: Some(0.9),
            max_output_tokens: Some(2048),
            top_p: Some(0.8),
            ..Default::default()
        };
        let config = options.generation_config(Mode::ExplainTopic);
        assert_eq!(config.temperature, Some(0.9));
        assert_eq!(config.max_output_tokens, Some(2048));
        assert_eq!(config.top_p, Some(0.8));
    }

    #[test]
    fn question_count_is_clamped() {
        let zero = GenerationOptions {
            question_count: Some(0),
            ..Default::default()
        };
        let many = GenerationOptions {
            question_count: Some(500),
            ..Default::default()
        };
        assert_eq!(zero.question_count(), 1);
        assert_eq!(many.question_count(), 50);
    }

    #[test]
    fn parses_option_names_loosely() {
        assert_eq!("Exam-Focused".parse::<SummaryTone>(), Ok(SummaryTone::ExamFocused));
        assert_eq!("generate_quiz".parse::<Mode>(), Ok(Mode::GenerateQuiz));
        assert_eq!("ADVANCED".parse::<ExplainLevel>(), Ok(ExplainLevel::Advanced));
        let error = "extreme".parse::<Difficulty>().unwrap_err();
        assert_eq!(error.kind, "difficulty");
    }

    #[test]
    fn deserializes_camel_case_json_with_missing_fields() {
        let options: GenerationOptions = serde_json::from_str(
            r#"{"explainLevel":"intermediate","questionCount":12,"includeAnswers":false,"summaryTone":"examFocused"}"#,
        )
        .unwrap();
        assert_eq!(options.explain_level, Some(ExplainLevel::Intermediate));
        assert_eq!(options.question_count(), 12);
        assert!(!options.include_answers());
        assert_eq!(options.summary_tone(), SummaryTone::ExamFocused);
        assert_eq!(options.temperature, None);
    }
}
