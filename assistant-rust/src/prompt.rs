//! Prompt templates for each study mode.
//!
//! Templates are fixed text. The section headings they ask for (`Explanation`,
//! `Example`, `3-step summary`, `QUIZ`, `ANSWERS`, `FLASHCARDS`) are what
//! downstream display code keys on, so they must not drift.

use crate::{Difficulty, ExplainLevel, GenerationOptions, Mode, SummaryTone};

/// One generation action's inputs. Built once per action and discarded after
/// the response is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub mode: Mode,
    pub options: GenerationOptions,
    pub topic: String,
    pub context: String,
}

impl PromptRequest {
    #[must_use]
    pub fn prompt(&self) -> String {
        build_prompt(self.mode, &self.options, &self.topic, &self.context)
    }
}

/// Renders the prompt for `mode`. Pure and deterministic; empty `topic` and
/// `context` still produce a well-formed prompt.
///
/// For [`Mode::FreeformChat`] the prompt is the raw user turn, taken from
/// `context` or, when that is blank, from `topic`.
#[must_use]
pub fn build_prompt(mode: Mode, options: &GenerationOptions, topic: &str, context: &str) -> String {
    match mode {
        Mode::ExplainTopic => explain_prompt(options.explain_level(), topic, context),
        Mode::SummarizeNotes => summarize_prompt(options.summary_tone(), topic, context),
        Mode::GenerateQuiz => quiz_prompt(options, topic, context),
        Mode::FreeformChat => {
            if context.trim().is_empty() {
                topic.to_string()
            } else {
                context.to_string()
            }
        }
    }
}

fn level_instruction(level: ExplainLevel) -> &'static str {
    match level {
        ExplainLevel::Beginner => {
            "Explain the following topic in simple terms using easy-to-understand language and \
             analogies. Include a short example and 3-step summary."
        }
        ExplainLevel::Intermediate => {
            "Explain the topic with some mathematical/formal detail and a concise example. \
             Include a 3-step summary."
        }
        ExplainLevel::Advanced => {
            "Provide an advanced explanation with technical details, edge cases, and further \
             reading suggestions."
        }
    }
}

fn explain_prompt(level: ExplainLevel, topic: &str, context: &str) -> String {
    let instruction = level_instruction(level);
    format!(
        "{instruction}\n\nTopic: {topic}\n\nNotes and context: {context}\n\nFormat: Use headings \
         'Explanation', 'Example', '3-step summary'. Keep answer clear and teachable."
    )
}

fn tone_instruction(tone: SummaryTone) -> &'static str {
    match tone {
        SummaryTone::Neutral => "",
        SummaryTone::Simple => {
            " Write for a beginner: use plain, simple language and explain any jargon you keep."
        }
        SummaryTone::ExamFocused => {
            " Focus on what is most likely to be examined: definitions, key formulas, and the \
             points students commonly get wrong."
        }
    }
}

fn summarize_prompt(tone: SummaryTone, topic: &str, context: &str) -> String {
    let tone = tone_instruction(tone);
    format!(
        "Summarize the following study notes into a clean study guide of about 200-350 words. \
         Use bullet-like numbered steps (but not bullet points — use short paragraphs), \
         highlight key formulas or lines, and provide 3 follow-up practice prompts the student \
         can try.{tone} Notes:\n\n{topic}\n\n{context}"
    )
}

fn difficulty_instruction(difficulty: Option<Difficulty>) -> String {
    difficulty
        .map(|difficulty| {
            format!("Pitch every question at {} difficulty. ", difficulty.as_str())
        })
        .unwrap_or_default()
}

fn quiz_prompt(options: &GenerationOptions, topic: &str, context: &str) -> String {
    let material = if context.trim().is_empty() {
        topic
    } else {
        context
    };
    let count = options.question_count();
    let difficulty = difficulty_instruction(options.difficulty);
    let (answers, headings) = if options.include_answers() {
        (
            "Include answers: list the correct option for each question.",
            "QUIZ, ANSWERS, FLASHCARDS",
        )
    } else {
        (
            "Do not reveal which option is correct.",
            "QUIZ, FLASHCARDS",
        )
    };

    format!(
        "Create a study quiz and flashcards from the following topic/context. Produce {count} \
         multiple-choice questions (4 options each) with one correct answer and a brief \
         explanation (1-2 sentences). {difficulty}Then produce flashcards: for each question \
         produce 'Term: <term>' and 'Definition: <definition>'. {answers} \
         Context:\n\n{material}\n\nFormat the response clearly with headings: {headings}."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz_options(count: u32, include_answers: bool) -> GenerationOptions {
        GenerationOptions {
            question_count: Some(count),
            include_answers: Some(include_answers),
            ..Default::default()
        }
    }

    #[test]
    fn identical_inputs_yield_identical_prompts() {
        let options = quiz_options(7, true);
        for mode in [
            Mode::ExplainTopic,
            Mode::SummarizeNotes,
            Mode::GenerateQuiz,
            Mode::FreeformChat,
        ] {
            assert_eq!(
                build_prompt(mode, &options, "Photosynthesis", "Light reactions..."),
                build_prompt(mode, &options, "Photosynthesis", "Light reactions..."),
            );
        }
    }

    #[test]
    fn explain_uses_level_clause_and_required_headings() {
        let options = GenerationOptions {
            explain_level: Some(ExplainLevel::Advanced),
            ..Default::default()
        };
        let prompt = build_prompt(Mode::ExplainTopic, &options, "Integration by parts", "");

        assert!(prompt.starts_with("Provide an advanced explanation with technical details"));
        assert!(prompt.contains("Topic: Integration by parts"));
        assert!(prompt.contains("'Explanation', 'Example', '3-step summary'"));
    }

    #[test]
    fn explain_defaults_to_beginner_clause() {
        let prompt = build_prompt(
            Mode::ExplainTopic,
            &GenerationOptions::default(),
            "How does a CPU work?",
            "notes\n\n",
        );
        assert!(prompt.starts_with("Explain the following topic in simple terms"));
        assert!(prompt.contains("Notes and context: notes\n\n"));
    }

    #[test]
    fn summarize_tone_clause_changes_only_for_non_neutral_tone() {
        let neutral = build_prompt(Mode::SummarizeNotes, &GenerationOptions::default(), "", "x");
        let exam = build_prompt(
            Mode::SummarizeNotes,
            &GenerationOptions {
                summary_tone: Some(SummaryTone::ExamFocused),
                ..Default::default()
            },
            "",
            "x",
        );

        assert!(neutral.contains("the student can try. Notes:\n\n\n\nx"));
        assert!(exam.contains("most likely to be examined"));
        assert_ne!(neutral, exam);
    }

    #[test]
    fn quiz_requests_exact_question_count() {
        let prompt = build_prompt(Mode::GenerateQuiz, &quiz_options(7, true), "Cells", "");
        assert!(prompt.contains("Produce 7 multiple-choice questions"));
        assert!(prompt.contains("QUIZ, ANSWERS, FLASHCARDS"));
    }

    #[test]
    fn quiz_without_answers_omits_answers_heading() {
        let prompt = build_prompt(Mode::GenerateQuiz, &quiz_options(3, false), "Cells", "");
        assert!(!prompt.contains("ANSWERS"));
        assert!(prompt.contains("QUIZ, FLASHCARDS"));
        assert!(prompt.contains("Produce 3 multiple-choice questions"));
    }

    #[test]
    fn quiz_falls_back_to_topic_when_context_is_blank() {
        let from_topic = build_prompt(Mode::GenerateQuiz, &quiz_options(5, true), "Mitosis", " \n");
        let from_notes =
            build_prompt(Mode::GenerateQuiz, &quiz_options(5, true), "Mitosis", "Prophase first");

        assert!(from_topic.contains("Context:\n\nMitosis\n\n"));
        assert!(from_notes.contains("Context:\n\nProphase first\n\n"));
        assert!(!from_notes.contains("Mitosis"));
    }

    #[test]
    fn quiz_states_difficulty_only_when_set() {
        let plain = build_prompt(Mode::GenerateQuiz, &quiz_options(5, true), "t", "");
        let hard = build_prompt(
            Mode::GenerateQuiz,
            &GenerationOptions {
                difficulty: Some(Difficulty::Hard),
                ..quiz_options(5, true)
            },
            "t",
            "",
        );
        assert!(!plain.contains("difficulty"));
        assert!(hard.contains("Pitch every question at hard difficulty."));
    }

    #[test]
    fn chat_prompt_is_raw_turn_text() {
        let options = GenerationOptions::default();
        assert_eq!(
            build_prompt(Mode::FreeformChat, &options, "", "What is entropy?"),
            "What is entropy?"
        );
        assert_eq!(
            build_prompt(Mode::FreeformChat, &options, "fallback", ""),
            "fallback"
        );
    }

    #[test]
    fn empty_inputs_still_produce_prompts() {
        let options = GenerationOptions::default();
        for mode in [Mode::ExplainTopic, Mode::SummarizeNotes, Mode::GenerateQuiz] {
            assert!(!build_prompt(mode, &options, "", "").is_empty());
        }
    }

    #[test]
    fn prompt_request_renders_through_builder() {
        let request = PromptRequest {
            mode: Mode::GenerateQuiz,
            options: quiz_options(2, false),
            topic: "Volcanoes".to_string(),
            context: String::new(),
        };
        assert_eq!(
            request.prompt(),
            build_prompt(Mode::GenerateQuiz, &request.options, "Volcanoes", "")
        );
    }
}
