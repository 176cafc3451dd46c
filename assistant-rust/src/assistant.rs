use crate::{
    build_prompt, extract_text, session::append_turn, AssistantError, ChatHistory, ChatRole,
    GenerationOptions, IngestError, Mode, PromptRequest, UploadedFile,
};
use std::sync::Arc;
use study_sdk::ProviderClient;

/// How chat turns relate to earlier turns in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPolicy {
    /// Each message is sent on its own; the model sees no earlier turns.
    #[default]
    Independent,
    /// Earlier turns (the most recent `max_turns`, or all) are rendered into
    /// the prompt as a transcript ahead of the new message.
    Replay { max_turns: Option<usize> },
}

/// Raw user input for one form-based action.
#[derive(Debug, Clone)]
pub struct StudyRequest {
    pub mode: Mode,
    pub options: GenerationOptions,
    pub topic: String,
    pub pasted_text: String,
    pub files: Vec<UploadedFile>,
}

impl StudyRequest {
    pub fn new(mode: Mode, topic: impl Into<String>) -> Self {
        Self {
            mode,
            options: GenerationOptions::default(),
            topic: topic.into(),
            pasted_text: String::new(),
            files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudyOutcome {
    /// Text to display.
    pub text: String,
    /// The prompt that was sent.
    pub prompt: String,
    /// Files that were skipped, with the reason.
    pub warnings: Vec<IngestError>,
}

/// The result of one chat turn: the grown history and the reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatExchange {
    pub history: ChatHistory,
    pub reply: String,
}

/// Pasted notes and extracted file text, combined in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledContext {
    pub text: String,
    pub warnings: Vec<IngestError>,
}

/// Combines pasted text with the text of every readable file. Each non-empty
/// source is followed by a blank line. Files that fail extraction are skipped
/// and reported in `warnings`.
#[must_use]
pub fn assemble_context(pasted_text: &str, files: &[UploadedFile]) -> AssembledContext {
    let mut context = AssembledContext::default();
    if !pasted_text.is_empty() {
        context.text.push_str(pasted_text);
        context.text.push_str("\n\n");
    }

    for file in files {
        match extract_text(file) {
            Ok(text) => {
                context.text.push_str(&text);
                context.text.push_str("\n\n");
            }
            Err(error) => {
                tracing::warn!(file = %file.name, %error, "skipping uploaded file");
                context.warnings.push(error);
            }
        }
    }

    context
}

/// Runs study actions against a provider. Holds no session state; chat
/// history is passed in and handed back by [`StudyAssistant::chat`].
pub struct StudyAssistant {
    provider: Arc<dyn ProviderClient>,
    history_policy: HistoryPolicy,
}

impl StudyAssistant {
    #[must_use]
    pub fn new(provider: Arc<dyn ProviderClient>) -> Self {
        Self {
            provider,
            history_policy: HistoryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_history_policy(mut self, history_policy: HistoryPolicy) -> Self {
        self.history_policy = history_policy;
        self
    }

    #[must_use]
    pub fn history_policy(&self) -> HistoryPolicy {
        self.history_policy
    }

    /// Runs one form-based action: ingest files, build the prompt, make one
    /// provider call.
    pub async fn run(&self, request: StudyRequest) -> Result<StudyOutcome, AssistantError> {
        let StudyRequest {
            mode,
            options,
            topic,
            pasted_text,
            files,
        } = request;

        let AssembledContext { text, warnings } = assemble_context(&pasted_text, &files);
        let prompt_request = PromptRequest {
            mode,
            options,
            topic,
            context: text,
        };
        if prompt_request.topic.trim().is_empty() && prompt_request.context.trim().is_empty() {
            tracing::debug!(%mode, "generating with empty topic and context");
        }

        let prompt = prompt_request.prompt();
        let config = prompt_request.options.generation_config(mode);

        tracing::debug!(
            %mode,
            provider = self.provider.provider(),
            prompt_chars = prompt.chars().count(),
            "running study action"
        );
        let text = self.provider.generate(&prompt, &config).await?;

        Ok(StudyOutcome {
            text,
            prompt,
            warnings,
        })
    }

    /// Sends one chat message. On success the returned history holds the user
    /// turn followed by the reply; on failure `history` is left as it was.
    pub async fn chat(
        &self,
        history: &ChatHistory,
        message: &str,
        options: &GenerationOptions,
    ) -> Result<ChatExchange, AssistantError> {
        let prompt = self.chat_prompt(history, message, options);
        let config = options.generation_config(Mode::FreeformChat);

        let reply = self.provider.generate(&prompt, &config).await?;

        let history = append_turn(history, ChatRole::User, message);
        let history = append_turn(&history, ChatRole::Assistant, reply.clone());
        Ok(ChatExchange { history, reply })
    }

    fn chat_prompt(
        &self,
        history: &ChatHistory,
        message: &str,
        options: &GenerationOptions,
    ) -> String {
        let turn = build_prompt(Mode::FreeformChat, options, "", message);
        match self.history_policy {
            HistoryPolicy::Replay { max_turns } if !history.is_empty() => format!(
                "The conversation so far:\n{}\n\nReply to the latest message:\n{turn}",
                history.transcript(max_turns)
            ),
            _ => turn,
        }
    }
}
