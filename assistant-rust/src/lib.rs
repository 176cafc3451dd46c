mod assistant;
mod errors;
mod ingest;
mod options;
mod prompt;
mod session;

pub use assistant::{
    assemble_context, AssembledContext, ChatExchange, HistoryPolicy, StudyAssistant, StudyOutcome,
    StudyRequest,
};
pub use errors::{AssistantError, IngestError, ParseOptionError};
pub use ingest::{extract_text, FileKind, UploadedFile};
pub use options::*;
pub use prompt::{build_prompt, PromptRequest};
pub use session::{append_turn, ChatHistory, ChatRole, ChatTurn};
