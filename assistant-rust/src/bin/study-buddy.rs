use anyhow::{bail, Context as _, Result};
use clap::{Args, Parser, Subcommand};
use std::{
    io::{self, BufRead, IsTerminal, Write},
    path::PathBuf,
    process::ExitCode,
};
use study_assistant::{
    assemble_context, build_prompt, ChatHistory, Difficulty, ExplainLevel, FileKind,
    GenerationOptions, HistoryPolicy, Mode, StudyAssistant, StudyRequest, SummaryTone,
    UploadedFile,
};
use study_sdk::{CredentialSource, ProviderConfig, ProviderKind};
use tracing_subscriber::EnvFilter;

/// Explain topics, summarize notes, and create quizzes and flashcards.
#[derive(Parser, Debug)]
#[command(name = "study-buddy", version)]
struct Cli {
    /// Language model provider: gemini or openai.
    #[arg(long, global = true, env = "STUDY_BUDDY_PROVIDER", default_value = "gemini")]
    provider: ProviderKind,
    /// Model ID. Defaults to the provider's default model.
    #[arg(long, global = true, env = "STUDY_BUDDY_MODEL")]
    model: Option<String>,
    /// Override the provider's API base URL.
    #[arg(long, global = true, env = "STUDY_BUDDY_BASE_URL")]
    base_url: Option<String>,
    /// API key. Defaults to GEMINI_API_KEY or OPENAI_API_KEY.
    #[arg(long, global = true, env = "STUDY_BUDDY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Explain a topic at the chosen level.
    Explain {
        #[command(flatten)]
        input: InputArgs,
        /// beginner, intermediate or advanced.
        #[arg(long)]
        level: Option<ExplainLevel>,
    },
    /// Summarize notes into a study guide.
    Summarize {
        #[command(flatten)]
        input: InputArgs,
        /// neutral, simple or exam-focused.
        #[arg(long)]
        tone: Option<SummaryTone>,
    },
    /// Generate multiple-choice questions and flashcards.
    Quiz {
        #[command(flatten)]
        input: InputArgs,
        /// Number of questions (1-50).
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50))]
        count: Option<u32>,
        /// Leave the answers out of the quiz.
        #[arg(long)]
        no_answers: bool,
        /// easy, medium or hard.
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    /// Chat freely, one message per line. An empty line or EOF ends the
    /// session.
    Chat {
        #[command(flatten)]
        sampling: SamplingArgs,
        /// Send earlier turns along with each new message.
        #[arg(long)]
        replay_history: bool,
        /// With --replay-history, only replay this many recent turns.
        #[arg(long, requires = "replay_history")]
        max_turns: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Topic or question.
    #[arg(long, default_value = "")]
    topic: String,
    /// Notes pasted as text.
    #[arg(long, default_value = "")]
    notes: String,
    /// Attach a .txt, .md or .pdf file. May be repeated.
    #[arg(long = "file")]
    files: Vec<PathBuf>,
    /// Print the rendered prompt instead of sending it.
    #[arg(long)]
    print_prompt: bool,
    #[command(flatten)]
    sampling: SamplingArgs,
}

#[derive(Args, Debug)]
struct SamplingArgs {
    #[arg(long)]
    temperature: Option<f64>,
    #[arg(long)]
    max_output_tokens: Option<u32>,
    #[arg(long)]
    top_p: Option<f64>,
}

impl SamplingArgs {
    fn options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            top_p: self.top_p,
            ..Default::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = ProviderConfig {
        kind: cli.provider,
        model_id: cli.model,
        base_url: cli.base_url,
        credential: cli.api_key.map(CredentialSource::secret),
    };

    let (mode, input, options) = match cli.command {
        Command::Chat {
            sampling,
            replay_history,
            max_turns,
        } => {
            let policy = if replay_history {
                HistoryPolicy::Replay { max_turns }
            } else {
                HistoryPolicy::Independent
            };
            if !ensure_credential(&mut config)? {
                return Ok(ExitCode::from(2));
            }
            chat_loop(&config, policy, &sampling.options()).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Explain { input, level } => {
            let options = GenerationOptions {
                explain_level: level,
                ..input.sampling.options()
            };
            (Mode::ExplainTopic, input, options)
        }
        Command::Summarize { input, tone } => {
            let options = GenerationOptions {
                summary_tone: tone,
                ..input.sampling.options()
            };
            (Mode::SummarizeNotes, input, options)
        }
        Command::Quiz {
            input,
            count,
            no_answers,
            difficulty,
        } => {
            let options = GenerationOptions {
                question_count: count,
                include_answers: Some(!no_answers),
                difficulty,
                ..input.sampling.options()
            };
            (Mode::GenerateQuiz, input, options)
        }
    };

    let files = read_uploads(&input.files)?;
    if input.topic.trim().is_empty() && input.notes.trim().is_empty() && files.is_empty() {
        bail!("nothing to study: pass --topic, --notes or --file");
    }

    if input.print_prompt {
        let context = assemble_context(&input.notes, &files);
        report_warnings(&context.warnings);
        println!("{}", build_prompt(mode, &options, &input.topic, &context.text));
        return Ok(ExitCode::SUCCESS);
    }

    if !ensure_credential(&mut config)? {
        return Ok(ExitCode::from(2));
    }

    let assistant = StudyAssistant::new(config.build());
    let outcome = assistant
        .run(StudyRequest {
            mode,
            options,
            topic: input.topic,
            pasted_text: input.notes,
            files,
        })
        .await
        .context("generation failed")?;

    report_warnings(&outcome.warnings);
    println!("{}", outcome.text);
    Ok(ExitCode::SUCCESS)
}

async fn chat_loop(
    config: &ProviderConfig,
    policy: HistoryPolicy,
    options: &GenerationOptions,
) -> Result<()> {
    let assistant = StudyAssistant::new(config.build()).with_history_policy(policy);
    let mut history = ChatHistory::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("you> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }

        match assistant.chat(&history, line.trim_end(), options).await {
            Ok(exchange) => {
                println!("assistant> {}\n", exchange.reply);
                history = exchange.history;
            }
            Err(error) => eprintln!("Error: {error}"),
        }
    }

    tracing::debug!(turns = history.len(), "chat session ended");
    Ok(())
}

/// Reads each path, rejecting unsupported extensions before any extraction.
fn read_uploads(paths: &[PathBuf]) -> Result<Vec<UploadedFile>> {
    paths
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            FileKind::from_file_name(&name)?;
            let bytes =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            Ok(UploadedFile::new(name, bytes))
        })
        .collect()
}

fn report_warnings(warnings: &[study_assistant::IngestError]) {
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}

/// Makes sure a key is available, asking for one on an interactive terminal.
/// Prints setup instructions and returns `false` when there is still none.
fn ensure_credential(config: &mut ProviderConfig) -> Result<bool> {
    if config.credential().lookup().is_some() {
        return Ok(true);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        if let Some(key) = read_api_key(&mut stdin.lock(), &mut io::stderr(), config.kind)? {
            config.credential = Some(CredentialSource::secret(key));
            return Ok(true);
        }
    }

    let env_name = config.kind.api_key_env();
    eprintln!(
        "{} API key not found. Set it before running:\n  \
         macOS / Linux:          export {env_name}='YOUR_KEY'\n  \
         Windows (PowerShell):   $env:{env_name}='YOUR_KEY'\n  \
         or pass --api-key / set STUDY_BUDDY_API_KEY.\n\
         The key can also be placed in a .env file in the working directory.",
        config.kind
    );
    Ok(false)
}

/// Asks for a key for this session only. A blank line means no key.
fn read_api_key(
    input: &mut impl BufRead,
    output: &mut impl Write,
    kind: ProviderKind,
) -> io::Result<Option<String>> {
    write!(
        output,
        "{kind} API key not found. Enter a key for this session (blank to skip): "
    )?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let key = line.trim();
    Ok((!key.is_empty()).then(|| key.to_string()))
}
