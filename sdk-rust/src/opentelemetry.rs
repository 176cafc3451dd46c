use crate::{GenerationConfig, ProviderResult};
use opentelemetry::trace::Status;
use std::time::Instant;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub struct GenerateSpan {
    span: Span,
    start_time: Instant,
    prompt_chars: usize,
    response_chars: Option<usize>,
    max_tokens: u32,
    temperature: f64,
    top_p: Option<f64>,
}

impl GenerateSpan {
    pub fn new(provider: &str, model_id: &str, prompt: &str, config: &GenerationConfig) -> Self {
        let span = info_span!("study_sdk.generate");
        span.set_attribute("gen_ai.operation.name", "generate_content");
        span.set_attribute("gen_ai.provider.name", provider.to_string());
        span.set_attribute("gen_ai.request.model", model_id.to_string());

        Self {
            span,
            start_time: Instant::now(),
            prompt_chars: prompt.chars().count(),
            response_chars: None,
            max_tokens: config.max_output_tokens(),
            temperature: config.temperature(),
            top_p: config.top_p,
        }
    }

    fn span(&self) -> Span {
        self.span.clone()
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        future.instrument(self.span()).await
    }

    pub fn on_response(&mut self, text: &str) {
        self.response_chars = Some(text.chars().count());
    }

    pub fn on_error(&mut self, error: &(dyn std::error::Error + 'static)) {
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    pub fn on_end(&mut self) {
        self.span.set_attribute(
            "study_sdk.prompt_chars",
            i64::try_from(self.prompt_chars).unwrap_or(i64::MAX),
        );
        if let Some(response_chars) = self.response_chars {
            self.span.set_attribute(
                "study_sdk.response_chars",
                i64::try_from(response_chars).unwrap_or(i64::MAX),
            );
        }
        self.span
            .set_attribute("gen_ai.request.max_tokens", i64::from(self.max_tokens));
        self.span
            .set_attribute("gen_ai.request.temperature", self.temperature);
        if let Some(top_p) = self.top_p {
            self.span.set_attribute("gen_ai.request.top_p", top_p);
        }
        self.span.set_attribute(
            "study_sdk.duration_seconds",
            self.start_time.elapsed().as_secs_f64(),
        );
    }
}

pub async fn trace_generate<F, Fut>(
    provider: &str,
    model_id: &str,
    prompt: &str,
    config: &GenerationConfig,
    f: F,
) -> ProviderResult<String>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = ProviderResult<String>>,
{
    let mut span = GenerateSpan::new(provider, model_id, prompt, config);
    let result = span.instrument_future(f()).await;

    match &result {
        Ok(text) => span.on_response(text),
        Err(error) => span.on_error(error),
    }

    span.on_end();
    result
}
