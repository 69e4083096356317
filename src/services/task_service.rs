//! Task Service
//!
//! The request boundary: turns raw input into document text, picks the task
//! strategy, runs the chunk pipeline and shapes the response.

use std::sync::Arc;

use summarist_llm::{create_provider, LlmProvider, ModelGateway, ProviderGateway, RetryingGateway};
use tracing::{info, warn};

use crate::models::{
    AppConfig, DocumentInput, HealthResponse, MarkdownResponse, SummarizeResponse, Task,
    TaskOutput, TaskRequest,
};
use crate::services::extractor::{DocumentExtractor, Extractor};
use crate::services::pipeline::ChunkPipeline;
use crate::services::tasks::{compare_documents, strategy_for, SummaryType};
use crate::services::upload::StagedUpload;
use crate::utils::error::{AppError, AppResult};

pub struct TaskService {
    config: AppConfig,
    gateway: RetryingGateway,
    provider: Option<Arc<dyn LlmProvider>>,
    extractor: Arc<dyn Extractor>,
}

impl TaskService {
    /// Build the service with the provider named in `config`.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::config)?;
        let provider = create_provider(config.provider_config()?)?;
        let gateway: Arc<dyn ModelGateway> = Arc::new(ProviderGateway::new(provider.clone()));

        info!(
            provider = provider.name(),
            model = provider.model(),
            chunk_size = config.chunk_size_chars,
            "task service ready"
        );

        let mut service = Self::with_gateway(config, gateway);
        service.provider = Some(provider);
        Ok(service)
    }

    /// Build the service around an arbitrary gateway.
    pub fn with_gateway(config: AppConfig, gateway: Arc<dyn ModelGateway>) -> Self {
        let gateway = RetryingGateway::new(gateway, config.retry.clone());
        Self {
            config,
            gateway,
            provider: None,
            extractor: Arc::new(DocumentExtractor),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// A pipeline configured from the service settings.
    pub fn pipeline(&self) -> ChunkPipeline {
        ChunkPipeline::from_config(self.gateway.clone(), &self.config)
    }

    /// Run one task over `input`.
    pub async fn run_task(
        &self,
        input: DocumentInput,
        request: TaskRequest,
    ) -> AppResult<TaskOutput> {
        let max_output_tokens = request
            .max_output_tokens
            .unwrap_or(self.config.max_output_tokens);
        let pipeline = self.pipeline().with_max_output_tokens(max_output_tokens);
        let filename = input.filename().map(str::to_string);

        info!(
            task = request.task.name(),
            filename = filename.as_deref().unwrap_or("-"),
            max_output_tokens,
            "running task"
        );

        let task = request.task;
        if let Task::Question { question } = &task {
            if question.trim().is_empty() {
                return Err(AppError::unsupported("question must not be empty"));
            }
        }

        let documents = self.load_documents(input).await?;

        if let Task::Compare = task {
            if documents.iter().any(|d| d.trim().is_empty()) {
                return Err(AppError::EmptyInput);
            }
            let markdown = compare_documents(&pipeline, &documents).await?;
            return Ok(TaskOutput::Markdown(MarkdownResponse::new(markdown)));
        }

        let text = documents.join("\n\n");
        if text.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }

        let strategy = strategy_for(&task).ok_or_else(|| {
            AppError::unsupported(format!("no strategy for task '{}'", task.name()))
        })?;
        let result = pipeline.run(&text, strategy.as_ref()).await?;

        let output = match task {
            Task::Summarize { summary_type } => TaskOutput::Summary(SummarizeResponse::new(
                result,
                SummaryType::parse(&summary_type).as_str(),
                filename,
                &text,
            )),
            _ => TaskOutput::Markdown(MarkdownResponse::new(result)),
        };
        Ok(output)
    }

    /// Check that the model service is reachable.
    pub async fn health(&self) -> HealthResponse {
        match &self.provider {
            Some(provider) => {
                let healthy = match provider.health_check().await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(provider = provider.name(), error = %e, "model service unavailable");
                        false
                    }
                };
                HealthResponse::new(healthy, provider.name(), provider.model())
            }
            None => HealthResponse::new(true, self.config.provider.to_string(), &self.config.model),
        }
    }

    /// Decode every input into text, in order.
    async fn load_documents(&self, input: DocumentInput) -> AppResult<Vec<String>> {
        let mut documents = Vec::new();
        for item in flatten(input) {
            documents.push(self.load_text(item).await?);
        }
        Ok(documents)
    }

    async fn load_text(&self, input: DocumentInput) -> AppResult<String> {
        match input {
            DocumentInput::Text(text) => Ok(text),
            DocumentInput::Bytes(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            DocumentInput::File { filename, bytes } => {
                if !DocumentExtractor::supports(&filename) {
                    return Err(AppError::unsupported(format!(
                        "unsupported file '{}' (supported: .pdf, .docx, .txt, .md)",
                        filename
                    )));
                }
                let staged = StagedUpload::stage(
                    &self.config.tmp_dir,
                    &filename,
                    &bytes,
                    self.config.max_upload_bytes,
                )?;
                let extractor = Arc::clone(&self.extractor);
                let path = staged.path_buf();
                // The staged file outlives the blocking task and is removed on drop.
                tokio::task::spawn_blocking(move || extractor.extract(&path))
                    .await
                    .map_err(|e| {
                        AppError::extraction(format!("Extraction of {} failed: {}", filename, e))
                    })?
            }
            DocumentInput::Many(_) => Err(AppError::unsupported("nested document lists")),
        }
    }
}

fn flatten(input: DocumentInput) -> Vec<DocumentInput> {
    match input {
        DocumentInput::Many(items) => items.into_iter().flat_map(flatten).collect(),
        single => vec![single],
    }
}
