//! Summarist CLI - run one summarization or analysis task.
//!
//! # Usage
//!
//! ```bash
//! summarist summarize --file report.pdf --summary-type business
//! summarist question --file manual.docx --question "How do I reset it?"
//! summarist compare --file a.txt --file b.txt --json
//! echo "some text" | summarist keywords
//! summarist health
//! ```

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use summarist::{AppConfig, CommandResponse, DocumentInput, Task, TaskRequest, TaskService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TaskKind {
    Summarize,
    Keywords,
    Entities,
    Compare,
    Question,
    Topics,
    Bullets,
    Health,
}

/// Summarize and analyze documents with a language model.
///
/// Configuration comes from the environment (and `.env`): LLM_PROVIDER,
/// LLM_MODEL, LLM_BASE_URL, LLM_API_KEY, CHUNK_SIZE_CHARS, ...
#[derive(Parser)]
#[command(name = "summarist", version, about)]
struct Cli {
    /// Task to run
    #[arg(value_enum)]
    task: TaskKind,

    /// Input file (.pdf, .docx, .txt, .md); repeat for compare/topics
    #[arg(short, long = "file")]
    files: Vec<PathBuf>,

    /// Inline input text; repeatable. Read from stdin when no input is given
    #[arg(short, long)]
    text: Vec<String>,

    /// Summary style: general, bullets, tldr, business, academic
    #[arg(short = 's', long, default_value = "general")]
    summary_type: String,

    /// Question to answer (question task)
    #[arg(short, long)]
    question: Option<String>,

    /// Output-length hint for each model call
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Print the JSON response instead of Markdown
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn task(&self) -> Result<Task> {
        Ok(match self.task {
            TaskKind::Summarize => Task::summarize(self.summary_type.clone()),
            TaskKind::Keywords => Task::Keywords,
            TaskKind::Entities => Task::Entities,
            TaskKind::Compare => Task::Compare,
            TaskKind::Question => match &self.question {
                Some(q) => Task::question(q.clone()),
                None => bail!("the question task needs --question"),
            },
            TaskKind::Topics => Task::Topics,
            TaskKind::Bullets => Task::Bullets,
            TaskKind::Health => bail!("health is not a document task"),
        })
    }

    fn input(&self) -> Result<DocumentInput> {
        let mut inputs: Vec<DocumentInput> =
            self.text.iter().cloned().map(DocumentInput::Text).collect();
        for path in &self.files {
            let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            inputs.push(DocumentInput::file(filename, bytes));
        }

        if inputs.is_empty() {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).context("reading stdin")?;
            return Ok(DocumentInput::Bytes(buf));
        }
        if inputs.len() == 1 {
            return Ok(inputs.remove(0));
        }
        Ok(DocumentInput::Many(inputs))
    }
}

fn print_json<T: Serialize>(response: &CommandResponse<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine; everything can come from the environment.
    let _ = dotenvy::dotenv();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    let service = TaskService::new(config).context("initializing model gateway")?;

    if cli.task == TaskKind::Health {
        let health = service.health().await;
        let healthy = health.is_healthy();
        if cli.json {
            print_json(&CommandResponse::ok(health))?;
        } else {
            println!(
                "{} ({} / {}): {}",
                health.service, health.provider, health.model, health.status
            );
        }
        if !healthy {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut request = TaskRequest::new(cli.task()?);
    if let Some(max_tokens) = cli.max_tokens {
        request = request.with_max_output_tokens(max_tokens);
    }
    let input = cli.input()?;

    let result = service.run_task(input, request).await;
    if cli.json {
        let failed = result.is_err();
        print_json(&CommandResponse::from(result))?;
        if failed {
            std::process::exit(2);
        }
        return Ok(());
    }

    let output = result?;
    println!("{}", output.markdown());
    Ok(())
}
