use anyhow::Result;
use clap::Parser;
use riskbrief::llm::{self, OpenAiTransport};
use riskbrief::pipeline::{
    AnalysisPipeline, ArtifactSink, ConsoleNotifier, DirectorySink, Notifier, StdoutSink,
};
use riskbrief::store::{self, KeyValueStore, MemoryStore, SqliteStore};
use riskbrief::{config, tui};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "riskbrief")]
#[command(about = "Ask an LLM for a company due-diligence brief and save it as JSON")]
#[command(version)]
struct Args {
    /// Company to analyze
    #[arg(long)]
    company: Option<String>,

    /// API key (defaults to the key saved by the last run)
    #[arg(long)]
    api_key: Option<String>,

    /// Submit directly without the interactive form
    #[arg(long)]
    direct: bool,

    /// Directory the JSON file is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Write the JSON to stdout instead of a file
    #[arg(long)]
    stdout: bool,

    /// Print the prompt that would be sent for --company and exit
    #[arg(long)]
    show_prompt: bool,

    /// Keep the API key in memory only for this run
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "riskbrief=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if args.show_prompt {
        let company = args.company.as_deref().unwrap_or_default().trim();
        if company.is_empty() {
            anyhow::bail!("--show-prompt needs --company");
        }
        println!("{}", llm::prompt::analysis_prompt(company));
        return Ok(());
    }

    // Load configuration
    let config = config::load_config()?;

    // Initialize credential store
    let store: Arc<dyn KeyValueStore> = if args.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(SqliteStore::new(&config.store.resolved_path()).await?)
    };

    let saved_key = store::load_saved_credential(store.as_ref()).await;
    let api_key = args.api_key.clone().or(saved_key).unwrap_or_default();
    let company = args.company.clone().unwrap_or_default();

    let (company, api_key) = if args.direct {
        (company, api_key)
    } else {
        match tui::run_form(&config, &company, &api_key).await? {
            Some(values) => (values.company, values.api_key),
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        }
    };

    let sink: Arc<dyn ArtifactSink> = if args.stdout || config.output.stdout {
        Arc::new(StdoutSink)
    } else {
        let directory = args
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output.resolved_directory());
        Arc::new(DirectorySink::new(directory))
    };

    let notifier: Arc<dyn Notifier> = if args.direct {
        Arc::new(ConsoleNotifier)
    } else {
        Arc::new(tui::TuiNotifier::new(&config))
    };

    let pipeline = AnalysisPipeline::new(store, Arc::new(OpenAiTransport::new()), sink, notifier);

    if !args.direct {
        eprintln!("Analyzing {}...", company.trim());
    }

    // The pipeline has already reported the outcome to the user
    if pipeline.submit(&company, &api_key).await.is_err() {
        std::process::exit(1);
    }

    Ok(())
}
