use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tldr_core::{ErrorKind, ModelSelector, Result, StaticTextSource, TargetLanguage, TextSource, DEFAULT_SENTENCES_PER_CHUNK};
use tldr_inference::client::DEFAULT_BASE_URL;
use tldr_inference::models::{self, DEFAULT_SUMMARIZATION_MODEL, SUMMARIZATION_MODELS};
use tldr_inference::Config;
use tracing::{info, warn};

mod duration;
mod logging;
mod sources;
mod terminal;

use duration::HumanDuration;
use sources::{FileSource, StdinSource};
use terminal::TerminalSink;

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize and translate news articles with hosted models", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Hugging Face API token
    #[arg(long, env = "HUGGINGFACE_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    #[arg(long, default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,
    /// Summarization model, see `tldr models`
    #[arg(long, default_value = DEFAULT_SUMMARIZATION_MODEL, global = true)]
    model: String,
    /// Transport timeout per request (e.g. 30s, 1m30s). No timeout by default.
    #[arg(long, global = true)]
    timeout: Option<HumanDuration>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Summarize an article read from a file, the command line or stdin
    Summarize {
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        #[arg(long)]
        text: Option<String>,
        /// Target language: en, cn, es, fr, de, ja
        #[arg(short, long, default_value = "en")]
        language: TargetLanguage,
        #[arg(long, default_value_t = DEFAULT_SENTENCES_PER_CHUNK)]
        sentences_per_chunk: usize,
        /// Do not print progress messages
        #[arg(short, long)]
        quiet: bool,
    },
    /// List the summarization and translation models
    Models,
    /// Serve the summarize API over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

impl Cli {
    fn config(&self, sentences_per_chunk: usize) -> Config {
        Config {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            summarization_model: ModelSelector::new(self.model.clone()),
            sentences_per_chunk,
            timeout: self.timeout.map(|t| t.0),
            ..Config::default()
        }
    }
}

fn select_source(file: Option<PathBuf>, text: Option<String>) -> Box<dyn TextSource> {
    match (file, text) {
        (Some(path), _) => Box::new(FileSource::new(path)),
        (None, Some(text)) => Box::new(StaticTextSource::new(text)),
        (None, None) => Box::new(StdinSource),
    }
}

fn print_models() {
    println!("Summarization models:");
    for model in SUMMARIZATION_MODELS {
        let marker = if model.id == DEFAULT_SUMMARIZATION_MODEL { "*" } else { " " };
        println!("  {} {:<36} {}", marker, model.id, model.label);
    }
    println!("Translation models:");
    let translations = models::default_translation_models();
    for lang in TargetLanguage::ALL {
        if let Some(model) = translations.get(&lang) {
            println!("    {:<4} {}", lang.code(), model);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if models::find_model(&cli.model).is_none() {
        warn!("⚠️ Model {} is not in the catalog, using it anyway", cli.model);
    }

    match &cli.command {
        Commands::Summarize { file, text, language, sentences_per_chunk, quiet } => {
            let config = cli.config(*sentences_per_chunk);
            let mut session = tldr_inference::create_session(&config)?;
            info!("🧠 Summarizing with {}", session.pipeline().model());

            let source = select_source(file.clone(), text.clone());
            let article = source.article_text().await?;
            info!("📰 Read article ({} chars)", article.char_count());

            let sink = TerminalSink { quiet: *quiet };
            session.summarize(&article, *language, &sink).await?;
        }
        Commands::Models => print_models(),
        Commands::Serve { addr } => {
            let config = cli.config(DEFAULT_SENTENCES_PER_CHUNK);
            let session = tldr_inference::create_session(&config)?;
            tldr_web::serve(tldr_web::AppState::new(session), *addr).await?;
        }
    }
    Ok(())
}

fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Precondition => 2,
        ErrorKind::Remote | ErrorKind::MalformedResponse | ErrorKind::Transport => 3,
        ErrorKind::Other => 1,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Summarize failures have already been shown by the sink.
            tracing::debug!("exiting after error: {:?}", e);
            if e.kind() == ErrorKind::Other {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(exit_code(e.kind()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_summarize() {
        let cli = Cli::try_parse_from([
            "tldr",
            "--api-key",
            "hf_test",
            "--timeout",
            "30s",
            "summarize",
            "--text",
            "Some text.",
            "--language",
            "cn",
        ])
        .unwrap();

        let config = cli.config(DEFAULT_SENTENCES_PER_CHUNK);
        assert_eq!(config.api_key.as_deref(), Some("hf_test"));
        assert_eq!(config.timeout, Some(std::time::Duration::from_secs(30)));
        assert_eq!(config.summarization_model.as_str(), DEFAULT_SUMMARIZATION_MODEL);
        match cli.command {
            Commands::Summarize { language, text, .. } => {
                assert_eq!(language, TargetLanguage::Cn);
                assert_eq!(text.as_deref(), Some("Some text."));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_file_conflicts_with_text() {
        let result = Cli::try_parse_from(["tldr", "summarize", "--file", "a.txt", "--text", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_language_rejected() {
        let result = Cli::try_parse_from(["tldr", "summarize", "--language", "xx"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(ErrorKind::Precondition), 2);
        assert_eq!(exit_code(ErrorKind::Transport), 3);
        assert_eq!(exit_code(ErrorKind::Other), 1);
    }
}
