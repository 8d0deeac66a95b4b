use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;
use tracing::{debug, info};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use supportbot::connector::tui;
use supportbot::{
    CompletionSettings, CompletionTransport, FetchReplyUseCase, MockTransport, OpenAiTransport,
    SubmitMessageUseCase,
};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command();

    init_logging(
        cli.verbose,
        cli.log_file.as_deref(),
        command == Commands::Chat,
    )?;

    let settings = cli.apply_overrides(CompletionSettings::from_env());

    let transport: Arc<dyn CompletionTransport> = if cli.mock {
        info!("Using mock completion transport");
        Arc::new(MockTransport::new())
    } else {
        info!(
            "Using completion endpoint {} (model {}, timeout {:?})",
            settings.endpoint_url(),
            settings.model(),
            settings.timeout()
        );
        Arc::new(OpenAiTransport::new(&settings)?)
    };

    let fetch_reply = FetchReplyUseCase::new(transport)
        .with_model(settings.model())
        .with_temperature(settings.temperature());
    let use_case = SubmitMessageUseCase::new(fetch_reply);

    let credential = credential_from_env();

    match command {
        Commands::Chat => {
            let session = tui::run(&use_case, credential).await?;
            if !session.is_empty() {
                println!("{}", session.transcript());
            }
        }

        Commands::Ask { text } => {
            let Some(credential) = credential else {
                anyhow::bail!("OPENAI_API_KEY is not set. {}", tui::CREDENTIAL_PROMPT);
            };
            let text = text.join(" ");

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
            spinner.set_message("🤔 Thinking...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let outcome = use_case.fetch_reply().try_execute(&text, &credential).await;
            spinner.finish_and_clear();

            match outcome {
                Ok(reply) => println!("{}", reply),
                Err(e) if e.is_recoverable() => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

fn credential_from_env() -> Option<SecretString> {
    let key = std::env::var("OPENAI_API_KEY").ok()?;
    if key.trim().is_empty() {
        return None;
    }
    debug!("Using API key from OPENAI_API_KEY");
    Some(SecretString::from(key))
}

/// The chat screen owns the terminal, so it only logs to `--log-file`.
fn init_logging(verbose: bool, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("supportbot={level},warn")));

    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None if interactive => BoxMakeWriter::new(io::sink),
        None => BoxMakeWriter::new(io::stderr),
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(log_file.is_none())
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
