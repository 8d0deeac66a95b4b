use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use supportbot::CompletionSettings;

#[derive(Parser)]
#[command(name = "supportbot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Completion endpoint base URL (overrides OPENAI_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Model identifier (overrides OPENAI_MODEL)
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Answer with an offline echo instead of calling the endpoint
    #[arg(long, global = true)]
    pub mock: bool,

    /// Write logs to this file (the chat screen otherwise discards them)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Debug, PartialEq)]
pub enum Commands {
    /// Open the interactive chat screen (default)
    Chat,

    /// Ask a single question and print the reply
    Ask {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Chat)
    }

    /// Layer command-line overrides on top of `settings`.
    pub fn apply_overrides(&self, mut settings: CompletionSettings) -> CompletionSettings {
        if let Some(base_url) = &self.base_url {
            settings = settings.with_base_url(base_url);
        }
        if let Some(model) = &self.model {
            settings = settings.with_model(model);
        }
        if let Some(temperature) = self.temperature {
            settings = settings.with_temperature(temperature);
        }
        if let Some(secs) = self.timeout_secs {
            settings = settings.with_timeout(Duration::from_secs(secs));
        }
        settings
    }
}
