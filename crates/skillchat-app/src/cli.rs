use clap::{Parser, Subcommand};

/// CLI arguments for skillchat
#[derive(Parser)]
#[command(name = "skillchat")]
#[command(about = "Skillchat - chat with a skills-enabled assistant from your terminal")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the chat service
    #[arg(long, value_name = "URL", env = "SKILLCHAT_API_URL", default_value = "http://127.0.0.1:8000")]
    pub api_url: String,

    /// Path to the persisted settings file
    /// (default: .skillchat/settings.toml under the working directory)
    #[arg(long, value_name = "PATH", env = "SKILLCHAT_SETTINGS")]
    pub settings_file: Option<String>,

    /// Sampling temperature for this run
    #[arg(long, value_name = "FLOAT")]
    pub temperature: Option<f64>,

    /// Response token budget for this run
    #[arg(long, value_name = "INT")]
    pub max_tokens: Option<u32>,

    /// Skill to select once the catalog is loaded
    #[arg(long, value_name = "ID")]
    pub skill: Option<String>,

    /// Enable verbose debug output (shows outbound request bodies)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the skills available to your credential
    Skills,
    /// Send a single message and print the reply
    Ask {
        /// Message text to send
        message: String,
        /// Skill to apply for this one turn
        #[arg(long, value_name = "ID")]
        skill: Option<String>,
    },
}
