//! CLI module for the prompt cache
//!
//! Subcommands:
//! - `serve`: HTTP API
//! - `ask`: answer prompts through the cache
//! - `score`: similarity between two prompts
//! - `demo`: two related prompts answered back to back

pub mod ask;
pub mod demo;
pub mod score;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Jaccard-similarity prompt cache in front of a chat-completion API
#[derive(Parser)]
#[command(name = "lexical-prompt-cache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Answer each prompt in order, reusing cached answers for similar prompts
    Ask {
        #[arg(required = true)]
        prompts: Vec<String>,
    },

    /// Print the similarity score of two prompts
    Score { a: String, b: String },

    /// Score two exercise-related prompts and answer both through the cache
    Demo,
}

/// Loads `.env` and layered configuration, then installs logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from(["lexical-prompt-cache", "ask", "first", "second"]).unwrap();

        match cli.command {
            Command::Ask { prompts } => assert_eq!(prompts, vec!["first", "second"]),
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_ask_requires_a_prompt() {
        assert!(Cli::try_parse_from(["lexical-prompt-cache", "ask"]).is_err());
    }

    #[test]
    fn test_parse_score() {
        let cli = Cli::try_parse_from(["lexical-prompt-cache", "score", "a b", "b c"]).unwrap();

        assert!(matches!(cli.command, Command::Score { ref a, ref b } if a == "a b" && b == "b c"));
    }
}
