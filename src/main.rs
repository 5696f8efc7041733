use clap::Parser;
use lexical_prompt_cache::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Ask { prompts } => cli::ask::run(prompts).await,
        Command::Score { a, b } => cli::score::run(a, b).await,
        Command::Demo => cli::demo::run().await,
    }
}
