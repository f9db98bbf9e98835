pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "profile-api")]
#[command(about = "Developer profile API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Apply database migrations and exit")]
    Migrate,

    #[command(about = "Mint a development token for a user id")]
    Token(commands::token::TokenArgs),
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        None => commands::serve::handle(commands::serve::ServeArgs::default()).await,
        Some(Commands::Serve(args)) => commands::serve::handle(args).await,
        Some(Commands::Migrate) => commands::migrate::handle().await,
        Some(Commands::Token(args)) => commands::token::handle(args),
    }
}
