pub mod commands;

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "library")]
#[command(about = "Library CLI - arithmetic helpers and token tooling for the library API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Integer arithmetic")]
    Calc {
        #[command(subcommand)]
        cmd: commands::calc::CalcCommands,
    },

    #[command(about = "Issue a bearer token for a user id using the configured secret")]
    Token {
        #[arg(help = "User id to embed in the token")]
        user_id: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Print `value`, wrapped in the API envelope when JSON output is requested
    pub fn print(self, value: Value) -> anyhow::Result<()> {
        match self {
            OutputFormat::Json => {
                let envelope = serde_json::json!({ "message": "success", "data": value });
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            }
            OutputFormat::Text => match value {
                Value::String(s) => println!("{}", s),
                other => println!("{}", other),
            },
        }
        Ok(())
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Calc { cmd } => commands::calc::handle(cmd, output_format),
        Commands::Token { user_id } => commands::token::handle(user_id, output_format),
    }
}
