use clap::Subcommand;
use serde_json::Value;

use crate::calculate;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum CalcCommands {
    #[command(about = "a + b")]
    Add {
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
    },

    #[command(about = "a - b")]
    Sub {
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
    },

    #[command(about = "a * b")]
    Mul {
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
    },

    #[command(about = "a / b, truncated toward zero")]
    Div {
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
    },
}

pub fn evaluate(cmd: &CalcCommands) -> Result<i64, calculate::CalculateError> {
    match *cmd {
        CalcCommands::Add { a, b } => calculate::addition(a, b),
        CalcCommands::Sub { a, b } => calculate::subtraction(a, b),
        CalcCommands::Mul { a, b } => calculate::multiplication(a, b),
        CalcCommands::Div { a, b } => calculate::division(a, b),
    }
}

pub fn handle(cmd: CalcCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let result = evaluate(&cmd)?;
    output_format.print(Value::from(result))
}
