use serde_json::Value;

use crate::auth::generate_jwt;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(user_id: i64, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    config.validate()?;
    let token = generate_jwt(user_id, &config.security)?;
    tracing::debug!("Issued token for user {}", user_id);
    output_format.print(Value::String(token))
}
