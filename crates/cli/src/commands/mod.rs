pub mod chat;
pub mod onboard;
pub mod status;
pub mod upload;

use admitbot_assistant::Assistant;
use admitbot_config::AppConfig;

/// Session key used when `--user` is not given.
pub const DEFAULT_USER: &str = "local_user";

/// Load config and build the assistant service.
pub fn build_assistant() -> Result<(AppConfig, Assistant), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let assistant = Assistant::from_config(&config);
    Ok((config, assistant))
}
