use maxibot_core::config::{AppConfig, LoadOptions};
use secrecy::ExposeSecret;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let lines = vec![
        "effective config (source precedence: overrides > env > file > default):".to_string(),
        render_line("database.url", &config.database.url),
        render_line("database.max_connections", &config.database.max_connections.to_string()),
        render_line("database.timeout_secs", &config.database.timeout_secs.to_string()),
        render_line("llm.provider", &format!("{:?}", config.llm.provider)),
        render_line("llm.model", &config.llm.model),
        render_line("llm.base_url", config.llm.base_url.as_deref().unwrap_or("<unset>")),
        render_line(
            "llm.api_key",
            &config
                .llm
                .api_key
                .as_ref()
                .map(|key| redact_token(key.expose_secret()))
                .unwrap_or_else(|| "<unset>".to_string()),
        ),
        render_line("llm.timeout_secs", &config.llm.timeout_secs.to_string()),
        render_line("llm.max_retries", &config.llm.max_retries.to_string()),
        render_line("server.bind_address", &config.server.bind_address),
        render_line("server.port", &config.server.port.to_string()),
        render_line(
            "persona.rules",
            if config.persona.rules.is_some() { "<inline>" } else { "<unset>" },
        ),
        render_line(
            "persona.rules_path",
            &config
                .persona
                .rules_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<unset>".to_string()),
        ),
        render_line("logging.level", &config.logging.level),
        render_line("logging.format", &format!("{:?}", config.logging.format)),
    ];

    lines.join("\n")
}

fn render_line(key: &str, value: &str) -> String {
    format!("  {key} = {value}")
}

fn redact_token(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    format!("{prefix}*** (redacted, {} chars)", token.chars().count())
}
