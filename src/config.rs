use std::env;

/// Settings for the outbound chat-completion API.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_api_url: String,
    pub ai: AiConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_key = env::var("DEEPSEEK_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("DEEPSEEK_API_KEY is not set; advisory requests will fail upstream");
        }

        Self {
            host: env::var("FINTRACK_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("FINTRACK_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(7070),
            data_api_url: env::var("FINTRACK_DATA_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api".into()),
            ai: AiConfig {
                api_url: env::var("FINTRACK_AI_URL")
                    .unwrap_or_else(|_| "https://api.deepseek.com/v1/chat/completions".into()),
                api_key,
                model: env::var("FINTRACK_AI_MODEL").unwrap_or_else(|_| "deepseek-chat".into()),
            },
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
