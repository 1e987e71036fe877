use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub upload: UploadSettings,
    pub media: MediaSettings,
    pub speech: SpeechSettings,
    pub llm: LlmSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub name: String,
    pub max_pool_size: Option<u32>,
    pub min_pool_size: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
    pub issuer: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    /// Hard cap on the multipart request body, in bytes.
    pub max_bytes: usize,
    /// Root for request-scoped scratch directories. System temp dir when unset.
    pub scratch_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaSettings {
    pub ffmpeg_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpeechSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("MEETSPACE"),
            )
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 3000)?
            .set_default("app.cors_origins", Vec::<String>::new())?
            .set_default("database.url", "mongodb://localhost:27017")?
            .set_default("database.name", "meetspace")?
            .set_default("jwt.secret", "change-me-in-production")?
            .set_default("jwt.access_token_ttl_secs", 3600)?
            .set_default("jwt.refresh_token_ttl_secs", 604800)?
            .set_default("jwt.issuer", "meetspace")?
            .set_default("upload.max_bytes", 500 * 1024 * 1024)?
            .set_default("upload.scratch_dir", None::<String>)?
            .set_default("media.ffmpeg_path", "ffmpeg")?
            .set_default("speech.api_key", None::<String>)?
            .set_default(
                "speech.endpoint",
                "https://api.openai.com/v1/audio/transcriptions",
            )?
            .set_default("speech.model", "whisper-1")?
            .set_default("llm.api_key", None::<String>)?
            .set_default("llm.endpoint", "https://api.openai.com/v1/chat/completions")?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.max_tokens", 2048)?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::load().expect("Failed to load default settings")
    }
}
