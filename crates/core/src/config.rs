use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub gallery: GalleryConfig,
    pub extractors: ExtractorConfig,
    pub governance: GovernanceConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GatewayConfig {
    pub allowed_origins: Vec<String>,
    /// Upper bound for a whole multipart request (videos dominate).
    pub max_upload_bytes: usize,
    pub enable_tracing: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GalleryConfig {
    pub path: String,
    /// Profiles offered by `GET /api/profiles`. Empty means every enrolled entry.
    pub listed_profiles: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Base URL of the inference sidecar. Unset disables extraction.
    pub base_url: Option<String>,
    pub timeout_ms: u64,
    pub api_key: Option<Secret<String>>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GovernanceConfig {
    pub json_logs: bool,
    pub enable_metrics: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("BIOGATE_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map BIOGATE__SERVER__PORT=8000 to server.port
            .add_source(Environment::with_prefix("BIOGATE").separator("__"))
            .set_override_option("server.host", std::env::var("HOST").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        s.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".into()],
            max_upload_bytes: 25 * 1024 * 1024, // 25MB
            enable_tracing: true,
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            path: "models/gallery.json".into(),
            listed_profiles: Vec::new(),
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: 30_000,
            api_key: None,
        }
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            enable_metrics: true,
        }
    }
}
