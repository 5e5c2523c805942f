//! Configuration module
//!
//! The service is configured once at startup from command-line flags, each of
//! which falls back to an environment variable (optionally loaded from a
//! `.env` file). The resulting [`Config`] is immutable and handed to the
//! handlers through application state.

use std::env;
use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_PORT: u16 = 8090;
pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 20;
/// Largest accepted `MAX_UPLOAD_MB`; uploads are buffered in memory
pub const MAX_UPLOAD_MB_CEILING: usize = 1024;
pub const DEFAULT_MAX_WIDTH: u32 = 1280;
pub const DEFAULT_JPEG_QUALITY: u8 = 80;
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Application configuration.
#[derive(Clone, Debug, Parser)]
#[command(name = "picstash", version, about = "Image upload and static file server")]
pub struct Config {
    /// Port to run the server on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory to save uploaded files
    #[arg(long, env = "UPLOAD_DIR", default_value = DEFAULT_UPLOAD_DIR)]
    pub upload_dir: PathBuf,

    /// Shared secret expected in the `X-API-Key` header. Read from `API_KEY` only.
    #[arg(skip)]
    pub api_key: String,

    /// Maximum accepted upload size in MiB
    #[arg(long, env = "MAX_UPLOAD_MB", default_value_t = DEFAULT_MAX_UPLOAD_MB)]
    pub max_upload_mb: usize,

    /// Width stored images are resized down to
    #[arg(long, env = "MAX_WIDTH", default_value_t = DEFAULT_MAX_WIDTH)]
    pub max_width: u32,

    /// JPEG quality (1-100) used when re-encoding
    #[arg(long, env = "JPEG_QUALITY", default_value_t = DEFAULT_JPEG_QUALITY)]
    pub jpeg_quality: u8,

    /// Base URL used in upload responses instead of the request's scheme and host
    #[arg(long, env = "PUBLIC_BASE_URL")]
    pub public_base_url: Option<String>,

    /// Deployment environment; "production" hides error details. Read from
    /// `ENVIRONMENT` only.
    #[arg(skip)]
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            api_key: String::new(),
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            max_width: DEFAULT_MAX_WIDTH,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            public_base_url: None,
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the environment and command-line flags.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let mut config = Config::parse();
        config.api_key = env::var("API_KEY").unwrap_or_default();
        config.environment =
            env::var("ENVIRONMENT").unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.port == 0 {
            return Err(anyhow::anyhow!("PORT must be between 1 and 65535"));
        }

        if self.upload_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_DIR must not be empty"));
        }

        if self.max_upload_mb == 0 || self.max_upload_mb > MAX_UPLOAD_MB_CEILING {
            return Err(anyhow::anyhow!(
                "MAX_UPLOAD_MB must be between 1 and {}",
                MAX_UPLOAD_MB_CEILING
            ));
        }

        if self.max_width == 0 {
            return Err(anyhow::anyhow!("MAX_WIDTH must be greater than 0"));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(anyhow::anyhow!("JPEG_QUALITY must be between 1 and 100"));
        }

        if let Some(url) = self.public_base_url.as_deref() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!(
                    "PUBLIC_BASE_URL must start with http:// or https://"
                ));
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    pub fn public_base_url(&self) -> Option<&str> {
        self.public_base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
    }
}
