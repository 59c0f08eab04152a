use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;

/// Environment variable overriding `postgres_url`
pub const ENV_POSTGRES_URL: &str = "AGRO_SHOP_POSTGRES_URL";
/// Environment variable overriding `auth.jwt_secret`
pub const ENV_JWT_SECRET: &str = "AGRO_SHOP_JWT_SECRET";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    /// PostgreSQL connection URL
    #[serde(default)]
    pub postgres_url: Option<String>,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    /// HS256 signing key for identity tokens
    #[serde(default)]
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: 24,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Only list products with `stock > 0`
    pub hide_out_of_stock: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            hide_out_of_stock: true,
        }
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml` and apply environment overrides.
    pub fn load(env: &str) -> Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?;

        if let Ok(url) = std::env::var(ENV_POSTGRES_URL) {
            config.postgres_url = Some(url);
        }
        if let Ok(secret) = std::env::var(ENV_JWT_SECRET) {
            config.auth.jwt_secret = secret;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            bail!(
                "auth.jwt_secret is empty; set it in the config file or via {}",
                ENV_JWT_SECRET
            );
        }
        if self.auth.token_ttl_hours <= 0 {
            bail!("auth.token_ttl_hours must be positive");
        }
        Ok(())
    }
}
