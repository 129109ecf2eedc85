use serde::{Deserialize, Serialize};

use crate::models::AccountTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Static,
    Remote,
}

impl DataSource {
    pub fn from_str_loose(s: &str) -> Option<DataSource> {
        match s.trim().to_lowercase().as_str() {
            "static" | "builtin" => Some(DataSource::Static),
            "remote" | "rest" | "supabase" => Some(DataSource::Remote),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Reference data
    pub data_source: DataSource,
    pub data_url: String,
    pub data_api_key: String,

    // Calculator defaults
    pub default_account: AccountTier,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            data_source: DataSource::from_str_loose(&env("TRADE_DATA_SOURCE", "static"))
                .unwrap_or(DataSource::Static),
            data_url: env("TRADE_DATA_URL", ""),
            data_api_key: env("TRADE_DATA_API_KEY", ""),
            default_account: env("DEFAULT_ACCOUNT", "50K")
                .parse()
                .unwrap_or(AccountTier::K50),
            log_level: env("LOG_LEVEL", "INFO"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_source: DataSource::Static,
            data_url: String::new(),
            data_api_key: String::new(),
            default_account: AccountTier::K50,
            log_level: "INFO".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_source_aliases() {
        assert_eq!(DataSource::from_str_loose("Builtin"), Some(DataSource::Static));
        assert_eq!(DataSource::from_str_loose("supabase"), Some(DataSource::Remote));
        assert_eq!(DataSource::from_str_loose("ftp"), None);
    }

    #[test]
    fn defaults_use_static_tables() {
        let cfg = Config::default();
        assert_eq!(cfg.data_source, DataSource::Static);
        assert_eq!(cfg.default_account, AccountTier::K50);
        assert!(cfg.data_url.is_empty());
    }
}
