use thiserror::Error;

/// 設定値のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a valid number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// 環境変数から読み込むアプリケーション設定
///
/// - `DATABASE_URL`: 未設定ならインメモリストアで起動する
/// - `PORT`: 待ち受けポート（既定 3000）
/// - `DATABASE_MAX_CONNECTIONS`: コネクションプール上限（既定 5）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: Option<String>,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から設定を組み立てる（テスト用にプロセス環境を触らずに済む）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            port: parse_or(&lookup, "PORT", 3000)?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.database_url, None);
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/members"),
            ("PORT", "8080"),
            ("DATABASE_MAX_CONNECTIONS", "10"),
        ]))
        .unwrap();

        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/members")
        );
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 10);
    }

    #[test]
    fn test_empty_database_url_means_in_memory() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "")])).unwrap();
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: "PORT",
                value: "http".to_string(),
            }
        );
    }
}
