//! Process configuration, read from the environment (and `.env` when present).

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

use lumina_catalog::NameMatch;
use lumina_core::UserId;
use lumina_infra::{CatalogSettings, CreatorPolicy, SHOWCASE_USER_ID};
use lumina_observability::LogFormat;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var} value `{value}`: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Postgres when set; in-memory store otherwise.
    pub database_url: Option<String>,
    pub default_creator: UserId,
    pub require_identity: bool,
    pub search_case_insensitive: bool,
    pub write_retries: u32,
    pub seed: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: None,
            default_creator: SHOWCASE_USER_ID,
            require_identity: false,
            search_case_insensitive: false,
            write_retries: 3,
            seed: false,
            log_format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or blank variables take
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            bind_addr: parse(&get, "LUMINA_BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            database_url: get("DATABASE_URL"),
            default_creator: parse(&get, "LUMINA_DEFAULT_CREATOR_ID")?
                .unwrap_or(defaults.default_creator),
            require_identity: parse(&get, "LUMINA_REQUIRE_IDENTITY")?
                .unwrap_or(defaults.require_identity),
            search_case_insensitive: parse(&get, "LUMINA_SEARCH_CASE_INSENSITIVE")?
                .unwrap_or(defaults.search_case_insensitive),
            write_retries: parse(&get, "LUMINA_WRITE_RETRIES")?.unwrap_or(defaults.write_retries),
            seed: parse(&get, "LUMINA_SEED")?.unwrap_or(defaults.seed),
            log_format: parse(&get, "LUMINA_LOG_FORMAT")?.unwrap_or(defaults.log_format),
        })
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            creator_policy: if self.require_identity {
                CreatorPolicy::RequireIdentity
            } else {
                CreatorPolicy::FallbackTo(self.default_creator)
            },
            name_match: if self.search_case_insensitive {
                NameMatch::CaseInsensitive
            } else {
                NameMatch::CaseSensitive
            },
            write_retries: self.write_retries,
        }
    }
}

fn parse<T, G>(get: &G, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    get(var)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config(&[]).unwrap(), AppConfig::default());
        assert_eq!(
            config(&[]).unwrap().catalog_settings(),
            CatalogSettings::default()
        );
    }

    #[test]
    fn reads_every_variable() {
        let creator = UserId::new();
        let creator_str = creator.to_string();
        let cfg = config(&[
            ("LUMINA_BIND_ADDR", "127.0.0.1:9000"),
            ("DATABASE_URL", "postgres://localhost/lumina"),
            ("LUMINA_DEFAULT_CREATOR_ID", creator_str.as_str()),
            ("LUMINA_REQUIRE_IDENTITY", "true"),
            ("LUMINA_SEARCH_CASE_INSENSITIVE", "true"),
            ("LUMINA_WRITE_RETRIES", "7"),
            ("LUMINA_SEED", "true"),
            ("LUMINA_LOG_FORMAT", "pretty"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/lumina"));
        assert_eq!(cfg.default_creator, creator);
        assert!(cfg.seed);
        assert_eq!(cfg.log_format, LogFormat::Pretty);

        let settings = cfg.catalog_settings();
        assert_eq!(settings.creator_policy, CreatorPolicy::RequireIdentity);
        assert_eq!(settings.name_match, NameMatch::CaseInsensitive);
        assert_eq!(settings.write_retries, 7);
    }

    #[test]
    fn custom_creator_becomes_the_fallback() {
        let creator = UserId::new();
        let cfg = config(&[("LUMINA_DEFAULT_CREATOR_ID", creator.to_string().as_str())]).unwrap();
        assert_eq!(
            cfg.catalog_settings().creator_policy,
            CreatorPolicy::FallbackTo(creator)
        );
    }

    #[test]
    fn invalid_values_are_reported_with_their_variable() {
        let err = config(&[("LUMINA_WRITE_RETRIES", "many")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { var: "LUMINA_WRITE_RETRIES", .. }
        ));

        let err = config(&[("LUMINA_LOG_FORMAT", "xml")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "LUMINA_LOG_FORMAT", .. }));

        assert!(config(&[("LUMINA_DEFAULT_CREATOR_ID", "not-a-uuid")]).is_err());
        assert!(config(&[("LUMINA_BIND_ADDR", "nowhere")]).is_err());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config(&[("DATABASE_URL", "  "), ("LUMINA_SEED", "")]).unwrap();
        assert_eq!(cfg.database_url, None);
        assert!(!cfg.seed);
    }
}
