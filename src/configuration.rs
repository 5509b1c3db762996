use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

use crate::{
    domain::{site::DEFAULT_SITES, SiteRegistry, SiteRegistryError},
    services::{DelayRange, DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS, DEFAULT_REQUEST_TIMEOUT},
};

pub const CONFIGURATION_FILE: &str = "configuration/base";

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub sites: Vec<SiteSettings>,
    pub request_timeout_secs: u64,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub output_dir: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct SiteSettings {
    pub id: String,
    pub name: Option<String>,
    pub url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sites: DEFAULT_SITES
                .iter()
                .map(|(id, name, url)| SiteSettings {
                    id: id.to_string(),
                    name: Some(name.to_string()),
                    url: url.to_string(),
                })
                .collect(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            min_delay_ms: DEFAULT_MIN_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            output_dir: ".".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Registry(#[from] SiteRegistryError),
    #[error("minimum delay {min_ms} ms is larger than maximum delay {max_ms} ms")]
    InvalidDelay { min_ms: u64, max_ms: u64 },
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Everything one scrape run needs, already validated.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub registry: SiteRegistry,
    pub request_timeout: Duration,
    pub delay: DelayRange,
    pub output_dir: PathBuf,
}

impl ScrapeConfig {
    pub fn new(registry: SiteRegistry, output_dir: impl Into<PathBuf>) -> Self {
        ScrapeConfig {
            registry,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            delay: DelayRange::default(),
            output_dir: output_dir.into(),
        }
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn with_delay(mut self, delay: DelayRange) -> Self {
        self.delay = delay;
        self
    }
}

impl Settings {
    pub fn scrape_config(self) -> Result<ScrapeConfig, ConfigurationError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigurationError::ZeroTimeout);
        }
        let delay = DelayRange::new(self.min_delay_ms, self.max_delay_ms).ok_or(
            ConfigurationError::InvalidDelay {
                min_ms: self.min_delay_ms,
                max_ms: self.max_delay_ms,
            },
        )?;

        let registry = SiteRegistry::from_entries(self.sites.into_iter().map(|site| {
            let name = site.name.unwrap_or_else(|| site.id.clone());
            (site.id, name, site.url)
        }))?;

        Ok(ScrapeConfig {
            registry,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            delay,
            output_dir: PathBuf::from(self.output_dir),
        })
    }
}

/// Reads `configuration/base.yaml` when it exists. Missing keys, or a missing
/// file, fall back to the built-in lottery sites and timings.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    load_settings(config::File::with_name(CONFIGURATION_FILE).required(false))
}

pub fn get_scrape_config() -> Result<ScrapeConfig, ConfigurationError> {
    Ok(get_configuration()?.scrape_config()?)
}

fn load_settings<S>(source: S) -> Result<Settings, config::ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    config::Config::builder()
        .add_source(source)
        .build()?
        .try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use config::{File, FileFormat};

    use super::*;

    fn from_yaml(yaml: &str) -> Result<Settings, config::ConfigError> {
        load_settings(File::from_str(yaml, FileFormat::Yaml))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings =
            load_settings(File::with_name("configuration/does_not_exist").required(false)).unwrap();

        assert_eq!(settings, Settings::default());

        let config = settings.scrape_config().unwrap();
        assert_eq!(config.registry, SiteRegistry::default());
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.delay, DelayRange::default());
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn yaml_overrides_sites_and_timings() {
        let settings = from_yaml(
            r#"
request_timeout_secs: 4
min_delay_ms: 0
max_delay_ms: 10
output_dir: out
sites:
  - id: leidsa
    name: Leidsa
    url: https://www.leidsa.com/
  - id: loteka
    url: https://www.loteka.com.do/
"#,
        )
        .unwrap();

        let config = settings.scrape_config().unwrap();

        let ids: Vec<&str> = config.registry.ids().collect();
        assert_eq!(ids, vec!["leidsa", "loteka"]);
        assert_eq!(config.registry.sites()[1].name, "loteka");
        assert_eq!(config.request_timeout, Duration::from_secs(4));
        assert_eq!(config.delay, DelayRange::new(0, 10).unwrap());
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn partial_yaml_keeps_default_sites() {
        let settings = from_yaml("output_dir: results\n").unwrap();

        assert_eq!(settings.sites, Settings::default().sites);
        assert_eq!(settings.output_dir, "results");
    }

    #[test]
    fn inverted_delay_is_a_configuration_error() {
        let settings = Settings {
            min_delay_ms: 3_000,
            max_delay_ms: 1_000,
            ..Settings::default()
        };

        assert!(matches!(
            settings.scrape_config(),
            Err(ConfigurationError::InvalidDelay {
                min_ms: 3_000,
                max_ms: 1_000
            })
        ));
    }

    #[test]
    fn zero_timeout_is_a_configuration_error() {
        let settings = Settings {
            request_timeout_secs: 0,
            ..Settings::default()
        };

        assert!(matches!(
            settings.scrape_config(),
            Err(ConfigurationError::ZeroTimeout)
        ));
    }

    #[test]
    fn duplicate_sites_are_a_configuration_error() {
        let settings = from_yaml(
            r#"
sites:
  - id: real
    url: https://www.real.com.do/
  - id: real
    url: https://www.real.com.do/
"#,
        )
        .unwrap();

        assert!(matches!(
            settings.scrape_config(),
            Err(ConfigurationError::Registry(SiteRegistryError::DuplicateId(ref id))) if id == "real"
        ));
    }
}
