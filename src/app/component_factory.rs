use std::env::VarError;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::infra::{AsanaAccessToken, AsanaClient};

use super::DisplayOptions;

pub const ACCESS_TOKEN_ENV_VAR: &str = "ASANA_ACCESS_TOKEN";
pub const DEFAULT_ASANA_API_URL: &str = "https://app.asana.com/api/1.0";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub asana: AsanaConfig,
    pub display: DisplayOptions,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AsanaConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub portfolio_gid: Option<String>,
}

impl Default for AsanaConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_ASANA_API_URL.to_string(),
            api_token: None,
            portfolio_gid: None,
        }
    }
}

impl std::fmt::Debug for AsanaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsanaConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("portfolio_gid", &self.portfolio_gid)
            .finish()
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ComponentFactoryError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ComponentFactoryError::UnableToReadConfig(path.display().to_string(), e)
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[derive(Error, Debug)]
pub enum ComponentFactoryError {
    #[error("unable to retrieve asana access token from env var {ACCESS_TOKEN_ENV_VAR}: {0}")]
    UnableToRetrieveAccessTokenFromEnvVar(#[from] VarError),

    #[error("no portfolio id was provided, pass one or set asana.portfolio_gid in the config")]
    PortfolioNotProvided,

    #[error("unable to read config file {0}: {1}")]
    UnableToReadConfig(String, std::io::Error),

    #[error("unable to parse config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("unable to build the asana client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Clone, Debug, Default)]
pub struct ComponentFactory {
    config: Config,
}

impl ComponentFactory {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn display_options(&self) -> DisplayOptions {
        self.config.display.clone()
    }

    pub fn risk_source(&self) -> Result<AsanaClient, ComponentFactoryError> {
        let token = self
            .config
            .asana
            .api_token
            .clone()
            .map(Ok)
            .unwrap_or_else(|| std::env::var(ACCESS_TOKEN_ENV_VAR))?;

        Ok(AsanaClient::new(
            self.config.asana.api_url.clone(),
            AsanaAccessToken(token),
        )?)
    }

    /// The portfolio given explicitly wins over the configured one.
    pub fn portfolio_gid(&self, explicit: Option<String>) -> Result<String, ComponentFactoryError> {
        explicit
            .or_else(|| self.config.asana.portfolio_gid.clone())
            .filter(|gid| !gid.trim().is_empty())
            .ok_or(ComponentFactoryError::PortfolioNotProvided)
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use serde_json::json;

    use super::{ComponentFactory, ComponentFactoryError, Config, DEFAULT_ASANA_API_URL};

    #[test]
    fn it_loads_the_default_config() {
        let config: Config = serde_json::from_value(json!({})).unwrap();

        assert_eq!(config.asana.api_url, DEFAULT_ASANA_API_URL);
        assert!(config.asana.api_token.is_none());
        assert_eq!(config.display.page_title, "Project Risk Management Tool");
    }

    #[test]
    fn it_creates_a_risk_source_with_the_configured_token() {
        let config: Config = serde_json::from_value(json!({
            "asana": {"api_url": "http://localhost:1234", "api_token": "secret"}
        }))
        .unwrap();

        let factory = ComponentFactory::new(config);

        assert!(factory.risk_source().is_ok());
    }

    #[test]
    fn the_explicit_portfolio_wins_over_the_configured_one() {
        let config: Config =
            serde_json::from_value(json!({"asana": {"portfolio_gid": "111"}})).unwrap();
        let factory = ComponentFactory::new(config);

        assert_eq!(factory.portfolio_gid(Some("222".to_string())).unwrap(), "222");
        assert_eq!(factory.portfolio_gid(None).unwrap(), "111");
        assert!(matches!(
            ComponentFactory::default().portfolio_gid(None),
            Err(ComponentFactoryError::PortfolioNotProvided)
        ));
    }

    #[test]
    fn it_reads_the_config_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"display": {{"max_rows": 5}}}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.display.max_rows, Some(5));
    }

    #[test]
    fn it_fails_on_a_malformed_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            Config::from_file(file.path()),
            Err(ComponentFactoryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn the_token_is_not_printed() {
        let config: Config =
            serde_json::from_value(json!({"asana": {"api_token": "secret"}})).unwrap();

        assert!(!format!("{config:?}").contains("secret"));
    }
}
