use super::allocation::AssetUniverse;
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const PASSWORD_ENV: &str = "CONTRIB_SMTP_PASSWORD";
pub const SENDER_ENV: &str = "CONTRIB_EMAIL_FROM";
pub const RECIPIENT_ENV: &str = "CONTRIB_EMAIL_TO";

/// Largest accepted monthly budget.
pub const MAX_BUDGET: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

fn default_budget() -> Decimal {
    Decimal::new(22000, 2)
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct YahooProviderConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub yahoo: Option<YahooProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            yahoo: Some(YahooProviderConfig {
                base_url: "https://query1.finance.yahoo.com".to_string(),
                timeout_secs: default_timeout_secs(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub sender: Option<String>,
    pub recipient: Option<String>,
}

/// Fully resolved SMTP settings, secrets included.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub sender: String,
    pub recipient: String,
    pub password: String,
}

impl EmailConfig {
    pub fn resolve(&self) -> Result<SmtpSettings> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Environment values win over the file; the password only comes from the environment.
    pub fn resolve_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<SmtpSettings> {
        let sender = env(SENDER_ENV)
            .or_else(|| self.sender.clone())
            .ok_or_else(|| anyhow!("No sender address: set email.sender or {}", SENDER_ENV))?;
        let recipient = env(RECIPIENT_ENV)
            .or_else(|| self.recipient.clone())
            .ok_or_else(|| {
                anyhow!("No recipient address: set email.recipient or {}", RECIPIENT_ENV)
            })?;
        let password = env(PASSWORD_ENV).ok_or_else(|| anyhow!("{} is not set", PASSWORD_ENV))?;

        Ok(SmtpSettings {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            sender,
            recipient,
            password,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_budget")]
    pub budget: Decimal,
    pub record_path: Option<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    pub email: Option<EmailConfig>,
    #[serde(default)]
    pub universe: AssetUniverse,
}

impl AppConfig {
    pub fn validate_budget(&self) -> Result<()> {
        if self.budget < Decimal::ZERO {
            return Err(anyhow!("Budget must not be negative: {}", self.budget));
        }
        if self.budget > MAX_BUDGET {
            return Err(anyhow!("Budget {} exceeds the maximum of {}", self.budget, MAX_BUDGET));
        }
        Ok(())
    }

    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "contrib", "contrib")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn record_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.record_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "contrib", "contrib")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().join("history.csv"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .universe
            .validate()
            .with_context(|| format!("Invalid universe in: {}", path.as_ref().display()))?;
        config
            .validate_budget()
            .with_context(|| format!("Invalid budget in: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.budget, dec!(220.00));
        assert!(config.record_path.is_none());
        assert!(config.email.is_none());
        assert_eq!(config.universe, AssetUniverse::default());
        let yahoo = config.providers.yahoo.unwrap();
        assert_eq!(yahoo.base_url, "https://query1.finance.yahoo.com");
        assert_eq!(yahoo.timeout_secs, 10);
    }

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
budget: 350.50
record_path: "/tmp/history.csv"
providers:
  yahoo:
    base_url: "http://example.com/yahoo"
email:
  sender: "me@example.com"
  recipient: "you@example.com"
universe:
  global: "VT"
  real_estate: ["VNQ"]
  fixed_income: ["BND", "TIP"]
  satellite: "QQQ"
  security: "GLD"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.budget, dec!(350.50));
        assert_eq!(
            config.record_path().unwrap(),
            PathBuf::from("/tmp/history.csv")
        );
        let yahoo = config.providers.yahoo.unwrap();
        assert_eq!(yahoo.base_url, "http://example.com/yahoo");
        assert_eq!(yahoo.timeout_secs, 10);

        let email = config.email.unwrap();
        assert_eq!(email.smtp_host, "smtp.gmail.com");
        assert_eq!(email.smtp_port, 465);
        assert_eq!(email.sender.as_deref(), Some("me@example.com"));

        assert_eq!(config.universe.global, "VT");
        assert_eq!(config.universe.fixed_income, vec!["BND", "TIP"]);
    }

    #[test]
    fn test_load_rejects_empty_universe_list() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            r#"
universe:
  global: "VT"
  real_estate: []
  fixed_income: ["BND"]
  satellite: "QQQ"
  security: "GLD"
"#,
        )
        .unwrap();
        let err = AppConfig::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid universe in:"));
    }

    #[test]
    fn test_load_rejects_out_of_range_budget() {
        for budget in ["-10.00", "1000000000.01", "5000000000000"] {
            let file = tempfile::NamedTempFile::new().unwrap();
            fs::write(file.path(), format!("budget: {budget}\n")).unwrap();
            let err = AppConfig::load_from_path(file.path()).unwrap_err();
            assert!(err.to_string().starts_with("Invalid budget in:"), "{budget}");
        }
    }

    #[test]
    fn test_load_accepts_max_budget() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "budget: 1000000000\n").unwrap();
        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.budget, MAX_BUDGET);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("nope.yaml"));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .starts_with("Failed to read config file:")
        );
    }

    #[test]
    fn test_email_resolve_prefers_environment() {
        let email = EmailConfig {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            sender: Some("file@example.com".to_string()),
            recipient: Some("file-to@example.com".to_string()),
        };
        let env: HashMap<&str, &str> = HashMap::from([
            (PASSWORD_ENV, "app-password"),
            (RECIPIENT_ENV, "env-to@example.com"),
        ]);

        let settings = email
            .resolve_with(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(settings.sender, "file@example.com");
        assert_eq!(settings.recipient, "env-to@example.com");
        assert_eq!(settings.password, "app-password");
        assert_eq!(settings.host, "smtp.gmail.com");
        assert_eq!(settings.port, 465);
    }

    #[test]
    fn test_email_resolve_requires_password() {
        let email = EmailConfig {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            sender: Some("me@example.com".to_string()),
            recipient: Some("me@example.com".to_string()),
        };
        let err = email.resolve_with(|_| None).unwrap_err();
        assert_eq!(err.to_string(), "CONTRIB_SMTP_PASSWORD is not set");
    }
}
