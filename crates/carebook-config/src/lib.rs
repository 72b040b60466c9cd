use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use carebook_core::{Catalog, CoreError, Service};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "carebook";
const CONFIG_FILENAME: &str = "config.toml";

pub const PUBLIC_KEY_ENV: &str = "CAREBOOK_PAYMENT_PUBLIC_KEY";
pub const DEFAULT_PRACTICE_NAME: &str = "WellCare Practice";
pub const DEFAULT_CURRENCY: &str = "NGN";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub practice_name: String,
    pub payment: PaymentConfig,
    pub catalog: Catalog,
    /// File the values were read from; `None` when running on defaults.
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfig {
    pub public_key: Option<String>,
    pub currency: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            practice_name: DEFAULT_PRACTICE_NAME.to_string(),
            payment: PaymentConfig {
                public_key: None,
                currency: DEFAULT_CURRENCY.to_string(),
            },
            catalog: Catalog::default(),
            source: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("practice_name cannot be empty")]
    EmptyPracticeName,
    #[error("invalid payment.currency value: {0}")]
    InvalidCurrency(String),
    #[error("invalid service entry {index}: {source}")]
    InvalidService {
        index: usize,
        #[source]
        source: CoreError,
    },
    #[error("invalid service catalog: {0}")]
    InvalidCatalog(#[source] CoreError),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    practice_name: Option<String>,
    payment: Option<PaymentFile>,
    services: Option<Vec<ServiceFile>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaymentFile {
    public_key: Option<String>,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceFile {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    price: Decimal,
    duration_minutes: u32,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let mut config = match resolve_config_path(config_path) {
        Ok(path) => load_at_path(&path, required)?.unwrap_or_default(),
        Err(ConfigError::MissingHomeDir | ConfigError::InvalidConfigPath(_)) if !required => {
            AppConfig::default()
        }
        Err(err) => return Err(err),
    };
    apply_public_key_override(&mut config, env::var(PUBLIC_KEY_ENV).ok());
    Ok(config)
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = custom {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfigPath(path));
        }
        return Ok(path);
    }

    let base = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if dir.is_empty() => {
            return Err(ConfigError::InvalidConfigPath(PathBuf::from(dir)))
        }
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .ok_or(ConfigError::MissingHomeDir)?
            .join(".config"),
    };
    Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = merge_config(parsed)?;
    config.source = Some(path.to_path_buf());
    Ok(Some(config))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(name) = parsed.practice_name {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyPracticeName);
        }
        config.practice_name = name.to_string();
    }

    if let Some(payment) = parsed.payment {
        config.payment.public_key = payment.public_key.and_then(non_blank);
        if let Some(currency) = payment.currency {
            config.payment.currency = validate_currency(&currency)?;
        }
    }

    // An empty list keeps the default catalog.
    if let Some(entries) = parsed.services.filter(|entries| !entries.is_empty()) {
        let mut services = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let service = Service {
                id: entry.id.trim().to_string(),
                name: entry.name.trim().to_string(),
                description: entry.description,
                price: entry.price,
                duration_minutes: entry.duration_minutes,
            };
            service
                .validate()
                .map_err(|source| ConfigError::InvalidService { index, source })?;
            services.push(service);
        }
        config.catalog = Catalog::new(services).map_err(ConfigError::InvalidCatalog)?;
    }

    Ok(config)
}

fn apply_public_key_override(config: &mut AppConfig, value: Option<String>) {
    if let Some(key) = value.and_then(non_blank) {
        config.payment.public_key = Some(key);
    }
}

fn validate_currency(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(ConfigError::InvalidCurrency(raw.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.permissions().mode() & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        apply_public_key_override, load_at_path, merge_config, AppConfig, ConfigError,
        ConfigFile, PaymentFile,
    };
    use carebook_core::ServiceCatalog;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    fn write_config(temp: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = temp.path().join("config.toml");
        fs::write(&path, contents).expect("write config");
        restrict_permissions(&path);
        path
    }

    #[test]
    fn defaults_use_builtin_catalog() {
        let config = AppConfig::default();
        assert_eq!(config.practice_name, "WellCare Practice");
        assert_eq!(config.payment.currency, "NGN");
        assert!(config.payment.public_key.is_none());
        assert_eq!(config.catalog.services().len(), 4);
    }

    #[test]
    fn merge_config_applies_payment_values() {
        let parsed = ConfigFile {
            practice_name: Some(" Riverside Clinic ".to_string()),
            payment: Some(PaymentFile {
                public_key: Some("pk_test_123".to_string()),
                currency: Some("usd".to_string()),
            }),
            services: None,
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.practice_name, "Riverside Clinic");
        assert_eq!(merged.payment.public_key.as_deref(), Some("pk_test_123"));
        assert_eq!(merged.payment.currency, "USD");
    }

    #[test]
    fn merge_config_rejects_bad_currency() {
        let parsed = ConfigFile {
            practice_name: None,
            payment: Some(PaymentFile {
                public_key: None,
                currency: Some("naira".to_string()),
            }),
            services: None,
        };
        assert!(matches!(
            merge_config(parsed),
            Err(ConfigError::InvalidCurrency(_))
        ));
    }

    #[test]
    fn env_key_overrides_file_key() {
        let mut config = AppConfig::default();
        config.payment.public_key = Some("pk_file".to_string());

        apply_public_key_override(&mut config, Some("   ".to_string()));
        assert_eq!(config.payment.public_key.as_deref(), Some("pk_file"));

        apply_public_key_override(&mut config, Some("pk_env".to_string()));
        assert_eq!(config.payment.public_key.as_deref(), Some("pk_env"));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_services() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_config(
            &temp,
            r#"
practice_name = "Riverside Clinic"

[payment]
public_key = "pk_test_abc"

[[services]]
id = "yoga"
name = "Morning Yoga"
price = "25.00"
duration_minutes = 60

[[services]]
id = "coach"
name = "Health Coaching"
description = "One-on-one coaching"
price = "49.99"
duration_minutes = 45
"#,
        );

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        let ids: Vec<&str> = config
            .catalog
            .services()
            .iter()
            .map(|service| service.id.as_str())
            .collect();
        assert_eq!(ids, ["yoga", "coach"]);
        assert_eq!(
            config.catalog.find("coach").map(|s| s.price.to_string()),
            Some("49.99".to_string())
        );
        assert_eq!(config.payment.currency, "NGN");
    }

    #[test]
    fn empty_service_list_keeps_default_catalog() {
        let parsed: ConfigFile = toml::from_str("services = []\n").expect("parse");
        let merged = merge_config(parsed).expect("merge");
        let ids: Vec<&str> = merged
            .catalog
            .services()
            .iter()
            .map(|service| service.id.as_str())
            .collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
    }

    #[test]
    fn load_at_path_rejects_duplicate_service_ids() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_config(
            &temp,
            r#"
[[services]]
id = "1"
name = "A"
price = "1.00"
duration_minutes = 10

[[services]]
id = "1"
name = "B"
price = "2.00"
duration_minutes = 10
"#,
        );
        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCatalog(_)));
    }

    #[test]
    fn load_at_path_rejects_unknown_fields() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_config(&temp, "theme = \"dark\"\n");
        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "practice_name = \"Open\"\n").expect("write config");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
