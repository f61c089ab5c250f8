use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use super::types::GlobalConfig;

const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "./avwatch.toml",
    "./config/avwatch.toml",
    "~/.config/avwatch/avwatch.toml",
    "/etc/avwatch/avwatch.toml",
];

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, preferring an explicit path over the default
    /// locations and falling back to built-in defaults
    pub fn load_with_custom_path(custom_path: Option<&Path>) -> Result<GlobalConfig> {
        // Try custom path first if provided
        if let Some(path) = custom_path {
            if path.exists() {
                return Self::load_from_file(path)
                    .with_context(|| format!("Failed to load config from custom path: {:?}", path));
            }
            tracing::warn!("Custom config path does not exist: {:?}, falling back to defaults", path);
        }

        // Try default paths
        for default_path in DEFAULT_CONFIG_PATHS {
            let path = Self::expand_path(default_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from: {:?}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                        continue;
                    }
                }
            }
        }

        // Fall back to default configuration
        tracing::info!("No configuration file found, using default settings");
        Ok(GlobalConfig::default())
    }

    /// Load configuration from a specific file
    fn load_from_file(path: &Path) -> Result<GlobalConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: GlobalConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {:?}", path))?;

        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate_config(config: &GlobalConfig) -> Result<()> {
        if config.concurrency.max_probes == 0 {
            anyhow::bail!("max_probes must be greater than 0");
        }

        if config.probe.command.is_empty() {
            anyhow::bail!("probe command cannot be empty");
        }

        if config.probe.attempts == 0 {
            anyhow::bail!("probe attempts must be greater than 0");
        }

        if config.probe.timeout_ms == 0 {
            anyhow::bail!("probe timeout_ms must be greater than 0");
        }

        if config.query.command.is_empty() {
            anyhow::bail!("query command cannot be empty");
        }

        if config.query.timeout_ms == 0 {
            anyhow::bail!("query timeout_ms must be greater than 0");
        }

        if let Some(ref mail) = config.mail {
            if mail.recipient.is_empty() || mail.sender.is_empty() {
                anyhow::bail!("mail recipient and sender cannot be empty");
            }
            if mail.server.is_empty() {
                anyhow::bail!("mail server cannot be empty");
            }
        }

        Ok(())
    }

    /// Expand paths with tilde and environment variables
    fn expand_path(path: &str) -> PathBuf {
        if path.starts_with("~/") {
            if let Ok(home) = std::env::var("HOME") {
                return PathBuf::from(home).join(&path[2..]);
            }
        }
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_default_config() {
        let config = GlobalConfig::default();
        assert_eq!(config.concurrency.max_probes, 5);
        assert_eq!(config.probe.command, "ping");
        assert_eq!(config.probe.attempts, 2);
        assert!(config.mail.is_none());
    }

    #[test]
    fn test_load_custom_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[concurrency]
max_probes = 12

[query]
command = "ssh"
base_args = ["-o", "BatchMode=yes", "statushost"]
timeout_ms = 15000

[mail]
recipient = "soc@example.com"
sender = "avwatch@example.com"
server = "smtp.example.com"
username = "avwatch"
password = "hunter2"
"#;
        fs::write(temp_file.path(), config_content).unwrap();

        let config = ConfigLoader::load_with_custom_path(Some(temp_file.path())).unwrap();
        assert_eq!(config.concurrency.max_probes, 12);
        assert_eq!(config.query.command, "ssh");
        assert_eq!(config.query.base_args, vec!["-o", "BatchMode=yes", "statushost"]);
        // Unspecified sections keep their defaults
        assert_eq!(config.probe.command, "ping");

        let mail = config.mail.unwrap();
        assert_eq!(mail.port, 587);
        assert_eq!(mail.subject, "Antivirus Status Overview");
    }

    #[test]
    fn test_validation_errors() {
        let temp_file = NamedTempFile::new().unwrap();
        let invalid_config = r#"
[concurrency]
max_probes = 0
"#;
        fs::write(temp_file.path(), invalid_config).unwrap();

        let result = ConfigLoader::load_with_custom_path(Some(temp_file.path()));
        assert!(result.is_err());
        let rendered = format!("{:#}", result.unwrap_err());
        assert!(rendered.contains("max_probes must be greater than 0"));
    }

    #[test]
    fn test_mail_validation() {
        let temp_file = NamedTempFile::new().unwrap();
        let invalid_config = r#"
[mail]
recipient = ""
sender = "avwatch@example.com"
server = "smtp.example.com"
username = "avwatch"
password = "hunter2"
"#;
        fs::write(temp_file.path(), invalid_config).unwrap();

        let result = ConfigLoader::load_with_custom_path(Some(temp_file.path()));
        assert!(result.is_err());
    }
}
