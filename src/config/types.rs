use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub concurrency: ConcurrencyConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Mail delivery is opt-in: absent section plus --email is a fatal error.
    pub mail: Option<MailConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConcurrencyConfig {
    pub max_probes: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self { max_probes: 5 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    pub command: String,
    pub base_args: Vec<String>,
    pub attempts: u32,
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            command: "ping".to_string(),
            base_args: vec!["-c".to_string(), "1".to_string(), "-W".to_string(), "3".to_string()],
            attempts: 2,
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    pub command: String,
    pub base_args: Vec<String>,
    pub timeout_ms: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            command: "avquery".to_string(),
            base_args: vec![],
            timeout_ms: 30000, // 30 seconds
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("reports"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    pub recipient: String,
    pub sender: String,
    pub server: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_subject() -> String {
    "Antivirus Status Overview".to_string()
}
