use thiserror::Error;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecError {
    pub tool: String,
    pub args: Vec<String>,
    pub exit_code: Option<i32>,
    pub stderr_tail: String,
    pub duration_ms: u128,
}

#[derive(Error, Debug)]
pub enum AvwatchError {
    #[error("host list error: {0}")]
    HostList(String),

    #[error("no host produced a status record")]
    EmptyRun,

    #[error("report failure: {0}")]
    #[allow(dead_code)]
    Report(String),

    #[error("execution failed: {0:?}")]
    Exec(ExecError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
