use crate::core::errors::AvwatchError;
use std::path::Path;

/// Read the host list: one identifier per line, first whitespace-separated
/// column wins. Order kept, duplicates kept. Missing or empty input is fatal
/// for the run.
pub fn read(path: &Path) -> Result<Vec<String>, AvwatchError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AvwatchError::HostList(format!("cannot read {}: {}", path.display(), e))
    })?;

    let hosts: Vec<String> = content
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(|s| s.to_string())
        .collect();

    if hosts.is_empty() {
        return Err(AvwatchError::HostList(format!(
            "{} contains no host identifiers",
            path.display()
        )));
    }

    Ok(hosts)
}
