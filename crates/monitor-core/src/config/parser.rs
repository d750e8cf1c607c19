//! TOML parser with helpful error messages

use super::schema::MonitorConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse monitor.toml with detailed error messages
pub fn parse_monitor_toml(path: &Path) -> Result<MonitorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_monitor_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse monitor.toml content from string
pub fn parse_monitor_toml_str(content: &str) -> Result<MonitorConfig> {
    let config: MonitorConfig =
        toml::from_str(content).map_err(|e| enhance_toml_error(e, content))?;

    config.validate()?;

    Ok(config)
}

/// Enhance TOML parsing errors with the offending lines
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let message = error.message().to_string();

    match error.span() {
        Some(span) => {
            let line_num = content[..span.start.min(content.len())]
                .matches('\n')
                .count()
                + 1;
            anyhow::anyhow!(
                "TOML parsing error at line {}:\n{}\n\nError: {}",
                line_num,
                get_line_context(content, line_num),
                message
            )
        }
        None => anyhow::anyhow!("TOML parsing error: {}", message),
    }
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2);
    let end = (line_num + 1).min(lines.len());

    lines[start.min(end)..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Endpoint;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_valid_config() {
        let toml = r#"
[sentinel]
master = "monitor"
db = 2
endpoints = [
    { host = "10.0.0.1", port = 26379 },
    { host = "10.0.0.2", port = 26379 },
]
"#;

        let config = parse_monitor_toml_str(toml).unwrap();
        assert_eq!(config.sentinel.master, "monitor");
        assert_eq!(config.sentinel.db, Some(2));
        assert_eq!(
            config.sentinel.endpoints,
            vec![
                Endpoint::new("10.0.0.1", 26379),
                Endpoint::new("10.0.0.2", 26379)
            ]
        );
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_monitor_toml_str("").unwrap();
        assert_eq!(config, MonitorConfig::default());
    }

    #[test]
    fn test_partial_sentinel_table_keeps_default_endpoints() {
        let config = parse_monitor_toml_str("[sentinel]\nmaster = \"other\"\n").unwrap();
        assert_eq!(config.sentinel.master, "other");
        assert_eq!(config.sentinel.endpoints.len(), 3);
    }

    #[test]
    fn test_parse_invalid_toml_reports_line() {
        let toml = "[sentinel]\nmaster = \"m\"\nendpoints = [ { host = \"a\", port = \"x\" } ]\n";

        let err = parse_monitor_toml_str(toml).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 3"), "unexpected message: {msg}");
        assert!(msg.contains(">>>"));
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let result = parse_monitor_toml_str("[sentinel]\nendpoints = []\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[sentinel]").unwrap();
        writeln!(file, "master = \"from-file\"").unwrap();

        let config = parse_monitor_toml(file.path()).unwrap();
        assert_eq!(config.sentinel.master, "from-file");
    }
}
