use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

type Result<T> = anyhow::Result<T>;

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    pub execution: ExecutionServiceConfig,
}

impl EvaluationConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize evaluation config")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionServiceConfig {
    /// Base URL of the remote execution service.
    pub base_url: String,
    /// Delay between result-polling rounds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Upper bound on polling rounds before a batch is declared timed out.
    #[serde(default = "default_max_poll_rounds")]
    pub max_poll_rounds: u32,
}

impl ExecutionServiceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

fn default_max_poll_rounds() -> u32 {
    120
}

#[cfg(test)]
mod tests {
    use super::EvaluationConfig;

    #[test]
    fn test_parse_config() {
        let raw = r#"
[execution]
base_url = "http://localhost:2358"
poll_interval_ms = 250
max_poll_rounds = 40
"#;

        let config = EvaluationConfig::from_str(raw).expect("config should parse");

        assert_eq!(config.execution.base_url, "http://localhost:2358");
        assert_eq!(config.execution.poll_interval_ms, 250);
        assert_eq!(config.execution.max_poll_rounds, 40);
    }

    #[test]
    fn test_polling_defaults() {
        let raw = r#"
[execution]
base_url = "http://judge.internal"
"#;

        let config = EvaluationConfig::from_str(raw).expect("config should parse");

        assert_eq!(config.execution.poll_interval_ms, 1_000);
        assert_eq!(config.execution.max_poll_rounds, 120);
    }
}
