//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use attest_types::{Address, ProtocolParams};

use crate::logging::LogFormat;
use crate::NodeError;

/// Configuration for a protocol node.
///
/// Loaded from a TOML file via [`NodeConfig::from_toml_file`] or built
/// programmatically. Only `owner` is required; everything else has a default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    /// Principal holding the operator rights at genesis.
    pub owner: Address,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter, e.g. "info" or "debug,attest_node=trace".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where state snapshots are written, if anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,

    /// Genesis protocol parameters, as `[params.staking]` and `[params.tasks]`.
    #[serde(default)]
    pub params: ProtocolParams,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl NodeConfig {
    /// A default configuration owned by `owner`.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            snapshot_path: None,
            params: ProtocolParams::default(),
        }
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        let config: Self = toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter values the protocol cannot start with.
    pub fn validate(&self) -> Result<(), NodeError> {
        self.params
            .validate()
            .map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_types::{Amount, RegistryMode};

    const OWNER: &str = "0x2edddad5144aa9ab7e70c7c9c03c5fe5741be5cb";

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = NodeConfig::new(OWNER.parse().unwrap());
        config.params.staking.minimum_stake = Amount::tokens(10);
        config.snapshot_path = Some(PathBuf::from("/var/lib/attest/state.bin"));
        let toml_str = config.to_toml_string().unwrap();
        let parsed = NodeConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn owner_only_uses_defaults() {
        let config = NodeConfig::from_toml_str(&format!("owner = \"{OWNER}\"")).unwrap();
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.params, ProtocolParams::default());
        assert_eq!(config.snapshot_path, None);
    }

    #[test]
    fn owner_is_required() {
        assert!(matches!(
            NodeConfig::from_toml_str(""),
            Err(NodeError::Config(_))
        ));
    }

    #[test]
    fn nested_params_override() {
        let toml = format!(
            r#"
            owner = "{OWNER}"
            log_format = "json"

            [params.staking]
            minimum_stake = "2000000000000000000"
            slashing_enabled = true
            registry_mode = "open"

            [params.tasks]
            required_attestors = 5
        "#
        );
        let config = NodeConfig::from_toml_str(&toml).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.params.staking.minimum_stake, Amount::tokens(2));
        assert!(config.params.staking.slashing_enabled);
        assert_eq!(config.params.staking.registry_mode, RegistryMode::Open);
        assert_eq!(config.params.staking.unbonding_period, 10);
        assert_eq!(config.params.tasks.required_attestors, 5);
        assert_eq!(config.params.tasks.minimum_attestors, 2);
    }

    #[test]
    fn unknown_keys_are_config_errors() {
        let top = format!("owner = \"{OWNER}\"\nsnapshot = \"/tmp/state.bin\"");
        assert!(matches!(
            NodeConfig::from_toml_str(&top),
            Err(NodeError::Config(_))
        ));

        let nested = format!(
            r#"
            owner = "{OWNER}"

            [params.staking]
            slashing_enable = true
        "#
        );
        assert!(matches!(
            NodeConfig::from_toml_str(&nested),
            Err(NodeError::Config(_))
        ));
    }

    #[test]
    fn out_of_range_penalty_is_a_config_error() {
        let toml = format!(
            r#"
            owner = "{OWNER}"

            [params.staking]
            fraudulent_proof_penalty_pct = 200
        "#
        );
        let err = NodeConfig::from_toml_str(&toml).unwrap_err();
        assert!(matches!(&err, NodeError::Config(msg) if msg.contains("fraudulent_proof_penalty_pct")));

        let toml = format!(
            r#"
            owner = "{OWNER}"

            [params.tasks]
            task_history_capacity = 0
        "#
        );
        assert!(matches!(
            NodeConfig::from_toml_str(&toml),
            Err(NodeError::Config(_))
        ));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = NodeConfig::from_toml_file("/nonexistent/attest.toml");
        assert!(matches!(result, Err(NodeError::Config(_))));
    }
}
