//! Configuration Module
//!
//! This module defines all configuration structures for an admission node.
//! Configuration is loaded from TOML files and parsed using serde.

use crate::registry::MemberRecord;
use serde::Deserialize;
use std::fs;
use std::time::Duration;

/// Main configuration structure
///
/// # Example TOML
/// ```toml
/// [node]
/// name = "vp0"
/// enrollment_id = "vp0-enrollment"
/// id = "0x7670"
/// signing_key = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
///
/// [directory]
/// lookup_timeout_ms = 500
///
/// [[directory.members]]
/// name = "alice"
/// enrollment_id = "alice-enrollment"
/// verification_key = "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23"
///
/// [admission]
/// max_clock_skew_secs = 30
/// queue_capacity = 1024
///
/// [state]
/// deployed_chaincodes = ["asset_mgmt"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub node: NodeConfig,
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub admission: AdmissionConfig,
    #[serde(default)]
    pub state: StateConfig,
}

/// Local node identity and its provisioned key material
///
/// # Fields
/// - `name`: Display/lookup name, also the directory key for this node
/// - `enrollment_id`: Enrollment identifier issued out of band
/// - `id`: Hex encoded binary peer identifier
/// - `signing_key`: Hex encoded secp256k1 private key
#[derive(Clone, Deserialize)]
pub struct NodeConfig {
    pub name: String,
    pub enrollment_id: String,
    pub id: String,
    pub signing_key: String,
}

impl std::fmt::Debug for NodeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeConfig")
            .field("name", &self.name)
            .field("enrollment_id", &self.enrollment_id)
            .field("id", &self.id)
            .field("signing_key", &"<redacted>")
            .finish()
    }
}

impl NodeConfig {
    /// Decode the hex peer identifier (an optional `0x` prefix is allowed).
    pub fn id_bytes(&self) -> anyhow::Result<Vec<u8>> {
        let hex = self.id.trim_start_matches("0x");
        Ok(ethers::utils::hex::decode(hex)?)
    }
}

/// Membership directory settings
///
/// # Fields
/// - `lookup_timeout_ms`: Upper bound on a single key lookup
/// - `members`: Entities enrolled at startup
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
    #[serde(default)]
    pub members: Vec<MemberRecord>,
}

impl DirectoryConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

/// Admission settings
///
/// # Fields
/// - `max_clock_skew_secs`: How far ahead of the local clock a transaction
///   timestamp may be before pre-execution rejects it
/// - `queue_capacity`: Bound of the inbound transaction channel
#[derive(Debug, Clone, Deserialize)]
pub struct AdmissionConfig {
    #[serde(default = "default_max_clock_skew_secs")]
    pub max_clock_skew_secs: u64,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_clock_skew_secs: default_max_clock_skew_secs(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

/// Chaincodes known to be deployed when the node starts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateConfig {
    #[serde(default)]
    pub deployed_chaincodes: Vec<String>,
}

fn default_lookup_timeout_ms() -> u64 {
    500
}

fn default_max_clock_skew_secs() -> u64 {
    30
}

fn default_queue_capacity() -> usize {
    1024
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [node]
        name = "vp0"
        enrollment_id = "vp0-enrollment"
        id = "0x7670"
        signing_key = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"

        [directory]
        lookup_timeout_ms = 250

        [[directory.members]]
        name = "alice"
        enrollment_id = "alice-enrollment"
        verification_key = "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23"

        [state]
        deployed_chaincodes = ["asset_mgmt"]
    "#;

    #[test]
    fn test_parse_sample() {
        let config = Config::parse(SAMPLE).unwrap();

        assert_eq!(config.node.name, "vp0");
        assert_eq!(config.node.id_bytes().unwrap(), b"vp".to_vec());
        assert_eq!(config.directory.lookup_timeout(), Duration::from_millis(250));
        assert_eq!(config.directory.members.len(), 1);
        assert_eq!(config.directory.members[0].name, "alice");
        assert_eq!(config.state.deployed_chaincodes, vec!["asset_mgmt".to_string()]);
        // Section omitted: defaults apply
        assert_eq!(config.admission.max_clock_skew_secs, 30);
        assert_eq!(config.admission.queue_capacity, 1024);
    }

    #[test]
    fn test_debug_redacts_signing_key() {
        let config = Config::parse(SAMPLE).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("4c0883a6"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_missing_node_section_is_an_error() {
        assert!(Config::parse("[directory]\n").is_err());
    }
}
