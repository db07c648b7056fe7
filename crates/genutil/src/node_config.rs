//! The node's consensus engine configuration, `<root>/config/config.toml`.
//!
//! The file belongs to the consensus engine, so it is handled as a plain TOML
//! document: only `p2p.persistent_peers` is ever changed and every other key
//! is written back as it was read.

use std::path::{Path, PathBuf};

use serde::de::Error as _;
use toml::value::Table;
use toml::Value;

use crate::error::{Error, Result};

/// The section of the P2P settings
pub const P2P_SECTION: &str = "p2p";
/// The key of the comma-separated persistent peers in the [`P2P_SECTION`]
pub const PERSISTENT_PEERS_KEY: &str = "persistent_peers";

/// A loaded node config file
#[derive(Clone, Debug, PartialEq)]
pub struct NodeConfig {
    path: PathBuf,
    doc: Table,
}

impl NodeConfig {
    /// Load the config from a file. A missing file is loaded as an empty
    /// config that will be created when persisted.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    "No node config found at {}, a new one will be created",
                    path.to_string_lossy()
                );
                String::new()
            }
            Err(err) => return Err(Error::ReadFile(path, err)),
        };
        let doc: Table = toml::from_str(&contents)
            .map_err(|err| Error::DecodeNodeConfig(path.clone(), err))?;
        match doc.get(P2P_SECTION) {
            None | Some(Value::Table(_)) => {}
            Some(other) => {
                return Err(Error::DecodeNodeConfig(
                    path,
                    toml::de::Error::custom(format!(
                        "the [{P2P_SECTION}] section must be a table, got {}",
                        other.type_str()
                    )),
                ));
            }
        }
        Ok(Self { path, doc })
    }

    /// Path of the config file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The node's moniker, if configured
    pub fn moniker(&self) -> Option<&str> {
        self.doc.get("moniker").and_then(Value::as_str)
    }

    /// The configured persistent peers, if any
    pub fn persistent_peers(&self) -> Option<&str> {
        self.doc
            .get(P2P_SECTION)
            .and_then(|p2p| p2p.get(PERSISTENT_PEERS_KEY))
            .and_then(Value::as_str)
    }

    /// Overwrite the persistent peers.
    pub fn set_persistent_peers(&mut self, peers: impl Into<String>) {
        let p2p = self
            .doc
            .entry(P2P_SECTION.to_owned())
            .or_insert_with(|| Value::Table(Table::new()));
        if let Value::Table(p2p) = p2p {
            p2p.insert(
                PERSISTENT_PEERS_KEY.to_owned(),
                Value::String(peers.into()),
            );
        }
    }

    /// Encode the config as TOML.
    pub fn to_toml(&self) -> Result<String> {
        // Encoding a `Value` rather than a `Table` puts the plain values
        // before the sub-tables, as TOML requires
        toml::to_string(&Value::Table(self.doc.clone()))
            .map_err(|err| Error::Encode("node config", err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    const CONFIG: &str = r#"
proxy_app = "tcp://127.0.0.1:26658"
moniker = "alice"

[p2p]
laddr = "tcp://0.0.0.0:26656"
seeds = ""
persistent_peers = "stale@10.0.0.9:26656"
max_num_inbound_peers = 40

[consensus]
timeout_commit = "5s"
"#;

    #[test]
    fn test_set_persistent_peers_keeps_other_settings() {
        let test_dir = tempdir().unwrap();
        let path = test_dir.path().join("config.toml");
        fs::write(&path, CONFIG).unwrap();

        let mut config = NodeConfig::load(&path).unwrap();
        assert_eq!(config.path(), path);
        assert_eq!(config.moniker(), Some("alice"));
        assert_eq!(config.persistent_peers(), Some("stale@10.0.0.9:26656"));

        config.set_persistent_peers("nodeB@10.0.0.2:26656");
        let encoded = config.to_toml().unwrap();

        let expected = {
            let mut doc: Table = toml::from_str(CONFIG).unwrap();
            doc.get_mut(P2P_SECTION)
                .and_then(Value::as_table_mut)
                .unwrap()
                .insert(
                    PERSISTENT_PEERS_KEY.to_owned(),
                    Value::String("nodeB@10.0.0.2:26656".to_owned()),
                );
            doc
        };
        let written: Table = toml::from_str(&encoded).unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn test_missing_config() {
        let test_dir = tempdir().unwrap();
        let path = test_dir.path().join("config.toml");

        let mut config = NodeConfig::load(&path).unwrap();
        assert_eq!(config.persistent_peers(), None);
        config.set_persistent_peers("");
        assert_eq!(config.persistent_peers(), Some(""));
        let written: Table =
            toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(
            written,
            toml::from_str::<Table>("[p2p]\npersistent_peers = \"\"\n")
                .unwrap()
        );
    }

    #[test]
    fn test_malformed_config() {
        let test_dir = tempdir().unwrap();
        let path = test_dir.path().join("config.toml");

        fs::write(&path, "[p2p\n").unwrap();
        assert_matches!(
            NodeConfig::load(&path),
            Err(Error::DecodeNodeConfig(p, _)) if p == path
        );

        fs::write(&path, "p2p = \"tcp://0.0.0.0:26656\"\n").unwrap();
        assert_matches!(
            NodeConfig::load(&path),
            Err(Error::DecodeNodeConfig(p, _)) if p == path
        );
    }
}
