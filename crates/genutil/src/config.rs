//! Configuration of a genesis assembly run.

use std::path::{Path, PathBuf};

/// Node configuration directory, nested in the node's root dir.
pub const CONFIG_DIR: &str = "config";
/// Node configuration file, nested in [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";
/// Default genesis document file, nested in [`CONFIG_DIR`].
pub const GENESIS_FILE: &str = "genesis.json";
/// Default genesis transactions directory, nested in [`CONFIG_DIR`].
pub const GEN_TXS_DIR: &str = "gentx";

/// Everything a run needs to know about the local node. It is passed in
/// explicitly so that nothing is read from process-wide state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitConfig {
    /// The local node's moniker. The validator whose display name matches it
    /// is left out of the persistent peers.
    pub moniker: String,
    /// The node's root (home) directory
    pub root_dir: PathBuf,
    /// Directory with the validators' genesis transaction files
    pub gen_txs_dir: PathBuf,
    /// Where the final genesis document is written
    pub genesis_file: PathBuf,
}

impl InitConfig {
    /// A config with the genesis transactions directory and the genesis file
    /// at their default locations under `root_dir`.
    pub fn new(root_dir: impl AsRef<Path>, moniker: impl Into<String>) -> Self {
        let root_dir = root_dir.as_ref().to_owned();
        let config_dir = root_dir.join(CONFIG_DIR);
        Self {
            moniker: moniker.into(),
            gen_txs_dir: config_dir.join(GEN_TXS_DIR),
            genesis_file: config_dir.join(GENESIS_FILE),
            root_dir,
        }
    }

    /// Read the genesis transactions from another directory.
    pub fn with_gen_txs_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.gen_txs_dir = dir.as_ref().to_owned();
        self
    }

    /// Write the genesis document to another file.
    pub fn with_genesis_file(mut self, path: impl AsRef<Path>) -> Self {
        self.genesis_file = path.as_ref().to_owned();
        self
    }

    /// Get the node configuration directory path
    pub fn config_dir(&self) -> PathBuf {
        self.root_dir.join(CONFIG_DIR)
    }

    /// Get the node configuration file path
    pub fn node_config_file(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE)
    }
}
