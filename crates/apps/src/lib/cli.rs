//! The `zbld` command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::{Result, WrapErr};
use zb_genutil::accounts::AuthAccounts;
use zb_genutil::collect::gen_app_state_from_config;
use zb_genutil::config::InitConfig;
use zb_genutil::genesis_doc::GenesisDoc;

/// ZB Ledger node bootstrap
#[derive(Parser, Debug, Clone, PartialEq)]
#[clap(name = "zbld", version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Collect the validators' genesis transactions into the genesis file
    /// and set the node's persistent peers.
    CollectGentxs(CollectGenTxs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct CollectGenTxs {
    /// The node's home directory
    #[clap(long)]
    pub home: PathBuf,
    /// The node's moniker, it is left out of its own persistent peers
    #[clap(long)]
    pub moniker: String,
    /// Directory of the genesis transactions. Defaults to
    /// `<home>/config/gentx`.
    #[clap(long)]
    pub gentx_dir: Option<PathBuf>,
    /// The draft genesis file, overwritten with the final genesis. Defaults
    /// to `<home>/config/genesis.json`.
    #[clap(long)]
    pub genesis: Option<PathBuf>,
}

impl CollectGenTxs {
    pub fn init_config(&self) -> InitConfig {
        let mut config = InitConfig::new(&self.home, self.moniker.clone());
        if let Some(dir) = &self.gentx_dir {
            config = config.with_gen_txs_dir(dir);
        }
        if let Some(file) = &self.genesis {
            config = config.with_genesis_file(file);
        }
        config
    }

    /// Assemble the genesis and return the node's persistent peers.
    pub fn run(&self) -> Result<String> {
        let config = self.init_config();
        let genesis = GenesisDoc::read(&config.genesis_file)
            .wrap_err("Failed to read the draft genesis")?;
        let assembled =
            gen_app_state_from_config(&config, genesis, &AuthAccounts)
                .wrap_err("Failed to collect the genesis transactions")?;
        Ok(assembled.persistent_peers)
    }
}

pub fn main() -> Result<()> {
    match Cli::parse().cmd {
        Cmd::CollectGentxs(args) => {
            let peers = args.run()?;
            println!("Persistent peers: {peers}");
        }
    }
    Ok(())
}
