//! Collecting the validators' genesis transactions into the genesis document.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::value::{to_raw_value, RawValue};

use crate::accounts::{GenesisAccountIndex, GenesisAccountsIterator};
use crate::config::InitConfig;
use crate::error::{Error, Result};
use crate::gen_tx::reader::GenTxReader;
use crate::gen_tx::validation::{validate_gen_tx, ValidatedGenTx};
use crate::gen_tx::GenesisTx;
use crate::genesis_doc::{
    is_null, AppState, GenesisDoc, GENTXS_KEY, GENUTIL_MODULE,
};
use crate::node_config::NodeConfig;
use crate::peers::persistent_peers;
use crate::persist;

/// The genesis transactions of a directory, validated against the genesis
/// accounts
#[derive(Clone, Debug, PartialEq)]
pub struct CollectedGenTxs {
    /// The transactions, in the order their files were read
    pub txs: Vec<ValidatedGenTx>,
    /// The comma-separated nodes of the validators, except the local one
    pub persistent_peers: String,
}

/// What a genesis assembly run wrote
#[derive(Clone, Debug)]
pub struct AssembledGenesis {
    /// The application state of the genesis file
    pub app_state: AppState,
    /// The persistent peers of the node config
    pub persistent_peers: String,
}

/// Read and validate every genesis transaction in `gen_txs_dir` and derive
/// the persistent peers of the node whose moniker is `moniker`. Nothing is
/// written.
pub fn collect_gen_txs<A>(
    moniker: &str,
    gen_txs_dir: &Path,
    app_state: &AppState,
    accounts: &A,
) -> Result<CollectedGenTxs>
where
    A: GenesisAccountsIterator + ?Sized,
{
    let index = GenesisAccountIndex::build(app_state, accounts)?;

    let mut txs = vec![];
    for read in GenTxReader::open(gen_txs_dir)? {
        let (file, tx) = read?;
        txs.push(validate_gen_tx(&file.path, tx, &index)?);
    }

    let persistent_peers =
        persistent_peers(txs.iter().map(|tx| &tx.peer), moniker);
    Ok(CollectedGenTxs {
        txs,
        persistent_peers,
    })
}

/// Put the genesis transactions into the [`GENUTIL_MODULE`] genesis state,
/// replacing any transactions that were there. The other modules and the
/// other fields of the [`GENUTIL_MODULE`] state are left as they are.
pub fn set_gen_txs_in_app_state<'a, I>(
    app_state: &mut AppState,
    txs: I,
) -> Result<()>
where
    I: IntoIterator<Item = &'a GenesisTx>,
{
    let mut state: BTreeMap<String, Box<RawValue>> =
        match app_state.get(GENUTIL_MODULE) {
            Some(state) if !is_null(state) => serde_json::from_str(
                state.get(),
            )
            .map_err(|source| Error::DecodeModuleState {
                module: GENUTIL_MODULE.to_owned(),
                source,
            })?,
            _ => BTreeMap::new(),
        };
    let txs: Vec<&GenesisTx> = txs.into_iter().collect();
    let txs = to_raw_value(&txs).map_err(|err| {
        Error::Encode("genesis transactions", err.to_string())
    })?;
    state.insert(GENTXS_KEY.to_owned(), txs);
    let state = to_raw_value(&state).map_err(|err| {
        Error::Encode("genutil genesis state", err.to_string())
    })?;
    app_state.insert(GENUTIL_MODULE.to_owned(), state);
    Ok(())
}

/// Assemble the genesis of a new network from the draft `genesis` and the
/// genesis transactions in the configured directory:
///
/// - the node config gets the persistent peers derived from the
///   transactions, and
/// - the genesis document gets the transactions in its application state.
///
/// Both files are encoded and staged before either is moved into place, so
/// an invalid input leaves both untouched.
pub fn gen_app_state_from_config<A>(
    config: &InitConfig,
    mut genesis: GenesisDoc,
    accounts: &A,
) -> Result<AssembledGenesis>
where
    A: GenesisAccountsIterator + ?Sized,
{
    let CollectedGenTxs {
        txs,
        persistent_peers,
    } = collect_gen_txs(
        &config.moniker,
        &config.gen_txs_dir,
        genesis.app_state()?,
        accounts,
    )?;
    if txs.is_empty() {
        return Err(Error::EmptyGenesis(config.gen_txs_dir.clone()));
    }
    tracing::info!(
        validators = txs.len(),
        "Collected genesis transactions from {}",
        config.gen_txs_dir.to_string_lossy()
    );

    let mut node_config = NodeConfig::load(config.node_config_file())?;
    if let Some(moniker) = node_config
        .moniker()
        .filter(|moniker| *moniker != config.moniker)
    {
        tracing::warn!(
            "The node config's moniker {moniker:?} differs from {:?}, the \
             latter is left out of the persistent peers",
            config.moniker,
        );
    }
    node_config.set_persistent_peers(persistent_peers.clone());

    let mut app_state = genesis.app_state()?.clone();
    set_gen_txs_in_app_state(&mut app_state, txs.iter().map(|tx| &tx.tx))?;
    genesis.app_state = Some(app_state);
    genesis.validate()?;

    let config_toml = node_config.to_toml()?;
    let staged_config =
        persist::stage(node_config.path(), config_toml.as_bytes())?;
    let staged_genesis =
        persist::stage(&config.genesis_file, &genesis.to_json_pretty()?)?;
    let config_file = staged_config.commit()?;
    let genesis_file = staged_genesis.commit()?;
    tracing::info!(
        persistent_peers,
        "Updated the node config {} and wrote the genesis file {}",
        config_file.to_string_lossy(),
        genesis_file.to_string_lossy(),
    );

    Ok(AssembledGenesis {
        app_state: genesis.app_state.unwrap_or_default(),
        persistent_peers,
    })
}
