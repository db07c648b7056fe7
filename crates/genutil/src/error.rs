//! Errors of the genesis assembly.
//!
//! Any error aborts the whole run: nothing is retried and no partial genesis
//! is produced. The variants fall into five groups:
//!
//! - I/O: [`Error::ReadDir`], [`Error::ReadFile`]
//! - decoding: [`Error::DecodeGenTx`], [`Error::DecodeGenesisDoc`],
//!   [`Error::DecodeModuleState`], [`Error::DecodeNodeConfig`]
//! - validation: [`Error::Validation`], [`Error::InvalidGenesisDoc`]
//! - empty input: [`Error::EmptyGenesis`]
//! - persistence: [`Error::Encode`], [`Error::Persist`]

use std::path::PathBuf;

use thiserror::Error;
use zb_core::address::Address;

use crate::gen_tx::CREATE_VALIDATOR_KIND;

#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Couldn't list the genesis transactions directory {}: {1}",
        .0.to_string_lossy()
    )]
    ReadDir(PathBuf, std::io::Error),
    #[error("Couldn't read {}: {1}", .0.to_string_lossy())]
    ReadFile(PathBuf, std::io::Error),
    #[error(
        "Couldn't decode the genesis transaction {}: {1}",
        .0.to_string_lossy()
    )]
    DecodeGenTx(PathBuf, serde_json::Error),
    #[error(
        "Couldn't decode the genesis document {}: {1}",
        .0.to_string_lossy()
    )]
    DecodeGenesisDoc(PathBuf, serde_json::Error),
    #[error("Couldn't decode the genesis state of module {module}: {source}")]
    DecodeModuleState {
        module: String,
        source: serde_json::Error,
    },
    #[error("Couldn't decode the node config {}: {1}", .0.to_string_lossy())]
    DecodeNodeConfig(PathBuf, toml::de::Error),
    #[error("Invalid genesis transaction {}: {reason}", file.to_string_lossy())]
    Validation {
        file: PathBuf,
        reason: ValidationError,
    },
    #[error("Invalid genesis document: {0}")]
    InvalidGenesisDoc(String),
    #[error(
        "There must be at least one genesis transaction in {}",
        .0.to_string_lossy()
    )]
    EmptyGenesis(PathBuf),
    #[error("Couldn't encode {0}: {1}")]
    Encode(&'static str, String),
    #[error("Couldn't write {}: {1}", .0.to_string_lossy())]
    Persist(PathBuf, std::io::Error),
}

/// A structural or referential problem with a single genesis transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "missing node address: the memo must carry the node's \
         \"<node-id>@<ip>:<port>\""
    )]
    MissingNodeAddress,
    #[error(
        "must be single-message: a genesis transaction must provide exactly \
         one message, got {0}"
    )]
    NotSingleMessage(usize),
    #[error(
        "unexpected message kind {0:?}, only {CREATE_VALIDATOR_KIND:?} is \
         accepted"
    )]
    UnexpectedMessageKind(String),
    #[error(
        "signer not in genesis accounts: account {signer} is not in the \
         genesis accounts {known:?}"
    )]
    UnknownSigner {
        /// The signer of the create-validator message
        signer: Address,
        /// Every account address declared in the draft genesis
        known: Vec<Address>,
    },
}

/// Genesis assembly result
pub type Result<T> = std::result::Result<T, Error>;
