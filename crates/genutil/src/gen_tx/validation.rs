//! Structural and referential checks of genesis transactions.
//!
//! Signatures, balances and stakes are not checked here, the application
//! does that when it delivers the genesis transactions at chain start.

use std::path::{Path, PathBuf};

use super::{GenesisTx, Msg};
use crate::accounts::GenesisAccountIndex;
use crate::error::{Error, Result, ValidationError};
use crate::peers::PeerEntry;

/// A genesis transaction that passed validation
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedGenTx {
    /// The file the transaction was read from
    pub file: PathBuf,
    /// The transaction
    pub tx: GenesisTx,
    /// The validator's node, announced in the transaction
    pub peer: PeerEntry,
}

/// Validate a genesis transaction read from `file`:
///
/// 1. the memo must carry the node address,
/// 2. there must be exactly one message,
/// 3. which must create a validator,
/// 4. and be signed by an account declared in genesis.
pub fn validate_gen_tx(
    file: &Path,
    tx: GenesisTx,
    accounts: &GenesisAccountIndex,
) -> Result<ValidatedGenTx> {
    let invalid = |reason: ValidationError| Error::Validation {
        file: file.to_owned(),
        reason,
    };

    if tx.memo.is_empty() {
        return Err(invalid(ValidationError::MissingNodeAddress));
    }

    let msg = match tx.messages.as_slice() {
        [msg] => msg,
        msgs => {
            return Err(invalid(ValidationError::NotSingleMessage(msgs.len())));
        }
    };

    let msg = match msg {
        Msg::CreateValidator(msg) => msg,
        Msg::Other { kind, .. } => {
            return Err(invalid(ValidationError::UnexpectedMessageKind(
                kind.clone(),
            )));
        }
    };

    if !accounts.contains(&msg.signer) {
        return Err(invalid(ValidationError::UnknownSigner {
            signer: msg.signer,
            known: accounts.addresses().copied().collect(),
        }));
    }

    let peer = PeerEntry {
        node_address: tx.memo.clone(),
        display_name: msg.display_name.clone(),
    };
    tracing::debug!(
        validator = %peer.display_name,
        node = %peer.node_address,
        "Validated genesis transaction {}",
        file.to_string_lossy()
    );
    Ok(ValidatedGenTx {
        file: file.to_owned(),
        tx,
        peer,
    })
}
