//! Accounts pre-declared in the draft genesis application state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zb_core::address::Address;

use crate::error::{Error, Result};
use crate::genesis_doc::{is_null, AppState};

/// The module whose genesis state declares the genesis accounts
pub const AUTH_MODULE: &str = "auth";

/// An account declared in genesis. Only its address is used here, its other
/// fields (coins, sequence, account number, ...) are kept as they are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenesisAccount {
    /// The account's address
    pub address: Address,
    /// The remaining account fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A source of the genesis accounts embedded in an application state.
pub trait GenesisAccountsIterator {
    /// The accounts, in no particular order
    type Accounts: Iterator<Item = GenesisAccount>;

    /// Decode the accounts declared in the given application state.
    fn genesis_accounts(&self, app_state: &AppState) -> Result<Self::Accounts>;
}

/// Reads the accounts from the [`AUTH_MODULE`] genesis state, i.e. from
/// `{"accounts": [...]}`. When the module has no genesis state, there are no
/// accounts.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthAccounts;

#[derive(Deserialize)]
struct AuthGenesisState {
    #[serde(default)]
    accounts: Vec<GenesisAccount>,
}

impl GenesisAccountsIterator for AuthAccounts {
    type Accounts = std::vec::IntoIter<GenesisAccount>;

    fn genesis_accounts(&self, app_state: &AppState) -> Result<Self::Accounts> {
        let accounts = match app_state.get(AUTH_MODULE) {
            Some(state) if !is_null(state) => {
                serde_json::from_str::<AuthGenesisState>(state.get())
                    .map_err(|source| Error::DecodeModuleState {
                        module: AUTH_MODULE.to_owned(),
                        source,
                    })?
                    .accounts
            }
            _ => vec![],
        };
        Ok(accounts.into_iter())
    }
}

/// The genesis accounts keyed by their address. If an address is declared
/// more than once, the last declaration wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenesisAccountIndex(BTreeMap<Address, GenesisAccount>);

impl GenesisAccountIndex {
    /// Build the index from the accounts found in the application state.
    pub fn build<I>(app_state: &AppState, accounts: &I) -> Result<Self>
    where
        I: GenesisAccountsIterator + ?Sized,
    {
        let index: Self = accounts.genesis_accounts(app_state)?.collect();
        tracing::debug!(accounts = index.len(), "Indexed genesis accounts");
        Ok(index)
    }

    /// Is the address declared in genesis?
    pub fn contains(&self, address: &Address) -> bool {
        self.0.contains_key(address)
    }

    /// All the declared addresses, in ascending order.
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.0.keys()
    }

    /// Number of distinct accounts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Is the index empty?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<GenesisAccount> for GenesisAccountIndex {
    fn from_iter<T: IntoIterator<Item = GenesisAccount>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|account| (account.address, account))
                .collect(),
        )
    }
}
