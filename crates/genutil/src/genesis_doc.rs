//! The consensus engine's genesis document.
//!
//! Only the `chain_id` and the `app_state` are interpreted here. Any other
//! field of the document (genesis time, consensus params, initial validators,
//! app hash, ...) and the genesis state of every module are kept as the raw
//! JSON they were read from, so they are written back byte for byte.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use zb_core::chain::ChainId;

use crate::error::{Error, Result};

/// Application genesis state: the raw genesis state of each module, keyed by
/// the module's name. The map is ordered so that encoding it is
/// deterministic.
pub type AppState = BTreeMap<String, Box<RawValue>>;

/// The module whose genesis state holds the validators' genesis transactions
pub const GENUTIL_MODULE: &str = "genutil";
/// The key of the genesis transactions in the [`GENUTIL_MODULE`] state
pub const GENTXS_KEY: &str = "gentxs";

const CHAIN_ID_KEY: &str = "chain_id";
const APP_STATE_KEY: &str = "app_state";

/// Is the raw JSON a `null`?
pub fn is_null(raw: &RawValue) -> bool {
    raw.get() == "null"
}

/// A genesis document
#[derive(Clone, Debug)]
pub struct GenesisDoc {
    /// The chain ID
    pub chain_id: ChainId,
    /// The application genesis state
    pub app_state: Option<AppState>,
    /// The remaining fields of the document
    pub other: BTreeMap<String, Box<RawValue>>,
}

impl GenesisDoc {
    /// Read a genesis document from a JSON file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|err| Error::ReadFile(path.to_owned(), err))?;
        serde_json::from_slice(&bytes)
            .map_err(|err| Error::DecodeGenesisDoc(path.to_owned(), err))
    }

    /// Get the application state, which must be present in a draft that
    /// genesis transactions are collected against.
    pub fn app_state(&self) -> Result<&AppState> {
        self.app_state.as_ref().ok_or_else(|| {
            Error::InvalidGenesisDoc("the app_state is missing".to_owned())
        })
    }

    /// Check the fields that the consensus engine requires before the
    /// document is exported.
    pub fn validate(&self) -> Result<()> {
        self.chain_id.validate().map_err(|err| {
            Error::InvalidGenesisDoc(format!(
                "invalid chain ID {:?}: {err}",
                self.chain_id.as_str()
            ))
        })?;
        self.app_state()?;
        Ok(())
    }

    /// Encode the document as indented JSON. The raw values are written as
    /// they were read.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|err| Error::Encode("genesis document", err.to_string()))
    }
}

// Raw values can only be decoded by `serde_json`
impl<'de> Deserialize<'de> for GenesisDoc {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut other =
            BTreeMap::<String, Box<RawValue>>::deserialize(deserializer)?;
        let chain_id = other
            .remove(CHAIN_ID_KEY)
            .ok_or_else(|| D::Error::missing_field(CHAIN_ID_KEY))?;
        let chain_id =
            serde_json::from_str(chain_id.get()).map_err(D::Error::custom)?;
        let app_state = match other.remove(APP_STATE_KEY) {
            Some(raw) if !is_null(&raw) => Some(
                serde_json::from_str(raw.get()).map_err(D::Error::custom)?,
            ),
            _ => None,
        };
        Ok(Self {
            chain_id,
            app_state,
            other,
        })
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Field<'a> {
    ChainId(&'a ChainId),
    AppState(&'a AppState),
    Raw(&'a RawValue),
}

impl Serialize for GenesisDoc {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut fields: BTreeMap<&str, Field<'_>> = self
            .other
            .iter()
            .map(|(key, raw)| (key.as_str(), Field::Raw(&**raw)))
            .collect();
        fields.insert(CHAIN_ID_KEY, Field::ChainId(&self.chain_id));
        if let Some(app_state) = &self.app_state {
            fields.insert(APP_STATE_KEY, Field::AppState(app_state));
        }
        fields.serialize(serializer)
    }
}
