//! Chain related data types

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The maximum length of chain ID string, as enforced by the consensus engine
/// when it loads a genesis document
pub const CHAIN_ID_MAX_LEN: usize = 50;

/// Chain ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(String);

impl ChainId {
    /// Extracts a string slice containing the entire chain ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check the chain ID as it would be checked when parsed from a string.
    /// Chain IDs read from a document are not validated on deserialization.
    pub fn validate(&self) -> Result<(), ChainIdParseError> {
        let len = self.0.len();
        if len == 0 {
            return Err(ChainIdParseError::Empty);
        }
        if len > CHAIN_ID_MAX_LEN {
            return Err(ChainIdParseError::UnexpectedLen(len));
        }
        Ok(())
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[allow(missing_docs)]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainIdParseError {
    #[error("Chain ID must not be empty")]
    Empty,
    #[error("Chain ID must be up to {CHAIN_ID_MAX_LEN} long, got {0}")]
    UnexpectedLen(usize),
}

impl FromStr for ChainId {
    type Err = ChainIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chain_id = Self(s.to_owned());
        chain_id.validate()?;
        Ok(chain_id)
    }
}
