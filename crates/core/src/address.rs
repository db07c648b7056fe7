//! Account addresses.
//!
//! An address is a fixed-width 20 byte identifier. Its string form is
//! [bech32](https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki)
//! with the [`ADDRESS_HRP`] human-readable part, which is also the form used
//! in every JSON document handled by the genesis tooling.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `Address` human-readable part
pub const ADDRESS_HRP: &str = "cosmos";

/// Length of the raw address bytes
pub const ADDRESS_LEN: usize = 20;

const HRP: Hrp = Hrp::parse_unchecked(ADDRESS_HRP);

#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Error decoding from Bech32: {0}")]
    DecodeBech32(bech32::DecodeError),
    #[error("Unexpected Bech32 human-readable part {0}, expected {1}")]
    UnexpectedBech32Hrp(String, String),
    #[error("Address must be {ADDRESS_LEN} bytes long, got {0}")]
    UnexpectedLen(usize),
}

/// Result of decoding address from string
pub type Result<T> = std::result::Result<T, DecodeError>;

/// An account's address
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Encode an address with Bech32.
    pub fn encode(&self) -> String {
        bech32::encode::<Bech32>(HRP, &self.0).unwrap_or_else(|_| {
            panic!(
                "The human-readable part {} should never cause a failure",
                HRP
            )
        })
    }

    /// Decode an address from Bech32 string.
    pub fn decode(string: impl AsRef<str>) -> Result<Self> {
        let (hrp, bytes) = bech32::decode(string.as_ref())
            .map_err(DecodeError::DecodeBech32)?;
        if hrp != HRP {
            return Err(DecodeError::UnexpectedBech32Hrp(
                hrp.to_string(),
                HRP.to_string(),
            ));
        }
        let bytes: [u8; ADDRESS_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| DecodeError::UnexpectedLen(bytes.len()))?;
        Ok(Self(bytes))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl FromStr for Address {
    type Err = DecodeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl Serialize for Address {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let encoded = self.encode();
        Serialize::serialize(&encoded, serializer)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let encoded: String = Deserialize::deserialize(deserializer)?;
        Self::decode(encoded).map_err(D::Error::custom)
    }
}

/// Helpers for testing with addresses.
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use proptest::prelude::*;

    use super::*;

    /// Derive an address from a simple seed. Different seeds give different
    /// addresses.
    pub fn address_from_simple_seed(seed: u64) -> Address {
        let mut bytes = [0_u8; ADDRESS_LEN];
        bytes[..8].copy_from_slice(&seed.to_be_bytes());
        bytes[ADDRESS_LEN - 1] = 0xaa;
        Address(bytes)
    }

    /// Generate an arbitrary [`Address`].
    pub fn arb_address() -> impl Strategy<Value = Address> {
        any::<[u8; ADDRESS_LEN]>().prop_map(Address)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use super::testing::*;
    use super::*;

    #[test]
    fn test_address_serde_serialize() {
        let original_address = address_from_simple_seed(7);
        let expect = format!("\"{}\"", original_address.encode());
        assert!(expect.starts_with("\"cosmos1"));

        let decoded_address: Address =
            serde_json::from_str(&expect).expect("could not read JSON");
        assert_eq!(original_address, decoded_address);

        let encoded_address = serde_json::to_string(&original_address).unwrap();
        assert_eq!(encoded_address, expect);
    }

    #[test]
    fn test_address_decode_rejects_foreign_hrp() {
        let foreign = bech32::encode::<Bech32>(
            Hrp::parse_unchecked("tnam"),
            &[1_u8; ADDRESS_LEN],
        )
        .unwrap();
        assert_matches!(
            Address::decode(foreign),
            Err(DecodeError::UnexpectedBech32Hrp(hrp, _)) if hrp == "tnam"
        );
    }

    #[test]
    fn test_address_decode_rejects_wrong_len() {
        let short =
            bech32::encode::<Bech32>(HRP, &[1_u8; ADDRESS_LEN - 1]).unwrap();
        assert_matches!(
            Address::decode(short),
            Err(DecodeError::UnexpectedLen(len)) if len == ADDRESS_LEN - 1
        );
        assert_matches!(
            Address::decode("addr1"),
            Err(DecodeError::DecodeBech32(_))
        );
    }

    proptest! {
        #[test]
        fn test_address_string_encoding(address in arb_address()) {
            let decoded = Address::decode(address.encode()).unwrap();
            prop_assert_eq!(address, decoded);
        }
    }
}
