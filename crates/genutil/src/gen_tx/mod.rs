//! Genesis transactions.
//!
//! A genesis transaction is the JSON envelope
//! `{"messages": [...], "memo": "...", ...}` produced by a founding validator
//! operator. Its memo carries the operator's node address,
//! `<node-id>@<ip>:<port>`, and it must hold a single create-validator
//! message signed by a genesis account. The envelope fields that are not used
//! here, such as the fee and the signatures, are preserved.

pub mod reader;
pub mod validation;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use zb_core::address::Address;

/// The `kind` of a create-validator message
pub const CREATE_VALIDATOR_KIND: &str = "validator/MsgCreateValidator";

/// A decoded genesis transaction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenesisTx {
    /// The embedded messages
    #[serde(default)]
    pub messages: Vec<Msg>,
    /// The node address of the validator, `<node-id>@<ip>:<port>`
    #[serde(default)]
    pub memo: String,
    /// The remaining envelope fields
    #[serde(flatten)]
    pub envelope: Map<String, Value>,
}

/// A message embedded in a genesis transaction, tagged by its `kind` field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawMsg")]
pub enum Msg {
    /// Creates a new validator
    CreateValidator(MsgCreateValidator),
    /// Any other kind of message
    Other {
        /// The message kind
        kind: String,
        /// The message fields, without the kind
        fields: Map<String, Value>,
    },
}

impl Msg {
    /// The kind of the message
    pub fn kind(&self) -> &str {
        match self {
            Msg::CreateValidator(_) => CREATE_VALIDATOR_KIND,
            Msg::Other { kind, .. } => kind,
        }
    }
}

/// The create-validator message
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MsgCreateValidator {
    /// The account that signs the transaction and operates the validator
    pub signer: Address,
    /// The validator's display name. It is compared with the node's moniker.
    pub display_name: String,
    /// The remaining validator description, commission and self-delegation
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawMsg {
    kind: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

#[derive(Serialize)]
struct TaggedMsg<'a, T> {
    kind: &'a str,
    #[serde(flatten)]
    body: &'a T,
}

impl TryFrom<RawMsg> for Msg {
    type Error = serde_json::Error;

    fn try_from(RawMsg { kind, fields }: RawMsg) -> Result<Self, Self::Error> {
        if kind == CREATE_VALIDATOR_KIND {
            MsgCreateValidator::deserialize(Value::Object(fields))
                .map(Msg::CreateValidator)
        } else {
            Ok(Msg::Other { kind, fields })
        }
    }
}

impl Serialize for Msg {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Msg::CreateValidator(msg) => TaggedMsg {
                kind: CREATE_VALIDATOR_KIND,
                body: msg,
            }
            .serialize(serializer),
            Msg::Other { kind, fields } => TaggedMsg { kind, body: fields }
                .serialize(serializer),
        }
    }
}
