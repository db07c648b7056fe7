//! Genesis bootstrap assembly.
//!
//! Every founding validator operator produces a signed "create validator"
//! genesis transaction whose memo carries the operator's
//! `<node-id>@<ip>:<port>` address. This crate collects a directory of those
//! transactions, checks them against the accounts pre-declared in the draft
//! genesis document and produces:
//!
//! - the final genesis document, with the validated transactions placed in
//!   the [`genesis_doc::GENUTIL_MODULE`] slot of the application state, and
//! - the node's `config.toml`, with `p2p.persistent_peers` set to the sorted
//!   list of every other validator's address.
//!
//! The entry point is [`collect::gen_app_state_from_config`].

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod accounts;
pub mod collect;
pub mod config;
pub mod error;
pub mod gen_tx;
pub mod genesis_doc;
pub mod node_config;
pub mod peers;
mod persist;

pub use error::{Error, Result, ValidationError};
