//! The core public types shared by the ZB Ledger node and its tooling.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod address;
pub mod chain;
