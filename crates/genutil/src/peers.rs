//! The persistent peers of a newly bootstrapped node.

use itertools::Itertools;

/// Separator of the persistent peers in the node config
pub const PEERS_SEPARATOR: &str = ",";

/// A validator's node as announced in its genesis transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeerEntry {
    /// `<node-id>@<ip>:<port>`
    pub node_address: String,
    /// The validator's display name
    pub display_name: String,
}

/// Build the persistent peers list from every validator's node, except for
/// those whose display name is the local node's `moniker`. A node never
/// dials itself.
///
/// The addresses are sorted so that every node derives the same list from the
/// same set of genesis transactions, whatever order they were read in.
pub fn persistent_peers<'a, I>(entries: I, moniker: &str) -> String
where
    I: IntoIterator<Item = &'a PeerEntry>,
{
    entries
        .into_iter()
        .filter(|entry| entry.display_name != moniker)
        .map(|entry| entry.node_address.as_str())
        .sorted()
        .join(PEERS_SEPARATOR)
}
