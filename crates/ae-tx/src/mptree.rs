//! Merkle Patricia tree proofs
//!
//! A proof is serialized as `[root_hash, [[node_hash, node], ...]]` where
//! every node is a list of byte strings. Nodes are checked against their
//! hashes on construction. A tree may be partial: a branch can reference a
//! child that the proof leaves out, in which case lookups below that child
//! report "not found" instead of failing.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ae_crypto::hash;
use ae_encoding::{decode, encode};
use ae_primitives::Encoding;
use ae_rlp::RlpItem;

use crate::{Tag, TxError, UnpackedTx};

/// Length of contract store keys found in contract trees
const CONTRACT_STORE_KEY_LEN: usize = 33;

/// Decodes RLP records found inside other records
///
/// Nested transactions and tree values are decoded through this seam so the
/// field codecs and the tree do not depend on the unpacker directly.
pub trait EntryUnpacker: Send + Sync {
    /// Unpack `rlp`, checking the tag when `expected` is given
    fn unpack(&self, rlp: &[u8], expected: Option<Tag>) -> Result<UnpackedTx, TxError>;
}

enum Node<'a> {
    Branch {
        children: &'a [Vec<u8>],
        value: Option<&'a [u8]>,
    },
    Extension {
        path: String,
        child: &'a [u8],
    },
    Leaf {
        path: String,
        value: &'a [u8],
    },
}

fn parse_node(node: &[Vec<u8>]) -> Result<Node<'_>, TxError> {
    match node.len() {
        17 => Ok(Node::Branch {
            children: &node[..16],
            value: Some(node[16].as_slice()).filter(|v| !v.is_empty()),
        }),
        2 => {
            let nibble = node[0].first().map_or(0, |b| b >> 4);
            if nibble > 3 {
                return Err(TxError::UnknownPathNibble(nibble));
            }
            // even nibbles carry a padding nibble after the flag
            let skip = if nibble % 2 == 0 { 2 } else { 1 };
            let path = hex::encode(&node[0]).get(skip..).unwrap_or_default().to_string();
            if nibble <= 1 {
                Ok(Node::Extension {
                    path,
                    child: &node[1],
                })
            } else {
                Ok(Node::Leaf {
                    path,
                    value: &node[1],
                })
            }
        }
        len => Err(TxError::UnknownNodeLength(len)),
    }
}

fn node_hash(node: &[Vec<u8>]) -> Vec<u8> {
    let item = RlpItem::List(node.iter().cloned().map(RlpItem::Bytes).collect());
    hash(&item.encode()).as_bytes().to_vec()
}

fn malformed(what: &str) -> TxError {
    TxError::Decode(format!("Invalid MPTree binary: {what}"))
}

/// A (possibly partial) Merkle Patricia tree of ledger entries
#[derive(Clone)]
pub struct MpTree {
    root_hash: Vec<u8>,
    nodes: Vec<(Vec<u8>, Vec<Vec<u8>>)>,
    index: HashMap<Vec<u8>, usize>,
    is_complete: bool,
    encoding: Encoding,
    tag: Tag,
    unpacker: Arc<dyn EntryUnpacker>,
}

impl MpTree {
    /// Build a tree from its root hash and node list, verifying every node
    ///
    /// `encoding` is the prefix of the tree keys and `tag` the object tag
    /// of its values.
    pub fn new(
        root_hash: Vec<u8>,
        node_list: Vec<(Vec<u8>, Vec<Vec<u8>>)>,
        encoding: Encoding,
        tag: Tag,
        unpacker: Arc<dyn EntryUnpacker>,
    ) -> Result<Self, TxError> {
        let mut nodes: Vec<(Vec<u8>, Vec<Vec<u8>>)> = Vec::with_capacity(node_list.len());
        let mut index: HashMap<Vec<u8>, usize> = HashMap::with_capacity(node_list.len());
        for (key, node) in node_list {
            match index.get(&key) {
                Some(&i) => nodes[i].1 = node,
                None => {
                    index.insert(key.clone(), nodes.len());
                    nodes.push((key, node));
                }
            }
        }

        let mut tree = Self {
            root_hash,
            nodes,
            index,
            is_complete: true,
            encoding,
            tag,
            unpacker,
        };

        if tree.node(&tree.root_hash).is_none() {
            if !tree.nodes.is_empty() {
                return Err(TxError::MissingNodeInTree(
                    "Can't find a node by root hash".to_string(),
                ));
            }
            tree.is_complete = false;
            return Ok(tree);
        }

        let mut unresolved_branch = false;
        for (key, node) in &tree.nodes {
            if node_hash(node) != *key {
                return Err(TxError::MerkleTreeHashMismatch);
            }
            match parse_node(node)? {
                Node::Branch { children, .. } => {
                    unresolved_branch |= children
                        .iter()
                        .any(|child| !child.is_empty() && !tree.index.contains_key(child));
                }
                Node::Extension { child, .. } => {
                    if !tree.index.contains_key(child) {
                        return Err(TxError::MissingNodeInTree(
                            "Can't find a node by hash in extension node".to_string(),
                        ));
                    }
                }
                Node::Leaf { .. } => {}
            }
        }
        tree.is_complete = !unresolved_branch;

        tracing::debug!(
            root = %hex::encode(&tree.root_hash),
            nodes = tree.nodes.len(),
            complete = tree.is_complete,
            "Parsed MPTree"
        );
        Ok(tree)
    }

    /// Build a tree from its RLP form `[root_hash, [[hash, node], ...]]`
    pub fn from_rlp(
        item: &RlpItem,
        encoding: Encoding,
        tag: Tag,
        unpacker: Arc<dyn EntryUnpacker>,
    ) -> Result<Self, TxError> {
        let [root, nodes] = item.as_list().ok_or_else(|| malformed("not a list"))? else {
            return Err(malformed("expected root hash and node list"));
        };
        let root = root.as_bytes().ok_or_else(|| malformed("root hash is a list"))?;
        let nodes = nodes
            .as_list()
            .ok_or_else(|| malformed("nodes is not a list"))?
            .iter()
            .map(|entry| {
                let [key, node] = entry.as_list().ok_or_else(|| malformed("node entry"))? else {
                    return Err(malformed("node entry should have two items"));
                };
                let key = key.as_bytes().ok_or_else(|| malformed("node hash is a list"))?;
                let node = node
                    .as_list()
                    .ok_or_else(|| malformed("node is not a list"))?
                    .iter()
                    .map(|part| {
                        part.as_bytes()
                            .map(<[u8]>::to_vec)
                            .ok_or_else(|| malformed("nested node item"))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((key.to_vec(), node))
            })
            .collect::<Result<Vec<_>, TxError>>()?;
        Self::new(root.to_vec(), nodes, encoding, tag, unpacker)
    }

    /// RLP form, the exact inverse of [`MpTree::from_rlp`]
    pub fn serialize(&self) -> RlpItem {
        RlpItem::List(vec![
            RlpItem::Bytes(self.root_hash.clone()),
            RlpItem::List(
                self.nodes
                    .iter()
                    .map(|(key, node)| {
                        RlpItem::List(vec![
                            RlpItem::Bytes(key.clone()),
                            RlpItem::List(node.iter().cloned().map(RlpItem::Bytes).collect()),
                        ])
                    })
                    .collect(),
            ),
        ])
    }

    /// Root hash
    pub fn root_hash(&self) -> &[u8] {
        &self.root_hash
    }

    /// False if the proof leaves out part of the tree
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Prefix of the tree keys
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Object tag of the tree values
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Number of nodes in the proof
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, key: &[u8]) -> Option<&[Vec<u8>]> {
        self.index.get(key).map(|&i| self.nodes[i].1.as_slice())
    }

    fn missing_node(&self) -> Result<(), TxError> {
        if self.is_complete {
            return Err(TxError::Internal("Can't find node in complete tree".to_string()));
        }
        Ok(())
    }

    /// Raw value stored under a hex key
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, TxError> {
        let mut search_from: &[u8] = &self.root_hash;
        let mut key = key;
        loop {
            let Some(node) = self.node(search_from) else {
                self.missing_node()?;
                return Ok(None);
            };
            match parse_node(node)? {
                Node::Branch { children, value } => {
                    let Some(nibble) = key.chars().next() else {
                        return Ok(value.map(<[u8]>::to_vec));
                    };
                    let idx = nibble
                        .to_digit(16)
                        .ok_or_else(|| TxError::Decode(format!("Invalid key nibble: {nibble}")))?;
                    let child = &children[idx as usize];
                    if child.is_empty() {
                        return Ok(None);
                    }
                    search_from = child;
                    key = &key[1..];
                }
                Node::Extension { path, child } => {
                    if !key.starts_with(path.as_str()) {
                        return Ok(None);
                    }
                    search_from = child;
                    key = &key[path.len()..];
                }
                Node::Leaf { path, value } => {
                    return Ok((path == key).then(|| value.to_vec()));
                }
            }
        }
    }

    /// Look up an entry by its encoded key
    pub fn get(&self, key: &str) -> Result<Option<UnpackedTx>, TxError> {
        let key = hex::encode(decode(key)?);
        self.get_raw(&key)?
            .map(|value| self.unpacker.unpack(&value, Some(self.tag)))
            .transpose()
    }

    fn collect_entries(
        &self,
        search_from: &[u8],
        key: String,
        out: &mut Vec<(String, Vec<u8>)>,
    ) -> Result<(), TxError> {
        let Some(node) = self.node(search_from) else {
            return self.missing_node();
        };
        match parse_node(node)? {
            Node::Branch { children, value } => {
                for (idx, child) in children.iter().enumerate() {
                    if !child.is_empty() {
                        self.collect_entries(child, format!("{key}{idx:x}"), out)?;
                    }
                }
                if let Some(value) = value {
                    out.push((key, value.to_vec()));
                }
            }
            Node::Extension { path, child } => {
                self.collect_entries(child, key + &path, out)?;
            }
            Node::Leaf { path, value } => out.push((key + &path, value.to_vec())),
        }
        Ok(())
    }

    /// Every reachable entry, keyed by its encoded key
    ///
    /// Contract trees also hold 33-byte keys for contract store entries,
    /// those are skipped. Any other key must be a valid payload for the
    /// tree prefix.
    pub fn to_object(&self) -> Result<Vec<(String, UnpackedTx)>, TxError> {
        let mut raw = Vec::new();
        self.collect_entries(&self.root_hash, String::new(), &mut raw)?;

        let mut entries = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let bytes = hex::decode(&key)
                .map_err(|e| TxError::Decode(format!("Invalid MPTree key {key}: {e}")))?;
            if self.encoding == Encoding::ContractAddress && bytes.len() == CONTRACT_STORE_KEY_LEN {
                tracing::trace!(key = %key, "Skipping contract store key");
                continue;
            }
            let entry = self.unpacker.unpack(&value, Some(self.tag))?;
            entries.push((encode(&bytes, self.encoding)?, entry));
        }
        Ok(entries)
    }
}

impl PartialEq for MpTree {
    fn eq(&self, other: &Self) -> bool {
        self.root_hash == other.root_hash
    }
}

impl fmt::Debug for MpTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MpTree")
            .field("root_hash", &hex::encode(&self.root_hash))
            .field("nodes", &self.nodes.len())
            .field("is_complete", &self.is_complete)
            .field("encoding", &self.encoding)
            .field("tag", &self.tag)
            .finish()
    }
}
