//! `KeyValues` text format
//!
//! The brace-delimited key/value syntax used by `gameinfo.txt` and most
//! other Source engine text files:
//!
//! ```text
//! "GameInfo"
//! {
//!     game    "Half-Life 2"
//!     FileSystem
//!     {
//!         SearchPaths
//!         {
//!             game    |gameinfo_path|.
//!             game    hl2
//!         }
//!     }
//! }
//! ```
//!
//! Keys may repeat and are looked up case-insensitively; order is preserved.

mod lexer;
mod parser;

pub use parser::{MAX_DEPTH, parse_keyvalues};

use serde::Serialize;

/// A value: either a plain string or a nested block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KvValue {
    String(String),
    Block(KvNode),
}

impl KvValue {
    /// The string value, if this is not a block
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            KvValue::String(s) => Some(s),
            KvValue::Block(_) => None,
        }
    }

    /// The block, if this is not a string
    #[must_use]
    pub fn as_block(&self) -> Option<&KvNode> {
        match self {
            KvValue::String(_) => None,
            KvValue::Block(node) => Some(node),
        }
    }
}

/// An ordered list of key/value pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KvNode {
    pub pairs: Vec<(String, KvValue)>,
}

impl KvNode {
    /// First value whose key matches (case-insensitive)
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&KvValue> {
        self.pairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// First string value for a key
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(KvValue::as_str)
    }

    /// First block for a key
    #[must_use]
    pub fn get_block(&self, key: &str) -> Option<&KvNode> {
        self.pairs
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .find_map(|(_, v)| v.as_block())
    }

    /// Follow a chain of block keys, e.g. `["FileSystem", "SearchPaths"]`
    #[must_use]
    pub fn get_path(&self, keys: &[&str]) -> Option<&KvNode> {
        keys.iter().try_fold(self, |node, key| node.get_block(key))
    }

    /// Iterate over all pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KvValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the node has no pairs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
