// ============================================
// src/merkle.rs
// Claim leaf hashing and merkle path verification

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{HexBinary, Uint128};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub type Hash = [u8; 32];

/// One sibling on the way from a leaf to the root.
#[cw_serde]
pub struct MerklePathNode {
    pub hash: HexBinary,
    /// True when the sibling sits to the left of the running hash.
    pub is_left_child_node: bool,
}

#[cw_serde]
#[derive(Default)]
pub struct MerklePath {
    pub nodes: Vec<MerklePathNode>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MerkleError {
    #[error("merkle path node {index} is {len} bytes, expected 32")]
    MalformedNode { index: usize, len: usize },
}

pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

pub fn hash_pair(left: &[u8], right: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Hash committed for a single claim in a swap round.
///
/// Layout: `amount (16 bytes, big endian) || unique_id || swap_id || receiver`.
/// `unique_id` and `swap_id` are fixed 32-byte digests so the variable-length
/// receiver address can only sit at the end. Every pair of a swap shares the
/// swap id, so one leaf and one path redeem into all of its target tokens.
pub fn leaf_hash(amount: Uint128, unique_id: &[u8], swap_id: &[u8], receiver: &str) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(amount.u128().to_be_bytes());
    hasher.update(unique_id);
    hasher.update(swap_id);
    hasher.update(receiver.as_bytes());
    hasher.finalize().into()
}

/// Folds `path` over `leaf` and returns the resulting root.
pub fn compute_root(leaf: &Hash, path: &MerklePath) -> Result<Hash, MerkleError> {
    let mut current = *leaf;
    for (index, node) in path.nodes.iter().enumerate() {
        if node.hash.len() != 32 {
            return Err(MerkleError::MalformedNode {
                index,
                len: node.hash.len(),
            });
        }
        current = if node.is_left_child_node {
            hash_pair(node.hash.as_slice(), &current)
        } else {
            hash_pair(&current, node.hash.as_slice())
        };
    }
    Ok(current)
}

/// Off-chain tree builder used by round publishers to produce the root
/// stored on chain and the per-claim paths handed to claimants.
///
/// Odd levels are padded by repeating the last node.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    pub fn from_leaves(leaves: Vec<Hash>) -> Self {
        let mut levels = vec![leaves];
        while levels.last().is_some_and(|level| level.len() > 1) {
            let level = &levels[levels.len() - 1];
            let next: Vec<Hash> = level
                .chunks(2)
                .map(|pair| {
                    let left = &pair[0];
                    let right = pair.get(1).unwrap_or(left);
                    hash_pair(left, right)
                })
                .collect();
            levels.push(next);
        }
        Self { levels }
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// `None` for an empty tree.
    pub fn root(&self) -> Option<Hash> {
        self.levels.last().and_then(|level| level.first()).copied()
    }

    pub fn generate_path(&self, leaf_index: usize) -> Option<MerklePath> {
        if leaf_index >= self.leaf_count() {
            return None;
        }

        let mut nodes = Vec::with_capacity(self.levels.len().saturating_sub(1));
        let mut index = leaf_index;
        for level in &self.levels[..self.levels.len() - 1] {
            let is_right = index % 2 == 1;
            let sibling = if is_right {
                level[index - 1]
            } else {
                // padded levels pair the last node with itself
                *level.get(index + 1).unwrap_or(&level[index])
            };
            nodes.push(MerklePathNode {
                hash: HexBinary::from(sibling.to_vec()),
                is_left_child_node: is_right,
            });
            index /= 2;
        }
        Some(MerklePath { nodes })
    }
}
