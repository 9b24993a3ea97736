// ============================================
// src/state.rs
// State definitions

use std::collections::BTreeMap;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub paused: bool,
}

/// Token paid out by a swap pair.
#[cw_serde]
pub enum TargetToken {
    Native { denom: String },
    Cw20 { contract_addr: String },
}

impl TargetToken {
    /// Key used in the swap's target token map.
    pub fn symbol(&self) -> &str {
        match self {
            TargetToken::Native { denom } => denom,
            TargetToken::Cw20 { contract_addr } => contract_addr,
        }
    }
}

/// `origin_share` origin units swap for `target_share` target units.
#[cw_serde]
#[derive(Copy)]
pub struct SwapRatio {
    pub origin_share: u64,
    pub target_share: u64,
}

#[cw_serde]
pub struct SwapInfo {
    pub swap_id: HexBinary,
    pub controller: Addr,
    pub origin_token_size_in_byte: u32,
    pub origin_token_numeric_big_endian: bool,
    /// target token symbol -> pair id
    pub swap_target_token_map: BTreeMap<String, HexBinary>,
}

#[cw_serde]
pub struct SwapRound {
    pub swap_id: HexBinary,
    pub merkle_tree_root: HexBinary,
    pub start_time: Timestamp,
    pub swapped_amount: Uint128,
    pub swapped_times: u64,
}

#[cw_serde]
pub struct SwapPair {
    pub pair_id: HexBinary,
    pub swap_id: HexBinary,
    pub origin_token_size_in_byte: u32,
    pub origin_token_numeric_big_endian: bool,
    pub target_token: TargetToken,
    pub swap_ratio: SwapRatio,
    pub deposit_amount: Uint128,
    pub swapped_amount: Uint128,
    pub swapped_times: u64,
    pub current_round: Option<SwapRound>,
}

#[cw_serde]
pub struct SwappedAmount {
    pub target_token_symbol: String,
    pub amount: Uint128,
}

/// Ledger entry for an honoured claim.
#[cw_serde]
pub struct SwappedRecord {
    pub swap_id: HexBinary,
    pub unique_id: HexBinary,
    pub receiver: Addr,
    pub origin_amount: Uint128,
    pub swapped: Vec<SwappedAmount>,
    pub swapped_at: Timestamp,
}

// Storage
pub const CONFIG: Item<Config> = Item::new("config");
pub const SWAP_INFOS: Map<&[u8], SwapInfo> = Map::new("swap_infos");
pub const SWAP_PAIRS: Map<&[u8], SwapPair> = Map::new("swap_pairs");
/// (swap_id, unique_id) -> record
pub const LEDGER: Map<(&[u8], &[u8]), SwappedRecord> = Map::new("ledger");
