// ============================================
// src/events.rs
// Typed notifications, turned into wasm events at the response boundary

use cosmwasm_std::{Addr, Event, HexBinary, Timestamp, Uint128};

use crate::state::SwapRatio;

pub struct SwapPairAdded {
    pub swap_id: HexBinary,
}

pub struct SwapRoundUpdated {
    pub swap_id: HexBinary,
    pub merkle_tree_root: HexBinary,
    pub start_time: Timestamp,
}

pub struct TokenSwapped {
    pub swap_id: HexBinary,
    pub unique_id: HexBinary,
    pub amount: Uint128,
    pub address: Addr,
    pub symbol: String,
}

pub struct SwapRatioChanged {
    pub swap_id: HexBinary,
    pub target_token_symbol: String,
    pub new_swap_ratio: SwapRatio,
}

pub struct SwapDepositAdded {
    pub swap_id: HexBinary,
    pub target_token_symbol: String,
    pub amount: Uint128,
    pub deposit_amount: Uint128,
}

impl From<SwapPairAdded> for Event {
    fn from(e: SwapPairAdded) -> Self {
        Event::new("swap_pair_added").add_attribute("swap_id", e.swap_id.to_hex())
    }
}

impl From<SwapRoundUpdated> for Event {
    fn from(e: SwapRoundUpdated) -> Self {
        Event::new("swap_round_updated")
            .add_attribute("swap_id", e.swap_id.to_hex())
            .add_attribute("merkle_tree_root", e.merkle_tree_root.to_hex())
            .add_attribute("start_time", e.start_time.seconds().to_string())
    }
}

impl From<TokenSwapped> for Event {
    fn from(e: TokenSwapped) -> Self {
        Event::new("token_swapped")
            .add_attribute("swap_id", e.swap_id.to_hex())
            .add_attribute("unique_id", e.unique_id.to_hex())
            .add_attribute("amount", e.amount)
            .add_attribute("address", e.address)
            .add_attribute("symbol", e.symbol)
    }
}

impl From<SwapRatioChanged> for Event {
    fn from(e: SwapRatioChanged) -> Self {
        Event::new("swap_ratio_changed")
            .add_attribute("swap_id", e.swap_id.to_hex())
            .add_attribute("target_token_symbol", e.target_token_symbol)
            .add_attribute("origin_share", e.new_swap_ratio.origin_share.to_string())
            .add_attribute("target_share", e.new_swap_ratio.target_share.to_string())
    }
}

impl From<SwapDepositAdded> for Event {
    fn from(e: SwapDepositAdded) -> Self {
        Event::new("swap_deposit_added")
            .add_attribute("swap_id", e.swap_id.to_hex())
            .add_attribute("target_token_symbol", e.target_token_symbol)
            .add_attribute("amount", e.amount)
            .add_attribute("deposit_amount", e.deposit_amount)
    }
}
