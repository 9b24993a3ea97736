// ============================================
// src/msg.rs
// Message definitions

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, HexBinary, Uint128};

use crate::merkle::MerklePath;
use crate::state::{SwapRatio, TargetToken};

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the instantiating account.
    pub owner: Option<String>,
}

#[cw_serde]
pub struct SwapTargetToken {
    pub target_token: TargetToken,
    pub swap_ratio: SwapRatio,
    pub deposit_amount: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    CreateSwap {
        origin_token_size_in_byte: u32,
        origin_token_numeric_big_endian: bool,
        swap_target_token_list: Vec<SwapTargetToken>,
    },
    AddSwapRound {
        swap_id: HexBinary,
        merkle_tree_root: HexBinary,
    },
    SwapToken {
        swap_id: HexBinary,
        /// Fixed-width origin amount, encoded as configured on the swap.
        origin_amount: Binary,
        unique_id: HexBinary,
        receiver_address: String,
        merkle_path: MerklePath,
    },
    ChangeSwapRatio {
        swap_id: HexBinary,
        target_token_symbol: String,
        swap_ratio: SwapRatio,
    },
    Deposit {
        swap_id: HexBinary,
        target_token_symbol: String,
        amount: Uint128,
    },
    SetPaused {
        paused: bool,
    },
    UpdateOwner {
        new_owner: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::SwapInfo)]
    GetSwapInfo { swap_id: HexBinary },

    #[returns(crate::state::SwapPair)]
    GetSwapPair {
        swap_id: HexBinary,
        target_token_symbol: String,
    },

    #[returns(crate::state::SwapRound)]
    GetCurrentSwapRound {
        swap_id: HexBinary,
        target_token_symbol: String,
    },

    #[returns(Option<crate::state::SwappedRecord>)]
    GetSwappedRecord {
        swap_id: HexBinary,
        unique_id: HexBinary,
    },

    #[returns(ListSwapsResponse)]
    ListSwaps {
        start_after: Option<HexBinary>,
        limit: Option<u32>,
    },

    #[returns(crate::state::Config)]
    GetConfig {},
}

#[cw_serde]
pub struct ListSwapsResponse {
    pub swaps: Vec<crate::state::SwapInfo>,
}

#[cw_serde]
pub struct MigrateMsg {}
