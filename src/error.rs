// ============================================
// src/error.rs
// Error definitions

use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

use crate::codec::CodecError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Contract is paused")]
    Paused {},

    #[error("Swap already exists: {swap_id}")]
    AlreadyExists { swap_id: String },

    #[error("Swap not found: {swap_id}")]
    SwapNotFound { swap_id: String },

    #[error("Target token not registered: {symbol}")]
    PairNotFound { symbol: String },

    #[error("No active swap round for target token {symbol}")]
    NoActiveRound { symbol: String },

    #[error("Invalid token swap input: {reason}")]
    InvalidSwapInput { reason: String },

    #[error("Failed to swap token: merkle proof verification failed for {symbol}")]
    SwapVerificationFailed { symbol: String },

    #[error("Deposit not enough for {symbol}: required {required}, available {available}")]
    InsufficientDeposit {
        symbol: String,
        required: String,
        available: String,
    },

    #[error("Invalid swap pair configuration: {reason}")]
    InvalidPairConfiguration { reason: String },

    #[error("Insufficient balance of {denom}: required {required}, sent {sent}")]
    InsufficientBalance {
        denom: String,
        required: String,
        sent: String,
    },

    #[error("Unexpected funds sent: {denom}")]
    UnexpectedFunds { denom: String },

    #[error("Claim already swapped: {unique_id}")]
    DuplicateClaim { unique_id: String },

    #[error("Invalid target token: {symbol}")]
    InvalidTargetToken { symbol: String },

    #[error("Invalid merkle root")]
    InvalidMerkleRoot {},

    #[error("Invalid amount")]
    InvalidAmount {},

    #[error("Cannot migrate from {previous_contract} {previous_version}")]
    CannotMigrate {
        previous_contract: String,
        previous_version: String,
    },
}

impl From<CodecError> for ContractError {
    fn from(err: CodecError) -> Self {
        ContractError::InvalidSwapInput {
            reason: err.to_string(),
        }
    }
}
