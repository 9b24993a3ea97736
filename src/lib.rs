// ============================================
// src/lib.rs
// Library root

pub mod codec;
pub mod contract;
pub mod error;
pub mod events;
pub mod merkle;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
