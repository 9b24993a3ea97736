// src/contract.rs
// Token swap contract: origin-ledger claims redeemed for escrowed target tokens
// against controller-published merkle roots

use std::collections::BTreeMap;

use cosmwasm_std::{
    entry_point, to_json_binary, to_json_vec, Addr, BankMsg, Binary, Coin, CosmosMsg, Deps,
    DepsMut, Env, Event, HexBinary, MessageInfo, Order, OverflowError, OverflowOperation,
    Response, StdError, StdResult, Storage, Uint128, WasmMsg,
};
use cw2::{ensure_from_older_version, get_contract_version, set_contract_version};
use cw20::{Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};
use cw_storage_plus::Bound;
use sha2::{Digest, Sha256};

use crate::codec;
use crate::error::ContractError;
use crate::events::{
    SwapDepositAdded, SwapPairAdded, SwapRatioChanged, SwapRoundUpdated, TokenSwapped,
};
use crate::merkle::{self, MerklePath};
use crate::msg::{
    ExecuteMsg, InstantiateMsg, ListSwapsResponse, MigrateMsg, QueryMsg, SwapTargetToken,
};
use crate::state::{
    Config, SwapInfo, SwapPair, SwapRatio, SwapRound, SwappedAmount, SwappedRecord, TargetToken,
    CONFIG, LEDGER, SWAP_INFOS, SWAP_PAIRS,
};

const CONTRACT_NAME: &str = "crates.io:token-swap";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

// ============ Instantiate ============

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };

    let config = Config {
        owner: owner.clone(),
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner))
}

// ============ Execute ============

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateSwap {
            origin_token_size_in_byte,
            origin_token_numeric_big_endian,
            swap_target_token_list,
        } => execute_create_swap(
            deps,
            env,
            info,
            origin_token_size_in_byte,
            origin_token_numeric_big_endian,
            swap_target_token_list,
        ),

        ExecuteMsg::AddSwapRound {
            swap_id,
            merkle_tree_root,
        } => execute_add_swap_round(deps, env, info, swap_id, merkle_tree_root),

        ExecuteMsg::SwapToken {
            swap_id,
            origin_amount,
            unique_id,
            receiver_address,
            merkle_path,
        } => execute_swap_token(
            deps,
            env,
            info,
            swap_id,
            origin_amount,
            unique_id,
            receiver_address,
            merkle_path,
        ),

        ExecuteMsg::ChangeSwapRatio {
            swap_id,
            target_token_symbol,
            swap_ratio,
        } => execute_change_swap_ratio(deps, info, swap_id, target_token_symbol, swap_ratio),

        ExecuteMsg::Deposit {
            swap_id,
            target_token_symbol,
            amount,
        } => execute_deposit(deps, env, info, swap_id, target_token_symbol, amount),

        ExecuteMsg::SetPaused { paused } => execute_set_paused(deps, info, paused),

        ExecuteMsg::UpdateOwner { new_owner } => execute_update_owner(deps, info, new_owner),
    }
}

// ============ SWAP REGISTRY ============

fn execute_create_swap(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    origin_token_size_in_byte: u32,
    origin_token_numeric_big_endian: bool,
    swap_target_token_list: Vec<SwapTargetToken>,
) -> Result<Response, ContractError> {
    assert_not_paused(deps.storage)?;

    if !codec::is_supported_width(origin_token_size_in_byte) {
        return Err(ContractError::InvalidPairConfiguration {
            reason: format!("origin token size {} out of range", origin_token_size_in_byte),
        });
    }
    if swap_target_token_list.is_empty() {
        return Err(ContractError::InvalidPairConfiguration {
            reason: "no target token".to_string(),
        });
    }

    let input = to_json_vec(&(
        origin_token_size_in_byte,
        origin_token_numeric_big_endian,
        &swap_target_token_list,
    ))?;
    let swap_id = HexBinary::from(derive_swap_id(&env, &info.sender, &input).to_vec());
    if SWAP_INFOS.has(deps.storage, swap_id.as_slice()) {
        return Err(ContractError::AlreadyExists {
            swap_id: swap_id.to_hex(),
        });
    }

    let mut swap_info = SwapInfo {
        swap_id: swap_id.clone(),
        controller: info.sender.clone(),
        origin_token_size_in_byte,
        origin_token_numeric_big_endian,
        swap_target_token_map: BTreeMap::new(),
    };

    // Validate every pair before anything is written
    let mut pairs = Vec::with_capacity(swap_target_token_list.len());
    let mut native_deposits = BTreeMap::new();
    let mut messages = vec![];
    for swap_target_token in swap_target_token_list {
        let symbol = swap_target_token.target_token.symbol().to_string();
        assert_swap_target_token(deps.as_ref(), &swap_target_token.target_token)?;
        if swap_info.swap_target_token_map.contains_key(&symbol) {
            return Err(ContractError::InvalidPairConfiguration {
                reason: format!("duplicate target token {}", symbol),
            });
        }

        let pair_id = HexBinary::from(derive_pair_id(&swap_id, &symbol).to_vec());
        let swap_pair = SwapPair {
            pair_id: pair_id.clone(),
            swap_id: swap_id.clone(),
            origin_token_size_in_byte,
            origin_token_numeric_big_endian,
            target_token: swap_target_token.target_token,
            swap_ratio: swap_target_token.swap_ratio,
            deposit_amount: swap_target_token.deposit_amount,
            swapped_amount: Uint128::zero(),
            swapped_times: 0,
            current_round: None,
        };
        assert_valid_swap_pair(&swap_pair)?;

        if let Some(msg) = pull_deposit(
            &swap_pair.target_token,
            swap_pair.deposit_amount,
            &info.sender,
            &env.contract.address,
            &mut native_deposits,
        )? {
            messages.push(msg);
        }

        swap_info.swap_target_token_map.insert(symbol, pair_id);
        pairs.push(swap_pair);
    }
    assert_native_funds(&info.funds, &native_deposits)?;

    for swap_pair in &pairs {
        SWAP_PAIRS.save(deps.storage, swap_pair.pair_id.as_slice(), swap_pair)?;
    }
    SWAP_INFOS.save(deps.storage, swap_id.as_slice(), &swap_info)?;

    Ok(Response::new()
        .set_data(Binary::from(swap_id.to_vec()))
        .add_messages(messages)
        .add_event(Event::from(SwapPairAdded {
            swap_id: swap_id.clone(),
        }))
        .add_attribute("action", "create_swap")
        .add_attribute("swap_id", swap_id.to_hex())
        .add_attribute("controller", info.sender)
        .add_attribute("pair_count", pairs.len().to_string()))
}

// ============ ROUND MANAGER ============

fn execute_add_swap_round(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    swap_id: HexBinary,
    merkle_tree_root: HexBinary,
) -> Result<Response, ContractError> {
    assert_no_funds(&info)?;
    let swap_info = load_swap_info(deps.storage, &swap_id)?;
    assert_controller(&swap_info, &info.sender)?;

    if merkle_tree_root.len() != 32 {
        return Err(ContractError::InvalidMerkleRoot {});
    }

    let start_time = env.block.time;
    for pair_id in swap_info.swap_target_token_map.values() {
        let mut swap_pair = SWAP_PAIRS.load(deps.storage, pair_id.as_slice())?;
        swap_pair.current_round = Some(SwapRound {
            swap_id: swap_info.swap_id.clone(),
            merkle_tree_root: merkle_tree_root.clone(),
            start_time,
            swapped_amount: Uint128::zero(),
            swapped_times: 0,
        });
        SWAP_PAIRS.save(deps.storage, pair_id.as_slice(), &swap_pair)?;
    }

    Ok(Response::new()
        .add_event(Event::from(SwapRoundUpdated {
            swap_id: swap_id.clone(),
            merkle_tree_root: merkle_tree_root.clone(),
            start_time,
        }))
        .add_attribute("action", "add_swap_round")
        .add_attribute("swap_id", swap_id.to_hex())
        .add_attribute("merkle_tree_root", merkle_tree_root.to_hex()))
}

// ============ SWAP EXECUTOR ============

fn execute_swap_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    swap_id: HexBinary,
    origin_amount: Binary,
    unique_id: HexBinary,
    receiver_address: String,
    merkle_path: MerklePath,
) -> Result<Response, ContractError> {
    assert_no_funds(&info)?;

    let swap_info = load_swap_info(deps.storage, &swap_id)?;
    if unique_id.len() != 32 {
        return Err(ContractError::InvalidSwapInput {
            reason: "unique id must be 32 bytes".to_string(),
        });
    }
    let receiver = deps
        .api
        .addr_validate(&receiver_address)
        .map_err(|_| ContractError::InvalidSwapInput {
            reason: format!("invalid receiver address {}", receiver_address),
        })?;

    let ledger_key = (swap_id.as_slice(), unique_id.as_slice());
    if LEDGER.has(deps.storage, ledger_key) {
        return Err(ContractError::DuplicateClaim {
            unique_id: unique_id.to_hex(),
        });
    }

    let mut updated_pairs = Vec::with_capacity(swap_info.swap_target_token_map.len());
    let mut swapped = vec![];
    let mut messages = vec![];
    let mut events = vec![];
    let mut decoded_amount = Uint128::zero();

    for (symbol, pair_id) in &swap_info.swap_target_token_map {
        let mut swap_pair = SWAP_PAIRS.load(deps.storage, pair_id.as_slice())?;
        let mut round = swap_pair
            .current_round
            .clone()
            .ok_or_else(|| ContractError::NoActiveRound {
                symbol: symbol.clone(),
            })?;

        let amount = codec::decode_amount(
            origin_amount.as_slice(),
            swap_pair.origin_token_size_in_byte,
            swap_pair.origin_token_numeric_big_endian,
        )?;
        if amount.is_zero() {
            return Err(ContractError::InvalidSwapInput {
                reason: "zero origin amount".to_string(),
            });
        }

        let leaf = merkle::leaf_hash(
            amount,
            unique_id.as_slice(),
            swap_pair.swap_id.as_slice(),
            receiver.as_str(),
        );
        let computed = merkle::compute_root(&leaf, &merkle_path).map_err(|_| {
            ContractError::SwapVerificationFailed {
                symbol: symbol.clone(),
            }
        })?;
        if computed.as_slice() != round.merkle_tree_root.as_slice() {
            return Err(ContractError::SwapVerificationFailed {
                symbol: symbol.clone(),
            });
        }

        let target_amount = checked_target_amount(
            amount,
            &swap_pair.swap_ratio,
            swap_pair.deposit_amount,
            symbol,
        )?;

        // update swap pair and its round
        swap_pair.deposit_amount = swap_pair.deposit_amount.checked_sub(target_amount)?;
        swap_pair.swapped_amount = swap_pair.swapped_amount.checked_add(target_amount)?;
        swap_pair.swapped_times = increment(swap_pair.swapped_times)?;
        round.swapped_amount = round.swapped_amount.checked_add(target_amount)?;
        round.swapped_times = increment(round.swapped_times)?;
        swap_pair.current_round = Some(round);
        assert_valid_swap_pair(&swap_pair)?;

        messages.push(transfer_token(&swap_pair.target_token, &receiver, target_amount)?);
        events.push(Event::from(TokenSwapped {
            swap_id: swap_id.clone(),
            unique_id: unique_id.clone(),
            amount: target_amount,
            address: receiver.clone(),
            symbol: symbol.clone(),
        }));
        swapped.push(SwappedAmount {
            target_token_symbol: symbol.clone(),
            amount: target_amount,
        });
        decoded_amount = amount;
        updated_pairs.push(swap_pair);
    }

    for swap_pair in &updated_pairs {
        SWAP_PAIRS.save(deps.storage, swap_pair.pair_id.as_slice(), swap_pair)?;
    }
    LEDGER.save(
        deps.storage,
        ledger_key,
        &SwappedRecord {
            swap_id: swap_id.clone(),
            unique_id: unique_id.clone(),
            receiver: receiver.clone(),
            origin_amount: decoded_amount,
            swapped,
            swapped_at: env.block.time,
        },
    )?;

    Ok(Response::new()
        .add_messages(messages)
        .add_events(events)
        .add_attribute("action", "swap_token")
        .add_attribute("swap_id", swap_id.to_hex())
        .add_attribute("unique_id", unique_id.to_hex())
        .add_attribute("receiver", receiver)
        .add_attribute("origin_amount", decoded_amount))
}

// ============ ADMIN OPERATIONS ============

fn execute_change_swap_ratio(
    deps: DepsMut,
    info: MessageInfo,
    swap_id: HexBinary,
    target_token_symbol: String,
    swap_ratio: SwapRatio,
) -> Result<Response, ContractError> {
    assert_no_funds(&info)?;
    let swap_info = load_swap_info(deps.storage, &swap_id)?;
    assert_controller(&swap_info, &info.sender)?;

    let pair_id = pair_id_for(&swap_info, &target_token_symbol)?;
    let mut swap_pair = SWAP_PAIRS.load(deps.storage, pair_id.as_slice())?;
    swap_pair.swap_ratio = swap_ratio;
    assert_valid_swap_pair(&swap_pair)?;
    SWAP_PAIRS.save(deps.storage, pair_id.as_slice(), &swap_pair)?;

    Ok(Response::new()
        .add_event(Event::from(SwapRatioChanged {
            swap_id: swap_id.clone(),
            target_token_symbol: target_token_symbol.clone(),
            new_swap_ratio: swap_ratio,
        }))
        .add_attribute("action", "change_swap_ratio")
        .add_attribute("swap_id", swap_id.to_hex())
        .add_attribute("target_token_symbol", target_token_symbol))
}

fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    swap_id: HexBinary,
    target_token_symbol: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let swap_info = load_swap_info(deps.storage, &swap_id)?;
    assert_controller(&swap_info, &info.sender)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }

    let pair_id = pair_id_for(&swap_info, &target_token_symbol)?;
    let mut swap_pair = SWAP_PAIRS.load(deps.storage, pair_id.as_slice())?;
    swap_pair.deposit_amount = swap_pair.deposit_amount.checked_add(amount)?;
    assert_valid_swap_pair(&swap_pair)?;

    let mut native_deposits = BTreeMap::new();
    let pull_msg = pull_deposit(
        &swap_pair.target_token,
        amount,
        &info.sender,
        &env.contract.address,
        &mut native_deposits,
    )?;
    assert_native_funds(&info.funds, &native_deposits)?;

    SWAP_PAIRS.save(deps.storage, pair_id.as_slice(), &swap_pair)?;

    Ok(Response::new()
        .add_messages(pull_msg)
        .add_event(Event::from(SwapDepositAdded {
            swap_id: swap_id.clone(),
            target_token_symbol: target_token_symbol.clone(),
            amount,
            deposit_amount: swap_pair.deposit_amount,
        }))
        .add_attribute("action", "deposit")
        .add_attribute("swap_id", swap_id.to_hex())
        .add_attribute("target_token_symbol", target_token_symbol)
        .add_attribute("amount", amount))
}

// ============ CONTRACT ADMIN ============

fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    config.paused = paused;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_paused")
        .add_attribute("paused", paused.to_string()))
}

fn execute_update_owner(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    let old_owner = config.owner.clone();
    config.owner = deps.api.addr_validate(&new_owner)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_owner")
        .add_attribute("old_owner", old_owner)
        .add_attribute("new_owner", new_owner))
}

// ============ Migrate ============

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    // rejects a foreign contract name and any downgrade, pre-releases included
    ensure_from_older_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION).map_err(|_| {
        ContractError::CannotMigrate {
            previous_contract: stored.contract.clone(),
            previous_version: stored.version.clone(),
        }
    })?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}

// ============ Query ============

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetSwapInfo { swap_id } => to_json_binary(&query_swap_info(deps, swap_id)?),
        QueryMsg::GetSwapPair {
            swap_id,
            target_token_symbol,
        } => to_json_binary(&query_swap_pair(deps, swap_id, target_token_symbol)?),
        QueryMsg::GetCurrentSwapRound {
            swap_id,
            target_token_symbol,
        } => to_json_binary(&query_current_swap_round(
            deps,
            swap_id,
            target_token_symbol,
        )?),
        QueryMsg::GetSwappedRecord { swap_id, unique_id } => {
            to_json_binary(&query_swapped_record(deps, swap_id, unique_id)?)
        }
        QueryMsg::ListSwaps { start_after, limit } => {
            to_json_binary(&query_list_swaps(deps, start_after, limit)?)
        }
        QueryMsg::GetConfig {} => to_json_binary(&CONFIG.load(deps.storage)?),
    }
}

fn query_swap_info(deps: Deps, swap_id: HexBinary) -> StdResult<SwapInfo> {
    SWAP_INFOS.load(deps.storage, swap_id.as_slice())
}

fn query_swap_pair(
    deps: Deps,
    swap_id: HexBinary,
    target_token_symbol: String,
) -> StdResult<SwapPair> {
    let swap_info = query_swap_info(deps, swap_id)?;
    let pair_id = swap_info
        .swap_target_token_map
        .get(&target_token_symbol)
        .ok_or_else(|| StdError::not_found(format!("swap pair {}", target_token_symbol)))?;
    SWAP_PAIRS.load(deps.storage, pair_id.as_slice())
}

fn query_current_swap_round(
    deps: Deps,
    swap_id: HexBinary,
    target_token_symbol: String,
) -> StdResult<SwapRound> {
    query_swap_pair(deps, swap_id, target_token_symbol)?
        .current_round
        .ok_or_else(|| StdError::not_found("swap round"))
}

fn query_swapped_record(
    deps: Deps,
    swap_id: HexBinary,
    unique_id: HexBinary,
) -> StdResult<Option<SwappedRecord>> {
    LEDGER.may_load(deps.storage, (swap_id.as_slice(), unique_id.as_slice()))
}

fn query_list_swaps(
    deps: Deps,
    start_after: Option<HexBinary>,
    limit: Option<u32>,
) -> StdResult<ListSwapsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_ref().map(|id| Bound::exclusive(id.as_slice()));

    let swaps = SWAP_INFOS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, swap_info)| swap_info))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ListSwapsResponse { swaps })
}

// ============ Helper Functions ============

fn assert_not_paused(storage: &dyn Storage) -> Result<(), ContractError> {
    if CONFIG.load(storage)?.paused {
        return Err(ContractError::Paused {});
    }
    Ok(())
}

fn assert_owner(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

/// Guard for every controller-only operation.
pub fn assert_controller(swap_info: &SwapInfo, sender: &Addr) -> Result<(), ContractError> {
    if *sender != swap_info.controller {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

fn assert_valid_swap_pair(swap_pair: &SwapPair) -> Result<(), ContractError> {
    if swap_pair.swap_ratio.origin_share == 0 || swap_pair.swap_ratio.target_share == 0 {
        return Err(ContractError::InvalidPairConfiguration {
            reason: "swap ratio shares must be positive".to_string(),
        });
    }
    if !codec::is_supported_width(swap_pair.origin_token_size_in_byte) {
        return Err(ContractError::InvalidPairConfiguration {
            reason: format!(
                "origin token size {} out of range",
                swap_pair.origin_token_size_in_byte
            ),
        });
    }
    Ok(())
}

fn assert_swap_target_token(deps: Deps, target_token: &TargetToken) -> Result<(), ContractError> {
    let invalid = || ContractError::InvalidTargetToken {
        symbol: target_token.symbol().to_string(),
    };
    match target_token {
        TargetToken::Native { denom } => {
            if !is_valid_denom(denom) {
                return Err(invalid());
            }
        }
        TargetToken::Cw20 { contract_addr } => {
            let addr = deps.api.addr_validate(contract_addr).map_err(|_| invalid())?;
            deps.querier
                .query_wasm_smart::<TokenInfoResponse>(addr, &Cw20QueryMsg::TokenInfo {})
                .map_err(|_| invalid())?;
        }
    }
    Ok(())
}

/// Cosmos SDK denom rule: a letter followed by 2-127 of `[A-Za-z0-9/:._-]`.
fn is_valid_denom(denom: &str) -> bool {
    let bytes = denom.as_bytes();
    (3..=128).contains(&bytes.len())
        && bytes[0].is_ascii_alphabetic()
        && bytes[1..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b':' | b'.' | b'_' | b'-'))
}

fn load_swap_info(storage: &dyn Storage, swap_id: &HexBinary) -> Result<SwapInfo, ContractError> {
    SWAP_INFOS
        .may_load(storage, swap_id.as_slice())?
        .ok_or_else(|| ContractError::SwapNotFound {
            swap_id: swap_id.to_hex(),
        })
}

fn pair_id_for(swap_info: &SwapInfo, symbol: &str) -> Result<HexBinary, ContractError> {
    swap_info
        .swap_target_token_map
        .get(symbol)
        .cloned()
        .ok_or_else(|| ContractError::PairNotFound {
            symbol: symbol.to_string(),
        })
}

/// Floor of `amount * target_share / origin_share`, bounded by the escrow.
fn checked_target_amount(
    amount: Uint128,
    swap_ratio: &SwapRatio,
    deposit_amount: Uint128,
    symbol: &str,
) -> Result<Uint128, ContractError> {
    let insufficient = |required: String| ContractError::InsufficientDeposit {
        symbol: symbol.to_string(),
        required,
        available: deposit_amount.to_string(),
    };

    let target_amount = amount
        .checked_multiply_ratio(swap_ratio.target_share, swap_ratio.origin_share)
        .map_err(|_| {
            insufficient(format!(
                "{} * {} / {}",
                amount, swap_ratio.target_share, swap_ratio.origin_share
            ))
        })?;
    if target_amount.is_zero() {
        return Err(ContractError::InvalidSwapInput {
            reason: format!("origin amount {} swaps to zero {}", amount, symbol),
        });
    }
    if target_amount > deposit_amount {
        return Err(insufficient(target_amount.to_string()));
    }
    Ok(target_amount)
}

fn increment(times: u64) -> Result<u64, ContractError> {
    times
        .checked_add(1)
        .ok_or_else(|| OverflowError::new(OverflowOperation::Add, times, 1).into())
}

/// Native deposits are collected into `native_deposits` and checked against
/// the attached funds; cw20 deposits become a `TransferFrom` message.
fn pull_deposit(
    target_token: &TargetToken,
    amount: Uint128,
    owner: &Addr,
    contract: &Addr,
    native_deposits: &mut BTreeMap<String, Uint128>,
) -> Result<Option<CosmosMsg>, ContractError> {
    if amount.is_zero() {
        return Ok(None);
    }
    match target_token {
        TargetToken::Native { denom } => {
            let required = native_deposits.entry(denom.clone()).or_default();
            *required = required.checked_add(amount)?;
            Ok(None)
        }
        TargetToken::Cw20 { contract_addr } => Ok(Some(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: contract_addr.clone(),
            msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                owner: owner.to_string(),
                recipient: contract.to_string(),
                amount,
            })?,
            funds: vec![],
        }))),
    }
}

/// Attached funds must match the native deposits exactly.
fn assert_native_funds(
    funds: &[Coin],
    required: &BTreeMap<String, Uint128>,
) -> Result<(), ContractError> {
    let mut sent: BTreeMap<&str, Uint128> = BTreeMap::new();
    for coin in funds {
        let entry = sent.entry(coin.denom.as_str()).or_default();
        *entry = entry.checked_add(coin.amount)?;
    }

    for (denom, amount) in &sent {
        if !amount.is_zero() && !required.contains_key(*denom) {
            return Err(ContractError::UnexpectedFunds {
                denom: denom.to_string(),
            });
        }
    }
    for (denom, amount) in required {
        let paid = sent.get(denom.as_str()).copied().unwrap_or_default();
        if paid < *amount {
            return Err(ContractError::InsufficientBalance {
                denom: denom.clone(),
                required: amount.to_string(),
                sent: paid.to_string(),
            });
        }
        if paid > *amount {
            return Err(ContractError::UnexpectedFunds {
                denom: denom.clone(),
            });
        }
    }
    Ok(())
}

/// Rejects native funds on operations that take none.
fn assert_no_funds(info: &MessageInfo) -> Result<(), ContractError> {
    assert_native_funds(&info.funds, &BTreeMap::new())
}

fn transfer_token(
    target_token: &TargetToken,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    Ok(match target_token {
        TargetToken::Native { denom } => CosmosMsg::Bank(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: vec![Coin {
                denom: denom.clone(),
                amount,
            }],
        }),
        TargetToken::Cw20 { contract_addr } => CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: contract_addr.clone(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: recipient.to_string(),
                amount,
            })?,
            funds: vec![],
        }),
    })
}

/// Swap id: hash of the creating transaction's identity and the creation input.
fn derive_swap_id(env: &Env, sender: &Addr, input: &[u8]) -> merkle::Hash {
    let tx_index = env.transaction.as_ref().map_or(0, |tx| tx.index);

    let mut hasher = Sha256::new();
    hasher.update(env.block.chain_id.as_bytes());
    hasher.update(env.contract.address.as_bytes());
    hasher.update(env.block.height.to_be_bytes());
    hasher.update(tx_index.to_be_bytes());
    hasher.update(sender.as_bytes());
    let tx_identity: merkle::Hash = hasher.finalize().into();

    merkle::hash_pair(&tx_identity, &merkle::sha256(input))
}

pub fn derive_pair_id(swap_id: &HexBinary, symbol: &str) -> merkle::Hash {
    merkle::hash_pair(swap_id.as_slice(), &merkle::sha256(symbol.as_bytes()))
}

// ============ Tests ============
