//! Bonding curve quote math and slippage bounds.
//!
//! Mirrors the program's constant-product pricing over virtual reserves so
//! callers can size `amount` / `sol_amount` before building a trade. All
//! intermediate math is u128; results saturate instead of wrapping.

use crate::constants::{BPS_DENOMINATOR, SLIPPAGE_DENOMINATOR};
use crate::error::{Result, SdkError};
use crate::state::{BondingCurve, Global};

/// The curve a freshly created mint starts with.
pub fn new_bonding_curve(global: &Global) -> BondingCurve {
    BondingCurve {
        virtual_token_reserves: global.initial_virtual_token_reserves,
        virtual_sol_reserves: global.initial_virtual_sol_reserves,
        real_token_reserves: global.initial_real_token_reserves,
        real_sol_reserves: 0,
        token_total_supply: global.token_total_supply,
        complete: false,
        creator: Default::default(),
    }
}

fn ceil_div(a: u128, b: u128) -> u128 {
    (a + b - 1) / b
}

fn saturate(v: u128) -> u64 {
    u64::try_from(v).unwrap_or(u64::MAX)
}

fn compute_fee(amount: u64, fee_bps: u64) -> u64 {
    saturate(ceil_div(
        amount as u128 * fee_bps as u128,
        BPS_DENOMINATOR as u128,
    ))
}

/// Creator fees apply to new curves and to curves with a creator set.
/// `None` means the curve does not exist yet.
fn charges_creator_fee(curve: Option<&BondingCurve>) -> bool {
    curve.map_or(true, BondingCurve::has_creator)
}

/// Protocol fee plus creator fee on `amount` lamports.
pub fn get_fee(global: &Global, curve: Option<&BondingCurve>, amount: u64) -> u64 {
    let protocol = compute_fee(amount, global.fee_basis_points);
    let creator = if charges_creator_fee(curve) {
        compute_fee(amount, global.creator_fee_basis_points)
    } else {
        0
    };
    protocol.saturating_add(creator)
}

/// Tokens received for spending `amount` lamports (fees included).
pub fn buy_token_amount_from_sol_amount(
    global: &Global,
    curve: Option<&BondingCurve>,
    amount: u64,
) -> u64 {
    if amount == 0 {
        return 0;
    }
    let fresh;
    let state = match curve {
        Some(c) => c,
        None => {
            fresh = new_bonding_curve(global);
            &fresh
        }
    };
    if state.virtual_token_reserves == 0 {
        return 0;
    }

    let mut total_fee_bps = global.fee_basis_points as u128;
    if charges_creator_fee(curve) {
        total_fee_bps += global.creator_fee_basis_points as u128;
    }

    let input =
        amount as u128 * BPS_DENOMINATOR as u128 / (total_fee_bps + BPS_DENOMINATOR as u128);
    // Fees can swallow a dust amount entirely.
    if input == 0 {
        return 0;
    }
    let tokens = input * state.virtual_token_reserves as u128
        / (state.virtual_sol_reserves as u128 + input);

    saturate(tokens).min(state.real_token_reserves)
}

/// Lamports needed to buy `amount` tokens (fees included).
pub fn buy_sol_amount_from_token_amount(
    global: &Global,
    curve: Option<&BondingCurve>,
    amount: u64,
) -> u64 {
    if amount == 0 {
        return 0;
    }
    let fresh;
    let state = match curve {
        Some(c) => c,
        None => {
            fresh = new_bonding_curve(global);
            &fresh
        }
    };
    if state.virtual_token_reserves == 0 {
        return 0;
    }

    let amount = amount.min(state.real_token_reserves) as u128;
    let virtual_tokens = state.virtual_token_reserves as u128;
    let remaining = virtual_tokens - amount.min(virtual_tokens);
    if remaining == 0 {
        return u64::MAX;
    }
    let sol_cost = saturate(amount * state.virtual_sol_reserves as u128 / remaining + 1);
    sol_cost.saturating_add(get_fee(global, curve, sol_cost))
}

/// Lamports received for selling `amount` tokens (fees deducted).
pub fn sell_sol_amount_from_token_amount(
    global: &Global,
    curve: &BondingCurve,
    amount: u64,
) -> u64 {
    if amount == 0 || curve.virtual_token_reserves == 0 {
        return 0;
    }
    let sol_cost = saturate(
        amount as u128 * curve.virtual_sol_reserves as u128
            / (curve.virtual_token_reserves as u128 + amount as u128),
    );
    sol_cost.saturating_sub(get_fee(global, Some(curve), sol_cost))
}

/// Market cap in lamports at the current virtual price.
pub fn bonding_curve_market_cap(
    mint_supply: u64,
    virtual_sol_reserves: u64,
    virtual_token_reserves: u64,
) -> u64 {
    if virtual_token_reserves == 0 {
        return 0;
    }
    saturate(virtual_sol_reserves as u128 * mint_supply as u128 / virtual_token_reserves as u128)
}

// ── Slippage ────────────────────────────────────────────────────────────────

/// `slippage_pct` in tenths of a percent, rounded down.
fn slippage_tenths(slippage_pct: f64) -> Result<u64> {
    if !slippage_pct.is_finite() || slippage_pct < 0.0 {
        return Err(SdkError::InvalidSlippage(slippage_pct));
    }
    if slippage_pct >= 100.0 {
        tracing::warn!(slippage_pct, "slippage at or above 100% disables the price bound");
    }
    Ok((slippage_pct * 10.0).floor() as u64)
}

fn slippage_delta(sol_amount: u64, slippage_pct: f64) -> Result<u128> {
    let tenths = slippage_tenths(slippage_pct)?;
    Ok(sol_amount as u128 * tenths as u128 / SLIPPAGE_DENOMINATOR as u128)
}

/// `sol_amount + sol_amount * floor(slippage_pct * 10) / 1000`, saturating.
pub fn max_sol_cost(sol_amount: u64, slippage_pct: f64) -> Result<u64> {
    let delta = slippage_delta(sol_amount, slippage_pct)?;
    Ok(saturate(sol_amount as u128 + delta))
}

/// `sol_amount - sol_amount * floor(slippage_pct * 10) / 1000`, floored at 0.
pub fn min_sol_output(sol_amount: u64, slippage_pct: f64) -> Result<u64> {
    let delta = slippage_delta(sol_amount, slippage_pct)?;
    Ok(saturate((sol_amount as u128).saturating_sub(delta)))
}
