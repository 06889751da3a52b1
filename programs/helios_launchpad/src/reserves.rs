// programs/helios_launchpad/src/reserves.rs
//
// Reserve Pool Formulas
// =====================
// Stateless arithmetic for the four withdrawal pools. Counters are owned by
// the campaign and payment-asset accounts; every withdrawal request is
// validated against a freshly recomputed figure. Each "withdrawn" counter
// must never exceed its paired "collected/unlocked" counter.

use anchor_lang::prelude::*;
use crate::errors::LaunchpadError;
use crate::math::{self, PERCENT_ONE};

/// Allocated tokens net of everything refunded since.
pub fn net_allocated(total_allocated: u128, refunded_base: u128, refunded_bonus: u128) -> u128 {
    total_allocated
        .saturating_sub(refunded_base)
        .saturating_sub(refunded_bonus)
}

/// Aggregate claim progress in PERCENT_ONE units; 0 while nothing is allocated.
pub fn claimed_percent(total_claimed: u128, net_allocated: u128) -> Result<u64> {
    math::percent_ratio(total_claimed, net_allocated)
}

/// Raised-funds pool: floor(net_raised * claimed_percent) - already withdrawn.
/// Ties fund release to aggregate claim progress, not per-participant state.
pub fn raised_funds_withdrawable(
    raised: u64,
    refunded: u64,
    stable_withdrawn: u64,
    claimed_percent: u64,
) -> Result<u64> {
    let net_raised = raised.saturating_sub(refunded);
    let unlocked = math::mul_div(
        net_raised as u128,
        claimed_percent.min(PERCENT_ONE) as u128,
        PERCENT_ONE as u128,
    )?;
    let unlocked = u64::try_from(unlocked).map_err(|_| error!(LaunchpadError::MathOverflow))?;
    Ok(unlocked.saturating_sub(stable_withdrawn))
}

/// Unsold-token pool, payable once, strictly after the funding window closes.
pub fn unsold_tokens(total_allocation: u128, total_allocated: u128) -> u128 {
    total_allocation.saturating_sub(total_allocated)
}

/// Refunded-token pool: cumulative refunded (base + bonus) minus withdrawn.
pub fn refunded_tokens_available(
    refunded_base: u128,
    refunded_bonus: u128,
    already_withdrawn: u128,
) -> u128 {
    refunded_base
        .saturating_add(refunded_bonus)
        .saturating_sub(already_withdrawn)
}

/// Penalty-fee pool: cumulative collected minus withdrawn, per asset.
pub fn penalty_available(penalty_collected: u64, penalty_withdrawn: u64) -> u64 {
    penalty_collected.saturating_sub(penalty_withdrawn)
}

// ==================== UNIT TESTS ====================
