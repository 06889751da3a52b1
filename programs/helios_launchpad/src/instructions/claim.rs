// programs/helios_launchpad/src/instructions/claim.rs
//
// Vested release of the distributed asset. The unlocked fraction is applied
// independently to the base and bonus portions; every subtraction is clamped
// at zero so accumulated rounding reads as "nothing left", never as an error.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount};
use crate::errors::LaunchpadError;
use crate::events::TokensClaimed;
use crate::math;
use crate::state::{Campaign, InvestorPosition};
use crate::vesting;

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(
        mut,
        seeds = [Campaign::SEED_PREFIX, &campaign.campaign_id.to_le_bytes()],
        bump = campaign.bump,
    )]
    pub campaign: Account<'info, Campaign>,

    #[account(
        mut,
        seeds = [
            InvestorPosition::SEED_PREFIX,
            campaign.key().as_ref(),
            investor.key().as_ref()
        ],
        bump = position.bump,
        constraint = position.investor == investor.key() @ LaunchpadError::Unauthorized
    )]
    pub position: Account<'info, InvestorPosition>,

    #[account(
        mut,
        constraint = sale_token_vault.key() == campaign.sale_token_vault @ LaunchpadError::InvalidMint
    )]
    pub sale_token_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = investor_token_account.mint == campaign.sale_token_mint @ LaunchpadError::InvalidMint,
        constraint = investor_token_account.owner == investor.key() @ LaunchpadError::Unauthorized
    )]
    pub investor_token_account: Account<'info, TokenAccount>,

    pub investor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Claimable base/bonus right now, each term clamped at zero.
pub fn claimable_amounts(position: &InvestorPosition, fraction: u64) -> Result<(u128, u128)> {
    let unlocked_base = math::apply_percent(position.allocated_base, fraction)?;
    let unlocked_bonus = math::apply_percent(position.allocated_bonus, fraction)?;

    let claim_base = unlocked_base
        .saturating_sub(position.claimed_base)
        .saturating_sub(position.refunded_base);
    let claim_bonus = unlocked_bonus
        .saturating_sub(position.claimed_bonus)
        .saturating_sub(position.refunded_bonus);

    Ok((claim_base, claim_bonus))
}

pub fn claim(ctx: Context<Claim>) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    let campaign = &mut ctx.accounts.campaign;
    require!(!campaign.locked, LaunchpadError::ReentrancyGuard);
    campaign.locked = true;

    require!(
        now >= campaign.schedule.claim_start,
        LaunchpadError::ClaimNotStarted
    );
    require!(
        campaign.sale_token_configured(),
        LaunchpadError::SaleTokenNotConfigured
    );

    let fraction = vesting::unlocked_fraction(&campaign.schedule, now);
    require!(fraction > 0, LaunchpadError::NothingUnlocked);

    let position = &mut ctx.accounts.position;
    let (claim_base, claim_bonus) = claimable_amounts(position, fraction)?;
    let claimable = claim_base
        .checked_add(claim_bonus)
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))?;
    require!(claimable > 0, LaunchpadError::NothingToClaim);

    let after = claimable
        .checked_add(position.claimed_total())
        .and_then(|v| v.checked_add(position.refunded_total()))
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))?;
    require!(
        after <= position.allocated_total(),
        LaunchpadError::AllocationExceeded
    );

    let native_amount = math::to_native_amount(claimable, campaign.sale_token_decimals)?;
    require!(native_amount > 0, LaunchpadError::NothingToClaim);

    // Custody shortfall is a hard stop, not retried
    require!(
        ctx.accounts.sale_token_vault.amount >= native_amount,
        LaunchpadError::InsufficientCustodyBalance
    );

    // Commit before the release transfer
    position.claimed_base = position.claimed_base.saturating_add(claim_base);
    position.claimed_bonus = position.claimed_bonus.saturating_add(claim_bonus);
    position.has_claimed = true;
    campaign.total_claimed_tokens = campaign
        .total_claimed_tokens
        .checked_add(claimable)
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))?;

    let campaign_id_bytes = campaign.campaign_id.to_le_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[
        Campaign::SEED_PREFIX,
        campaign_id_bytes.as_ref(),
        &[campaign.bump],
    ]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.sale_token_vault.to_account_info(),
                to: ctx.accounts.investor_token_account.to_account_info(),
                authority: campaign.to_account_info(),
            },
            signer_seeds,
        ),
        native_amount,
    )?;

    emit!(TokensClaimed {
        campaign_id: campaign.campaign_id,
        investor: ctx.accounts.investor.key(),
        base_amount: claim_base,
        bonus_amount: claim_bonus,
        native_amount,
        unlocked_percent: fraction,
        timestamp: now,
    });

    campaign.locked = false;
    Ok(())
}

// ==================== UNIT TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::PERCENT_ONE;
    use crate::state::SalePhase;

    const UNIT: u128 = 1_000_000_000_000_000_000;

    fn position(base: u128, bonus: u128) -> InvestorPosition {
        InvestorPosition {
            investor: Pubkey::default(),
            campaign: Pubkey::default(),
            usd_invested: 0,
            payment_mint: Pubkey::default(),
            invested_amount: 0,
            refunded_amount: 0,
            allocated_base: base,
            allocated_bonus: bonus,
            claimed_base: 0,
            claimed_bonus: 0,
            refunded_base: 0,
            refunded_bonus: 0,
            has_claimed: false,
            phase: SalePhase::Phase1,
            invested_at: 1,
            bump: 255,
        }
    }

    #[test]
    fn test_fully_vested_claims_whole_allocation() {
        // $1000 at $1.00 with a 20% bonus: 1000 base + 200 bonus
        let p = position(1_000 * UNIT, 200 * UNIT);
        let (base, bonus) = claimable_amounts(&p, PERCENT_ONE).unwrap();
        assert_eq!(base, 1_000 * UNIT);
        assert_eq!(bonus, 200 * UNIT);

        // scaled to a 9-decimal mint: exactly 1200 tokens
        let native = math::to_native_amount(base + bonus, 9).unwrap();
        assert_eq!(native, 1_200_000_000_000);
    }

    #[test]
    fn test_half_vested_claims_half_of_each_portion() {
        let p = position(1_000 * UNIT, 200 * UNIT);
        let (base, bonus) = claimable_amounts(&p, PERCENT_ONE / 2).unwrap();
        assert_eq!(base, 500 * UNIT);
        assert_eq!(bonus, 100 * UNIT);
    }

    #[test]
    fn test_prior_claims_are_deducted() {
        let mut p = position(1_000 * UNIT, 200 * UNIT);
        p.claimed_base = 500 * UNIT;
        p.claimed_bonus = 100 * UNIT;
        let (base, bonus) = claimable_amounts(&p, PERCENT_ONE).unwrap();
        assert_eq!(base, 500 * UNIT);
        assert_eq!(bonus, 100 * UNIT);
    }

    #[test]
    fn test_refunds_are_deducted() {
        let mut p = position(1_000 * UNIT, 200 * UNIT);
        p.refunded_base = 1_000 * UNIT;
        p.refunded_bonus = 200 * UNIT;
        let (base, bonus) = claimable_amounts(&p, PERCENT_ONE).unwrap();
        assert_eq!(base, 0);
        assert_eq!(bonus, 0);
    }

    #[test]
    fn test_rounding_drift_clamps_to_zero() {
        // claimed slightly more than the recomputed unlocked figure must not underflow
        let mut p = position(1_000 * UNIT, 0);
        p.claimed_base = 501 * UNIT;
        let (base, bonus) = claimable_amounts(&p, PERCENT_ONE / 2).unwrap();
        assert_eq!(base, 0);
        assert_eq!(bonus, 0);
    }

    #[test]
    fn test_claimed_plus_refunded_never_exceeds_allocated() {
        let mut p = position(1_000 * UNIT, 200 * UNIT);
        // partial refund of the unvested remainder after a 25% claim
        let (base, bonus) = claimable_amounts(&p, PERCENT_ONE / 4).unwrap();
        p.claimed_base += base;
        p.claimed_bonus += bonus;
        p.refunded_base = p.allocated_base - p.claimed_base;
        p.refunded_bonus = p.allocated_bonus - p.claimed_bonus;

        // nothing further claimable at any fraction
        let (base, bonus) = claimable_amounts(&p, PERCENT_ONE).unwrap();
        assert_eq!(base + bonus, 0);
        assert!(p.claimed_total() + p.refunded_total() <= p.allocated_total());
    }
}
