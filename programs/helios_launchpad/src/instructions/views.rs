// programs/helios_launchpad/src/instructions/views.rs
//
// Read-only accessors. These mutate nothing; the refundable preview surfaces
// the same eligibility errors the refund engine would.

use anchor_lang::prelude::*;
use crate::errors::LaunchpadError;
use crate::math::{self, PERCENT_ONE};
use crate::state::{Campaign, InvestorPosition, PaymentAssetConfig, SalePhase};
use crate::vesting;
use super::claim::claimable_amounts;
use super::refund::{evaluate_eligibility, refundable_amounts, settle_refund};

#[derive(Accounts)]
pub struct ViewCampaign<'info> {
    #[account(
        seeds = [Campaign::SEED_PREFIX, &campaign.campaign_id.to_le_bytes()],
        bump = campaign.bump,
    )]
    pub campaign: Account<'info, Campaign>,
}

#[derive(Accounts)]
pub struct ViewPosition<'info> {
    #[account(
        seeds = [Campaign::SEED_PREFIX, &campaign.campaign_id.to_le_bytes()],
        bump = campaign.bump,
    )]
    pub campaign: Account<'info, Campaign>,

    #[account(
        seeds = [
            InvestorPosition::SEED_PREFIX,
            campaign.key().as_ref(),
            position.investor.as_ref()
        ],
        bump = position.bump,
    )]
    pub position: Account<'info, InvestorPosition>,
}

#[derive(Accounts)]
pub struct ViewRefundable<'info> {
    #[account(
        seeds = [Campaign::SEED_PREFIX, &campaign.campaign_id.to_le_bytes()],
        bump = campaign.bump,
    )]
    pub campaign: Account<'info, Campaign>,

    #[account(
        seeds = [
            InvestorPosition::SEED_PREFIX,
            campaign.key().as_ref(),
            position.investor.as_ref()
        ],
        bump = position.bump,
    )]
    pub position: Account<'info, InvestorPosition>,

    #[account(
        seeds = [
            PaymentAssetConfig::SEED_PREFIX,
            campaign.key().as_ref(),
            asset_config.mint.as_ref()
        ],
        bump = asset_config.bump,
        constraint = asset_config.mint == position.payment_mint @ LaunchpadError::InvalidMint
    )]
    pub asset_config: Account<'info, PaymentAssetConfig>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct ClaimPreview {
    pub unlocked_percent: u64,
    pub claimable_tokens: u128,
    pub native_amount: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct RefundPreview {
    pub refundable_base: u128,
    pub clawed_bonus: u128,
    pub percent_returned: u64,
    pub payout_amount: u64,
    pub penalty_amount: u64,
}

pub fn get_current_phase(ctx: Context<ViewCampaign>) -> Result<SalePhase> {
    Ok(ctx.accounts.campaign.current_phase())
}

pub fn get_unlocked_percent(ctx: Context<ViewCampaign>) -> Result<u64> {
    let clock = Clock::get()?;
    Ok(vesting::unlocked_fraction(
        &ctx.accounts.campaign.schedule,
        clock.unix_timestamp,
    ))
}

pub fn get_claimable_amount(ctx: Context<ViewPosition>) -> Result<ClaimPreview> {
    let clock = Clock::get()?;
    let campaign = &ctx.accounts.campaign;

    let fraction = vesting::unlocked_fraction(&campaign.schedule, clock.unix_timestamp);
    let (claim_base, claim_bonus) = claimable_amounts(&ctx.accounts.position, fraction)?;
    let claimable = claim_base
        .checked_add(claim_bonus)
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))?;
    let native_amount = math::to_native_amount(claimable, campaign.sale_token_decimals)?;

    Ok(ClaimPreview {
        unlocked_percent: fraction,
        claimable_tokens: claimable,
        native_amount,
    })
}

pub fn get_refundable_amount(
    ctx: Context<ViewRefundable>,
    is_full_refund: bool,
) -> Result<RefundPreview> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let campaign = &ctx.accounts.campaign;
    let position = &ctx.accounts.position;
    let asset = &ctx.accounts.asset_config;

    let penalty = evaluate_eligibility(campaign, position, now, is_full_refund)?;
    let fraction = if is_full_refund {
        PERCENT_ONE
    } else {
        vesting::unlocked_fraction(&campaign.schedule, now)
    };
    let (refundable_base, clawed_bonus) = refundable_amounts(position, fraction)?;
    require!(refundable_base > 0, LaunchpadError::NothingToRefund);

    let settlement = settle_refund(
        refundable_base,
        campaign.pricing.initial_price,
        asset.usd_price,
        asset.decimals,
        position.invested_amount,
        position.refunded_amount,
        penalty,
    )?;

    Ok(RefundPreview {
        refundable_base,
        clawed_bonus,
        percent_returned: settlement.percent_returned,
        payout_amount: settlement.paid_native,
        penalty_amount: settlement.penalty_native,
    })
}
