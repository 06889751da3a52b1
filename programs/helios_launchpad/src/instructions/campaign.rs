// programs/helios_launchpad/src/instructions/campaign.rs
//
// Campaign creation and the admin setter surface. All input validation
// happens before any state is touched; a violated rule rejects the whole
// operation with its specific error, never a silent clamp.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::errors::LaunchpadError;
use crate::events::{CampaignCreated, RefundPolicyUpdated, SaleTokenConfigured, ScheduleUpdated};
use crate::math::PERCENT_ONE;
use crate::state::{Campaign, CampaignPricing, CampaignSchedule, GlobalConfig, RefundPolicy};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy)]
pub struct ScheduleParams {
    pub funding_start: i64,
    pub funding_end: i64,
    pub claim_start: i64,
    pub tge_at: i64,
    pub cliff_duration: i64,
    pub vesting_duration: i64,
    pub unlock_interval: i64,
    pub twap_window_hours: u32,
    pub post_vesting_grace: i64,
    pub tge_unlock_percent: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy)]
pub struct RefundParams {
    pub penalty_before_tge: u64,
    pub penalty_after_tge: u64,
    pub penalty_partial: u64,
    pub policy: RefundPolicy,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateCampaignParams {
    pub campaign_id: u64,
    pub schedule: ScheduleParams,
    pub refund: RefundParams,
    pub min_ticket_usd: u128,
    pub participant_cap_tokens: u128,
    pub total_allocation: u128,
    pub initial_price: u64,
    pub threshold_price: u64,
    pub phase1_bonus: u64,
    pub phase2_bonus: u64,
    pub phase3_bonus: u64,
}

fn validate_schedule(params: &ScheduleParams) -> Result<()> {
    require!(
        params.funding_end > params.funding_start,
        LaunchpadError::InvalidTimeRange
    );
    require!(
        params.tge_at >= 0
            && params.cliff_duration >= 0
            && params.post_vesting_grace >= 0
            && params.claim_start >= 0,
        LaunchpadError::InvalidTimeRange
    );
    require!(params.vesting_duration > 0, LaunchpadError::InvalidVestingConfig);
    require!(
        params.unlock_interval > 0 && params.unlock_interval <= params.vesting_duration,
        LaunchpadError::InvalidVestingConfig
    );
    require!(
        params.tge_unlock_percent <= PERCENT_ONE,
        LaunchpadError::InvalidPercentage
    );
    Ok(())
}

fn validate_refund(params: &RefundParams) -> Result<()> {
    require!(
        params.penalty_before_tge <= PERCENT_ONE
            && params.penalty_after_tge <= PERCENT_ONE
            && params.penalty_partial <= PERCENT_ONE,
        LaunchpadError::InvalidPercentage
    );
    require!(params.policy.grace_window >= 0, LaunchpadError::InvalidTimeRange);
    Ok(())
}

fn schedule_from_params(params: &ScheduleParams) -> CampaignSchedule {
    CampaignSchedule {
        funding_start: params.funding_start,
        funding_end: params.funding_end,
        claim_start: params.claim_start,
        tge_at: params.tge_at,
        cliff_duration: params.cliff_duration,
        vesting_duration: params.vesting_duration,
        unlock_interval: params.unlock_interval,
        twap_window_hours: params.twap_window_hours,
        post_vesting_grace: params.post_vesting_grace,
        tge_unlock_percent: params.tge_unlock_percent,
    }
}

// ==================== CREATE CAMPAIGN ====================

#[derive(Accounts)]
#[instruction(params: CreateCampaignParams)]
pub struct CreateCampaign<'info> {
    #[account(
        mut,
        seeds = [GlobalConfig::SEED_PREFIX],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        init,
        payer = authority,
        space = 8 + Campaign::INIT_SPACE,
        seeds = [Campaign::SEED_PREFIX, &params.campaign_id.to_le_bytes()],
        bump
    )]
    pub campaign: Account<'info, Campaign>,

    #[account(
        mut,
        constraint = authority.key() == global_config.authority @ LaunchpadError::Unauthorized
    )]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn create_campaign(ctx: Context<CreateCampaign>, params: CreateCampaignParams) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.global_config;

    require!(
        params.campaign_id == config.campaign_count,
        LaunchpadError::CampaignIdMismatch
    );
    validate_schedule(&params.schedule)?;
    validate_refund(&params.refund)?;
    require!(params.total_allocation > 0, LaunchpadError::InvalidCampaignConfig);
    require!(
        params.participant_cap_tokens > 0
            && params.participant_cap_tokens <= params.total_allocation,
        LaunchpadError::InvalidCampaignConfig
    );
    require!(params.initial_price > 0, LaunchpadError::InvalidPrice);
    require!(
        params.phase1_bonus <= PERCENT_ONE
            && params.phase2_bonus <= PERCENT_ONE
            && params.phase3_bonus <= PERCENT_ONE,
        LaunchpadError::InvalidPercentage
    );

    let campaign = &mut ctx.accounts.campaign;
    campaign.campaign_id = params.campaign_id;
    campaign.sale_token_mint = Pubkey::default();
    campaign.sale_token_vault = Pubkey::default();
    campaign.sale_token_decimals = 0;
    campaign.min_ticket_usd = params.min_ticket_usd;
    campaign.participant_cap_tokens = params.participant_cap_tokens;
    campaign.total_allocation = params.total_allocation;
    campaign.total_allocated = 0;
    campaign.participant_count = 0;
    campaign.raised_usd = 0;
    campaign.phase1_bonus = params.phase1_bonus;
    campaign.phase2_bonus = params.phase2_bonus;
    campaign.phase3_bonus = params.phase3_bonus;
    campaign.total_claimed_tokens = 0;
    campaign.unsold_withdrawn = false;
    campaign.unsold_withdrawn_amount = 0;
    campaign.refunded_tokens_withdrawn = 0;
    campaign.locked = false;
    campaign.schedule = schedule_from_params(&params.schedule);
    campaign.refund.refunded_base = 0;
    campaign.refund.refunded_bonus = 0;
    campaign.refund.refunded_usd = 0;
    campaign.refund.penalty_before_tge = params.refund.penalty_before_tge;
    campaign.refund.penalty_after_tge = params.refund.penalty_after_tge;
    campaign.refund.penalty_partial = params.refund.penalty_partial;
    campaign.refund.policy = params.refund.policy;
    campaign.pricing = CampaignPricing {
        initial_price: params.initial_price,
        threshold_price: params.threshold_price,
        twap_price: 0,
    };
    campaign.bump = ctx.bumps.campaign;

    config.campaign_count = config
        .campaign_count
        .checked_add(1)
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))?;

    emit!(CampaignCreated {
        campaign_id: campaign.campaign_id,
        funding_start: campaign.schedule.funding_start,
        funding_end: campaign.schedule.funding_end,
        initial_price: campaign.pricing.initial_price,
        total_allocation: campaign.total_allocation,
        participant_cap: campaign.participant_cap_tokens,
        min_ticket_usd: campaign.min_ticket_usd,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

// ==================== SCHEDULE & POLICY SETTERS ====================

#[derive(Accounts)]
pub struct UpdateCampaignConfig<'info> {
    #[account(
        seeds = [GlobalConfig::SEED_PREFIX],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        mut,
        seeds = [Campaign::SEED_PREFIX, &campaign.campaign_id.to_le_bytes()],
        bump = campaign.bump,
    )]
    pub campaign: Account<'info, Campaign>,

    #[account(
        constraint = authority.key() == global_config.authority @ LaunchpadError::Unauthorized
    )]
    pub authority: Signer<'info>,
}

pub fn update_schedule(ctx: Context<UpdateCampaignConfig>, params: ScheduleParams) -> Result<()> {
    let clock = Clock::get()?;
    validate_schedule(&params)?;

    let campaign = &mut ctx.accounts.campaign;
    campaign.schedule = schedule_from_params(&params);

    emit!(ScheduleUpdated {
        campaign_id: campaign.campaign_id,
        tge_at: campaign.schedule.tge_at,
        cliff_duration: campaign.schedule.cliff_duration,
        vesting_duration: campaign.schedule.vesting_duration,
        unlock_interval: campaign.schedule.unlock_interval,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

pub fn update_refund_policy(ctx: Context<UpdateCampaignConfig>, params: RefundParams) -> Result<()> {
    let clock = Clock::get()?;
    validate_refund(&params)?;

    // Counters stay untouched; only rates and flags are replaced
    let campaign = &mut ctx.accounts.campaign;
    campaign.refund.penalty_before_tge = params.penalty_before_tge;
    campaign.refund.penalty_after_tge = params.penalty_after_tge;
    campaign.refund.penalty_partial = params.penalty_partial;
    campaign.refund.policy = params.policy;

    emit!(RefundPolicyUpdated {
        campaign_id: campaign.campaign_id,
        penalty_before_tge: params.penalty_before_tge,
        penalty_after_tge: params.penalty_after_tge,
        penalty_partial: params.penalty_partial,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

// ==================== SALE TOKEN ====================

#[derive(Accounts)]
pub struct SetSaleToken<'info> {
    #[account(
        seeds = [GlobalConfig::SEED_PREFIX],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        mut,
        seeds = [Campaign::SEED_PREFIX, &campaign.campaign_id.to_le_bytes()],
        bump = campaign.bump,
    )]
    pub campaign: Account<'info, Campaign>,

    pub sale_token_mint: Account<'info, Mint>,

    /// Custody vault for the distributed asset
    #[account(
        init,
        payer = authority,
        token::mint = sale_token_mint,
        token::authority = campaign,
        seeds = [b"sale_vault", campaign.key().as_ref()],
        bump
    )]
    pub sale_token_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = authority.key() == global_config.authority @ LaunchpadError::Unauthorized
    )]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn set_sale_token(ctx: Context<SetSaleToken>) -> Result<()> {
    let clock = Clock::get()?;
    let campaign = &mut ctx.accounts.campaign;

    require!(
        !campaign.sale_token_configured(),
        LaunchpadError::SaleTokenAlreadySet
    );
    require!(
        clock.unix_timestamp < campaign.schedule.claim_start,
        LaunchpadError::ClaimWindowOpen
    );

    campaign.sale_token_mint = ctx.accounts.sale_token_mint.key();
    campaign.sale_token_vault = ctx.accounts.sale_token_vault.key();
    campaign.sale_token_decimals = ctx.accounts.sale_token_mint.decimals;

    emit!(SaleTokenConfigured {
        campaign_id: campaign.campaign_id,
        sale_token_mint: campaign.sale_token_mint,
        sale_token_vault: campaign.sale_token_vault,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
