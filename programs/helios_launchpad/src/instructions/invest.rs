// programs/helios_launchpad/src/instructions/invest.rs
//
// Investment admission: phase/bonus pricing, currency normalization and the
// allocation caps. State is committed in full before the custody transfer,
// which is the last action of the instruction.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount};
use crate::errors::LaunchpadError;
use crate::events::InvestmentReceived;
use crate::math::{self, PERCENT_ONE};
use crate::state::{Campaign, InvestorPosition, PaymentAssetConfig, VerificationRecord};

#[derive(Accounts)]
pub struct Invest<'info> {
    #[account(
        mut,
        seeds = [Campaign::SEED_PREFIX, &campaign.campaign_id.to_le_bytes()],
        bump = campaign.bump,
    )]
    pub campaign: Account<'info, Campaign>,

    #[account(
        mut,
        seeds = [
            PaymentAssetConfig::SEED_PREFIX,
            campaign.key().as_ref(),
            asset_config.mint.as_ref()
        ],
        bump = asset_config.bump,
        constraint = asset_config.is_accepted @ LaunchpadError::AssetNotAccepted
    )]
    pub asset_config: Account<'info, PaymentAssetConfig>,

    #[account(
        mut,
        constraint = asset_vault.key() == asset_config.vault @ LaunchpadError::InvalidMint
    )]
    pub asset_vault: Account<'info, TokenAccount>,

    /// Allow-list gate, consumed by investment only
    #[account(
        seeds = [VerificationRecord::SEED_PREFIX, investor.key().as_ref()],
        bump = verification.bump,
        constraint = verification.verified @ LaunchpadError::NotVerified
    )]
    pub verification: Account<'info, VerificationRecord>,

    #[account(
        init_if_needed,
        payer = investor,
        space = 8 + InvestorPosition::INIT_SPACE,
        seeds = [
            InvestorPosition::SEED_PREFIX,
            campaign.key().as_ref(),
            investor.key().as_ref()
        ],
        bump
    )]
    pub position: Account<'info, InvestorPosition>,

    #[account(
        mut,
        constraint = investor_token_account.mint == asset_config.mint @ LaunchpadError::InvalidMint,
        constraint = investor_token_account.owner == investor.key() @ LaunchpadError::Unauthorized
    )]
    pub investor_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub investor: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn invest(ctx: Context<Invest>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    let campaign = &mut ctx.accounts.campaign;
    require!(!campaign.locked, LaunchpadError::ReentrancyGuard);
    campaign.locked = true;

    require!(amount > 0, LaunchpadError::InvalidAmount);

    // Ordered admission checks
    require!(!campaign.is_sold_out(), LaunchpadError::SaleSoldOut);
    require!(now <= campaign.schedule.funding_end, LaunchpadError::SaleEnded);
    require!(now >= campaign.schedule.funding_start, LaunchpadError::SaleNotStarted);
    require!(
        campaign.pricing.initial_price > 0,
        LaunchpadError::PriceNotConfigured
    );

    // One asset slot per participant per campaign, permanently
    let position = &mut ctx.accounts.position;
    require!(position.invested_at == 0, LaunchpadError::AlreadyInvested);

    let asset = &mut ctx.accounts.asset_config;

    let unit_amount = math::to_unit_amount(amount, asset.decimals)?;
    let usd = math::usd_value(unit_amount, asset.usd_price)?;
    require!(usd >= campaign.min_ticket_usd, LaunchpadError::BelowMinimumTicket);

    // Phase resolved on the allocation BEFORE this order is added
    let phase = campaign.current_phase();
    let bonus_rate = campaign.bonus_rate(phase);
    let base_tokens = math::tokens_for_usd(usd, campaign.pricing.initial_price)?;
    let tokens_bought = math::apply_percent(base_tokens, PERCENT_ONE + bonus_rate)?;
    let bonus_tokens = tokens_bought.saturating_sub(base_tokens);

    // Allocation caps, net of prior refunds
    let position_after = tokens_bought
        .checked_add(position.allocated_total())
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))?
        .saturating_sub(position.refunded_total());
    require!(
        position_after <= campaign.participant_cap_tokens,
        LaunchpadError::ExceedsParticipantCap
    );

    let campaign_after = tokens_bought
        .checked_add(campaign.net_outstanding())
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))?;
    require!(
        campaign_after <= campaign.total_allocation,
        LaunchpadError::ExceedsSupplyCap
    );

    // Commit the record and counters
    position.investor = ctx.accounts.investor.key();
    position.campaign = campaign.key();
    position.usd_invested = usd;
    position.payment_mint = asset.mint;
    position.invested_amount = amount;
    position.allocated_base = base_tokens;
    position.allocated_bonus = bonus_tokens;
    position.phase = phase;
    position.invested_at = now;
    position.bump = ctx.bumps.position;

    campaign.participant_count = campaign
        .participant_count
        .checked_add(1)
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))?;
    campaign.total_allocated = campaign
        .total_allocated
        .checked_add(tokens_bought)
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))?;
    campaign.raised_usd = campaign
        .raised_usd
        .checked_add(usd)
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))?;
    asset.raised = asset
        .raised
        .checked_add(amount)
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))?;

    // Custody pull is the last action of the operation
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.investor_token_account.to_account_info(),
                to: ctx.accounts.asset_vault.to_account_info(),
                authority: ctx.accounts.investor.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(InvestmentReceived {
        campaign_id: campaign.campaign_id,
        investor: ctx.accounts.investor.key(),
        payment_mint: asset.mint,
        amount,
        usd_value: usd,
        base_tokens,
        bonus_tokens,
        phase,
        timestamp: now,
    });

    campaign.locked = false;
    Ok(())
}
