// programs/helios_launchpad/src/instructions/withdraw.rs
//
// The four reserve-withdrawal pools, consumed by the single operator role.
// Pools never interact; each request is validated against a freshly
// recomputed figure from the reserves formulas.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount};
use crate::errors::LaunchpadError;
use crate::events::{
    PenaltyFeesWithdrawn, RaisedFundsWithdrawn, RefundedTokensWithdrawn, UnsoldTokensWithdrawn,
};
use crate::math;
use crate::reserves;
use crate::state::{Campaign, GlobalConfig, PaymentAssetConfig};

// ==================== RAISED FUNDS (per campaign x asset) ====================

#[derive(Accounts)]
pub struct WithdrawRaisedFunds<'info> {
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
        mut,
        seeds = [
            PaymentAssetConfig::SEED_PREFIX,
            campaign.key().as_ref(),
            asset_config.mint.as_ref()
        ],
        bump = asset_config.bump,
    )]
    pub asset_config: Account<'info, PaymentAssetConfig>,

    #[account(
        mut,
        constraint = asset_vault.key() == asset_config.vault @ LaunchpadError::InvalidMint
    )]
    pub asset_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = operator_token_account.mint == asset_config.mint @ LaunchpadError::InvalidMint,
        constraint = operator_token_account.owner == operator.key() @ LaunchpadError::Unauthorized
    )]
    pub operator_token_account: Account<'info, TokenAccount>,

    #[account(
        constraint = operator.key() == global_config.operator @ LaunchpadError::Unauthorized
    )]
    pub operator: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Release of raised funds is tied to aggregate claim progress: the unlocked
/// share is floor(net_raised * claimed_percent), minus what was already taken.
pub fn withdraw_raised_funds(ctx: Context<WithdrawRaisedFunds>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    let campaign = &mut ctx.accounts.campaign;
    require!(!campaign.locked, LaunchpadError::ReentrancyGuard);
    campaign.locked = true;

    require!(amount > 0, LaunchpadError::InvalidAmount);

    let asset = &mut ctx.accounts.asset_config;
    let net_allocated = reserves::net_allocated(
        campaign.total_allocated,
        campaign.refund.refunded_base,
        campaign.refund.refunded_bonus,
    );
    let claimed_percent = reserves::claimed_percent(campaign.total_claimed_tokens, net_allocated)?;
    let available = reserves::raised_funds_withdrawable(
        asset.raised,
        asset.refunded,
        asset.stable_withdrawn,
        claimed_percent,
    )?;
    require!(available > 0, LaunchpadError::NothingToWithdraw);
    require!(amount <= available, LaunchpadError::WithdrawExceedsAvailable);

    asset.stable_withdrawn = asset
        .stable_withdrawn
        .checked_add(amount)
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
                from: ctx.accounts.asset_vault.to_account_info(),
                to: ctx.accounts.operator_token_account.to_account_info(),
                authority: campaign.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(RaisedFundsWithdrawn {
        campaign_id: campaign.campaign_id,
        mint: asset.mint,
        amount,
        total_withdrawn: asset.stable_withdrawn,
        timestamp: clock.unix_timestamp,
    });

    campaign.locked = false;
    Ok(())
}

// ==================== SALE-TOKEN POOLS (per campaign) ====================

#[derive(Accounts)]
pub struct WithdrawSaleTokens<'info> {
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
        mut,
        constraint = sale_token_vault.key() == campaign.sale_token_vault @ LaunchpadError::InvalidMint
    )]
    pub sale_token_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = operator_token_account.mint == campaign.sale_token_mint @ LaunchpadError::InvalidMint,
        constraint = operator_token_account.owner == operator.key() @ LaunchpadError::Unauthorized
    )]
    pub operator_token_account: Account<'info, TokenAccount>,

    #[account(
        constraint = operator.key() == global_config.operator @ LaunchpadError::Unauthorized
    )]
    pub operator: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Single-shot sweep of the unsold allocation, strictly after funding closes.
pub fn withdraw_unsold_tokens(ctx: Context<WithdrawSaleTokens>) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    let campaign = &mut ctx.accounts.campaign;
    require!(!campaign.locked, LaunchpadError::ReentrancyGuard);
    campaign.locked = true;

    require!(
        campaign.sale_token_configured(),
        LaunchpadError::SaleTokenNotConfigured
    );
    require!(
        now > campaign.schedule.funding_end,
        LaunchpadError::FundingNotEnded
    );
    require!(
        !campaign.unsold_withdrawn,
        LaunchpadError::UnsoldAlreadyWithdrawn
    );

    let unsold = reserves::unsold_tokens(campaign.total_allocation, campaign.total_allocated);
    let native_amount = math::to_native_amount(unsold, campaign.sale_token_decimals)?;
    require!(native_amount > 0, LaunchpadError::NothingToWithdraw);
    require!(
        ctx.accounts.sale_token_vault.amount >= native_amount,
        LaunchpadError::InsufficientCustodyBalance
    );

    campaign.unsold_withdrawn = true;
    campaign.unsold_withdrawn_amount = unsold;

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
                to: ctx.accounts.operator_token_account.to_account_info(),
                authority: campaign.to_account_info(),
            },
            signer_seeds,
        ),
        native_amount,
    )?;

    emit!(UnsoldTokensWithdrawn {
        campaign_id: campaign.campaign_id,
        token_amount: unsold,
        native_amount,
        timestamp: now,
    });

    campaign.locked = false;
    Ok(())
}

/// Sweep of tokens returned by refunds; repeatable, the pool grows over time.
pub fn withdraw_refunded_tokens(ctx: Context<WithdrawSaleTokens>) -> Result<()> {
    let clock = Clock::get()?;

    let campaign = &mut ctx.accounts.campaign;
    require!(!campaign.locked, LaunchpadError::ReentrancyGuard);
    campaign.locked = true;

    require!(
        campaign.sale_token_configured(),
        LaunchpadError::SaleTokenNotConfigured
    );

    let available = reserves::refunded_tokens_available(
        campaign.refund.refunded_base,
        campaign.refund.refunded_bonus,
        campaign.refunded_tokens_withdrawn,
    );
    let native_amount = math::to_native_amount(available, campaign.sale_token_decimals)?;
    require!(native_amount > 0, LaunchpadError::NothingToWithdraw);
    require!(
        ctx.accounts.sale_token_vault.amount >= native_amount,
        LaunchpadError::InsufficientCustodyBalance
    );

    campaign.refunded_tokens_withdrawn = campaign
        .refunded_tokens_withdrawn
        .checked_add(available)
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
                to: ctx.accounts.operator_token_account.to_account_info(),
                authority: campaign.to_account_info(),
            },
            signer_seeds,
        ),
        native_amount,
    )?;

    emit!(RefundedTokensWithdrawn {
        campaign_id: campaign.campaign_id,
        token_amount: available,
        native_amount,
        timestamp: clock.unix_timestamp,
    });

    campaign.locked = false;
    Ok(())
}

// ==================== PENALTY FEES (per campaign x asset) ====================

#[derive(Accounts)]
pub struct WithdrawPenaltyFees<'info> {
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
        mut,
        seeds = [
            PaymentAssetConfig::SEED_PREFIX,
            campaign.key().as_ref(),
            asset_config.mint.as_ref()
        ],
        bump = asset_config.bump,
    )]
    pub asset_config: Account<'info, PaymentAssetConfig>,

    #[account(
        mut,
        constraint = asset_vault.key() == asset_config.vault @ LaunchpadError::InvalidMint
    )]
    pub asset_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = operator_token_account.mint == asset_config.mint @ LaunchpadError::InvalidMint,
        constraint = operator_token_account.owner == operator.key() @ LaunchpadError::Unauthorized
    )]
    pub operator_token_account: Account<'info, TokenAccount>,

    #[account(
        constraint = operator.key() == global_config.operator @ LaunchpadError::Unauthorized
    )]
    pub operator: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn withdraw_penalty_fees(ctx: Context<WithdrawPenaltyFees>) -> Result<()> {
    let clock = Clock::get()?;

    let campaign = &mut ctx.accounts.campaign;
    require!(!campaign.locked, LaunchpadError::ReentrancyGuard);
    campaign.locked = true;

    let asset = &mut ctx.accounts.asset_config;
    let available = reserves::penalty_available(asset.penalty_collected, asset.penalty_withdrawn);
    require!(available > 0, LaunchpadError::NothingToWithdraw);

    asset.penalty_withdrawn = asset
        .penalty_withdrawn
        .checked_add(available)
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
                from: ctx.accounts.asset_vault.to_account_info(),
                to: ctx.accounts.operator_token_account.to_account_info(),
                authority: campaign.to_account_info(),
            },
            signer_seeds,
        ),
        available,
    )?;

    emit!(PenaltyFeesWithdrawn {
        campaign_id: campaign.campaign_id,
        mint: asset.mint,
        amount: available,
        timestamp: clock.unix_timestamp,
    });

    campaign.locked = false;
    Ok(())
}
