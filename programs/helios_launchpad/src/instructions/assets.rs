// programs/helios_launchpad/src/instructions/assets.rs
//
// Payment-asset registration and the trusted price inputs: a static USD
// price per asset and the admin-observed time-weighted price per campaign.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::errors::LaunchpadError;
use crate::events::{AssetPriceUpdated, PaymentAssetRegistered, TwapPriceUpdated};
use crate::state::{Campaign, GlobalConfig, PaymentAssetConfig};

// ==================== REGISTER PAYMENT ASSET ====================

#[derive(Accounts)]
pub struct RegisterPaymentAsset<'info> {
    #[account(
        seeds = [GlobalConfig::SEED_PREFIX],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        seeds = [Campaign::SEED_PREFIX, &campaign.campaign_id.to_le_bytes()],
        bump = campaign.bump,
    )]
    pub campaign: Account<'info, Campaign>,

    pub payment_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = authority,
        space = 8 + PaymentAssetConfig::INIT_SPACE,
        seeds = [
            PaymentAssetConfig::SEED_PREFIX,
            campaign.key().as_ref(),
            payment_mint.key().as_ref()
        ],
        bump
    )]
    pub asset_config: Account<'info, PaymentAssetConfig>,

    /// Custody vault for the payment asset
    #[account(
        init,
        payer = authority,
        token::mint = payment_mint,
        token::authority = campaign,
        seeds = [b"asset_vault", campaign.key().as_ref(), payment_mint.key().as_ref()],
        bump
    )]
    pub asset_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = authority.key() == global_config.authority @ LaunchpadError::Unauthorized
    )]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn register_payment_asset(ctx: Context<RegisterPaymentAsset>, usd_price: u64) -> Result<()> {
    let clock = Clock::get()?;

    require!(usd_price > 0, LaunchpadError::InvalidPrice);

    let asset = &mut ctx.accounts.asset_config;
    asset.campaign = ctx.accounts.campaign.key();
    asset.mint = ctx.accounts.payment_mint.key();
    asset.decimals = ctx.accounts.payment_mint.decimals;
    asset.usd_price = usd_price;
    asset.vault = ctx.accounts.asset_vault.key();
    asset.is_accepted = true;
    asset.raised = 0;
    asset.refunded = 0;
    asset.stable_withdrawn = 0;
    asset.penalty_collected = 0;
    asset.penalty_withdrawn = 0;
    asset.bump = ctx.bumps.asset_config;

    emit!(PaymentAssetRegistered {
        campaign_id: ctx.accounts.campaign.campaign_id,
        mint: asset.mint,
        decimals: asset.decimals,
        usd_price,
        vault: asset.vault,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

// ==================== PRICE FEEDS ====================

#[derive(Accounts)]
pub struct SetAssetPrice<'info> {
    #[account(
        seeds = [GlobalConfig::SEED_PREFIX],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
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
        constraint = authority.key() == global_config.authority @ LaunchpadError::Unauthorized
    )]
    pub authority: Signer<'info>,
}

pub fn set_asset_price(ctx: Context<SetAssetPrice>, usd_price: u64) -> Result<()> {
    let clock = Clock::get()?;

    require!(usd_price > 0, LaunchpadError::InvalidPrice);

    let asset = &mut ctx.accounts.asset_config;
    let old_price = asset.usd_price;
    asset.usd_price = usd_price;

    emit!(AssetPriceUpdated {
        campaign_id: ctx.accounts.campaign.campaign_id,
        mint: asset.mint,
        old_price,
        new_price: usd_price,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetTwapPrice<'info> {
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

pub fn set_twap_price(ctx: Context<SetTwapPrice>, twap_price: u64) -> Result<()> {
    let clock = Clock::get()?;

    require!(twap_price > 0, LaunchpadError::InvalidPrice);

    let campaign = &mut ctx.accounts.campaign;
    campaign.pricing.twap_price = twap_price;

    emit!(TwapPriceUpdated {
        campaign_id: campaign.campaign_id,
        twap_price,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
