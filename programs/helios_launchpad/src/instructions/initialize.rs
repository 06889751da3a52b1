// programs/helios_launchpad/src/instructions/initialize.rs

use anchor_lang::prelude::*;
use crate::events::GlobalConfigInitialized;
use crate::state::GlobalConfig;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + GlobalConfig::INIT_SPACE,
        seeds = [GlobalConfig::SEED_PREFIX],
        bump
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeParams {
    pub operator: Pubkey,
    pub verifier: Pubkey,
}

pub fn handler(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    let clock = Clock::get()?;

    let config = &mut ctx.accounts.global_config;
    config.authority = ctx.accounts.authority.key();
    config.operator = params.operator;
    config.verifier = params.verifier;
    config.campaign_count = 0;
    config.bump = ctx.bumps.global_config;
    config.reserved = Vec::new();

    emit!(GlobalConfigInitialized {
        authority: config.authority,
        operator: config.operator,
        verifier: config.verifier,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
