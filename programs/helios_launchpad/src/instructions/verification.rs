// programs/helios_launchpad/src/instructions/verification.rs
//
// Participant allow-list. The flag gates investment admission only; claims
// and refunds stay open to anyone holding a position.

use anchor_lang::prelude::*;
use crate::errors::LaunchpadError;
use crate::events::VerificationUpdated;
use crate::state::{GlobalConfig, VerificationRecord};

#[derive(Accounts)]
#[instruction(investor: Pubkey)]
pub struct SetVerification<'info> {
    #[account(
        seeds = [GlobalConfig::SEED_PREFIX],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        init_if_needed,
        payer = verifier,
        space = 8 + VerificationRecord::INIT_SPACE,
        seeds = [VerificationRecord::SEED_PREFIX, investor.as_ref()],
        bump
    )]
    pub verification: Account<'info, VerificationRecord>,

    #[account(
        mut,
        constraint = verifier.key() == global_config.verifier @ LaunchpadError::Unauthorized
    )]
    pub verifier: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn set_verification(
    ctx: Context<SetVerification>,
    investor: Pubkey,
    verified: bool,
) -> Result<()> {
    let clock = Clock::get()?;

    let record = &mut ctx.accounts.verification;
    record.investor = investor;
    record.verified = verified;
    record.verified_at = clock.unix_timestamp;
    record.bump = ctx.bumps.verification;

    emit!(VerificationUpdated {
        participant: investor,
        verified,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
