// programs/helios_launchpad/src/instructions/refund.rs
//
// Refund engine. Eligibility is a fixed four-branch precedence over the
// campaign lifecycle; the first matching branch decides. Settlement converts
// the refunded base tokens to USD at the INITIAL sale price, applies the
// branch penalty, and pays out in the participant's original payment asset.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount};
use crate::errors::LaunchpadError;
use crate::events::RefundPaid;
use crate::math::{self, PERCENT_ONE};
use crate::state::{Campaign, InvestorPosition, PaymentAssetConfig};
use crate::vesting;

#[derive(Accounts)]
pub struct Refund<'info> {
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

    /// Config of the participant's original payment asset
    #[account(
        mut,
        seeds = [
            PaymentAssetConfig::SEED_PREFIX,
            campaign.key().as_ref(),
            asset_config.mint.as_ref()
        ],
        bump = asset_config.bump,
        constraint = asset_config.mint == position.payment_mint @ LaunchpadError::InvalidMint
    )]
    pub asset_config: Account<'info, PaymentAssetConfig>,

    #[account(
        mut,
        constraint = asset_vault.key() == asset_config.vault @ LaunchpadError::InvalidMint
    )]
    pub asset_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = investor_token_account.mint == position.payment_mint @ LaunchpadError::InvalidMint,
        constraint = investor_token_account.owner == investor.key() @ LaunchpadError::Unauthorized
    )]
    pub investor_token_account: Account<'info, TokenAccount>,

    pub investor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Penalty rate (PERCENT_ONE units) for an eligible refund, or the error of
/// the branch that rejected it. First matching branch decides.
pub fn evaluate_eligibility(
    campaign: &Campaign,
    position: &InvestorPosition,
    now: i64,
    is_full: bool,
) -> Result<u64> {
    let schedule = &campaign.schedule;
    let info = &campaign.refund;
    let policy = &info.policy;

    // 1. Pre-TGE: only a full refund can ever be eligible
    if !schedule.tge_reached(now) {
        require!(is_full, LaunchpadError::PartialRefundBeforeTge);
        require!(policy.allow_full_before_tge, LaunchpadError::RefundNotAllowed);
        return Ok(info.penalty_before_tge);
    }

    // 2. Penalty-free window: TWAP observed at or below the initial price,
    //    inside the post-observation grace period
    if is_full
        && policy.twap_window_enabled
        && campaign.pricing.twap_price != 0
        && campaign.pricing.twap_price <= campaign.pricing.initial_price
        && now <= schedule.twap_refund_deadline(policy.grace_window)
    {
        return Ok(0);
    }

    // 3. Inside the cliff
    if now < schedule.cliff_end() {
        let allowed = if is_full {
            policy.allow_full_in_cliff
        } else {
            policy.allow_partial_in_cliff
        };
        require!(allowed, LaunchpadError::RefundNotAllowed);
        return Ok(if is_full {
            info.penalty_after_tge
        } else {
            info.penalty_partial
        });
    }

    // 4. Past the cliff. The claimed-blocks-refund flag applies in this
    //    branch only, not uniformly.
    if policy.block_after_claim && position.has_claimed {
        return err!(LaunchpadError::RefundBlockedAfterClaim);
    }
    let vesting_end = vesting::vesting_end(schedule);
    if now < vesting_end {
        let allowed = if is_full {
            policy.allow_full_in_vesting
        } else {
            policy.allow_partial_in_vesting
        };
        require!(allowed, LaunchpadError::RefundNotAllowed);
    } else {
        require!(
            now <= vesting_end.saturating_add(schedule.post_vesting_grace),
            LaunchpadError::RefundWindowClosed
        );
        let allowed = if is_full {
            policy.allow_full_after_vesting
        } else {
            policy.allow_partial_after_vesting
        };
        require!(allowed, LaunchpadError::RefundNotAllowed);
    }
    Ok(if is_full {
        info.penalty_after_tge
    } else {
        info.penalty_partial
    })
}

/// Refundable base and clawed bonus at the given fraction of the allocation,
/// net of what was already claimed or refunded. Full refunds pass PERCENT_ONE;
/// partial refunds pass the currently unlocked fraction and so never touch
/// locked tokens.
pub fn refundable_amounts(position: &InvestorPosition, fraction: u64) -> Result<(u128, u128)> {
    let base = math::apply_percent(position.allocated_base, fraction)?
        .saturating_sub(position.claimed_base)
        .saturating_sub(position.refunded_base);
    let bonus = math::apply_percent(position.allocated_bonus, fraction)?
        .saturating_sub(position.claimed_bonus)
        .saturating_sub(position.refunded_bonus);
    Ok((base, bonus))
}

#[derive(Debug)]
pub struct RefundSettlement {
    /// USD value of the refunded base at the initial price (unit scale)
    pub usd_value: u128,
    /// Value leaving the participant's stake, in the payment asset
    pub gross_native: u64,
    /// Paid back to the participant
    pub paid_native: u64,
    /// Retained as a penalty fee
    pub penalty_native: u64,
    /// PERCENT_ONE - penalty
    pub percent_returned: u64,
}

/// Convert refunded base tokens to a payment-asset settlement. The gross
/// value is capped so cumulative refunds never exceed the original
/// investment in that asset.
pub fn settle_refund(
    refunded_base: u128,
    initial_price: u64,
    asset_price: u64,
    asset_decimals: u8,
    invested_amount: u64,
    already_refunded: u64,
    penalty: u64,
) -> Result<RefundSettlement> {
    let usd_value = math::usd_value(refunded_base, initial_price)?;
    let gross_unit = math::asset_for_usd(usd_value, asset_price)?;
    let gross_native = math::to_native_amount(gross_unit, asset_decimals)?;

    let headroom = invested_amount.saturating_sub(already_refunded);
    require!(headroom > 0, LaunchpadError::RefundExceedsInvestment);
    let gross_native = gross_native.min(headroom);
    require!(gross_native > 0, LaunchpadError::NothingToRefund);

    let percent_returned = PERCENT_ONE.saturating_sub(penalty);
    let paid_native = math::mul_div(
        gross_native as u128,
        percent_returned as u128,
        PERCENT_ONE as u128,
    )? as u64;
    let penalty_native = gross_native.saturating_sub(paid_native);

    Ok(RefundSettlement {
        usd_value,
        gross_native,
        paid_native,
        penalty_native,
        percent_returned,
    })
}

pub fn refund(ctx: Context<Refund>, is_full_refund: bool) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    let campaign = &mut ctx.accounts.campaign;
    require!(!campaign.locked, LaunchpadError::ReentrancyGuard);
    campaign.locked = true;

    let position = &mut ctx.accounts.position;
    let asset = &mut ctx.accounts.asset_config;

    let penalty = evaluate_eligibility(campaign, position, now, is_full_refund)?;

    let fraction = if is_full_refund {
        PERCENT_ONE
    } else {
        vesting::unlocked_fraction(&campaign.schedule, now)
    };
    let (refunded_base, clawed_bonus) = refundable_amounts(position, fraction)?;
    require!(refunded_base > 0, LaunchpadError::NothingToRefund);

    let settlement = settle_refund(
        refunded_base,
        campaign.pricing.initial_price,
        asset.usd_price,
        asset.decimals,
        position.invested_amount,
        position.refunded_amount,
        penalty,
    )?;

    // Commit all counters before the payout transfer
    position.refunded_base = position.refunded_base.saturating_add(refunded_base);
    position.refunded_bonus = position.refunded_bonus.saturating_add(clawed_bonus);
    position.refunded_amount = position
        .refunded_amount
        .saturating_add(settlement.gross_native);

    campaign.refund.refunded_base = campaign.refund.refunded_base.saturating_add(refunded_base);
    campaign.refund.refunded_bonus = campaign.refund.refunded_bonus.saturating_add(clawed_bonus);
    campaign.refund.refunded_usd = campaign
        .refund
        .refunded_usd
        .saturating_add(settlement.usd_value);

    asset.refunded = asset
        .refunded
        .checked_add(settlement.gross_native)
        .ok_or_else(|| error!(LaunchpadError::MathOverflow))?;
    if settlement.penalty_native > 0 {
        asset.penalty_collected = asset
            .penalty_collected
            .checked_add(settlement.penalty_native)
            .ok_or_else(|| error!(LaunchpadError::MathOverflow))?;
    }

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
                to: ctx.accounts.investor_token_account.to_account_info(),
                authority: campaign.to_account_info(),
            },
            signer_seeds,
        ),
        settlement.paid_native,
    )?;

    emit!(RefundPaid {
        campaign_id: campaign.campaign_id,
        investor: ctx.accounts.investor.key(),
        payment_mint: asset.mint,
        base_refunded: refunded_base,
        bonus_clawed: clawed_bonus,
        percent_returned: settlement.percent_returned,
        payout_amount: settlement.paid_native,
        penalty_amount: settlement.penalty_native,
        is_full_refund,
        timestamp: now,
    });

    campaign.locked = false;
    Ok(())
}

// ==================== UNIT TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        CampaignPricing, CampaignSchedule, RefundInfo, RefundPolicy, SalePhase,
    };

    const UNIT: u128 = 1_000_000_000_000_000_000;
    const DAY: i64 = 86_400;
    const USD: u64 = 100_000_000; // $1.00 at 8 decimals

    fn open_policy() -> RefundPolicy {
        RefundPolicy {
            allow_full_before_tge: true,
            allow_full_in_cliff: true,
            allow_partial_in_cliff: true,
            allow_full_in_vesting: true,
            allow_partial_in_vesting: true,
            allow_full_after_vesting: true,
            allow_partial_after_vesting: true,
            block_after_claim: false,
            twap_window_enabled: false,
            grace_window: 7 * DAY,
        }
    }

    fn test_campaign(policy: RefundPolicy) -> Campaign {
        Campaign {
            campaign_id: 1,
            sale_token_mint: Pubkey::default(),
            sale_token_vault: Pubkey::default(),
            sale_token_decimals: 9,
            min_ticket_usd: 0,
            participant_cap_tokens: 1_000_000 * UNIT,
            total_allocation: 1_000_000 * UNIT,
            total_allocated: 0,
            participant_count: 0,
            raised_usd: 0,
            phase1_bonus: 2_000_000,
            phase2_bonus: 1_000_000,
            phase3_bonus: 0,
            total_claimed_tokens: 0,
            unsold_withdrawn: false,
            unsold_withdrawn_amount: 0,
            refunded_tokens_withdrawn: 0,
            locked: false,
            schedule: CampaignSchedule {
                funding_start: 0,
                funding_end: 1_000,
                claim_start: 1_000,
                tge_at: 10_000,
                cliff_duration: 30 * DAY,
                vesting_duration: 300 * DAY,
                unlock_interval: 30 * DAY,
                twap_window_hours: 72,
                post_vesting_grace: 30 * DAY,
                tge_unlock_percent: 0,
            },
            refund: RefundInfo {
                refunded_base: 0,
                refunded_bonus: 0,
                refunded_usd: 0,
                penalty_before_tge: 200_000,  // 2%
                penalty_after_tge: 1_000_000, // 10%
                penalty_partial: 500_000,     // 5%
                policy,
            },
            pricing: CampaignPricing {
                initial_price: USD,
                threshold_price: USD,
                twap_price: 0,
            },
            bump: 255,
        }
    }

    fn test_position() -> InvestorPosition {
        InvestorPosition {
            investor: Pubkey::default(),
            campaign: Pubkey::default(),
            usd_invested: 1_000 * UNIT,
            payment_mint: Pubkey::default(),
            invested_amount: 1_000_000_000, // $1000 of a 6-decimal stable at $1.00
            refunded_amount: 0,
            allocated_base: 1_000 * UNIT,
            allocated_bonus: 200 * UNIT,
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

    // ==================== ELIGIBILITY PRECEDENCE ====================

    #[test]
    fn test_partial_never_eligible_pre_tge() {
        let campaign = test_campaign(open_policy());
        let position = test_position();
        // even with every partial flag enabled
        let err = evaluate_eligibility(&campaign, &position, 500, false).unwrap_err();
        assert_eq!(
            err,
            error!(LaunchpadError::PartialRefundBeforeTge).into()
        );
    }

    #[test]
    fn test_pre_tge_full_uses_before_tge_penalty() {
        let campaign = test_campaign(open_policy());
        let position = test_position();
        let penalty = evaluate_eligibility(&campaign, &position, 500, true).unwrap();
        assert_eq!(penalty, 200_000);
    }

    #[test]
    fn test_pre_tge_full_respects_policy_flag() {
        let mut policy = open_policy();
        policy.allow_full_before_tge = false;
        let campaign = test_campaign(policy);
        let position = test_position();
        let err = evaluate_eligibility(&campaign, &position, 500, true).unwrap_err();
        assert_eq!(err, error!(LaunchpadError::RefundNotAllowed).into());
    }

    #[test]
    fn test_twap_window_full_refund_is_penalty_free() {
        let mut policy = open_policy();
        policy.twap_window_enabled = true;
        let mut campaign = test_campaign(policy);
        campaign.pricing.twap_price = USD / 2; // underwater
        let position = test_position();

        // just after TGE, inside observation + grace
        let now = campaign.schedule.tge_at + DAY;
        let penalty = evaluate_eligibility(&campaign, &position, now, true).unwrap();
        assert_eq!(penalty, 0);
    }

    #[test]
    fn test_twap_window_requires_observed_price() {
        let mut policy = open_policy();
        policy.twap_window_enabled = true;
        let campaign = test_campaign(policy); // twap_price stays 0
        let position = test_position();

        // falls through to the cliff branch and its full-refund penalty
        let now = campaign.schedule.tge_at + DAY;
        let penalty = evaluate_eligibility(&campaign, &position, now, true).unwrap();
        assert_eq!(penalty, 1_000_000);
    }

    #[test]
    fn test_twap_above_initial_price_gets_no_free_refund() {
        let mut policy = open_policy();
        policy.twap_window_enabled = true;
        let mut campaign = test_campaign(policy);
        campaign.pricing.twap_price = USD * 2;
        let position = test_position();

        let now = campaign.schedule.tge_at + DAY;
        let penalty = evaluate_eligibility(&campaign, &position, now, true).unwrap();
        assert_eq!(penalty, 1_000_000);
    }

    #[test]
    fn test_cliff_branch_separate_full_and_partial_flags() {
        let mut policy = open_policy();
        policy.allow_partial_in_cliff = false;
        let campaign = test_campaign(policy);
        let position = test_position();

        let now = campaign.schedule.tge_at + DAY;
        assert!(evaluate_eligibility(&campaign, &position, now, true).is_ok());
        let err = evaluate_eligibility(&campaign, &position, now, false).unwrap_err();
        assert_eq!(err, error!(LaunchpadError::RefundNotAllowed).into());
    }

    #[test]
    fn test_partial_in_vesting_uses_partial_penalty() {
        let campaign = test_campaign(open_policy());
        let position = test_position();
        let now = campaign.schedule.cliff_end() + DAY;
        let penalty = evaluate_eligibility(&campaign, &position, now, false).unwrap();
        assert_eq!(penalty, 500_000);
    }

    #[test]
    fn test_claim_blocks_refund_only_past_the_cliff() {
        let mut policy = open_policy();
        policy.block_after_claim = true;
        let campaign = test_campaign(policy);
        let mut position = test_position();
        position.has_claimed = true;

        // inside the cliff the flag does not apply
        let in_cliff = campaign.schedule.tge_at + DAY;
        assert!(evaluate_eligibility(&campaign, &position, in_cliff, true).is_ok());

        // past the cliff it blocks
        let in_vesting = campaign.schedule.cliff_end() + DAY;
        let err = evaluate_eligibility(&campaign, &position, in_vesting, true).unwrap_err();
        assert_eq!(err, error!(LaunchpadError::RefundBlockedAfterClaim).into());
    }

    #[test]
    fn test_refund_window_closes_after_post_vesting_grace() {
        let campaign = test_campaign(open_policy());
        let position = test_position();
        let vesting_end = vesting::vesting_end(&campaign.schedule);

        // inside the grace period, after-vesting flags decide
        assert!(evaluate_eligibility(&campaign, &position, vesting_end + DAY, true).is_ok());

        let too_late = vesting_end + campaign.schedule.post_vesting_grace + 1;
        let err = evaluate_eligibility(&campaign, &position, too_late, true).unwrap_err();
        assert_eq!(err, error!(LaunchpadError::RefundWindowClosed).into());
    }

    // ==================== AMOUNTS ====================

    #[test]
    fn test_full_refund_takes_whole_base_and_claws_bonus() {
        let position = test_position();
        let (base, bonus) = refundable_amounts(&position, PERCENT_ONE).unwrap();
        assert_eq!(base, 1_000 * UNIT);
        assert_eq!(bonus, 200 * UNIT);
    }

    #[test]
    fn test_partial_refund_never_touches_locked_tokens() {
        let position = test_position();
        // 30% unlocked
        let (base, bonus) = refundable_amounts(&position, 3_000_000).unwrap();
        assert_eq!(base, 300 * UNIT);
        assert_eq!(bonus, 60 * UNIT);
    }

    #[test]
    fn test_refundable_deducts_claims_and_prior_refunds() {
        let mut position = test_position();
        position.claimed_base = 100 * UNIT;
        position.refunded_base = 50 * UNIT;
        let (base, _) = refundable_amounts(&position, PERCENT_ONE).unwrap();
        assert_eq!(base, 850 * UNIT);
    }

    // ==================== SETTLEMENT ====================

    #[test]
    fn test_two_percent_penalty_on_1000_returns_980() {
        // $1000 of base refunded pre-TGE at a 2% penalty, 6-decimal stable at $1.00
        let s = settle_refund(
            1_000 * UNIT,
            USD,
            USD,
            6,
            1_000_000_000,
            0,
            200_000,
        )
        .unwrap();
        assert_eq!(s.gross_native, 1_000_000_000);
        assert_eq!(s.paid_native, 980_000_000); // $980 back
        assert_eq!(s.penalty_native, 20_000_000); // $20 to the penalty pool
        assert_eq!(s.percent_returned, 9_800_000);
    }

    #[test]
    fn test_zero_penalty_returns_everything() {
        let s = settle_refund(1_000 * UNIT, USD, USD, 6, 1_000_000_000, 0, 0).unwrap();
        assert_eq!(s.paid_native, 1_000_000_000);
        assert_eq!(s.penalty_native, 0);
    }

    #[test]
    fn test_settlement_capped_by_original_investment() {
        // prior refunds left only $100 of headroom
        let s = settle_refund(
            1_000 * UNIT,
            USD,
            USD,
            6,
            1_000_000_000,
            900_000_000,
            0,
        )
        .unwrap();
        assert_eq!(s.gross_native, 100_000_000);
        assert_eq!(s.paid_native, 100_000_000);
    }

    #[test]
    fn test_settlement_fails_when_investment_exhausted() {
        let err = settle_refund(
            1_000 * UNIT,
            USD,
            USD,
            6,
            1_000_000_000,
            1_000_000_000,
            0,
        )
        .unwrap_err();
        assert_eq!(err, error!(LaunchpadError::RefundExceedsInvestment).into());
    }

    #[test]
    fn test_settlement_converts_at_initial_price_not_twap() {
        // token sold at $2.00; the refund values base at $2.00 regardless of
        // any later observed price
        let s = settle_refund(
            500 * UNIT,
            2 * USD,
            USD,
            6,
            1_000_000_000,
            0,
            0,
        )
        .unwrap();
        assert_eq!(s.gross_native, 1_000_000_000);
    }

    #[test]
    fn test_settlement_in_non_dollar_asset() {
        // $400 of base refunded into an asset priced at $4.00, 9 decimals
        let s = settle_refund(
            400 * UNIT,
            USD,
            4 * USD,
            9,
            1_000_000_000_000,
            0,
            0,
        )
        .unwrap();
        // $400 / $4.00 = 100 units of the asset
        assert_eq!(s.gross_native, 100_000_000_000);
    }
}
