// programs/helios_launchpad/src/lib.rs
//
// Helios Launchpad
// ================
// Token-sale and vesting-distribution engine with integrated refund and
// reserve-withdrawal accounting:
// - Time-boxed campaigns with phase-dependent bonus pricing
// - Cliff + step-interval vesting unlock clock
// - Multi-branch refund policy with time- and price-dependent penalties
// - Four independently metered reserve-withdrawal pools

use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod reserves;
pub mod state;
pub mod vesting;

use instructions::*;
use state::SalePhase;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod helios_launchpad {
    use super::*;

    // ==================== INITIALIZATION ====================

    /// Initialize the global configuration (admin, operator, verifier roles)
    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    // ==================== CAMPAIGN CONFIGURATION ====================

    /// Create a new sale campaign
    pub fn create_campaign(
        ctx: Context<CreateCampaign>,
        params: CreateCampaignParams,
    ) -> Result<()> {
        instructions::campaign::create_campaign(ctx, params)
    }

    /// Replace the funding/vesting schedule
    pub fn update_schedule(ctx: Context<UpdateCampaignConfig>, params: ScheduleParams) -> Result<()> {
        instructions::campaign::update_schedule(ctx, params)
    }

    /// Replace the refund policy and penalty rates
    pub fn update_refund_policy(
        ctx: Context<UpdateCampaignConfig>,
        params: RefundParams,
    ) -> Result<()> {
        instructions::campaign::update_refund_policy(ctx, params)
    }

    /// Configure the distributed asset; once, before claims open
    pub fn set_sale_token(ctx: Context<SetSaleToken>) -> Result<()> {
        instructions::campaign::set_sale_token(ctx)
    }

    /// Register a payment asset with its static USD price
    pub fn register_payment_asset(
        ctx: Context<RegisterPaymentAsset>,
        usd_price: u64,
    ) -> Result<()> {
        instructions::assets::register_payment_asset(ctx, usd_price)
    }

    /// Update a payment asset's static USD price
    pub fn set_asset_price(ctx: Context<SetAssetPrice>, usd_price: u64) -> Result<()> {
        instructions::assets::set_asset_price(ctx, usd_price)
    }

    /// Record the observed time-weighted price for the refund window
    pub fn set_twap_price(ctx: Context<SetTwapPrice>, twap_price: u64) -> Result<()> {
        instructions::assets::set_twap_price(ctx, twap_price)
    }

    /// Mutate the participant allow-list (verifier role)
    pub fn set_verification(
        ctx: Context<SetVerification>,
        investor: Pubkey,
        verified: bool,
    ) -> Result<()> {
        instructions::verification::set_verification(ctx, investor, verified)
    }

    // ==================== PARTICIPANT OPERATIONS ====================

    /// Invest a payment asset into a campaign
    pub fn invest(ctx: Context<Invest>, amount: u64) -> Result<()> {
        instructions::invest::invest(ctx, amount)
    }

    /// Claim vested sale tokens
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::claim(ctx)
    }

    /// Refund an investment, fully or for the unlocked portion only
    pub fn refund(ctx: Context<Refund>, is_full_refund: bool) -> Result<()> {
        instructions::refund::refund(ctx, is_full_refund)
    }

    // ==================== RESERVE WITHDRAWALS ====================

    /// Withdraw raised funds unlocked by aggregate claim progress
    pub fn withdraw_raised_funds(ctx: Context<WithdrawRaisedFunds>, amount: u64) -> Result<()> {
        instructions::withdraw::withdraw_raised_funds(ctx, amount)
    }

    /// Withdraw the unsold allocation; single-shot, after funding closes
    pub fn withdraw_unsold_tokens(ctx: Context<WithdrawSaleTokens>) -> Result<()> {
        instructions::withdraw::withdraw_unsold_tokens(ctx)
    }

    /// Sweep tokens returned by refunds
    pub fn withdraw_refunded_tokens(ctx: Context<WithdrawSaleTokens>) -> Result<()> {
        instructions::withdraw::withdraw_refunded_tokens(ctx)
    }

    /// Withdraw collected penalty fees for one payment asset
    pub fn withdraw_penalty_fees(ctx: Context<WithdrawPenaltyFees>) -> Result<()> {
        instructions::withdraw::withdraw_penalty_fees(ctx)
    }

    // ==================== READ-ONLY ACCESSORS ====================

    /// Current sale phase from allocation progress
    pub fn get_current_phase(ctx: Context<ViewCampaign>) -> Result<SalePhase> {
        instructions::views::get_current_phase(ctx)
    }

    /// Currently unlocked vesting fraction
    pub fn get_unlocked_percent(ctx: Context<ViewCampaign>) -> Result<u64> {
        instructions::views::get_unlocked_percent(ctx)
    }

    /// Claimable amount for a position right now
    pub fn get_claimable_amount(ctx: Context<ViewPosition>) -> Result<ClaimPreview> {
        instructions::views::get_claimable_amount(ctx)
    }

    /// Refundable amount and effective percent returned
    pub fn get_refundable_amount(
        ctx: Context<ViewRefundable>,
        is_full_refund: bool,
    ) -> Result<RefundPreview> {
        instructions::views::get_refundable_amount(ctx, is_full_refund)
    }
}
