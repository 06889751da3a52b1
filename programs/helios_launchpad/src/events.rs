// programs/helios_launchpad/src/events.rs

use anchor_lang::prelude::*;
use crate::state::SalePhase;

/// Emitted when the global config is initialized
#[event]
pub struct GlobalConfigInitialized {
    pub authority: Pubkey,
    pub operator: Pubkey,
    pub verifier: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a campaign is created
#[event]
pub struct CampaignCreated {
    pub campaign_id: u64,
    pub funding_start: i64,
    pub funding_end: i64,
    pub initial_price: u64,
    pub total_allocation: u128,
    pub participant_cap: u128,
    pub min_ticket_usd: u128,
    pub timestamp: i64,
}

/// Emitted when the vesting/funding schedule is updated
#[event]
pub struct ScheduleUpdated {
    pub campaign_id: u64,
    pub tge_at: i64,
    pub cliff_duration: i64,
    pub vesting_duration: i64,
    pub unlock_interval: i64,
    pub timestamp: i64,
}

/// Emitted when the refund policy or penalty rates change
#[event]
pub struct RefundPolicyUpdated {
    pub campaign_id: u64,
    pub penalty_before_tge: u64,
    pub penalty_after_tge: u64,
    pub penalty_partial: u64,
    pub timestamp: i64,
}

/// Emitted when the distributed sale token is configured
#[event]
pub struct SaleTokenConfigured {
    pub campaign_id: u64,
    pub sale_token_mint: Pubkey,
    pub sale_token_vault: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a payment asset is registered for a campaign
#[event]
pub struct PaymentAssetRegistered {
    pub campaign_id: u64,
    pub mint: Pubkey,
    pub decimals: u8,
    pub usd_price: u64,
    pub vault: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a payment asset's static USD price is updated
#[event]
pub struct AssetPriceUpdated {
    pub campaign_id: u64,
    pub mint: Pubkey,
    pub old_price: u64,
    pub new_price: u64,
    pub timestamp: i64,
}

/// Emitted when the observed time-weighted price is recorded
#[event]
pub struct TwapPriceUpdated {
    pub campaign_id: u64,
    pub twap_price: u64,
    pub timestamp: i64,
}

/// Emitted when a participant's verification flag changes
#[event]
pub struct VerificationUpdated {
    pub participant: Pubkey,
    pub verified: bool,
    pub timestamp: i64,
}

/// Emitted when an investment is admitted
#[event]
pub struct InvestmentReceived {
    pub campaign_id: u64,
    pub investor: Pubkey,
    pub payment_mint: Pubkey,
    pub amount: u64,
    pub usd_value: u128,
    pub base_tokens: u128,
    pub bonus_tokens: u128,
    pub phase: SalePhase,
    pub timestamp: i64,
}

/// Emitted when vested tokens are released to a participant
#[event]
pub struct TokensClaimed {
    pub campaign_id: u64,
    pub investor: Pubkey,
    pub base_amount: u128,
    pub bonus_amount: u128,
    pub native_amount: u64,
    pub unlocked_percent: u64,
    pub timestamp: i64,
}

/// Emitted when a refund is settled
#[event]
pub struct RefundPaid {
    pub campaign_id: u64,
    pub investor: Pubkey,
    pub payment_mint: Pubkey,
    pub base_refunded: u128,
    pub bonus_clawed: u128,
    pub percent_returned: u64,
    pub payout_amount: u64,
    pub penalty_amount: u64,
    pub is_full_refund: bool,
    pub timestamp: i64,
}

/// Emitted when raised funds are withdrawn by the operator
#[event]
pub struct RaisedFundsWithdrawn {
    pub campaign_id: u64,
    pub mint: Pubkey,
    pub amount: u64,
    pub total_withdrawn: u64,
    pub timestamp: i64,
}

/// Emitted on the single-shot unsold-token withdrawal
#[event]
pub struct UnsoldTokensWithdrawn {
    pub campaign_id: u64,
    pub token_amount: u128,
    pub native_amount: u64,
    pub timestamp: i64,
}

/// Emitted when refunded tokens are swept by the operator
#[event]
pub struct RefundedTokensWithdrawn {
    pub campaign_id: u64,
    pub token_amount: u128,
    pub native_amount: u64,
    pub timestamp: i64,
}

/// Emitted when collected penalty fees are withdrawn
#[event]
pub struct PenaltyFeesWithdrawn {
    pub campaign_id: u64,
    pub mint: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
