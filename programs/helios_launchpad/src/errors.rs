// programs/helios_launchpad/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum LaunchpadError {
    #[msg("Unauthorized: caller lacks permission")]
    Unauthorized,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Invalid time range: end must be after start")]
    InvalidTimeRange,

    #[msg("Invalid vesting configuration: zero duration or interval exceeding vesting length")]
    InvalidVestingConfig,

    #[msg("Percentage out of range")]
    InvalidPercentage,

    #[msg("Price must be greater than zero")]
    InvalidPrice,

    #[msg("Sale price has not been configured")]
    PriceNotConfigured,

    #[msg("Invalid campaign configuration")]
    InvalidCampaignConfig,

    #[msg("Campaign id does not match the registry counter")]
    CampaignIdMismatch,

    #[msg("The sale has not started yet")]
    SaleNotStarted,

    #[msg("The sale has already ended")]
    SaleEnded,

    #[msg("The sale is sold out")]
    SaleSoldOut,

    #[msg("Participant is not verified")]
    NotVerified,

    #[msg("Participant has already invested in this campaign")]
    AlreadyInvested,

    #[msg("Investment is below the minimum ticket")]
    BelowMinimumTicket,

    #[msg("Purchase exceeds the per-participant allocation cap")]
    ExceedsParticipantCap,

    #[msg("Purchase exceeds the campaign supply cap")]
    ExceedsSupplyCap,

    #[msg("Payment asset is not accepted for this campaign")]
    AssetNotAccepted,

    #[msg("Token account or mint does not match the campaign configuration")]
    InvalidMint,

    #[msg("Claiming has not started yet")]
    ClaimNotStarted,

    #[msg("Sale token has not been configured")]
    SaleTokenNotConfigured,

    #[msg("Sale token can only be set once")]
    SaleTokenAlreadySet,

    #[msg("Sale token must be configured before claims open")]
    ClaimWindowOpen,

    #[msg("No tokens are unlocked yet")]
    NothingUnlocked,

    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("Claim would exceed the recorded allocation")]
    AllocationExceeded,

    #[msg("Custody balance is insufficient to cover the claim")]
    InsufficientCustodyBalance,

    #[msg("Partial refunds are not available before the TGE")]
    PartialRefundBeforeTge,

    #[msg("Refund is not allowed by the campaign policy in the current stage")]
    RefundNotAllowed,

    #[msg("Refund is blocked because tokens were already claimed")]
    RefundBlockedAfterClaim,

    #[msg("The refund window has closed")]
    RefundWindowClosed,

    #[msg("Nothing to refund")]
    NothingToRefund,

    #[msg("Refund would exceed the original investment")]
    RefundExceedsInvestment,

    #[msg("The funding window has not ended yet")]
    FundingNotEnded,

    #[msg("Unsold tokens were already withdrawn")]
    UnsoldAlreadyWithdrawn,

    #[msg("Nothing new has accrued to withdraw")]
    NothingToWithdraw,

    #[msg("Requested amount exceeds the withdrawable balance")]
    WithdrawExceedsAvailable,

    #[msg("Operation is already in progress")]
    ReentrancyGuard,

    #[msg("Numerical overflow")]
    MathOverflow,
}
