// programs/helios_launchpad/src/state.rs

use anchor_lang::prelude::*;

/// Global launchpad configuration
/// PDA seeds: ["global_config"]
#[account]
#[derive(InitSpace)]
pub struct GlobalConfig {
    /// Authority that can create and configure campaigns
    pub authority: Pubkey,

    /// Role allowed to withdraw from the four reserve pools
    pub operator: Pubkey,

    /// Role allowed to mutate the participant allow-list
    pub verifier: Pubkey,

    /// Number of campaigns created (next campaign id)
    pub campaign_count: u64,

    /// Bump seed
    pub bump: u8,

    /// Reserved space for future upgrades
    #[max_len(64)]
    pub reserved: Vec<u8>,
}

impl GlobalConfig {
    pub const SEED_PREFIX: &'static [u8] = b"global_config";
}

/// Sale phase, resolved from allocation progress
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum SalePhase {
    /// First third of the supply cap
    Phase1,
    /// Second third
    Phase2,
    /// Final third
    Phase3,
}

impl Default for SalePhase {
    fn default() -> Self {
        SalePhase::Phase1
    }
}

/// Funding window and vesting-unlock schedule. Admin-mutable at any time.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct CampaignSchedule {
    /// Funding window start
    pub funding_start: i64,

    /// Funding window end (investments accepted through this timestamp)
    pub funding_end: i64,

    /// Earliest time claims are accepted
    pub claim_start: i64,

    /// Token generation event; vesting starts here (0 = unset)
    pub tge_at: i64,

    /// Delay after TGE where only the TGE unlock percent is available
    pub cliff_duration: i64,

    /// Length of the step-vesting window after the cliff
    pub vesting_duration: i64,

    /// Step size of the vesting unlock
    pub unlock_interval: i64,

    /// TWAP observation window after TGE, in hours
    pub twap_window_hours: u32,

    /// Refund grace period after vesting fully ends
    pub post_vesting_grace: i64,

    /// Fraction unlocked immediately at TGE (PERCENT_ONE units)
    pub tge_unlock_percent: u64,
}

impl CampaignSchedule {
    pub fn tge_set(&self) -> bool {
        self.tge_at != 0
    }

    pub fn tge_reached(&self, now: i64) -> bool {
        self.tge_set() && now >= self.tge_at
    }

    pub fn cliff_end(&self) -> i64 {
        self.tge_at.saturating_add(self.cliff_duration)
    }

    /// End of the penalty-free refund window: TWAP observation plus grace.
    pub fn twap_refund_deadline(&self, grace_window: i64) -> i64 {
        self.tge_at
            .saturating_add(self.twap_window_hours as i64 * 3_600)
            .saturating_add(grace_window)
    }
}

/// Which refund shapes are allowed in which lifecycle stage.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct RefundPolicy {
    /// Full refund allowed before the TGE
    pub allow_full_before_tge: bool,

    /// Full refund allowed during the cliff
    pub allow_full_in_cliff: bool,

    /// Partial refund allowed during the cliff
    pub allow_partial_in_cliff: bool,

    /// Full refund allowed during vesting
    pub allow_full_in_vesting: bool,

    /// Partial refund allowed during vesting
    pub allow_partial_in_vesting: bool,

    /// Full refund allowed after vesting ends (within the grace period)
    pub allow_full_after_vesting: bool,

    /// Partial refund allowed after vesting ends (within the grace period)
    pub allow_partial_after_vesting: bool,

    /// Participants who claimed at least once cannot refund.
    /// Evaluated only in the past-cliff branch of the eligibility precedence.
    pub block_after_claim: bool,

    /// Penalty-free TWAP refund window is active
    pub twap_window_enabled: bool,

    /// Grace duration after the TWAP observation window, in seconds
    pub grace_window: i64,
}

/// Refund counters and penalty rates. Counters mutated only by the refund engine.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct RefundInfo {
    /// Cumulative refunded base tokens (unit scale)
    pub refunded_base: u128,

    /// Cumulative clawed-back bonus tokens (unit scale)
    pub refunded_bonus: u128,

    /// Cumulative refunded USD value (unit scale)
    pub refunded_usd: u128,

    /// Penalty on a full refund before the TGE (PERCENT_ONE units)
    pub penalty_before_tge: u64,

    /// Penalty on a full refund after the TGE
    pub penalty_after_tge: u64,

    /// Flat penalty on a partial refund
    pub penalty_partial: u64,

    /// Stage/shape policy flags
    pub policy: RefundPolicy,
}

/// Sale pricing, all USD prices at 8 fractional digits.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct CampaignPricing {
    /// Initial sale price, USD per token
    pub initial_price: u64,

    /// Threshold price at or below which the operator treats the sale as underwater
    pub threshold_price: u64,

    /// Last observed time-weighted price (0 = unset)
    pub twap_price: u64,
}

/// One configured sale/vesting campaign
/// PDA seeds: ["campaign", campaign_id]
#[account]
#[derive(InitSpace)]
pub struct Campaign {
    /// Sequential campaign id
    pub campaign_id: u64,

    /// Distributed asset mint (default = unset; settable once, before claims)
    pub sale_token_mint: Pubkey,

    /// Vault holding the distributed asset custody
    pub sale_token_vault: Pubkey,

    /// Decimals of the distributed asset mint
    pub sale_token_decimals: u8,

    /// Minimum ticket in USD (unit scale)
    pub min_ticket_usd: u128,

    /// Per-participant allocation cap in tokens (unit scale)
    pub participant_cap_tokens: u128,

    /// Total supply cap in tokens (unit scale)
    pub total_allocation: u128,

    /// Tokens allocated so far (unit scale); only grows
    pub total_allocated: u128,

    /// Number of distinct participants
    pub participant_count: u64,

    /// USD raised so far (unit scale); only grows
    pub raised_usd: u128,

    /// Phase 1 bonus rate (PERCENT_ONE units)
    pub phase1_bonus: u64,

    /// Phase 2 bonus rate
    pub phase2_bonus: u64,

    /// Phase 3 bonus rate
    pub phase3_bonus: u64,

    /// Aggregate tokens claimed across all participants (unit scale)
    pub total_claimed_tokens: u128,

    /// Single-shot unsold-token withdrawal performed
    pub unsold_withdrawn: bool,

    /// Amount taken by the unsold-token withdrawal (unit scale)
    pub unsold_withdrawn_amount: u128,

    /// Refunded tokens swept back by the operator so far (unit scale)
    pub refunded_tokens_withdrawn: u128,

    /// Reentrancy lock; every mutating operation is a critical section
    pub locked: bool,

    /// Funding window and vesting schedule
    pub schedule: CampaignSchedule,

    /// Refund counters, penalty rates and policy
    pub refund: RefundInfo,

    /// Sale pricing
    pub pricing: CampaignPricing,

    /// Bump seed
    pub bump: u8,
}

impl Campaign {
    pub const SEED_PREFIX: &'static [u8] = b"campaign";

    pub fn sale_token_configured(&self) -> bool {
        self.sale_token_mint != Pubkey::default()
    }

    pub fn is_sold_out(&self) -> bool {
        self.total_allocated >= self.total_allocation
    }

    /// Phase thresholds are integer thirds of the supply cap. Resolution uses
    /// the allocation BEFORE the current order is added: an order straddling a
    /// boundary is priced entirely at its starting phase.
    pub fn current_phase(&self) -> SalePhase {
        let third = self.total_allocation / 3;
        if self.total_allocated < third {
            SalePhase::Phase1
        } else if self.total_allocated < third.saturating_mul(2) {
            SalePhase::Phase2
        } else {
            SalePhase::Phase3
        }
    }

    pub fn bonus_rate(&self, phase: SalePhase) -> u64 {
        match phase {
            SalePhase::Phase1 => self.phase1_bonus,
            SalePhase::Phase2 => self.phase2_bonus,
            SalePhase::Phase3 => self.phase3_bonus,
        }
    }

    /// Supply headroom net of everything refunded since (campaign-wide).
    pub fn net_outstanding(&self) -> u128 {
        self.total_allocated
            .saturating_sub(self.refund.refunded_base)
            .saturating_sub(self.refund.refunded_bonus)
    }
}

/// Per campaign x payment-asset configuration and counters
/// PDA seeds: ["payment_asset", campaign, mint]
#[account]
#[derive(InitSpace)]
pub struct PaymentAssetConfig {
    /// Campaign this asset is registered for
    pub campaign: Pubkey,

    /// Payment asset mint
    pub mint: Pubkey,

    /// Mint decimals, recorded at registration
    pub decimals: u8,

    /// Static USD price per whole asset, 8 fractional digits, admin-set
    pub usd_price: u64,

    /// Custody vault for this asset
    pub vault: Pubkey,

    /// Asset accepted for new investments
    pub is_accepted: bool,

    /// Raised in this asset (native units); only grows
    pub raised: u64,

    /// Refunded out of this asset, gross of penalty (native units)
    pub refunded: u64,

    /// Raised funds withdrawn by the operator (native units)
    pub stable_withdrawn: u64,

    /// Penalty fees collected in this asset (native units)
    pub penalty_collected: u64,

    /// Penalty fees withdrawn by the operator (native units)
    pub penalty_withdrawn: u64,

    /// Bump seed
    pub bump: u8,
}

impl PaymentAssetConfig {
    pub const SEED_PREFIX: &'static [u8] = b"payment_asset";
}

/// Per campaign x participant record. Created on first investment;
/// fields only grow; never deleted.
/// PDA seeds: ["position", campaign, investor]
#[account]
#[derive(InitSpace)]
pub struct InvestorPosition {
    /// Participant wallet
    pub investor: Pubkey,

    /// Campaign this position belongs to
    pub campaign: Pubkey,

    /// Cumulative USD invested (unit scale)
    pub usd_invested: u128,

    /// The single payment asset used, fixed at first investment
    pub payment_mint: Pubkey,

    /// Raw invested amount in the payment asset (native units)
    pub invested_amount: u64,

    /// Raw refunded amount in the payment asset, gross of penalty (native units)
    pub refunded_amount: u64,

    /// Allocated base tokens (unit scale)
    pub allocated_base: u128,

    /// Allocated bonus tokens (unit scale)
    pub allocated_bonus: u128,

    /// Claimed base tokens (unit scale)
    pub claimed_base: u128,

    /// Claimed bonus tokens (unit scale)
    pub claimed_bonus: u128,

    /// Refunded base tokens (unit scale)
    pub refunded_base: u128,

    /// Clawed-back bonus tokens (unit scale)
    pub refunded_bonus: u128,

    /// Claimed at least once
    pub has_claimed: bool,

    /// Phase the investment was priced at
    pub phase: SalePhase,

    /// Investment timestamp (0 = no investment yet)
    pub invested_at: i64,

    /// Bump seed
    pub bump: u8,
}

impl InvestorPosition {
    pub const SEED_PREFIX: &'static [u8] = b"position";

    pub fn allocated_total(&self) -> u128 {
        self.allocated_base.saturating_add(self.allocated_bonus)
    }

    pub fn claimed_total(&self) -> u128 {
        self.claimed_base.saturating_add(self.claimed_bonus)
    }

    pub fn refunded_total(&self) -> u128 {
        self.refunded_base.saturating_add(self.refunded_bonus)
    }
}

/// Allow-list entry consumed by investment admission only
/// PDA seeds: ["verified", investor]
#[account]
#[derive(InitSpace)]
pub struct VerificationRecord {
    /// Participant wallet
    pub investor: Pubkey,

    /// Allow-list flag
    pub verified: bool,

    /// Last mutation timestamp
    pub verified_at: i64,

    /// Bump seed
    pub bump: u8,
}

impl VerificationRecord {
    pub const SEED_PREFIX: &'static [u8] = b"verified";
}

// ==================== UNIT TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_campaign(total_allocation: u128, total_allocated: u128) -> Campaign {
        Campaign {
            campaign_id: 1,
            sale_token_mint: Pubkey::default(),
            sale_token_vault: Pubkey::default(),
            sale_token_decimals: 9,
            min_ticket_usd: 0,
            participant_cap_tokens: total_allocation,
            total_allocation,
            total_allocated,
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
            schedule: CampaignSchedule::default(),
            refund: RefundInfo::default(),
            pricing: CampaignPricing::default(),
            bump: 255,
        }
    }

    #[test]
    fn test_seed_prefixes() {
        assert_eq!(GlobalConfig::SEED_PREFIX, b"global_config");
        assert_eq!(Campaign::SEED_PREFIX, b"campaign");
        assert_eq!(PaymentAssetConfig::SEED_PREFIX, b"payment_asset");
        assert_eq!(InvestorPosition::SEED_PREFIX, b"position");
        assert_eq!(VerificationRecord::SEED_PREFIX, b"verified");
    }

    #[test]
    fn test_phase_thirds() {
        let c = test_campaign(900, 0);
        assert_eq!(c.current_phase(), SalePhase::Phase1);

        let c = test_campaign(900, 299);
        assert_eq!(c.current_phase(), SalePhase::Phase1);

        let c = test_campaign(900, 300);
        assert_eq!(c.current_phase(), SalePhase::Phase2);

        let c = test_campaign(900, 599);
        assert_eq!(c.current_phase(), SalePhase::Phase2);

        let c = test_campaign(900, 600);
        assert_eq!(c.current_phase(), SalePhase::Phase3);
    }

    #[test]
    fn test_phase_boundary_order_priced_at_starting_phase() {
        // An order large enough to cross into Phase2 still resolves Phase1
        // because resolution reads the allocation before the order is added.
        let c = test_campaign(900, 299);
        let phase = c.current_phase();
        assert_eq!(phase, SalePhase::Phase1);
        assert_eq!(c.bonus_rate(phase), 2_000_000);

        // Only after the allocation is committed does the next order see Phase2
        let after = test_campaign(900, 450);
        assert_eq!(after.current_phase(), SalePhase::Phase2);
    }

    #[test]
    fn test_phase_uneven_thirds_floor() {
        // 1000 / 3 floors to 333
        let c = test_campaign(1_000, 332);
        assert_eq!(c.current_phase(), SalePhase::Phase1);
        let c = test_campaign(1_000, 333);
        assert_eq!(c.current_phase(), SalePhase::Phase2);
        let c = test_campaign(1_000, 665);
        assert_eq!(c.current_phase(), SalePhase::Phase2);
        let c = test_campaign(1_000, 666);
        assert_eq!(c.current_phase(), SalePhase::Phase3);
    }

    #[test]
    fn test_sold_out() {
        assert!(!test_campaign(900, 899).is_sold_out());
        assert!(test_campaign(900, 900).is_sold_out());
    }

    #[test]
    fn test_sale_token_configured() {
        let mut c = test_campaign(900, 0);
        assert!(!c.sale_token_configured());
        c.sale_token_mint = Pubkey::new_unique();
        assert!(c.sale_token_configured());
    }

    #[test]
    fn test_net_outstanding_clamps() {
        let mut c = test_campaign(900, 100);
        c.refund.refunded_base = 80;
        c.refund.refunded_bonus = 30;
        assert_eq!(c.net_outstanding(), 0);
        c.refund.refunded_bonus = 10;
        assert_eq!(c.net_outstanding(), 10);
    }

    #[test]
    fn test_schedule_predicates() {
        let mut s = CampaignSchedule::default();
        assert!(!s.tge_set());
        assert!(!s.tge_reached(i64::MAX));

        s.tge_at = 1_000;
        s.cliff_duration = 500;
        assert!(s.tge_set());
        assert!(!s.tge_reached(999));
        assert!(s.tge_reached(1_000));
        assert_eq!(s.cliff_end(), 1_500);
    }

    #[test]
    fn test_twap_refund_deadline() {
        let mut s = CampaignSchedule::default();
        s.tge_at = 1_000;
        s.twap_window_hours = 2;
        assert_eq!(s.twap_refund_deadline(600), 1_000 + 7_200 + 600);
    }

    #[test]
    fn test_position_totals() {
        let position = InvestorPosition {
            investor: Pubkey::default(),
            campaign: Pubkey::default(),
            usd_invested: 0,
            payment_mint: Pubkey::default(),
            invested_amount: 0,
            refunded_amount: 0,
            allocated_base: 1_000,
            allocated_bonus: 200,
            claimed_base: 300,
            claimed_bonus: 60,
            refunded_base: 100,
            refunded_bonus: 20,
            has_claimed: true,
            phase: SalePhase::Phase1,
            invested_at: 1,
            bump: 255,
        };
        assert_eq!(position.allocated_total(), 1_200);
        assert_eq!(position.claimed_total(), 360);
        assert_eq!(position.refunded_total(), 120);
        // claimed + refunded never exceeds allocated
        assert!(position.claimed_total() + position.refunded_total() <= position.allocated_total());
    }

    #[test]
    fn test_default_policy_denies_everything() {
        let policy = RefundPolicy::default();
        assert!(!policy.allow_full_before_tge);
        assert!(!policy.allow_full_in_cliff);
        assert!(!policy.allow_partial_in_cliff);
        assert!(!policy.allow_full_in_vesting);
        assert!(!policy.allow_partial_in_vesting);
        assert!(!policy.allow_full_after_vesting);
        assert!(!policy.allow_partial_after_vesting);
        assert!(!policy.twap_window_enabled);
    }
}
