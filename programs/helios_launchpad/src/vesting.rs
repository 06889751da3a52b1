// programs/helios_launchpad/src/vesting.rs
//
// Vesting Clock
// =============
// Pure function of a campaign schedule and a timestamp. Unlocking is a step
// function over fixed intervals, never a continuous ramp: the TGE percent is
// available through the cliff, then completed intervals release equal slices
// of the remainder, and the full allocation is unlocked at cliff + vesting
// duration regardless of interval divisibility.

use crate::math::PERCENT_ONE;
use crate::state::CampaignSchedule;

/// Unlocked fraction of an allocation in PERCENT_ONE units at `now`.
pub fn unlocked_fraction(schedule: &CampaignSchedule, now: i64) -> u64 {
    if schedule.tge_at == 0 || now < schedule.tge_at {
        return 0;
    }

    let tge_percent = schedule.tge_unlock_percent.min(PERCENT_ONE);
    let cliff_end = schedule.tge_at.saturating_add(schedule.cliff_duration);
    if now < cliff_end {
        return tge_percent;
    }

    let vesting_end = cliff_end.saturating_add(schedule.vesting_duration);
    if now >= vesting_end {
        return PERCENT_ONE;
    }

    // Inside the vesting window; interval validated > 0 at configuration
    if schedule.unlock_interval <= 0 {
        return tge_percent;
    }

    let completed = ((now - cliff_end) / schedule.unlock_interval) as u128;
    let total = ((schedule.vesting_duration + schedule.unlock_interval - 1)
        / schedule.unlock_interval) as u128;
    if total == 0 {
        return PERCENT_ONE;
    }

    let remainder = (PERCENT_ONE - tge_percent) as u128;
    let stepped = completed * remainder / total;
    ((tge_percent as u128) + stepped).min(PERCENT_ONE as u128) as u64
}

/// End of the vesting window (cliff + vesting duration past TGE).
pub fn vesting_end(schedule: &CampaignSchedule) -> i64 {
    schedule
        .tge_at
        .saturating_add(schedule.cliff_duration)
        .saturating_add(schedule.vesting_duration)
}

// ==================== UNIT TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;

    fn schedule(tge_at: i64, cliff: i64, vesting: i64, interval: i64, tge_pct: u64) -> CampaignSchedule {
        CampaignSchedule {
            funding_start: 0,
            funding_end: tge_at,
            claim_start: tge_at,
            tge_at,
            cliff_duration: cliff,
            vesting_duration: vesting,
            unlock_interval: interval,
            twap_window_hours: 72,
            post_vesting_grace: 30 * DAY,
            tge_unlock_percent: tge_pct,
        }
    }

    #[test]
    fn test_zero_before_tge() {
        let s = schedule(1_000_000, 10 * DAY, 100 * DAY, DAY, 1_000_000);
        assert_eq!(unlocked_fraction(&s, 0), 0);
        assert_eq!(unlocked_fraction(&s, 999_999), 0);
    }

    #[test]
    fn test_zero_when_tge_unset() {
        let mut s = schedule(1_000_000, 10 * DAY, 100 * DAY, DAY, 1_000_000);
        s.tge_at = 0;
        assert_eq!(unlocked_fraction(&s, i64::MAX), 0);
    }

    #[test]
    fn test_tge_percent_inside_cliff() {
        // 10% at TGE
        let s = schedule(1_000_000, 10 * DAY, 100 * DAY, DAY, 1_000_000);
        assert_eq!(unlocked_fraction(&s, 1_000_000), 1_000_000);
        assert_eq!(unlocked_fraction(&s, 1_000_000 + 10 * DAY - 1), 1_000_000);
    }

    #[test]
    fn test_full_unlock_at_and_after_vesting_end() {
        let s = schedule(1_000_000, 10 * DAY, 100 * DAY, DAY, 1_000_000);
        let end = 1_000_000 + 110 * DAY;
        assert_eq!(unlocked_fraction(&s, end), PERCENT_ONE);
        assert_eq!(unlocked_fraction(&s, end + 365 * DAY), PERCENT_ONE);
    }

    #[test]
    fn test_full_unlock_with_non_divisible_interval() {
        // 100-day vesting stepped in 30-day intervals: ceil(100/30) = 4 steps
        let s = schedule(1_000_000, 0, 100 * DAY, 30 * DAY, 0);
        assert_eq!(unlocked_fraction(&s, 1_000_000 + 100 * DAY), PERCENT_ONE);
        // 3 completed intervals of 4 -> 75%
        assert_eq!(
            unlocked_fraction(&s, 1_000_000 + 99 * DAY),
            3 * PERCENT_ONE / 4
        );
    }

    #[test]
    fn test_step_function_jumps_once_per_interval() {
        // no cliff, no TGE unlock, 100 days in 10-day steps
        let s = schedule(1_000_000, 0, 100 * DAY, 10 * DAY, 0);
        let start = 1_000_000;
        // first interval not complete
        assert_eq!(unlocked_fraction(&s, start), 0);
        assert_eq!(unlocked_fraction(&s, start + 10 * DAY - 1), 0);
        // one completed interval -> 10%
        assert_eq!(unlocked_fraction(&s, start + 10 * DAY), PERCENT_ONE / 10);
        // flat until the next step
        assert_eq!(unlocked_fraction(&s, start + 15 * DAY), PERCENT_ONE / 10);
        assert_eq!(unlocked_fraction(&s, start + 20 * DAY), PERCENT_ONE / 5);
    }

    #[test]
    fn test_tge_percent_plus_steps() {
        // 10% TGE unlock, 90-day vesting in 30-day steps of the remaining 90%
        let s = schedule(1_000_000, 0, 90 * DAY, 30 * DAY, 1_000_000);
        let start = 1_000_000;
        assert_eq!(unlocked_fraction(&s, start), 1_000_000);
        // 1/3 of 90% = 30% -> 40% total
        assert_eq!(unlocked_fraction(&s, start + 30 * DAY), 4_000_000);
        assert_eq!(unlocked_fraction(&s, start + 60 * DAY), 7_000_000);
        assert_eq!(unlocked_fraction(&s, start + 90 * DAY), PERCENT_ONE);
    }

    #[test]
    fn test_monotonically_non_decreasing() {
        let s = schedule(1_000_000, 7 * DAY, 100 * DAY, 9 * DAY, 500_000);
        let mut last = 0u64;
        let mut t = 0i64;
        while t < 1_000_000 + 130 * DAY {
            let f = unlocked_fraction(&s, t);
            assert!(f >= last, "fraction decreased at t={}", t);
            last = f;
            t += DAY / 2;
        }
        assert_eq!(last, PERCENT_ONE);
    }

    #[test]
    fn test_idempotent_at_fixed_timestamp() {
        let s = schedule(1_000_000, 7 * DAY, 100 * DAY, 9 * DAY, 500_000);
        let t = 1_000_000 + 40 * DAY;
        let first = unlocked_fraction(&s, t);
        assert_eq!(unlocked_fraction(&s, t), first);
        assert_eq!(unlocked_fraction(&s, t), first);
    }

    #[test]
    fn test_vesting_end() {
        let s = schedule(1_000_000, 10 * DAY, 100 * DAY, DAY, 0);
        assert_eq!(vesting_end(&s), 1_000_000 + 110 * DAY);
    }
}
