use crate::constants::BPS_DENOMINATOR;

/// Splits a resolved pool into `(fee_amount, distributable_amount)`.
///
/// The fee truncates toward zero, so `fee + distributable == total_pool` always holds.
pub fn split_fee(total_pool: u64, fee_bps: u16) -> Option<(u64, u64)> {
    let fee = (total_pool as u128)
        .checked_mul(fee_bps as u128)?
        .checked_div(BPS_DENOMINATOR as u128)?;
    let fee = u64::try_from(fee).ok()?;
    let distributable = total_pool.checked_sub(fee)?;
    Some((fee, distributable))
}

/// `floor(stake * distributable / winning_pool)` with a u128 intermediate.
///
/// Returns `None` for an empty winning pool or a result that does not fit in u64.
pub fn pro_rata_payout(stake: u64, distributable: u64, winning_pool: u64) -> Option<u64> {
    if winning_pool == 0 {
        return None;
    }
    let payout = (stake as u128)
        .checked_mul(distributable as u128)?
        .checked_div(winning_pool as u128)?;
    u64::try_from(payout).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_split_on_round_pool() {
        assert_eq!(split_fee(1000, 200), Some((20, 980)));
        assert_eq!(split_fee(1000, 0), Some((0, 1000)));
        assert_eq!(split_fee(1000, 1000), Some((100, 900)));
    }

    #[test]
    fn fee_truncates() {
        // 80 * 200 / 10000 = 1.6
        assert_eq!(split_fee(80, 200), Some((1, 79)));
        assert_eq!(split_fee(49, 200), Some((0, 49)));
    }

    #[test]
    fn payout_matches_reference_scenario() {
        assert_eq!(pro_rata_payout(50, 980, 500), Some(98));
    }

    #[test]
    fn payout_survives_wide_products() {
        let big = u64::MAX / 2;
        assert_eq!(pro_rata_payout(big, big, big), Some(big));
        assert_eq!(split_fee(u64::MAX, 1000).map(|(f, d)| f as u128 + d as u128), Some(u64::MAX as u128));
    }

    #[test]
    fn empty_winning_pool_has_no_payout() {
        assert_eq!(pro_rata_payout(10, 100, 0), None);
    }

    #[test]
    fn payouts_never_exceed_distributable() {
        let stakes = [333u64, 333, 334, 1, 7];
        let winning_pool: u64 = stakes.iter().sum();
        let (_, distributable) = split_fee(winning_pool + 991, 150).unwrap();
        let paid: u64 = stakes
            .iter()
            .map(|s| pro_rata_payout(*s, distributable, winning_pool).unwrap())
            .sum();
        assert!(paid <= distributable);
        // dust is bounded by the number of claimants
        assert!(distributable - paid < stakes.len() as u64);
    }
}
