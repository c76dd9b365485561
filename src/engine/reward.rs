use crate::types::Rewards;

/// Derive the coin and gift payout for a finalized challenge.
///
/// Coins are a tenth of the combined score, halves rounding up. A gift is
/// only awarded when Team A strictly beats Team B; ties and B wins pay none.
pub fn compute_rewards(score_a: u32, score_b: u32) -> Rewards {
    let combined = score_a.saturating_add(score_b);
    Rewards {
        coins: combined.saturating_add(5) / 10,
        gifts: u32::from(score_a > score_b),
    }
}
