//! Giving the rest of the match away once the lead is safe.
//!
//! Folding every board costs at most the blinds for each remaining round.
//! When our lead is larger than that worst case, nothing the opponent does
//! can catch up, so the agent stops playing.

use crate::config::{CheckfoldConfig, MatchRules};
use crate::engine::Seat;

/// Most we can lose by folding every board from round `round_num` to the
/// end of the match. Seats alternate each round, so an odd number of
/// rounds left costs one seat's blinds more than the even pairs.
pub fn projected_loss(rules: &MatchRules, config: &CheckfoldConfig, round_num: u32, seat: Seat) -> i64 {
    let left = rules.num_rounds as i64 - round_num as i64;
    if round_num % 2 == 1 {
        (left + 1) * config.cost_per_round
    } else {
        let offset = match seat {
            Seat::BigBlind => config.big_blind_offset,
            Seat::SmallBlind => config.small_blind_offset,
        };
        left * config.cost_per_round + offset
    }
}

/// Whether a lead of `bankroll_lead` is enough to fold out the match.
pub fn lead_is_safe(
    rules: &MatchRules,
    config: &CheckfoldConfig,
    round_num: u32,
    seat: Seat,
    bankroll_lead: i64,
) -> bool {
    bankroll_lead > projected_loss(rules, config, round_num, seat) + config.margin
}
