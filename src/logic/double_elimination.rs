//! Double-elimination bracket: winners side, fold-back losers side, and a
//! championship with a reserved reset game.

use crate::logic::ids::MatchIdGenerator;
use crate::logic::seeding::total_rounds;
use crate::logic::single_elimination::build_elimination_rounds;
use crate::logic::validation::ensure_unique;
use crate::models::{BracketError, BracketFormat, BracketMatch, BracketSegment, TeamEntry};

/// Smallest field a double-elimination bracket is built for.
pub const MIN_DOUBLE_ELIMINATION_TEAMS: usize = 4;

/// Build winners, losers and championship matches for `seeding_order`.
///
/// Only the winners side has participants at generation time. Both
/// championship games are always created; whether the reset is played is
/// decided after the first one.
pub fn generate_double_elimination_bracket(
    seeding_order: &[TeamEntry],
    tournament_id: &str,
    ids: &mut dyn MatchIdGenerator,
) -> Result<Vec<BracketMatch>, BracketError> {
    let team_count = seeding_order.len();
    if team_count < MIN_DOUBLE_ELIMINATION_TEAMS {
        return Err(BracketError::NotEnoughTeams {
            format: BracketFormat::DoubleElimination,
            required: MIN_DOUBLE_ELIMINATION_TEAMS,
            actual: team_count,
        });
    }
    ensure_unique(seeding_order.iter().map(|e| e.team.as_str()))?;

    let mut matches = build_elimination_rounds(
        seeding_order,
        tournament_id,
        ids,
        "winners",
        Some(BracketSegment::Winners),
    )?;

    for round in 1..=losers_rounds(team_count) {
        for position in 1..=losers_matches_in_round(round, team_count) {
            matches.push(BracketMatch::placeholder(
                ids.next_id("losers"),
                tournament_id,
                round,
                position,
                Some(BracketSegment::Losers),
            ));
        }
    }

    matches.push(BracketMatch::placeholder(
        ids.next_id("championship"),
        tournament_id,
        1,
        1,
        Some(BracketSegment::Championship),
    ));
    matches.push(BracketMatch::placeholder(
        ids.next_id("championship-reset"),
        tournament_id,
        2,
        1,
        Some(BracketSegment::Championship),
    ));

    Ok(matches)
}

/// Losers-side rounds: `2 * (winners_rounds - 1)`.
pub fn losers_rounds(team_count: usize) -> u32 {
    2 * total_rounds(team_count).saturating_sub(1)
}

/// Matches in losers round `round` (1-based).
///
/// Round 1 takes `floor(n / 4)` matches; later rounds alternate drop-in and
/// survivor rounds, halving every second round.
pub fn losers_matches_in_round(round: u32, team_count: usize) -> u32 {
    let winners_rounds = total_rounds(team_count);
    if round == 1 {
        return (team_count / 4) as u32;
    }
    let halvings = if round % 2 == 0 {
        round / 2
    } else {
        (round + 1) / 2
    };
    let exponent = winners_rounds.saturating_sub(halvings + 1);
    1 << exponent
}
