//! Single-elimination bracket: seeded first round with byes, placeholder later rounds.

use crate::logic::ids::MatchIdGenerator;
use crate::logic::seeding::{bracket_positions, bracket_size, total_rounds};
use crate::logic::validation::ensure_unique;
use crate::models::{
    BracketError, BracketFormat, BracketMatch, BracketSegment, MatchStatus, SeedInfo, TeamEntry,
};

/// Origin shown for a seeded team whose calculator gave no justification.
const DEFAULT_ORIGIN: &str = "Advanced";

/// Build every match of a single-elimination bracket for `seeding_order`
/// (best seed first).
///
/// Produces `bracket_size - 1` matches. A round-1 match with a single team is
/// a walkover: its `winner` is set immediately, status stays `Upcoming`.
pub fn generate_single_elimination_bracket(
    seeding_order: &[TeamEntry],
    tournament_id: &str,
    ids: &mut dyn MatchIdGenerator,
) -> Result<Vec<BracketMatch>, BracketError> {
    if seeding_order.len() < 2 {
        return Err(BracketError::NotEnoughTeams {
            format: BracketFormat::SingleElimination,
            required: 2,
            actual: seeding_order.len(),
        });
    }
    ensure_unique(seeding_order.iter().map(|e| e.team.as_str()))?;
    build_elimination_rounds(seeding_order, tournament_id, ids, "bracket", None)
}

/// Shared by the single-elimination builder and the winners side of double
/// elimination. Callers have already checked the team count.
pub(crate) fn build_elimination_rounds(
    seeding_order: &[TeamEntry],
    tournament_id: &str,
    ids: &mut dyn MatchIdGenerator,
    prefix: &str,
    segment: Option<BracketSegment>,
) -> Result<Vec<BracketMatch>, BracketError> {
    let size = bracket_size(seeding_order.len());
    let rounds = total_rounds(seeding_order.len());
    let slots = bracket_positions(seeding_order, size)?;
    let mut matches = Vec::with_capacity(size - 1);

    for (i, pair) in slots.chunks_exact(2).enumerate() {
        let (top, bottom) = (pair[0], pair[1]);
        if top.is_none() && bottom.is_none() {
            continue;
        }
        let winner = match (top, bottom) {
            (Some(t), None) | (None, Some(t)) => Some(t.team.clone()),
            _ => None,
        };
        matches.push(BracketMatch {
            id: ids.next_id(prefix),
            tournament_id: tournament_id.to_string(),
            round: 1,
            position: i as u32 + 1,
            team1: top.map(|e| e.team.clone()),
            team2: bottom.map(|e| e.team.clone()),
            team1_score: 0,
            team2_score: 0,
            winner,
            status: MatchStatus::Upcoming,
            bracket: segment,
            seed_info: Some(SeedInfo {
                team1_seed: top.map(|e| e.seed),
                team2_seed: bottom.map(|e| e.seed),
                team1_origin: top.map(origin),
                team2_origin: bottom.map(origin),
            }),
        });
    }

    for round in 2..=rounds {
        let in_round = size >> round;
        for position in 1..=in_round {
            matches.push(BracketMatch::placeholder(
                ids.next_id(prefix),
                tournament_id,
                round,
                position as u32,
                segment,
            ));
        }
    }

    Ok(matches)
}

fn origin(entry: &TeamEntry) -> String {
    entry
        .seeding_justification
        .clone()
        .unwrap_or_else(|| DEFAULT_ORIGIN.to_string())
}
