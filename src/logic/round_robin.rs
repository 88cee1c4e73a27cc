//! Round robin among advancing teams: every unordered pair exactly once.

use crate::logic::ids::MatchIdGenerator;
use crate::logic::validation::ensure_unique;
use crate::models::{BracketError, BracketFormat, BracketMatch, MatchStatus, TeamId};

/// All `n * (n - 1) / 2` pairings, in round 1, positions numbered in order.
/// Scheduling into time slots is left to the caller.
pub fn generate_round_robin_matches(
    teams: &[TeamId],
    tournament_id: &str,
    ids: &mut dyn MatchIdGenerator,
) -> Result<Vec<BracketMatch>, BracketError> {
    if teams.len() < 2 {
        return Err(BracketError::NotEnoughTeams {
            format: BracketFormat::RoundRobin,
            required: 2,
            actual: teams.len(),
        });
    }
    ensure_unique(teams.iter().map(String::as_str))?;

    let mut matches = Vec::with_capacity(teams.len() * (teams.len() - 1) / 2);
    for (i, team1) in teams.iter().enumerate() {
        for team2 in &teams[i + 1..] {
            let position = matches.len() as u32 + 1;
            matches.push(BracketMatch {
                id: ids.next_id("rr"),
                tournament_id: tournament_id.to_string(),
                round: 1,
                position,
                team1: Some(team1.clone()),
                team2: Some(team2.clone()),
                team1_score: 0,
                team2_score: 0,
                winner: None,
                status: MatchStatus::Upcoming,
                bracket: None,
                seed_info: None,
            });
        }
    }
    Ok(matches)
}
