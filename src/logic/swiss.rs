//! Swiss system: standings with tiebreaks, advancement to elimination, and
//! pairings for the next round.

use crate::logic::ranking::{rank_by_criteria, TieKey};
use crate::logic::validation::ensure_unique;
use crate::models::{
    AdvancementMethod, AdvancementSummary, BracketError, MatchOutcome, PairingMethod,
    PlannedPairing, StageRecord, StageResults, StageScoring, SwissAdvancementCriteria,
    SwissMatchRecord, SwissPairingOptions, SwissPairings, SwissResult, SwissRound,
    SwissTeamRecord, SwissTiebreaker, TeamEntry, TeamId, TeamStageResult,
};
use chrono::Utc;
use std::collections::HashMap;

/// Records for `teams` after every complete round, in the default Swiss
/// order (points, Buchholz, game points, strength of schedule, name).
///
/// Pairings without a result are ignored; pairings naming a team outside
/// `teams` are rejected.
pub fn calculate_swiss_standings(
    rounds: &[SwissRound],
    teams: &[TeamId],
) -> Result<Vec<SwissTeamRecord>, BracketError> {
    ensure_unique(teams.iter().map(String::as_str))?;
    let index: HashMap<&str, usize> = teams
        .iter()
        .enumerate()
        .map(|(i, t)| (t.as_str(), i))
        .collect();
    let mut records: Vec<SwissTeamRecord> = teams.iter().map(SwissTeamRecord::new).collect();

    for round in rounds.iter().filter(|r| r.is_complete) {
        for pairing in &round.pairings {
            let Some(result) = pairing.result else {
                continue;
            };
            let i1 = *index
                .get(pairing.team1.as_str())
                .ok_or_else(|| BracketError::UnknownTeam(pairing.team1.clone()))?;
            let i2 = *index
                .get(pairing.team2.as_str())
                .ok_or_else(|| BracketError::UnknownTeam(pairing.team2.clone()))?;
            let (o1, o2) = match result {
                SwissResult::Team1Wins => (MatchOutcome::Win, MatchOutcome::Loss),
                SwissResult::Team2Wins => (MatchOutcome::Loss, MatchOutcome::Win),
                SwissResult::Draw => (MatchOutcome::Draw, MatchOutcome::Draw),
                SwissResult::DoubleForfeit => (MatchOutcome::Loss, MatchOutcome::Loss),
            };
            let (s1, s2) = (
                pairing.actual_score1.unwrap_or(0),
                pairing.actual_score2.unwrap_or(0),
            );
            record_match(&mut records[i1], round.round_number, &pairing.team2, o1, s1, s2);
            record_match(&mut records[i2], round.round_number, &pairing.team1, o2, s2, s1);
        }
    }

    let points: HashMap<TeamId, (f64, u32, u32)> = records
        .iter()
        .map(|r| (r.team.clone(), (r.tournament_points, r.wins, r.games_played())))
        .collect();
    for record in &mut records {
        apply_tiebreak_values(record, &points);
    }

    Ok(rank_swiss_standings(records, &[SwissTiebreaker::Buchholz]))
}

fn record_match(
    record: &mut SwissTeamRecord,
    round: u32,
    opponent: &str,
    outcome: MatchOutcome,
    scored: u32,
    conceded: u32,
) {
    match outcome {
        MatchOutcome::Win => record.wins += 1,
        MatchOutcome::Loss => record.losses += 1,
        MatchOutcome::Draw => record.draws += 1,
    }
    record.tournament_points += outcome.points();
    record.game_points += scored;
    record.match_history.push(SwissMatchRecord {
        round,
        opponent: opponent.to_string(),
        result: outcome,
        game_points: scored,
        opponent_points: conceded,
    });
}

/// Buchholz, Sonneborn-Berger, cumulative score, strength of schedule and
/// performance from the final (points, wins, games) of every team.
fn apply_tiebreak_values(record: &mut SwissTeamRecord, table: &HashMap<TeamId, (f64, u32, u32)>) {
    let mut buchholz = 0.0;
    let mut sonneborn_berger = 0.0;
    let mut running = 0.0;
    let mut cumulative = 0.0;
    let mut opponent_rates = Vec::with_capacity(record.match_history.len());

    for m in &record.match_history {
        let (opp_points, opp_wins, opp_games) =
            table.get(&m.opponent).copied().unwrap_or((0.0, 0, 0));
        buchholz += opp_points;
        sonneborn_berger += m.result.points() * opp_points;
        running += m.result.points();
        cumulative += running;
        opponent_rates.push(if opp_games > 0 {
            f64::from(opp_wins) / f64::from(opp_games)
        } else {
            0.0
        });
    }

    record.opponent_points = buchholz;
    record.sonneborn_berger = sonneborn_berger;
    record.cumulative = cumulative;
    record.strength_of_schedule = if opponent_rates.is_empty() {
        0.0
    } else {
        opponent_rates.iter().sum::<f64>() / opponent_rates.len() as f64
    };
    record.performance =
        1000.0 + record.tournament_points * 100.0 + record.strength_of_schedule * 200.0;
}

#[derive(Clone, Copy)]
enum SwissCriterion {
    Points,
    Rule(SwissTiebreaker),
    GamePoints,
    StrengthOfSchedule,
}

/// Rank Swiss records: points, then `tiebreakers` in order, then game
/// points, strength of schedule and team name.
pub fn rank_swiss_standings(
    records: Vec<SwissTeamRecord>,
    tiebreakers: &[SwissTiebreaker],
) -> Vec<SwissTeamRecord> {
    let criteria: Vec<SwissCriterion> = std::iter::once(SwissCriterion::Points)
        .chain(tiebreakers.iter().map(|t| SwissCriterion::Rule(*t)))
        .chain([SwissCriterion::GamePoints, SwissCriterion::StrengthOfSchedule])
        .collect();
    rank_by_criteria(records, &criteria, &swiss_key, &|r| r.team.as_str())
}

fn swiss_key(r: &SwissTeamRecord, group: &[SwissTeamRecord], criterion: SwissCriterion) -> TieKey {
    match criterion {
        SwissCriterion::Points => [r.tournament_points, 0.0],
        SwissCriterion::GamePoints => [f64::from(r.game_points), 0.0],
        SwissCriterion::StrengthOfSchedule => [r.strength_of_schedule, 0.0],
        SwissCriterion::Rule(SwissTiebreaker::Buchholz) => [r.opponent_points, 0.0],
        SwissCriterion::Rule(SwissTiebreaker::SonnebornBerger) => [r.sonneborn_berger, 0.0],
        SwissCriterion::Rule(SwissTiebreaker::Cumulative) => [r.cumulative, 0.0],
        SwissCriterion::Rule(SwissTiebreaker::DirectEncounter) => {
            let score: f64 = r
                .match_history
                .iter()
                .filter(|m| group.iter().any(|g| g.team == m.opponent))
                .map(|m| m.result.points() - 0.5)
                .sum();
            [score, 0.0]
        }
    }
}

/// Close a Swiss stage: rank, apply the advancement criteria and seed the
/// qualifiers for the elimination bracket.
///
/// Teams must meet every threshold given; the best `total_teams_advancing`
/// of those qualify, then any of the top `guaranteed_slots` teams still
/// missing are appended.
pub fn execute_swiss_to_elimination(
    rounds: &[SwissRound],
    criteria: &SwissAdvancementCriteria,
    teams: &[TeamId],
) -> Result<(StageResults, Vec<SwissTeamRecord>), BracketError> {
    let standings = rank_swiss_standings(
        calculate_swiss_standings(rounds, teams)?,
        &criteria.tiebreakers,
    );

    let mut qualified: Vec<&SwissTeamRecord> = standings
        .iter()
        .filter(|r| criteria.points_threshold.map_or(true, |t| r.tournament_points >= t))
        .filter(|r| {
            criteria
                .minimum_win_percentage
                .map_or(true, |t| r.win_percentage() >= t)
        })
        .filter(|r| criteria.performance_threshold.map_or(true, |t| r.performance >= t))
        .take(criteria.total_teams_advancing)
        .collect();

    if let Some(guaranteed) = criteria.guaranteed_slots {
        for record in standings.iter().take(guaranteed) {
            if !qualified.iter().any(|q| q.team == record.team) {
                qualified.push(record);
            }
        }
    }

    let next_stage_seeding: Vec<TeamEntry> = qualified
        .iter()
        .enumerate()
        .map(|(i, r)| {
            TeamEntry::new(r.team.clone(), i as u32 + 1).with_justification(format!(
                "Swiss Result: {} pts, {}-{}-{}",
                r.tournament_points, r.wins, r.losses, r.draws
            ))
        })
        .collect();

    log::debug!(
        "Swiss stage closed: {} of {} teams qualify",
        qualified.len(),
        standings.len()
    );

    let guaranteed = criteria.guaranteed_slots.unwrap_or(0);
    let results: Vec<TeamStageResult> = standings
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let seed = qualified
                .iter()
                .position(|q| q.team == r.team)
                .map(|p| p as u32 + 1);
            let method = seed.map(|_| {
                if i < guaranteed {
                    AdvancementMethod::Automatic
                } else {
                    AdvancementMethod::PointsThreshold
                }
            });
            let conceded: u32 = r.match_history.iter().map(|m| m.opponent_points).sum();
            TeamStageResult {
                team: r.team.clone(),
                final_placement: i as u32 + 1,
                record: StageRecord::new(r.wins, r.losses, r.draws),
                scoring: StageScoring::new(
                    r.tournament_points,
                    r.game_points,
                    conceded,
                    r.games_played(),
                ),
                strength_of_schedule: r.strength_of_schedule,
                qualified: seed.is_some(),
                advancement_method: method,
                seed_for_next_stage: seed,
                next_stage_bracket_position: seed,
            }
        })
        .collect();

    let results = StageResults {
        stage_number: 1,
        stage_name: "Swiss Rounds".to_string(),
        stage_type: "swiss-system".to_string(),
        advancement_summary: AdvancementSummary::from_results(
            &results,
            !criteria.tiebreakers.is_empty(),
        ),
        results,
        advancing_teams: qualified.iter().map(|r| r.team.clone()).collect(),
        eliminated_teams: standings
            .iter()
            .filter(|r| !qualified.iter().any(|q| q.team == r.team))
            .map(|r| r.team.clone())
            .collect(),
        next_stage_seeding,
        completed_at: Utc::now(),
    };
    Ok((results, standings))
}

/// Pair the next Swiss round from current standings.
///
/// Accelerated pairing (rounds 1 and 2 only) sorts by performance and pairs
/// the top half against the bottom half. Otherwise teams are walked in
/// standings order and each meets the next unpaired team it has not played;
/// a rematch is only allowed when no fresh opponent is left. The odd team
/// out gets the bye.
pub fn generate_swiss_pairings(
    standings: &[SwissTeamRecord],
    round_number: u32,
    options: &SwissPairingOptions,
) -> SwissPairings {
    if options.pairing_method == PairingMethod::Accelerated && round_number <= 2 {
        return accelerated_pairings(standings, options.avoid_rematches);
    }

    let ordered = rank_swiss_standings(standings.to_vec(), &[SwissTiebreaker::Buchholz]);
    let mut paired = vec![false; ordered.len()];
    let mut pairings = Vec::with_capacity(ordered.len() / 2);
    let mut bye = None;

    for i in 0..ordered.len() {
        if paired[i] {
            continue;
        }
        let open: Vec<usize> = (i + 1..ordered.len()).filter(|&j| !paired[j]).collect();
        let fresh = open
            .iter()
            .copied()
            .find(|&j| !options.avoid_rematches || !ordered[i].has_played(&ordered[j].team));
        match fresh.or_else(|| open.first().copied()) {
            Some(j) => {
                paired[i] = true;
                paired[j] = true;
                pairings.push(PlannedPairing {
                    team1: ordered[i].team.clone(),
                    team2: ordered[j].team.clone(),
                    table_number: pairings.len() as u32 + 1,
                });
            }
            None => {
                paired[i] = true;
                bye = Some(ordered[i].team.clone());
            }
        }
    }

    SwissPairings { pairings, bye }
}

/// Top half by performance meets the bottom half, table by table. With
/// `avoid_rematches` a top team skips bottom-half opponents it has already
/// met while a fresh one is left.
fn accelerated_pairings(standings: &[SwissTeamRecord], avoid_rematches: bool) -> SwissPairings {
    let mut sorted: Vec<&SwissTeamRecord> = standings.iter().collect();
    sorted.sort_by(|a, b| {
        b.performance
            .total_cmp(&a.performance)
            .then_with(|| a.team.cmp(&b.team))
    });
    let mid = sorted.len() / 2;
    let (top, bottom) = (&sorted[..mid], &sorted[mid..2 * mid]);
    let mut taken = vec![false; mid];
    let mut pairings = Vec::with_capacity(mid);

    for (i, team) in top.iter().enumerate() {
        let open: Vec<usize> = (i..mid).chain(0..i).filter(|&j| !taken[j]).collect();
        let partner = open
            .iter()
            .copied()
            .find(|&j| !avoid_rematches || !team.has_played(&bottom[j].team))
            .or_else(|| open.first().copied());
        let Some(j) = partner else {
            break;
        };
        taken[j] = true;
        pairings.push(PlannedPairing {
            team1: team.team.clone(),
            team2: bottom[j].team.clone(),
            table_number: i as u32 + 1,
        });
    }

    let bye = if sorted.len() % 2 == 1 {
        sorted.last().map(|r| r.team.clone())
    } else {
        None
    };
    SwissPairings { pairings, bye }
}
