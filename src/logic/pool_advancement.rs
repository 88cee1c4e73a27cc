//! Pool play: standings, tiebreaks, advancement and cross-pool seeding.

use crate::logic::ranking::{rank_by_criteria, TieKey};
use crate::logic::seeding::mirrored_position;
use crate::models::{
    AdvancementMethod, AdvancementPolicy, AdvancementResult, AdvancementSummary, AdvancementType,
    Pool, PoolMatch, StageRecord, StageResults, StageScoring, StageTransition, TeamEntry,
    TeamStageResult, TeamStanding, Tiebreaker, TiebreakerRule, WildcardCriteria,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashMap};

const WILDCARD: &str = "Wildcard";
const POOL_WINNER: &str = "Pool Winner";

/// Standings of one pool, best first, with `pool_placement` filled in.
///
/// Only decided matches count. Ties on tournament points are broken by
/// `tiebreakers` in priority order, then by team name.
pub fn calculate_pool_standings(
    pool: &Pool,
    tiebreakers: &[TiebreakerRule],
    draw_seed: u64,
) -> Vec<TeamStanding> {
    let win_rates: HashMap<&str, f64> = pool
        .teams
        .iter()
        .map(|t| (t.as_str(), pool_win_rate(pool, t)))
        .collect();

    let standings = pool
        .teams
        .iter()
        .map(|team| team_standing(pool, team, &win_rates))
        .collect();

    let mut ranked = rank_standings(standings, tiebreakers, draw_seed);
    for (i, s) in ranked.iter_mut().enumerate() {
        s.pool_placement = Some(i as u32 + 1);
    }
    ranked
}

fn team_standing(pool: &Pool, team: &str, win_rates: &HashMap<&str, f64>) -> TeamStanding {
    let mut s = TeamStanding::new(team);
    s.pool_id = Some(pool.pool_id.clone());
    let mut opponent_rates = Vec::new();

    for m in pool.matches.iter().filter(|m| is_decided(m)) {
        let (own, opp, opponent) = if m.team1 == team {
            (m.team1_score, m.team2_score, &m.team2)
        } else if m.team2 == team {
            (m.team2_score, m.team1_score, &m.team1)
        } else {
            continue;
        };
        let (own, opp) = (own.unwrap_or(0), opp.unwrap_or(0));
        s.game_points += own;
        s.points_allowed += opp;

        let h2h = s.head_to_head.entry(opponent.clone()).or_default();
        h2h.points_for += own;
        h2h.points_against += opp;
        if m.is_draw {
            s.draws += 1;
        } else if m.winner.as_deref() == Some(team) {
            s.wins += 1;
            h2h.wins += 1;
        } else if m.winner.is_some() {
            s.losses += 1;
            h2h.losses += 1;
        }
        opponent_rates.push(win_rates.get(opponent.as_str()).copied().unwrap_or(0.0));
    }

    s.matches_played = s.wins + s.losses + s.draws;
    s.point_differential = i64::from(s.game_points) - i64::from(s.points_allowed);
    s.win_percentage = if s.matches_played > 0 {
        f64::from(s.wins) / f64::from(s.matches_played)
    } else {
        0.0
    };
    s.points = s
        .wins
        .saturating_mul(pool.settings.points_per_win)
        .saturating_add(s.draws.saturating_mul(pool.settings.points_per_draw));
    s.strength_of_schedule = if opponent_rates.is_empty() {
        0.0
    } else {
        opponent_rates.iter().sum::<f64>() / opponent_rates.len() as f64
    };
    s
}

/// Completed with a winner or marked as a draw. A completed match with
/// neither is ignored everywhere.
fn is_decided(m: &PoolMatch) -> bool {
    m.completed && (m.is_draw || m.winner.is_some())
}

/// Share of a team's decided pool matches that it won.
fn pool_win_rate(pool: &Pool, team: &str) -> f64 {
    let played: Vec<_> = pool
        .matches
        .iter()
        .filter(|m| is_decided(m) && (m.team1 == team || m.team2 == team))
        .collect();
    if played.is_empty() {
        return 0.0;
    }
    let won = played
        .iter()
        .filter(|m| m.winner.as_deref() == Some(team))
        .count();
    won as f64 / played.len() as f64
}

/// Ranking criteria in the order they are consulted.
#[derive(Clone, Copy)]
enum Criterion {
    Points,
    Rule(Tiebreaker),
}

/// Rank standings best first: tournament points, then `tiebreakers` by
/// priority, then team name.
///
/// Head-to-head and common-opponent tiebreaks are evaluated among the teams
/// still tied at that point, so the order does not depend on input order.
pub fn rank_standings(
    standings: Vec<TeamStanding>,
    tiebreakers: &[TiebreakerRule],
    draw_seed: u64,
) -> Vec<TeamStanding> {
    let mut rules: Vec<TiebreakerRule> = tiebreakers.to_vec();
    rules.sort_by_key(|r| r.priority);
    let criteria: Vec<Criterion> = std::iter::once(Criterion::Points)
        .chain(rules.iter().map(|r| Criterion::Rule(r.method)))
        .collect();
    let draws = draw_keys(&standings, &rules, draw_seed);
    rank_by_criteria(
        standings,
        &criteria,
        &|s, group, criterion| criterion_key(s, group, criterion, &draws),
        &|s| s.team.as_str(),
    )
}

fn criterion_key(
    s: &TeamStanding,
    group: &[TeamStanding],
    criterion: Criterion,
    draws: &HashMap<String, u32>,
) -> TieKey {
    let rule = match criterion {
        Criterion::Points => return [f64::from(s.points), 0.0],
        Criterion::Rule(rule) => rule,
    };
    match rule {
        Tiebreaker::HeadToHeadRecord => {
            let (mut net_wins, mut net_points) = (0i64, 0i64);
            for other in group.iter().filter(|o| o.team != s.team) {
                if let Some(h) = s.head_to_head.get(&other.team) {
                    net_wins += i64::from(h.wins) - i64::from(h.losses);
                    net_points += i64::from(h.points_for) - i64::from(h.points_against);
                }
            }
            [net_wins as f64, net_points as f64]
        }
        Tiebreaker::PointDifferential => [s.point_differential as f64, 0.0],
        Tiebreaker::TotalPointsScored => [f64::from(s.game_points), 0.0],
        Tiebreaker::TotalPointsAllowed => [-f64::from(s.points_allowed), 0.0],
        Tiebreaker::WinsVsCommonOpponents => {
            let wins: u32 = common_opponents(group)
                .iter()
                .filter_map(|o| s.head_to_head.get(*o))
                .map(|h| h.wins)
                .sum();
            [f64::from(wins), 0.0]
        }
        Tiebreaker::StrengthOfSchedule => [s.strength_of_schedule, 0.0],
        Tiebreaker::RandomDraw => [f64::from(draws.get(&s.team).copied().unwrap_or(0)), 0.0],
    }
}

/// Opponents every team of `group` has played.
fn common_opponents(group: &[TeamStanding]) -> BTreeSet<&str> {
    let mut iter = group.iter();
    let Some(first) = iter.next() else {
        return BTreeSet::new();
    };
    let mut common: BTreeSet<&str> = first.head_to_head.keys().map(String::as_str).collect();
    for s in iter {
        common.retain(|o| s.head_to_head.contains_key(*o));
    }
    common
}

/// Draw values for `random-draw`, assigned in team-name order from a seeded
/// generator so equal inputs always draw equally.
fn draw_keys(
    standings: &[TeamStanding],
    rules: &[TiebreakerRule],
    draw_seed: u64,
) -> HashMap<String, u32> {
    if !rules.iter().any(|r| r.method == Tiebreaker::RandomDraw) {
        return HashMap::new();
    }
    let mut teams: Vec<&str> = standings.iter().map(|s| s.team.as_str()).collect();
    teams.sort_unstable();
    let mut rng = StdRng::seed_from_u64(draw_seed);
    teams
        .into_iter()
        .map(|t| (t.to_string(), rng.gen::<u32>()))
        .collect()
}

/// Pick advancing teams out of pool play and seed them for the next stage.
pub fn calculate_pool_advancement(pools: &[Pool], policy: &AdvancementPolicy) -> AdvancementResult {
    let tiebreakers = &policy.tiebreakers;
    let mut per_pool = Vec::with_capacity(pools.len());
    let mut all = Vec::new();
    for pool in pools {
        let standings = calculate_pool_standings(pool, tiebreakers, policy.draw_seed);
        all.extend(standings.iter().cloned());
        per_pool.push(standings);
    }
    let ranked_all = rank_standings(all, tiebreakers, policy.draw_seed);

    let mut advancing: Vec<TeamStanding> = match policy.advancement_type {
        AdvancementType::TopNPerPool => per_pool
            .into_iter()
            .flat_map(|standings| {
                standings
                    .into_iter()
                    .take(policy.teams_advancing_per_pool)
            })
            .collect(),
        AdvancementType::TopNOverall => ranked_all
            .iter()
            .take(policy.total_teams_advancing)
            .cloned()
            .collect(),
        AdvancementType::Percentage => ranked_all
            .iter()
            .take(ranked_all.len() / 2)
            .cloned()
            .collect(),
    };
    for s in &mut advancing {
        s.advancement_reason = Some(placement_reason(s.pool_placement.unwrap_or(1)));
    }

    let mut wildcards = Vec::new();
    if policy.wildcard_spots > 0 {
        let mut eligible: Vec<TeamStanding> = ranked_all
            .iter()
            .filter(|s| !contains_team(&advancing, &s.team))
            .cloned()
            .collect();
        match policy.wildcard_criteria {
            WildcardCriteria::BestRecord => {}
            WildcardCriteria::BestPointDifferential => {
                eligible.sort_by(|a, b| b.point_differential.cmp(&a.point_differential))
            }
            WildcardCriteria::BestStrengthOfSchedule => eligible
                .sort_by(|a, b| b.strength_of_schedule.total_cmp(&a.strength_of_schedule)),
        }
        wildcards = eligible
            .into_iter()
            .take(policy.wildcard_spots)
            .map(|mut s| {
                s.advancement_reason = Some(WILDCARD.to_string());
                s
            })
            .collect();
        advancing.extend(wildcards.iter().cloned());
    }

    let eliminated: Vec<TeamStanding> = ranked_all
        .iter()
        .filter(|s| !contains_team(&advancing, &s.team))
        .cloned()
        .collect();

    let seeding_order = seed_advancing(&advancing, &ranked_all);
    let mut rules = tiebreakers.clone();
    rules.sort_by_key(|r| r.priority);

    log::debug!(
        "Pool advancement: {} of {} teams advance ({} wildcard)",
        advancing.len(),
        ranked_all.len(),
        wildcards.len()
    );

    AdvancementResult {
        advancing_teams: advancing,
        eliminated_teams: eliminated,
        seeding_order,
        tiebreakers_used: rules.into_iter().map(|r| r.method).collect(),
        wildcard_selections: wildcards,
    }
}

fn contains_team(standings: &[TeamStanding], team: &str) -> bool {
    standings.iter().any(|s| s.team == team)
}

/// Cross-pool seeding: pool winners first, then runners-up, then everyone
/// else who advanced on placement, then wildcards. Inside each tier teams
/// are ordered by points, then point differential, then overall rank.
fn seed_advancing(advancing: &[TeamStanding], ranked_all: &[TeamStanding]) -> Vec<TeamEntry> {
    let overall_rank = |team: &str| ranked_all.iter().position(|s| s.team == team);
    let tier = |s: &TeamStanding| {
        if s.advancement_reason.as_deref() == Some(WILDCARD) {
            3
        } else {
            match s.pool_placement {
                Some(1) => 0,
                Some(2) => 1,
                _ => 2,
            }
        }
    };

    let mut ordered: Vec<&TeamStanding> = advancing.iter().collect();
    ordered.sort_by(|a, b| {
        tier(a)
            .cmp(&tier(b))
            .then(b.points.cmp(&a.points))
            .then(b.point_differential.cmp(&a.point_differential))
            .then(overall_rank(&a.team).cmp(&overall_rank(&b.team)))
    });

    let total = ordered.len() as u32;
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            let seed = i as u32 + 1;
            let reason = s
                .advancement_reason
                .clone()
                .unwrap_or_else(|| placement_reason(s.pool_placement.unwrap_or(1)));
            TeamEntry {
                team: s.team.clone(),
                seed,
                bracket_position: mirrored_position(seed, total),
                seeding_justification: Some(reason),
            }
        })
        .collect()
}

fn placement_reason(placement: u32) -> String {
    if placement == 1 {
        POOL_WINNER.to_string()
    } else {
        format!("Pool {}", ordinal(placement))
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, ..., `11th`, `21st`.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Run a full pool-play transition and summarise it as stage results.
pub fn execute_pool_transition(
    pools: &[Pool],
    transition: &StageTransition,
    stage_number: u32,
) -> StageResults {
    let advancement = calculate_pool_advancement(pools, &transition.advancement_policy());

    let mut results = Vec::with_capacity(
        advancement.advancing_teams.len() + advancement.eliminated_teams.len(),
    );
    for entry in &advancement.seeding_order {
        if let Some(s) = advancement.advancing_teams.iter().find(|s| s.team == entry.team) {
            let mut line = stage_result(s, entry.seed);
            line.qualified = true;
            line.advancement_method = Some(advancement_method(s));
            line.seed_for_next_stage = Some(entry.seed);
            line.next_stage_bracket_position = Some(entry.bracket_position);
            results.push(line);
        }
    }
    for s in &advancement.eliminated_teams {
        let placement = results.len() as u32 + 1;
        results.push(stage_result(s, placement));
    }

    StageResults {
        stage_number,
        stage_name: "Pool Play".to_string(),
        stage_type: "pool-play".to_string(),
        advancement_summary: AdvancementSummary::from_results(
            &results,
            !advancement.tiebreakers_used.is_empty(),
        ),
        results,
        advancing_teams: advancement
            .seeding_order
            .iter()
            .map(|e| e.team.clone())
            .collect(),
        eliminated_teams: advancement
            .eliminated_teams
            .iter()
            .map(|s| s.team.clone())
            .collect(),
        next_stage_seeding: advancement.seeding_order,
        completed_at: Utc::now(),
    }
}

fn advancement_method(s: &TeamStanding) -> AdvancementMethod {
    match s.advancement_reason.as_deref() {
        Some(WILDCARD) => AdvancementMethod::Wildcard,
        Some(POOL_WINNER) => AdvancementMethod::PoolWinner,
        _ => AdvancementMethod::RunnerUp,
    }
}

/// Stage line with the qualification fields left empty.
fn stage_result(s: &TeamStanding, final_placement: u32) -> TeamStageResult {
    TeamStageResult {
        team: s.team.clone(),
        final_placement,
        record: StageRecord::new(s.wins, s.losses, s.draws),
        scoring: StageScoring::new(
            f64::from(s.points),
            s.game_points,
            s.points_allowed,
            s.matches_played,
        ),
        strength_of_schedule: s.strength_of_schedule,
        qualified: false,
        advancement_method: None,
        seed_for_next_stage: None,
        next_stage_bracket_position: None,
    }
}
