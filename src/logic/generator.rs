//! Entry points: stage results in, a complete bracket structure out.

use crate::logic::double_elimination::generate_double_elimination_bracket;
use crate::logic::ids::MatchIdGenerator;
use crate::logic::pool_advancement::calculate_pool_advancement;
use crate::logic::round_robin::generate_round_robin_matches;
use crate::logic::seeding::total_rounds;
use crate::logic::single_elimination::generate_single_elimination_bracket;
use crate::logic::swiss::execute_swiss_to_elimination;
use crate::logic::validation::{validate_bracket_generation, DEFAULT_MAX_BRACKET_SIZE};
use crate::models::{
    BracketError, BracketFormat, BracketMatch, BracketStructure, Pool, SeedingInfo,
    StageTransition, SwissAdvancementCriteria, SwissRound, TeamEntry, TeamId, ValidationReport,
};

/// Build an elimination bracket of `format` for a best-first seeding order.
/// Formats other than double elimination are built as single elimination.
pub fn generate_seeded_elimination_bracket(
    seeding_order: &[TeamEntry],
    format: BracketFormat,
    tournament_id: &str,
    ids: &mut dyn MatchIdGenerator,
) -> Result<Vec<BracketMatch>, BracketError> {
    match format.elimination() {
        BracketFormat::DoubleElimination => {
            generate_double_elimination_bracket(seeding_order, tournament_id, ids)
        }
        _ => generate_single_elimination_bracket(seeding_order, tournament_id, ids),
    }
}

/// Rounds played in an elimination bracket of `format` for `team_count` teams.
/// Double elimination counts the winners side plus the losers side.
pub fn elimination_rounds(team_count: usize, format: BracketFormat) -> u32 {
    let rounds = total_rounds(team_count);
    match format.elimination() {
        BracketFormat::DoubleElimination => 2 * rounds - 1,
        _ => rounds,
    }
}

/// Bracket generation with a configured field-size limit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BracketGenerator {
    pub max_size: usize,
}

impl Default for BracketGenerator {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_BRACKET_SIZE,
        }
    }
}

impl BracketGenerator {
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    pub fn validate(&self, team_count: usize, format: BracketFormat) -> ValidationReport {
        validate_bracket_generation(team_count, format, self.max_size)
    }

    /// Seed pool-play qualifiers into an elimination bracket.
    pub fn generate_bracket_from_pools(
        &self,
        pools: &[Pool],
        transition: &StageTransition,
        tournament_id: &str,
        ids: &mut dyn MatchIdGenerator,
    ) -> Result<BracketStructure, BracketError> {
        let advancement = calculate_pool_advancement(pools, &transition.advancement_policy());
        let format = transition.bracket_type.elimination();
        self.validate(advancement.seeding_order.len(), format)
            .into_result()?;

        let matches = generate_seeded_elimination_bracket(
            &advancement.seeding_order,
            format,
            tournament_id,
            ids,
        )?;
        log::debug!(
            "Generated {} bracket for tournament {} from {} pools: {} matches",
            format,
            tournament_id,
            pools.len(),
            matches.len()
        );

        Ok(BracketStructure {
            total_rounds: elimination_rounds(advancement.seeding_order.len(), format),
            total_matches: matches.len(),
            matches,
            format,
            seeding_info: SeedingInfo {
                seeding_method: transition.seeding_rules.method.as_str().to_string(),
                advancement_source: "pool-play".to_string(),
                cross_pool_seeding: transition.seeding_rules.cross_pool_seeding,
            },
            advancement_results: Some(advancement),
        })
    }

    /// Seed Swiss qualifiers into an elimination bracket.
    pub fn generate_bracket_from_swiss(
        &self,
        rounds: &[SwissRound],
        teams: &[TeamId],
        criteria: &SwissAdvancementCriteria,
        bracket_type: BracketFormat,
        tournament_id: &str,
        ids: &mut dyn MatchIdGenerator,
    ) -> Result<BracketStructure, BracketError> {
        let (results, _) = execute_swiss_to_elimination(rounds, criteria, teams)?;
        let seeding = results.next_stage_seeding;
        let format = bracket_type.elimination();
        self.validate(seeding.len(), format).into_result()?;

        let matches = generate_seeded_elimination_bracket(&seeding, format, tournament_id, ids)?;
        log::debug!(
            "Generated {} bracket for tournament {} from {} Swiss rounds: {} matches",
            format,
            tournament_id,
            rounds.len(),
            matches.len()
        );

        Ok(BracketStructure {
            total_rounds: elimination_rounds(seeding.len(), format),
            total_matches: matches.len(),
            matches,
            format,
            seeding_info: SeedingInfo {
                seeding_method: "swiss-rankings".to_string(),
                advancement_source: "swiss-system".to_string(),
                cross_pool_seeding: false,
            },
            advancement_results: None,
        })
    }

    /// Every advancing team plays every other once.
    pub fn generate_round_robin_from_pools(
        &self,
        advancing_teams: &[TeamId],
        tournament_id: &str,
        ids: &mut dyn MatchIdGenerator,
    ) -> Result<BracketStructure, BracketError> {
        self.validate(advancing_teams.len(), BracketFormat::RoundRobin)
            .into_result()?;
        let matches = generate_round_robin_matches(advancing_teams, tournament_id, ids)?;
        log::debug!(
            "Generated round robin for tournament {}: {} teams, {} matches",
            tournament_id,
            advancing_teams.len(),
            matches.len()
        );

        Ok(BracketStructure {
            total_rounds: 1,
            total_matches: matches.len(),
            matches,
            format: BracketFormat::RoundRobin,
            seeding_info: SeedingInfo {
                seeding_method: "pool-advancement".to_string(),
                advancement_source: "pool-play".to_string(),
                cross_pool_seeding: true,
            },
            advancement_results: None,
        })
    }
}
