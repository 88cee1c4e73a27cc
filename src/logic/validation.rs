//! Sanity checks run before bracket generation.

use crate::logic::double_elimination::MIN_DOUBLE_ELIMINATION_TEAMS;
use crate::models::{BracketError, BracketFormat, ValidationIssue, ValidationReport};
use std::collections::HashSet;

/// Largest field supported unless the caller says otherwise.
pub const DEFAULT_MAX_BRACKET_SIZE: usize = 64;

/// Check a team count against a bracket format. Collects every issue rather
/// than stopping at the first one.
pub fn validate_bracket_generation(
    team_count: usize,
    format: BracketFormat,
    max_size: usize,
) -> ValidationReport {
    let mut errors = Vec::new();
    if team_count < 2 {
        errors.push(ValidationIssue::TooFewTeams);
    }
    if team_count > max_size {
        errors.push(ValidationIssue::TooManyTeams { max: max_size });
    }
    if format == BracketFormat::DoubleElimination && team_count < MIN_DOUBLE_ELIMINATION_TEAMS {
        errors.push(ValidationIssue::DoubleEliminationTooSmall);
    }
    if !errors.is_empty() {
        log::warn!(
            "Rejected {} bracket for {} teams: {} issue(s)",
            format,
            team_count,
            errors.len()
        );
    }
    ValidationReport::from_issues(errors)
}

/// Fail with `DuplicateTeam` on the first team seen twice.
pub(crate) fn ensure_unique<'a>(teams: impl IntoIterator<Item = &'a str>) -> Result<(), BracketError> {
    let mut seen = HashSet::new();
    for team in teams {
        if !seen.insert(team) {
            return Err(BracketError::DuplicateTeam(team.to_string()));
        }
    }
    Ok(())
}
