//! Errors and validation issues for bracket generation.

use crate::models::bracket::BracketFormat;
use crate::models::entry::TeamId;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// A single reason a bracket request is not acceptable.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("Need at least 2 teams for bracket generation")]
    TooFewTeams,
    #[error("Maximum {max} teams supported")]
    TooManyTeams { max: usize },
    #[error("Double elimination requires at least 4 teams")]
    DoubleEliminationTooSmall,
}

impl Serialize for ValidationIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of `validate_bracket_generation`: valid when `errors` is empty.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Turn a failed report into an error.
    pub fn into_result(self) -> Result<(), BracketError> {
        if self.valid {
            Ok(())
        } else {
            Err(BracketError::Invalid(self.errors))
        }
    }
}

/// Errors returned by builders and the facade.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BracketError {
    /// The builder for `format` needs at least `required` teams.
    #[error("{format} needs at least {required} teams (got {actual})")]
    NotEnoughTeams {
        format: BracketFormat,
        required: usize,
        actual: usize,
    },
    /// Seeding tables only exist for power-of-two bracket sizes.
    #[error("Bracket size {0} is not a power of two")]
    NotPowerOfTwo(usize),
    /// The same team appears twice in one seeding order or team list.
    #[error("Team {0} appears more than once")]
    DuplicateTeam(TeamId),
    /// Input refers to a team the stage does not know about.
    #[error("Unknown team {0}")]
    UnknownTeam(TeamId),
    /// The validator rejected the request.
    #[error("Invalid bracket request: {}", join_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
