//! Integration tests for seeding and the bracket builders.

use stage_brackets::{
    bracket_positions, bracket_size, generate_double_elimination_bracket,
    generate_round_robin_matches, generate_single_elimination_bracket, losers_matches_in_round,
    losers_rounds, seeding_order, validate_bracket_generation, BracketError, BracketFormat,
    BracketMatch, BracketSegment, MatchStatus, SequentialIds, TeamEntry, UuidIds, ValidationIssue,
};

fn entries(n: usize) -> Vec<TeamEntry> {
    TeamEntry::from_ranked((1..=n).map(|i| format!("T{i}")))
}

fn single(n: usize) -> Vec<BracketMatch> {
    generate_single_elimination_bracket(&entries(n), "t1", &mut SequentialIds::new()).unwrap()
}

fn in_round(matches: &[BracketMatch], segment: Option<BracketSegment>, round: u32) -> usize {
    matches
        .iter()
        .filter(|m| m.bracket == segment && m.round == round)
        .count()
}

#[test]
fn seeding_order_tables() {
    assert_eq!(seeding_order(2).unwrap(), [1, 2]);
    assert_eq!(seeding_order(4).unwrap(), [1, 4, 2, 3]);
    assert_eq!(seeding_order(8).unwrap(), [1, 8, 4, 5, 2, 7, 3, 6]);
    assert_eq!(
        seeding_order(16).unwrap(),
        [1, 16, 8, 9, 4, 13, 5, 12, 2, 15, 7, 10, 3, 14, 6, 11]
    );
    assert_eq!(
        seeding_order(32).unwrap(),
        [
            1, 32, 16, 17, 8, 25, 9, 24, 4, 29, 13, 20, 5, 28, 12, 21, 2, 31, 15, 18, 7, 26, 10,
            23, 3, 30, 14, 19, 6, 27, 11, 22
        ]
    );
}

#[test]
fn top_two_seeds_sit_in_opposite_halves() {
    for size in [2usize, 4, 8, 16, 32, 64] {
        let order = seeding_order(size).unwrap();
        let half = size / 2;
        assert!(order[..half].contains(&1), "size {size}");
        assert!(order[half..].contains(&2), "size {size}");
    }
}

#[test]
fn positions_leave_byes_for_missing_ranks() {
    let teams = entries(5);
    let slots = bracket_positions(&teams, 8).unwrap();
    let names: Vec<Option<&str>> = slots.iter().map(|s| s.map(|e| e.team.as_str())).collect();
    assert_eq!(
        names,
        [
            Some("T1"),
            None,
            Some("T4"),
            Some("T5"),
            Some("T2"),
            None,
            Some("T3"),
            None
        ]
    );
}

#[test]
fn single_elimination_match_count_is_size_minus_one() {
    for n in 2..=64 {
        let matches = single(n);
        assert_eq!(matches.len(), bracket_size(n) - 1, "{n} teams");
        assert!(matches.iter().all(|m| m.status == MatchStatus::Upcoming));
        assert!(matches.iter().all(|m| m.tournament_id == "t1"));
    }
}

#[test]
fn five_teams_get_three_walkovers() {
    let matches = single(5);
    let first: Vec<&BracketMatch> = matches.iter().filter(|m| m.round == 1).collect();
    assert_eq!(first.len(), 4);

    let byes: Vec<&&BracketMatch> = first.iter().filter(|m| m.is_bye()).collect();
    assert_eq!(byes.len(), 3);
    let bye_winners: Vec<&str> = byes.iter().filter_map(|m| m.winner.as_deref()).collect();
    assert_eq!(bye_winners, ["T1", "T2", "T3"]);

    let full = first.iter().find(|m| !m.is_bye()).unwrap();
    assert_eq!(full.team1.as_deref(), Some("T4"));
    assert_eq!(full.team2.as_deref(), Some("T5"));
    assert_eq!(full.winner, None);

    assert_eq!(in_round(&matches, None, 2), 2);
    assert_eq!(in_round(&matches, None, 3), 1);
}

#[test]
fn sixteen_teams_fill_four_rounds() {
    let matches = single(16);
    assert_eq!(matches.len(), 15);
    for (round, expected) in [(1, 8), (2, 4), (3, 2), (4, 1)] {
        assert_eq!(in_round(&matches, None, round), expected, "round {round}");
    }

    let opener = &matches[0];
    assert_eq!(opener.team1.as_deref(), Some("T1"));
    assert_eq!(opener.team2.as_deref(), Some("T16"));
    let info = opener.seed_info.as_ref().unwrap();
    assert_eq!(info.team1_seed, Some(1));
    assert_eq!(info.team2_seed, Some(16));
    assert_eq!(info.team1_origin.as_deref(), Some("Advanced"));

    for m in matches.iter().filter(|m| m.round > 1) {
        assert!(m.team1.is_none() && m.team2.is_none() && m.winner.is_none());
        assert!(m.seed_info.is_none());
    }
}

#[test]
fn sequential_ids_make_generation_deterministic() {
    let a = single(11);
    let b = single(11);
    assert_eq!(a, b);
    assert_eq!(a[0].id, "bracket-1");
    let mut ids: Vec<&str> = a.iter().map(|m| m.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), a.len());
}

#[test]
fn uuid_ids_differ_between_generations() {
    let first = generate_single_elimination_bracket(&entries(4), "t1", &mut UuidIds).unwrap();
    let second = generate_single_elimination_bracket(&entries(4), "t1", &mut UuidIds).unwrap();
    assert_eq!(first.len(), 3);
    assert!(first.iter().all(|m| m.id.starts_with("bracket-")));

    let mut ids: Vec<&str> = first.iter().chain(&second).map(|m| m.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 6);
    assert_eq!(first[0].team1, second[0].team1);
}

#[test]
fn single_elimination_rejects_bad_fields() {
    let mut ids = SequentialIds::new();
    assert!(matches!(
        generate_single_elimination_bracket(&entries(1), "t1", &mut ids),
        Err(BracketError::NotEnoughTeams { actual: 1, .. })
    ));

    let mut teams = entries(3);
    teams[2].team = "T1".to_string();
    assert_eq!(
        generate_single_elimination_bracket(&teams, "t1", &mut ids),
        Err(BracketError::DuplicateTeam("T1".to_string()))
    );
}

#[test]
fn double_elimination_eight_teams() {
    let mut ids = SequentialIds::new();
    let matches = generate_double_elimination_bracket(&entries(8), "t1", &mut ids).unwrap();
    assert_eq!(matches.len(), 15);

    let winners = Some(BracketSegment::Winners);
    let losers = Some(BracketSegment::Losers);
    let championship = Some(BracketSegment::Championship);
    assert_eq!(in_round(&matches, winners, 1), 4);
    assert_eq!(in_round(&matches, winners, 2), 2);
    assert_eq!(in_round(&matches, winners, 3), 1);
    for (round, expected) in [(1, 2), (2, 2), (3, 1), (4, 1)] {
        assert_eq!(in_round(&matches, losers, round), expected, "losers round {round}");
    }
    assert_eq!(in_round(&matches, championship, 1), 1);
    assert_eq!(in_round(&matches, championship, 2), 1);

    assert_eq!(matches[0].id, "winners-1");
    assert_eq!(matches[7].id, "losers-8");
    assert_eq!(matches[13].id, "championship-14");
    assert_eq!(matches[14].id, "championship-reset-15");

    assert!(matches
        .iter()
        .filter(|m| m.bracket != winners || m.round > 1)
        .all(|m| m.team1.is_none() && m.team2.is_none()));
}

#[test]
fn losers_side_shape() {
    assert_eq!(losers_rounds(4), 2);
    assert_eq!(losers_matches_in_round(1, 4), 1);
    assert_eq!(losers_matches_in_round(2, 4), 1);

    assert_eq!(losers_rounds(16), 6);
    let sixteen: Vec<u32> = (1..=6).map(|r| losers_matches_in_round(r, 16)).collect();
    assert_eq!(sixteen, [4, 4, 2, 2, 1, 1]);
}

#[test]
fn double_elimination_needs_four_teams() {
    let mut ids = SequentialIds::new();
    assert!(matches!(
        generate_double_elimination_bracket(&entries(3), "t1", &mut ids),
        Err(BracketError::NotEnoughTeams {
            format: BracketFormat::DoubleElimination,
            required: 4,
            actual: 3
        })
    ));
}

#[test]
fn round_robin_pairs_every_team_once() {
    let teams: Vec<String> = ["A", "B", "C", "D"].iter().map(|t| t.to_string()).collect();
    let mut ids = SequentialIds::new();
    let matches = generate_round_robin_matches(&teams, "t1", &mut ids).unwrap();

    let pairs: Vec<(String, String)> = matches
        .iter()
        .map(|m| (m.team1.clone().unwrap(), m.team2.clone().unwrap()))
        .collect();
    let expected: Vec<(String, String)> = [
        ("A", "B"),
        ("A", "C"),
        ("A", "D"),
        ("B", "C"),
        ("B", "D"),
        ("C", "D"),
    ]
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect();
    assert_eq!(pairs, expected);
    assert!(matches.iter().all(|m| m.round == 1 && m.bracket.is_none()));
    let positions: Vec<u32> = matches.iter().map(|m| m.position).collect();
    assert_eq!(positions, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn round_robin_size_formula() {
    for n in 2..=12usize {
        let teams: Vec<String> = (0..n).map(|i| format!("T{i}")).collect();
        let matches =
            generate_round_robin_matches(&teams, "t1", &mut SequentialIds::new()).unwrap();
        assert_eq!(matches.len(), n * (n - 1) / 2);
    }
}

#[test]
fn validator_boundaries() {
    let max = 64;
    let single = BracketFormat::SingleElimination;
    let double = BracketFormat::DoubleElimination;

    assert_eq!(
        validate_bracket_generation(1, single, max).errors,
        [ValidationIssue::TooFewTeams]
    );
    assert!(validate_bracket_generation(2, single, max).valid);
    assert!(validate_bracket_generation(64, single, max).valid);
    assert_eq!(
        validate_bracket_generation(65, single, max).errors,
        [ValidationIssue::TooManyTeams { max: 64 }]
    );
    assert_eq!(
        validate_bracket_generation(3, double, max).errors,
        [ValidationIssue::DoubleEliminationTooSmall]
    );
    assert!(validate_bracket_generation(4, double, max).valid);

    let empty = validate_bracket_generation(0, double, max);
    assert!(!empty.valid);
    assert_eq!(
        empty.errors,
        [ValidationIssue::TooFewTeams, ValidationIssue::DoubleEliminationTooSmall]
    );
}

#[test]
fn validation_messages() {
    assert_eq!(
        ValidationIssue::TooFewTeams.to_string(),
        "Need at least 2 teams for bracket generation"
    );
    assert_eq!(
        ValidationIssue::TooManyTeams { max: 64 }.to_string(),
        "Maximum 64 teams supported"
    );
}
