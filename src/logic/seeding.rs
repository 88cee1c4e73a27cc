//! Standard tournament seeding: maps seed ranks onto physical bracket slots.
//!
//! Seed 1 meets seed N in round 1, seed 2 meets seed N-1, and the two top
//! seeds sit in opposite halves so they can only meet in the final.

use crate::models::{BracketError, TeamEntry};

/// Bracket size for `team_count` teams: next power of two, at least 2.
pub fn bracket_size(team_count: usize) -> usize {
    team_count.max(2).next_power_of_two()
}

/// Rounds needed for `team_count` teams (`ceil(log2(n))`, at least 1).
pub fn total_rounds(team_count: usize) -> u32 {
    bracket_size(team_count).trailing_zeros()
}

/// Seed rank for every slot of a bracket of `size` slots (1-based ranks).
///
/// Built by doubling: the order for `size` interleaves the order for
/// `size / 2` with its mirror `size + 1 - seed`. Size 8 gives
/// `[1, 8, 4, 5, 2, 7, 3, 6]`.
pub fn seeding_order(size: usize) -> Result<Vec<u32>, BracketError> {
    if size < 2 || !size.is_power_of_two() {
        return Err(BracketError::NotPowerOfTwo(size));
    }
    Ok(build_order(size))
}

fn build_order(size: usize) -> Vec<u32> {
    if size == 2 {
        return vec![1, 2];
    }
    let mirror = size as u32 + 1;
    build_order(size / 2)
        .into_iter()
        .flat_map(|seed| [seed, mirror - seed])
        .collect()
}

/// Place a best-first seeding order onto `size` slots.
///
/// Slot `i` gets the entry ranked `seeding_order(size)[i]`; ranks past the
/// end of `entries` leave the slot empty (a bye).
pub fn bracket_positions(
    entries: &[TeamEntry],
    size: usize,
) -> Result<Vec<Option<&TeamEntry>>, BracketError> {
    let order = seeding_order(size)?;
    Ok(order
        .into_iter()
        .map(|rank| entries.get(rank as usize - 1))
        .collect())
}

/// Position a seed takes in a "1 vs N, 2 vs N-1" listing of `total` teams.
pub fn mirrored_position(seed: u32, total: u32) -> u32 {
    if seed * 2 <= total {
        seed
    } else {
        total - seed + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_size_rounds_up() {
        assert_eq!(bracket_size(2), 2);
        assert_eq!(bracket_size(5), 8);
        assert_eq!(bracket_size(16), 16);
        assert_eq!(bracket_size(17), 32);
        assert_eq!(total_rounds(5), 3);
        assert_eq!(total_rounds(64), 6);
    }

    #[test]
    fn rejects_sizes_that_are_not_powers_of_two() {
        assert_eq!(seeding_order(6), Err(BracketError::NotPowerOfTwo(6)));
        assert_eq!(seeding_order(1), Err(BracketError::NotPowerOfTwo(1)));
        assert_eq!(seeding_order(0), Err(BracketError::NotPowerOfTwo(0)));
    }

    #[test]
    fn order_is_a_permutation_with_mirrored_pairs() {
        let order = seeding_order(64).unwrap();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=64).collect::<Vec<u32>>());
        for pair in order.chunks(2) {
            assert_eq!(pair[0] + pair[1], 65);
        }
    }

    #[test]
    fn mirrored_position_folds_the_bottom_half() {
        assert_eq!(mirrored_position(1, 8), 1);
        assert_eq!(mirrored_position(4, 8), 4);
        assert_eq!(mirrored_position(5, 8), 4);
        assert_eq!(mirrored_position(8, 8), 1);
    }
}
