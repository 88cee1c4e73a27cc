//! Tie-group ranking shared by pool and Swiss standings.

use std::cmp::Ordering;

/// Sort key for one criterion; compared lexicographically, higher is better.
pub(crate) type TieKey = [f64; 2];

/// Rank `group` best first by `criteria`, falling back to `name`.
///
/// Every criterion only reorders items still tied after the previous ones,
/// and `key` sees exactly that tied group. Relative criteria (head-to-head)
/// are therefore evaluated among the tied teams only, and the result never
/// depends on input order.
pub(crate) fn rank_by_criteria<T, C: Copy>(
    mut group: Vec<T>,
    criteria: &[C],
    key: &dyn Fn(&T, &[T], C) -> TieKey,
    name: &dyn Fn(&T) -> &str,
) -> Vec<T> {
    let Some((first, rest)) = criteria.split_first() else {
        group.sort_by(|a, b| name(a).cmp(name(b)));
        return group;
    };
    if group.len() < 2 {
        return group;
    }

    let keys: Vec<TieKey> = group.iter().map(|item| key(item, &group, *first)).collect();
    let mut keyed: Vec<(TieKey, T)> = keys.into_iter().zip(group).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(b, a));

    let mut ranked = Vec::with_capacity(keyed.len());
    let mut tied = Vec::new();
    let mut current: Option<TieKey> = None;
    for (k, item) in keyed {
        if let Some(prev) = current {
            if compare_keys(&prev, &k) != Ordering::Equal {
                ranked.extend(rank_by_criteria(std::mem::take(&mut tied), rest, key, name));
            }
        }
        current = Some(k);
        tied.push(item);
    }
    ranked.extend(rank_by_criteria(tied, rest, key, name));
    ranked
}

fn compare_keys(a: &TieKey, b: &TieKey) -> Ordering {
    a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1]))
}
